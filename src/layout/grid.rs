use std::ops::Range;

use crate::models::MediaId;

/// Maps an ordered id list onto a fixed-column grid.
///
/// Pure function of `(ids, columns, gap)`: cell `(row, column)` wraps
/// `ids[row * columns + column]`, or is empty past the end of the list.
/// Nothing here knows about rendering, so the same mapping feeds a windowed
/// renderer (see [`GridGeometry::visible_rows`]) and a plain full render.
#[derive(Debug, Clone, Copy)]
pub struct VirtualGridMapper<'a> {
    ids: &'a [MediaId],
    columns: usize,
    gap: f32,
}

/// One grid slot. `media` is `None` for the trailing empty cells of the
/// last row, which render nothing and take no space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a> {
    pub row: usize,
    pub column: usize,
    pub index: usize,
    pub media: Option<&'a MediaId>,
    pub is_last_column: bool,
}

impl GridCell<'_> {
    pub fn is_empty(&self) -> bool {
        self.media.is_none()
    }
}

/// Placement of a cell inside the pane, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

impl<'a> VirtualGridMapper<'a> {
    /// A zero column count is treated as one column; a negative gap as zero.
    pub fn new(ids: &'a [MediaId], columns: u32, gap: f32) -> Self {
        Self {
            ids,
            columns: columns.max(1) as usize,
            gap: gap.max(0.0),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `ceil(len / columns)`.
    pub fn row_count(&self) -> usize {
        self.ids.len().div_ceil(self.columns)
    }

    /// Slots past the end of the list are empty, including indices too
    /// large to represent (reported as `usize::MAX`).
    pub fn cell_at(&self, row: usize, column: usize) -> GridCell<'a> {
        let index = row
            .checked_mul(self.columns)
            .and_then(|start| start.checked_add(column));
        let media = match index {
            Some(index) if column < self.columns => self.ids.get(index),
            _ => None,
        };
        GridCell {
            row,
            column,
            index: index.unwrap_or(usize::MAX),
            media,
            is_last_column: column + 1 == self.columns,
        }
    }

    /// Every slot of one row, empty ones included.
    pub fn row(&self, row: usize) -> Vec<GridCell<'a>> {
        (0..self.columns).map(|c| self.cell_at(row, c)).collect()
    }

    /// Non-empty cells of `rows`, in list order.
    pub fn cells_in_rows(&self, rows: Range<usize>) -> impl Iterator<Item = GridCell<'a>> + '_ {
        let end = rows.end.min(self.row_count());
        let start = rows.start.min(end);
        (start..end)
            .flat_map(move |r| (0..self.columns).map(move |c| self.cell_at(r, c)))
            .filter(|cell| !cell.is_empty())
    }

    /// Full-render fallback: every non-empty cell.
    pub fn all_cells(&self) -> impl Iterator<Item = GridCell<'a>> + '_ {
        self.cells_in_rows(0..self.row_count())
    }

    pub fn geometry(&self, container_width: f32) -> GridGeometry {
        GridGeometry::new(container_width, self.columns as u32, self.gap)
    }
}

/// Square-tile geometry for a given container width.
///
/// Interior columns are followed by `gap`; the last column is not, so a
/// row ends flush with the container edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub columns: u32,
    pub gap: f32,
    pub tile: f32,
}

impl GridGeometry {
    pub fn new(container_width: f32, columns: u32, gap: f32) -> Self {
        let columns = columns.max(1);
        let gap = gap.max(0.0);
        let gaps = gap * (columns - 1) as f32;
        let tile = ((container_width.max(0.0) - gaps) / columns as f32).max(0.0);
        Self { columns, gap, tile }
    }

    /// Distance between the tops of two consecutive rows.
    pub fn row_pitch(&self) -> f32 {
        self.tile + self.gap
    }

    pub fn rect(&self, row: usize, column: usize) -> CellRect {
        let pitch = self.row_pitch();
        CellRect {
            x: column as f32 * pitch,
            y: row as f32 * pitch,
            width: self.tile,
            height: self.tile,
        }
    }

    pub fn content_height(&self, rows: usize) -> f32 {
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.tile + (rows - 1) as f32 * self.gap
    }

    /// Rows intersecting `[scroll_offset, scroll_offset + viewport_height)`,
    /// widened by `overscan` rows on each side and clamped to the grid.
    pub fn visible_rows(
        &self,
        scroll_offset: f32,
        viewport_height: f32,
        overscan: usize,
        row_count: usize,
    ) -> Range<usize> {
        if row_count == 0 {
            return 0..0;
        }
        let pitch = self.row_pitch();
        if pitch <= 0.0 {
            return 0..row_count;
        }

        let top = scroll_offset.max(0.0);
        let bottom = top + viewport_height.max(0.0);
        let first = ((top / pitch).floor() as usize).min(row_count);
        let last = ((bottom / pitch).ceil() as usize).clamp(first, row_count);

        first.saturating_sub(overscan)..(last + overscan).min(row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<MediaId> {
        (0..n).map(|i| MediaId::new(format!("{i}.jpg"))).collect()
    }

    #[test]
    fn test_end_to_end_five_ids_two_columns() {
        let list: Vec<MediaId> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(MediaId::from)
            .collect();
        let grid = VirtualGridMapper::new(&list, 2, 4.0);
        assert_eq!(grid.row_count(), 3);

        let names = |row: usize| {
            grid.row(row)
                .iter()
                .map(|c| c.media.map(MediaId::as_str))
                .collect::<Vec<_>>()
        };
        assert_eq!(names(0), vec![Some("a"), Some("b")]);
        assert_eq!(names(1), vec![Some("c"), Some("d")]);
        assert_eq!(names(2), vec![Some("e"), None]);

        let tail = grid.cell_at(2, 1);
        assert!(tail.is_empty());
        assert!(tail.is_last_column);
    }

    #[test]
    fn test_last_column_flag() {
        let list = ids(8);
        let grid = VirtualGridMapper::new(&list, 4, 0.0);
        let flags: Vec<bool> = (0..4).map(|c| grid.cell_at(0, c).is_last_column).collect();
        assert_eq!(flags, vec![false, false, false, true]);
    }

    #[test]
    fn test_coverage_reproduces_list() {
        for n in 0..30 {
            let list = ids(n);
            for columns in 1..8u32 {
                let grid = VirtualGridMapper::new(&list, columns, 2.0);
                let covered: Vec<&MediaId> = grid.all_cells().filter_map(|c| c.media).collect();
                assert_eq!(covered.len(), n, "n={n} columns={columns}");
                assert!(covered.iter().zip(list.iter()).all(|(a, b)| *a == b));
                assert_eq!(grid.row_count(), n.div_ceil(columns as usize));
            }
        }
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        let list = ids(3);
        let grid = VirtualGridMapper::new(&list, 0, -1.0);
        assert_eq!(grid.columns(), 1);
        assert_eq!(grid.gap(), 0.0);
        assert_eq!(grid.row_count(), 3);
        assert!(grid.cell_at(0, 0).is_last_column);
    }

    #[test]
    fn test_huge_row_is_empty_without_overflow() {
        let list = ids(3);
        let mapper = VirtualGridMapper::new(&list, 3, 0.0);
        let cell = mapper.cell_at(usize::MAX / 2, 0);
        assert!(cell.is_empty());
        assert_eq!(cell.index, usize::MAX);
        assert!(mapper.cell_at(usize::MAX, usize::MAX).is_empty());
        assert!(mapper.cell_at(1, 0).is_empty());
    }

    #[test]
    fn test_out_of_range_column_is_empty() {
        let list = ids(10);
        let grid = VirtualGridMapper::new(&list, 3, 0.0);
        assert!(grid.cell_at(0, 3).is_empty());
        assert!(grid.cell_at(9, 0).is_empty());
    }

    #[test]
    fn test_geometry_rows_end_flush() {
        let geo = GridGeometry::new(1000.0, 4, 16.0);
        let last = geo.rect(0, 3);
        assert!((last.right() - 1000.0).abs() < 0.01);
        let first = geo.rect(0, 0);
        assert_eq!(first.x, 0.0);
        assert!((geo.rect(0, 1).x - (first.width + 16.0)).abs() < 0.01);
        assert!((geo.rect(1, 0).y - geo.row_pitch()).abs() < 0.01);
    }

    #[test]
    fn test_geometry_degenerate_width() {
        let geo = GridGeometry::new(10.0, 10, 16.0);
        assert_eq!(geo.tile, 0.0);
        assert_eq!(geo.content_height(0), 0.0);
    }

    #[test]
    fn test_content_height() {
        let geo = GridGeometry::new(420.0, 4, 20.0);
        assert!((geo.tile - 90.0).abs() < 0.01);
        assert!((geo.content_height(3) - (3.0 * 90.0 + 2.0 * 20.0)).abs() < 0.01);
    }

    #[test]
    fn test_visible_rows_window() {
        // tile 90, pitch 110
        let geo = GridGeometry::new(420.0, 4, 20.0);
        assert_eq!(geo.visible_rows(0.0, 220.0, 0, 100), 0..2);
        assert_eq!(geo.visible_rows(0.0, 220.0, 3, 100), 0..5);
        assert_eq!(geo.visible_rows(1100.0, 220.0, 2, 100), 8..14);
        assert_eq!(geo.visible_rows(1_000_000.0, 220.0, 2, 100), 98..100);
        assert_eq!(geo.visible_rows(0.0, 220.0, 2, 0), 0..0);
    }

    #[test]
    fn test_cells_in_rows_window() {
        let list = ids(10);
        let grid = VirtualGridMapper::new(&list, 3, 0.0);
        let indexes: Vec<usize> = grid.cells_in_rows(2..10).map(|c| c.index).collect();
        assert_eq!(indexes, vec![6, 7, 8, 9]);
        assert_eq!(grid.cells_in_rows(5..2).count(), 0);
    }
}

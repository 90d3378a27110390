pub mod columns;
pub mod grid;
pub mod zoom;

pub use columns::{
    clamp_columns, ColumnBounds, ColumnLayoutEngine, ColumnsChanged, DeviceClass,
    EffectiveColumns,
};
pub use grid::{CellRect, GridCell, GridGeometry, VirtualGridMapper};
pub use zoom::WheelQuantizer;

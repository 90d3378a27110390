use std::borrow::Borrow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tiff" | "tif" | "heic" => {
                Some(Self::Image)
            }
            "webm" | "mp4" | "mkv" | "avi" | "mov" | "m4v" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Opaque identifier of one media item inside a directory listing.
///
/// Unique within a (directory, filter) result and stable across re-fetches
/// unless the underlying file moves or is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type guessed from the id's extension, when it carries one.
    pub fn media_type(&self) -> Option<MediaType> {
        MediaType::from_path(Path::new(&self.0))
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for MediaId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for MediaId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Which media kinds a pane lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaFilter {
    #[default]
    All,
    Photos,
    Videos,
}

impl MediaFilter {
    pub fn accepts(self, media_type: MediaType) -> bool {
        match self {
            Self::All => true,
            Self::Photos => media_type == MediaType::Image,
            Self::Videos => media_type == MediaType::Video,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Photos => "photos",
            Self::Videos => "videos",
        }
    }
}

impl FromStr for MediaFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "photos" | "images" => Ok(Self::Photos),
            "videos" => Ok(Self::Videos),
            other => Err(format!("unknown media filter: {other}")),
        }
    }
}

/// Photo and video totals shown in a pane header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaCounts {
    pub photos: usize,
    pub videos: usize,
}

impl MediaCounts {
    /// Ids without a recognizable extension count as photos.
    pub fn tally(ids: &[MediaId]) -> Self {
        ids.iter().fold(Self::default(), |mut counts, id| {
            match id.media_type() {
                Some(MediaType::Video) => counts.videos += 1,
                _ => counts.photos += 1,
            }
            counts
        })
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepageError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to process")]
    NoPages,
    #[error("Page has unusable extent: {width}x{height}")]
    Geometry { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, RepageError>;

/// A page's physical size in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle with the given size anchored at the origin
    pub fn at_origin(size: PageSize) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }
}

/// Statistics about a repage run, computed before any page is touched
#[derive(Debug, Clone, PartialEq)]
pub struct RepageStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of distinct page sizes observed
    pub distinct_sizes: usize,
    /// Target size every page will adopt (None when size normalization is off)
    pub target_size: Option<PageSize>,
    /// Pages whose size differs from the target and will be rescaled
    pub pages_to_rescale: usize,
    /// Number of fully matched adjacent pairs that will exchange places
    pub pairs_swapped: usize,
}

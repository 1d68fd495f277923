// One error type for the whole program.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Config error in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
    #[error("History capacity must be at least 2, got {0}")]
    InvalidCapacity(usize),
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: usize, height: usize },
    #[error("Width range {min}..={max} is empty")]
    InvalidWidthRange { min: u32, max: u32 },
    #[error("Invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    #[error("PNG export error: {0}")]
    Export(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

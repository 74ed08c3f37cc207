use thiserror::Error;

/// Errors raised at the edges of the editor: config files, dropped images
/// and canvas dimensions supplied by the user.
///
/// Command replay has no error path; a malformed command is a bug and panics.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
}

/// Result type for fallible editor operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while reading or converting cover images.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Converted file {path} could not be read back: {reason}")]
    Verify { path: String, reason: String },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

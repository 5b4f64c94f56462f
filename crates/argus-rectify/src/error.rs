use argus_image::ImageError;

/// An error type for the rectification module.
#[derive(thiserror::Error, Debug)]
pub enum RectifyError {
    /// Error when a camera or remap table resolution is zero-area.
    #[error("Resolution must be non-zero, got {0}x{1}")]
    InvalidResolution(usize, usize),

    /// Error when an image size does not match the expected size.
    #[error("Invalid image size, expected {0}x{1} and got {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the remap table planes do not match the declared size.
    #[error("Remap plane length ({0}) does not match the table size ({1})")]
    InvalidPlaneLength(usize, usize),

    /// Error propagated from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}

use std::{error::Error, fmt, io};

use image::ImageError;

/// The vision module's result type.
pub type Result<T> = std::result::Result<T, VisionErr>;

/// Failures turning an image into a feature vector.
#[derive(Debug)]
pub enum VisionErr {
    /// The bytes aren't a supported image container.
    Undecodable(ImageError),
    /// The image decoded fine but has no pixels.
    EmptyImage { width: u32, height: u32 },
    /// Sample images only exist for the digits 0 through 9.
    InvalidDigit(u8),
    Io(io::Error),
}

impl VisionErr {
    /// Whether the error means the caller handed over an image that can't be classified.
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Self::Undecodable(_) | Self::EmptyImage { .. })
    }
}

impl fmt::Display for VisionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undecodable(e) => write!(f, "invalid image: {e}"),
            Self::EmptyImage { width, height } => {
                write!(f, "invalid image: {width}x{height} has no pixels")
            }
            Self::InvalidDigit(d) => write!(f, "there's no sample for digit {d}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for VisionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Undecodable(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Decoding happens in memory, so even `ImageError::IoError` means the bytes are malformed.
impl From<ImageError> for VisionErr {
    fn from(value: ImageError) -> Self {
        Self::Undecodable(value)
    }
}

impl From<io::Error> for VisionErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

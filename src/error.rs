use std::fmt;

/// Everything that can go wrong while producing or writing a displacement map.
#[derive(Debug)]
pub enum GlassError {
    /// The output raster could not be allocated.
    Allocation { width: u32, height: u32 },
    /// Width or height is zero, so there is no image to work with.
    DegenerateInput { width: u32, height: u32 },
    Encode(String),
    Io(std::io::Error),
    /// Unknown format name, or a lossy one (channel values carry data).
    UnsupportedFormat(String),
}

impl fmt::Display for GlassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlassError::Allocation { width, height } => {
                write!(f, "could not allocate a {}x{} displacement raster", width, height)
            }
            GlassError::DegenerateInput { width, height } => {
                write!(f, "degenerate size {}x{}: no displacement map produced", width, height)
            }
            GlassError::Encode(e) => write!(f, "Encoding error: {}", e),
            GlassError::Io(e) => write!(f, "I/O error: {}", e),
            GlassError::UnsupportedFormat(s) => write!(f, "Unsupported output format: {}", s),
        }
    }
}

impl std::error::Error for GlassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlassError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GlassError {
    fn from(e: std::io::Error) -> Self {
        GlassError::Io(e)
    }
}

impl From<image::ImageError> for GlassError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => GlassError::Io(io),
            other => GlassError::Encode(other.to_string()),
        }
    }
}

impl From<png::EncodingError> for GlassError {
    fn from(e: png::EncodingError) -> Self {
        match e {
            png::EncodingError::IoError(io) => GlassError::Io(io),
            other => GlassError::Encode(other.to_string()),
        }
    }
}

//! Error types for mosaic operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// The caller supplied no source images
    ///
    /// The matcher has no valid fallback for an empty source set, so the run
    /// fails before any tile work begins instead of producing a blank mosaic.
    EmptySourceSet,

    /// The target image failed to decode
    ///
    /// Fatal: there is nothing to tile without a valid target raster.
    TargetDecode {
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to serialize the assembled canvas
    Encode {
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Engine parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySourceSet => {
                write!(f, "Source collection is empty: at least one source image is required")
            }
            Self::TargetDecode { source } => {
                write!(f, "Failed to decode target image: {source}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::Encode { source } => {
                write!(f, "Failed to encode mosaic: {source}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TargetDecode { source }
            | Self::ImageLoad { source, .. }
            | Self::Encode { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_set_names_the_requirement() {
        let message = MosaicError::EmptySourceSet.to_string();
        assert!(message.contains("at least one source image"));
    }

    #[test]
    fn invalid_parameter_reports_name_value_and_reason() {
        let error = invalid_parameter("tile_size", &0, &"tile edge must be at least one pixel");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'tile_size' = '0': tile edge must be at least one pixel"
        );
    }

    #[test]
    fn decode_errors_preserve_their_cause() {
        let cause = image::ImageError::IoError(std::io::Error::other("truncated stream"));
        let error = MosaicError::TargetDecode { source: cause };

        assert!(error.to_string().contains("truncated stream"));
        assert!(std::error::Error::source(&error).is_some());
    }
}

use crate::orientation::Direction;
use serde_json::Error as SerdeError;
use std::path::PathBuf;
use std::{error, fmt, io};

/// Error type for asset loading, saving and geometry queries.
#[derive(Debug)]
pub enum AssetError {
    /// A recognized field holds a value of the wrong shape.
    Malformed {
        /// JSON key of the offending field.
        field: &'static str,
        /// Shape the field must hold, per the schema table.
        expected: &'static str,
    },
    /// The document root is not a JSON object.
    NotAnObject,
    /// The document populates more than one image form (single image,
    /// dual image pair, image layers).
    ConflictingImageForms {
        /// Key of the first populated form.
        first: &'static str,
        /// Key of the second populated form.
        second: &'static str,
    },
    /// JSON parse error for an in-memory document.
    Parse(SerdeError),
    /// JSON parse error for a document on disk.
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying serde error.
        source: SerdeError,
    },
    /// File I/O error.
    Io {
        /// File that failed to read or write.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Grid factor must be a positive tile size in pixels.
    InvalidGridFactor {
        /// The rejected value.
        value: i32,
    },
    /// Geometry was requested before frame data was resolved.
    MissingFrameData {
        /// Direction whose frame set was selected.
        direction: Direction,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Malformed { field, expected } => {
                write!(f, "Malformed field '{}': expected {}", field, expected)
            }
            AssetError::NotAnObject => write!(f, "Orientation document is not a JSON object"),
            AssetError::ConflictingImageForms { first, second } => {
                write!(
                    f,
                    "Conflicting image forms: '{}' and '{}' cannot both be set",
                    first, second
                )
            }
            AssetError::Parse(err) => write!(f, "Failed to parse JSON: {}", err),
            AssetError::Json { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
            AssetError::Io { path, source } => {
                write!(f, "I/O error for {}: {}", path.display(), source)
            }
            AssetError::InvalidGridFactor { value } => {
                write!(f, "Grid factor must be positive, got {}", value)
            }
            AssetError::MissingFrameData { direction } => {
                write!(f, "No frame data resolved for direction '{}'", direction)
            }
        }
    }
}

impl From<SerdeError> for AssetError {
    fn from(err: SerdeError) -> Self {
        AssetError::Parse(err)
    }
}

impl error::Error for AssetError {}

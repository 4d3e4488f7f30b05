use std::fmt;

/// Custom error types for dashcam subtitle decoding
#[derive(Debug)]
pub enum DcstError {
    /// I/O errors
    Io(std::io::Error),
    /// Parse errors with context
    Parse(String),
    /// Empty or absent cue payload
    EmptyInput,
    /// Cue payload that cannot be decoded to a telemetry record
    InvalidFrame(String),
    /// Accelerometer field that is not a valid signed integer
    MalformedNumeric(String),
    /// Template references a variable outside the recognized set
    UnknownVariable(String),
    /// Template with an unsupported conversion or specifier
    InvalidTemplate(String),
}

impl fmt::Display for DcstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DcstError::Io(err) => write!(f, "I/O error: {}", err),
            DcstError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DcstError::EmptyInput => write!(f, "Empty subtitle payload"),
            DcstError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            DcstError::MalformedNumeric(msg) => write!(f, "Malformed numeric field: {}", msg),
            DcstError::UnknownVariable(name) => write!(f, "Unknown template variable: {}", name),
            DcstError::InvalidTemplate(msg) => write!(f, "Invalid template: {}", msg),
        }
    }
}

impl std::error::Error for DcstError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DcstError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DcstError {
    fn from(err: std::io::Error) -> Self {
        DcstError::Io(err)
    }
}

impl From<anyhow::Error> for DcstError {
    fn from(err: anyhow::Error) -> Self {
        DcstError::Parse(err.to_string())
    }
}

impl DcstError {
    /// Whether this error is contained to a single subtitle cue.
    ///
    /// Frame-local errors never abort the stream; the pipeline renders the
    /// affected cue as an empty subtitle and keeps going. Everything else
    /// (I/O, template configuration) is fatal.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            DcstError::EmptyInput | DcstError::InvalidFrame(_) | DcstError::MalformedNumeric(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DcstError>;

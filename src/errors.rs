use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Enumeration of all possible errors that can occur while grabbing memeshots
#[derive(Debug)]
pub enum MemeshotError {
    /// The subtitle file could not be opened
    SubtitleNotFound(PathBuf),
    /// The video file does not exist
    VideoNotFound(PathBuf),
    /// Subtitle content is empty or could not be paired into cues
    InvalidFormat(FormatError),
    /// A timestamp string is not `HH:MM:SS`
    InvalidTimestamp(String),
    Mp4(Mp4Error),
    Other(io::Error),
}

impl MemeshotError {
    /// True for either of the missing-file kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MemeshotError::SubtitleNotFound(_) | MemeshotError::VideoNotFound(_)
        )
    }
}

/// Subtitle structure errors
#[derive(Debug)]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// MP4 container errors
#[derive(Debug)]
pub enum Mp4Error {
    /// Generic MP4 error with a descriptive message
    Error { message: String },
}

impl Mp4Error {
    pub fn new(message: impl Into<String>) -> Self {
        Mp4Error::Error {
            message: message.into(),
        }
    }
}

impl fmt::Display for MemeshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemeshotError::SubtitleNotFound(path) => {
                write!(f, "Could not find the subtitle file: {}", path.display())
            }
            MemeshotError::VideoNotFound(path) => {
                write!(f, "Could not find the video: {}", path.display())
            }
            MemeshotError::InvalidFormat(err) => write!(f, "Invalid subtitle format: {}", err),
            MemeshotError::InvalidTimestamp(ts) => {
                write!(f, "Invalid timestamp '{}': expected HH:MM:SS", ts)
            }
            MemeshotError::Mp4(err) => write!(f, "MP4 error: {}", err),
            MemeshotError::Other(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::Error { message } => write!(f, "{}", message),
        }
    }
}

impl Error for MemeshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MemeshotError::InvalidFormat(err) => Some(err),
            MemeshotError::Mp4(err) => Some(err),
            MemeshotError::Other(err) => Some(err),
            _ => None,
        }
    }
}
impl Error for FormatError {}
impl Error for Mp4Error {}

// Conversion implementations
impl From<io::Error> for MemeshotError {
    fn from(err: io::Error) -> Self {
        MemeshotError::Other(err)
    }
}

impl From<FormatError> for MemeshotError {
    fn from(err: FormatError) -> Self {
        MemeshotError::InvalidFormat(err)
    }
}

impl From<Mp4Error> for MemeshotError {
    fn from(err: Mp4Error) -> Self {
        MemeshotError::Mp4(err)
    }
}

impl From<image::ImageError> for MemeshotError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => MemeshotError::Other(e),
            other => MemeshotError::Other(io::Error::other(other)),
        }
    }
}

// Type alias for Result with MemeshotError
pub type MemeshotResult<T> = Result<T, MemeshotError>;

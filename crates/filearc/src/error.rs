use std::io;
use std::path::PathBuf;

use filearc_envelope::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("failed to decode envelope at '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("failed to encode envelope for '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("failed to serialize record for matching: {0}")]
    Matcher(#[source] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a caller-supplied parse hook.
///
/// The listing engine never catches this; a single malformed entry aborts
/// the whole `list` call.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse captured groups: {0}")]
pub struct ParseError(pub String);

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::num::ParseIntError> for ParseError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for ParseError {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self(e.to_string())
    }
}

//! Error types and handling infrastructure for format conversion

use std::fmt;
use std::io;
use std::path::Path;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Read,
    Parse,
    Serialize,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Parse => "parse",
            Stage::Serialize => "serialize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure categories shared by every stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("file not found")]
    NotFound,

    #[error("file unreadable")]
    Unreadable,

    #[error("invalid syntax")]
    InvalidSyntax,

    #[error("unsupported document shape")]
    UnsupportedShape,

    #[error("corrupt archive")]
    CorruptArchive,

    #[error("serialization failure")]
    SerializationFailure,
}

/// Main error type for conversion operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} stage: {kind}: {detail}")]
pub struct ConversionError {
    pub stage: Stage,
    pub kind: ConversionErrorKind,
    pub detail: String,
}

impl ConversionError {
    pub fn new(stage: Stage, kind: ConversionErrorKind, detail: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            detail: detail.into(),
        }
    }

    pub fn read(kind: ConversionErrorKind, detail: impl Into<String>) -> Self {
        Self::new(Stage::Read, kind, detail)
    }

    pub fn parse(kind: ConversionErrorKind, detail: impl Into<String>) -> Self {
        Self::new(Stage::Parse, kind, detail)
    }

    pub fn serialize(detail: impl Into<String>) -> Self {
        Self::new(
            Stage::Serialize,
            ConversionErrorKind::SerializationFailure,
            detail,
        )
    }

    /// Map an I/O failure on `path` into a read-stage error
    pub fn from_io(error: &io::Error, path: &Path) -> Self {
        let kind = match error.kind() {
            io::ErrorKind::NotFound => ConversionErrorKind::NotFound,
            _ => ConversionErrorKind::Unreadable,
        };
        Self::read(kind, format!("{}: {}", path.display(), error))
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self.kind {
            ConversionErrorKind::NotFound => format!("Input file not found ({})", self.detail),
            ConversionErrorKind::Unreadable => {
                format!("Failed to load file: {}", self.detail)
            }
            ConversionErrorKind::InvalidSyntax => {
                format!("Failed to parse input: {}", self.detail)
            }
            ConversionErrorKind::UnsupportedShape => {
                format!("Input is not valid for conversion: {}", self.detail)
            }
            ConversionErrorKind::CorruptArchive => {
                format!("Failed to open spreadsheet: {}", self.detail)
            }
            ConversionErrorKind::SerializationFailure => {
                format!("Failed to serialize output: {}", self.detail)
            }
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

//! Error types for reading and writing TOML documents.
//!
//! Two families of failure exist:
//!
//! - **I/O errors**: the byte stream or file could not be read or written
//! - **Format errors**: the text violates the grammar or one of its semantic
//!   rules (duplicate keys, mixed-type arrays, bad escapes, ...)
//!
//! Format errors always carry the line the scanner was on when the problem was
//! detected. For constructs spanning several lines (multi-line strings, arrays)
//! that line may be later than the one the construct started on.
//!
//! ## Examples
//!
//! ```rust
//! use tomlite::{read, Error};
//!
//! let result = read("a = 1\na = 2\n");
//! assert!(matches!(result, Err(Error::Format { line: 2, .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing TOML.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar or semantic violation in the input text
    #[error("Invalid TOML at line {line}: {msg}")]
    Format { line: usize, msg: String },

    /// A value that has no TOML representation
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// `None` where there is no key to omit
    #[error("Unsupported value: None outside of a table field")]
    UnsupportedNone,

    /// A dotted path runs through a value that is not a table
    #[error("Path conflict: '{0}' is not a table")]
    PathConflict(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error at the given 1-based line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlite::Error;
    ///
    /// let err = Error::format(10, "unterminated string");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn format(line: usize, msg: impl Into<String>) -> Self {
        Error::Format {
            line,
            msg: msg.into(),
        }
    }

    /// Creates an unsupported value error.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the line of a format error, if this is one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

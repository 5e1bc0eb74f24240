//! Configuration options for reading and writing.
//!
//! - [`ReaderOptions`]: bare-key strictness
//! - [`WriterOptions`]: indentation and line endings, with [`IndentStyle`] and
//!   [`LineEnding`]
//!
//! ## Examples
//!
//! ```rust
//! use tomlite::{IndentStyle, LineEnding, WriterOptions};
//!
//! let options = WriterOptions::new()
//!     .with_indent(IndentStyle::Spaces)
//!     .with_indent_size(4)
//!     .with_line_ending(LineEnding::Lf);
//! assert_eq!(options.indent_unit(), "    ");
//! ```

/// Options for the reader.
///
/// # Examples
///
/// ```rust
/// use tomlite::{read_with_options, ReaderOptions};
///
/// let options = ReaderOptions::new().with_strict_keys(true);
/// assert!(read_with_options("clé = 1", &options).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReaderOptions {
    /// Restrict bare keys to `A-Z a-z 0-9 _ -`.
    pub strict_keys: bool,
}

impl ReaderOptions {
    /// Creates default options (lenient bare keys).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables strict bare keys.
    #[must_use]
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }
}

/// Character used for one indentation step.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum IndentStyle {
    #[default]
    Tab,
    Spaces,
}

impl IndentStyle {
    /// Returns the indentation character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            IndentStyle::Tab => '\t',
            IndentStyle::Spaces => ' ',
        }
    }
}

/// Line separator written between lines.
///
/// The default follows the platform: `\r\n` on Windows, `\n` elsewhere.
/// Any other separator can be given with [`LineEnding::Custom`]; the reader
/// only understands `\n` and `\r\n`, so such output is meant for other
/// consumers.
///
/// ```rust
/// use tomlite::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// assert_eq!(LineEnding::from("\n\n").as_str(), "\n\n");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum LineEnding {
    Lf,
    CrLf,
    Custom(String),
}

impl LineEnding {
    /// Returns the line ending native to the current platform.
    #[must_use]
    pub const fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// Returns the string representation of this line ending.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Custom(separator) => separator.as_str(),
        }
    }
}

/// Maps `"\n"` and `"\r\n"` to their named variants.
impl From<&str> for LineEnding {
    fn from(separator: &str) -> Self {
        match separator {
            "\n" => LineEnding::Lf,
            "\r\n" => LineEnding::CrLf,
            other => LineEnding::Custom(other.to_string()),
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

/// Options for the writer.
///
/// Defaults to one tab per indentation level and the platform line ending.
#[derive(Clone, Debug, PartialEq)]
pub struct WriterOptions {
    pub indent_size: usize,
    pub indent: IndentStyle,
    pub line_ending: LineEnding,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent_size: 1,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
        }
    }
}

impl WriterOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlite::{IndentStyle, WriterOptions};
    ///
    /// let options = WriterOptions::new();
    /// assert_eq!(options.indent_size, 1);
    /// assert_eq!(options.indent, IndentStyle::Tab);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many indent characters make up one level.
    #[must_use]
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Sets the indentation character.
    #[must_use]
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the line ending.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// The text of a single indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        std::iter::repeat(self.indent.as_char())
            .take(self.indent_size)
            .collect()
    }
}

//! # tomlite
//!
//! A small reader and writer for TOML v0.4 configuration files.
//!
//! ## Key Features
//!
//! - **Ordered tables**: keys come back out in the order they were read, so a
//!   read-modify-write cycle keeps a file's layout
//! - **Typed dates**: date-only, local date-time and offset date-time values
//!   map to `chrono` types
//! - **Integer widths**: short literals stay 32-bit, long ones 64-bit
//! - **Serde bridge**: read into and write from any `Serialize`/`Deserialize`
//!   type
//! - **Precise errors**: every format error names the offending line
//!
//! ## Quick Start
//!
//! ```rust
//! use tomlite::{read, write, Value};
//!
//! let doc = read(r#"
//! title = "TOML example"
//!
//! [database]
//! ports = [8001, 8001, 8002]
//! enabled = true
//! "#).unwrap();
//!
//! assert_eq!(doc.get_path("database.enabled"), Some(&Value::Boolean(true)));
//!
//! let text = write(&doc).unwrap();
//! assert_eq!(read(&text).unwrap(), doc);
//! ```
//!
//! ### Typed configuration
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tomlite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     server: Server,
//! }
//!
//! let config = Config {
//!     name: "edge".to_string(),
//!     server: Server { host: "0.0.0.0".to_string(), port: 8080 },
//! };
//!
//! let text = to_string(&config).unwrap();
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ## Logging
//!
//! The library emits records through the [`log`] facade: header navigation
//! and table emission at `trace`, per-call summaries at `debug`. Install any
//! `log` backend to see them.
//!
//! ## Syntax
//!
//! The accepted dialect is documented in the [`syntax`] module.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Reading, editing and writing a document
//! - **`typed_config.rs`** - Loading a configuration struct through serde
//! - **`custom_options.rs`** - Key modes, indentation and line endings
//!
//! Run any of them with: `cargo run --example <name>`

mod datetime;
pub mod de;
pub mod error;
pub mod map;
pub mod options;
mod reader;
mod scanner;
pub mod ser;
pub mod syntax;
pub mod value;
mod writer;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::Table;
pub use options::{IndentStyle, LineEnding, ReaderOptions, WriterOptions};
pub use ser::ValueSerializer;
pub use value::{Integer, Value};

use log::debug;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

const BOM: char = '\u{FEFF}';

/// Reads a document with lenient bare keys.
///
/// # Examples
///
/// ```rust
/// use tomlite::{read, Integer, Value};
///
/// let doc = read("small = 123456789\nlarge = 1234567890\n").unwrap();
/// assert_eq!(doc.get("small"), Some(&Value::Integer(Integer::Int(123456789))));
/// assert_eq!(doc.get("large"), Some(&Value::Integer(Integer::Long(1234567890))));
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] with the offending line if the text is not a
/// valid document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read(text: &str) -> Result<Table> {
    read_with_options(text, &ReaderOptions::default())
}

/// Reads a document with the given options.
///
/// A leading byte order mark is ignored.
///
/// # Errors
///
/// Returns [`Error::Format`] with the offending line if the text is not a
/// valid document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_with_options(text: &str, options: &ReaderOptions) -> Result<Table> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let table = reader::Reader::new(text, options).read()?;
    debug!("read document: {} bytes, {} top-level keys", text.len(), table.len());
    Ok(table)
}

/// Reads a document from UTF-8 bytes.
///
/// ```rust
/// use tomlite::{read_slice, Error, ReaderOptions};
///
/// let err = read_slice(b"a = 1\nb = \"\xFF\"\n", &ReaderOptions::default()).unwrap_err();
/// assert!(matches!(err, Error::Format { line: 2, .. }));
/// ```
///
/// # Errors
///
/// Invalid UTF-8 is a format error reported at the line holding the first
/// invalid byte.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_slice(bytes: &[u8], options: &ReaderOptions) -> Result<Table> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        Error::format(line, format!("invalid UTF-8: {}", e))
    })?;
    read_with_options(text, options)
}

/// Reads a document from a byte stream until its end.
///
/// ```rust
/// use std::io::Cursor;
/// use tomlite::{read_from, ReaderOptions};
///
/// let doc = read_from(Cursor::new("x = 1"), &ReaderOptions::default()).unwrap();
/// assert!(doc.contains_key("x"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the stream fails, otherwise as [`read_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_from<R>(mut reader: R, options: &ReaderOptions) -> Result<Table>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    read_slice(&bytes, options)
}

/// Reads a document from a file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise as
/// [`read_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_file<P>(path: P, options: &ReaderOptions) -> Result<Table>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!("reading {}", path.display());
    let bytes = fs::read(path)?;
    read_slice(&bytes, options)
}

/// Writes a document with default options: one tab per indentation level and
/// the platform line ending.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if the table holds a value with no TOML
/// form, such as a NaN float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write(table: &Table) -> Result<String> {
    write_with_options(table, &WriterOptions::default())
}

/// Writes a document with the given options.
///
/// ```rust
/// use tomlite::{read, write_with_options, IndentStyle, LineEnding, WriterOptions};
///
/// let doc = read("[a]\nb = 1\n").unwrap();
/// let options = WriterOptions::new()
///     .with_indent(IndentStyle::Spaces)
///     .with_indent_size(4)
///     .with_line_ending(LineEnding::Lf);
/// assert_eq!(write_with_options(&doc, &options).unwrap(), "[a]\n    b = 1\n\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if the table holds a value with no TOML
/// form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_with_options(table: &Table, options: &WriterOptions) -> Result<String> {
    let mut writer = writer::Writer::new(options);
    writer.write_document(table)?;
    let text = writer.into_inner();
    debug!("wrote document: {} top-level keys, {} bytes", table.len(), text.len());
    Ok(text)
}

/// Writes a document to a byte sink.
///
/// # Errors
///
/// Returns [`Error::Io`] if the sink fails, otherwise as [`write_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_to<W>(mut sink: W, table: &Table, options: &WriterOptions) -> Result<()>
where
    W: io::Write,
{
    let text = write_with_options(table, options)?;
    sink.write_all(text.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Writes a document to a file, replacing its contents.
///
/// Nothing is written if the document cannot be serialized.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written, otherwise as
/// [`write_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_file<P>(path: P, table: &Table, options: &WriterOptions) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = write_with_options(table, options)?;
    debug!("writing {}", path.display());
    fs::write(path, text)?;
    Ok(())
}

/// Deserializes an instance of type `T` from TOML text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use tomlite::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_table(read(text)?)
}

/// Deserializes an instance of type `T` from an already read table.
///
/// # Errors
///
/// Returns an error if the table does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_table<T>(table: Table) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(Value::Table(table)))
}

/// Serializes any `T: Serialize` whose form is a table into TOML text.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use tomlite::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert!(text.starts_with("x = 1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if `T` does not serialize to a table or
/// holds a value with no TOML form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &WriterOptions::default())
}

/// Serializes any `T: Serialize` into TOML text with custom writer options.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &WriterOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    write_with_options(&to_table(value)?, options)
}

/// Converts any `T: Serialize` into a [`Table`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if `T` does not serialize to a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_table<T>(value: &T) -> Result<Table>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Table(table) => Ok(table),
        other => Err(Error::UnsupportedValue(format!(
            "document root must be a table, found {}",
            other.type_str()
        ))),
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use tomlite::{to_value, Value};
///
/// let value = to_value(&vec![1, 2, 3]).unwrap();
/// assert!(value.is_array());
/// ```
///
/// # Errors
///
/// Returns an error if the value has no TOML form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

impl std::str::FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        read(s)
    }
}

/// Deserializes `T` from a value tree.
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}

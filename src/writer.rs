//! Serializes a [`Table`] into TOML text.
//!
//! Each table level is written in two passes: plain `key = value` lines come
//! first, then `[table]` and `[[table-array]]` blocks with their bodies. Writing
//! the plain entries first is what keeps them inside their own table when the
//! text is read back.
//!
//! ```rust
//! use tomlite::{read, write_with_options, LineEnding, WriterOptions};
//!
//! let doc = read("[server]\nport = 80\nname = \"edge\"\n").unwrap();
//! let options = WriterOptions::new().with_line_ending(LineEnding::Lf);
//! let text = write_with_options(&doc, &options).unwrap();
//! assert_eq!(text, "[server]\n\tport = 80\n\tname = \"edge\"\n\n");
//! ```

use crate::{datetime, Error, Result, Table, Value, WriterOptions};
use log::trace;
use std::borrow::Cow;
use std::fmt::Write;

pub(crate) struct Writer {
    output: String,
    indent_unit: String,
    line_ending: String,
    /// Header segments of the table being written, already quoted if needed.
    table_names: Vec<String>,
    /// Consecutive line breaks just written; at most one blank line is kept.
    line_breaks: usize,
}

impl Writer {
    pub(crate) fn new(options: &WriterOptions) -> Self {
        Writer {
            output: String::with_capacity(256),
            indent_unit: options.indent_unit(),
            line_ending: options.line_ending.as_str().to_string(),
            table_names: Vec::new(),
            // start of the document counts as a blank line already
            line_breaks: 2,
        }
    }

    pub(crate) fn into_inner(self) -> String {
        self.output
    }

    pub(crate) fn write_document(&mut self, root: &Table) -> Result<()> {
        self.write_table_content(root)
    }

    fn write_table_content(&mut self, table: &Table) -> Result<()> {
        let depth = self.table_names.len();

        for (key, value) in table.iter().filter(|(_, v)| !v.is_block()) {
            self.write_indent(depth);
            self.push(&format_key(key));
            self.push(" = ");
            let mut text = String::new();
            write_inline_value(&mut text, value)?;
            self.push(&text);
            self.new_line();
        }

        for (key, value) in table.iter().filter(|(_, v)| v.is_block()) {
            match value {
                Value::Table(sub) => self.write_table(key, sub)?,
                Value::TableArray(tables) => {
                    for sub in tables {
                        self.write_table_array_element(key, sub)?;
                    }
                }
                Value::Array(elements) => {
                    for element in elements {
                        let sub = element.as_table().ok_or_else(|| {
                            Error::UnsupportedValue(format!(
                                "array \"{}\" mixes tables with {} values",
                                key,
                                element.type_str()
                            ))
                        })?;
                        self.write_table_array_element(key, sub)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn write_table(&mut self, key: &str, table: &Table) -> Result<()> {
        self.table_names.push(format_key(key).into_owned());
        trace!("writing table [{}]", self.table_names.join("."));

        self.new_line();
        self.write_header("[", "]");
        self.write_table_content(table)?;
        self.new_line();

        self.table_names.pop();
        Ok(())
    }

    fn write_table_array_element(&mut self, key: &str, table: &Table) -> Result<()> {
        self.table_names.push(format_key(key).into_owned());
        trace!("writing table-array element [[{}]]", self.table_names.join("."));

        self.new_line();
        self.write_header("[[", "]]");
        self.write_table_content(table)?;
        self.new_line();

        self.table_names.pop();
        Ok(())
    }

    fn write_header(&mut self, open: &str, close: &str) {
        let depth = self.table_names.len();
        self.write_indent(depth.saturating_sub(1));
        let name = self.table_names.join(".");
        self.push(open);
        self.push(&name);
        self.push(close);
        self.new_line();
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.output.push_str(&self.indent_unit);
        }
    }

    #[inline]
    fn push(&mut self, text: &str) {
        self.output.push_str(text);
        self.line_breaks = 0;
    }

    fn new_line(&mut self) {
        if self.line_breaks <= 1 {
            self.output.push_str(&self.line_ending);
            self.line_breaks += 1;
        }
    }
}

/// Writes a key, quoting it unless it is a valid strict bare key.
pub(crate) fn format_key(key: &str) -> Cow<'_, str> {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if bare {
        Cow::Borrowed(key)
    } else {
        let mut out = String::with_capacity(key.len() + 2);
        write_quoted(&mut out, key);
        Cow::Owned(out)
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Writes the right-hand side form of a value; tables become inline tables.
pub(crate) fn write_inline_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::String(s) => write_quoted(out, s),
        Value::Integer(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(Error::UnsupportedValue(format!(
                    "{} has no TOML representation",
                    f
                )));
            }
            let _ = write!(out, "{:?}", f);
        }
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Date(_) | Value::DateTime(_) | Value::OffsetDateTime(_) => {
            let text = datetime::format(value)
                .ok_or_else(|| Error::unsupported_value("unformattable date"))?;
            out.push_str(&text);
        }
        Value::Array(elements) => {
            out.push('[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline_value(out, element)?;
            }
            out.push(']');
        }
        Value::TableArray(tables) => {
            out.push('[');
            for (i, table) in tables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline_table(out, table)?;
            }
            out.push(']');
        }
        Value::Table(table) => write_inline_table(out, table)?,
    }
    Ok(())
}

fn write_inline_table(out: &mut String, table: &Table) -> Result<()> {
    if table.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{ ");
    for (i, (key, value)) in table.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format_key(key));
        out.push_str(" = ");
        write_inline_value(out, value)?;
    }
    out.push_str(" }");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndentStyle, LineEnding};

    fn write(table: &Table) -> Result<String> {
        let options = WriterOptions::new().with_line_ending(LineEnding::Lf);
        let mut writer = Writer::new(&options);
        writer.write_document(table)?;
        Ok(writer.into_inner())
    }

    fn inline(value: &Value) -> String {
        let mut out = String::new();
        write_inline_value(&mut out, value).unwrap();
        out
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key("plain_key-1"), "plain_key-1");
        assert_eq!(format_key(""), "\"\"");
        assert_eq!(format_key("a.b"), "\"a.b\"");
        assert_eq!(format_key("clé"), "\"clé\"");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(inline(&Value::from("a\tb")), r#""a\tb""#);
        assert_eq!(inline(&Value::from("q\"\\")), r#""q\"\\""#);
        assert_eq!(inline(&Value::from("\u{1}")), r#""\u0001""#);
        assert_eq!(inline(&Value::from("\u{8}\u{c}\r\n")), r#""\b\f\r\n""#);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(inline(&Value::from(42)), "42");
        assert_eq!(inline(&Value::from(-1_234_567_890_i64)), "-1234567890");
        assert_eq!(inline(&Value::Float(3.0)), "3.0");
        assert_eq!(inline(&Value::Float(1e300)), "1e300");
        assert_eq!(inline(&Value::Boolean(false)), "false");
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let mut out = String::new();
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = write_inline_value(&mut out, &Value::Float(f)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedValue(_)));
        }
    }

    #[test]
    fn test_inline_containers() {
        let mut point = Table::new();
        point.insert("x".to_string(), Value::from(1));
        point.insert("y".to_string(), Value::from(2));
        let nested = Value::Array(vec![
            Value::Array(vec![Value::from(1), Value::from(2)]),
            Value::Array(vec![Value::Table(point)]),
        ]);
        assert_eq!(inline(&nested), "[[1, 2], [{ x = 1, y = 2 }]]");
        assert_eq!(inline(&Value::Table(Table::new())), "{}");
        assert_eq!(inline(&Value::TableArray(Vec::new())), "[]");
    }

    #[test]
    fn test_scalars_before_tables() {
        let mut doc = Table::new();
        doc.insert_path("server.port", Value::from(80)).unwrap();
        doc.insert("title".to_string(), Value::from("x"));
        let text = write(&doc).unwrap();
        assert_eq!(text, "title = \"x\"\n\n[server]\n\tport = 80\n\n");
    }

    #[test]
    fn test_nested_indentation_and_blank_lines() {
        let mut doc = Table::new();
        doc.insert_path("a.b.c", Value::from(1)).unwrap();
        doc.insert_path("d.e", Value::from(2)).unwrap();
        let text = write(&doc).unwrap();
        assert_eq!(
            text,
            "[a]\n\n\t[a.b]\n\t\tc = 1\n\n[d]\n\te = 2\n\n"
        );
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_table_array_blocks() {
        let mut first = Table::new();
        first.insert("x".to_string(), Value::from(1));
        let mut second = Table::new();
        second.insert("x".to_string(), Value::from(2));

        let mut doc = Table::new();
        doc.insert("pt".to_string(), Value::TableArray(vec![first, second]));
        doc.insert("none".to_string(), Value::TableArray(Vec::new()));
        let text = write(&doc).unwrap();
        assert_eq!(text, "none = []\n\n[[pt]]\n\tx = 1\n\n[[pt]]\n\tx = 2\n\n");
    }

    #[test]
    fn test_array_of_tables_with_stray_scalar() {
        let mut doc = Table::new();
        doc.insert(
            "bad".to_string(),
            Value::Array(vec![Value::Table(Table::new()), Value::from(1)]),
        );
        assert!(matches!(write(&doc), Err(Error::UnsupportedValue(_))));
    }

    #[test]
    fn test_space_indent_and_crlf() {
        let mut doc = Table::new();
        doc.insert_path("t.k", Value::from(true)).unwrap();
        let options = WriterOptions::new()
            .with_indent(IndentStyle::Spaces)
            .with_indent_size(2)
            .with_line_ending(LineEnding::CrLf);
        let mut writer = Writer::new(&options);
        writer.write_document(&doc).unwrap();
        assert_eq!(writer.into_inner(), "[t]\r\n  k = true\r\n\r\n");
    }

    #[test]
    fn test_custom_line_separator() {
        let mut doc = Table::new();
        doc.insert("a".to_string(), Value::from(1));
        doc.insert_path("t.k", Value::from(2)).unwrap();
        let options = WriterOptions::new().with_line_ending(LineEnding::from("\u{2028}"));
        let mut writer = Writer::new(&options);
        writer.write_document(&doc).unwrap();
        assert_eq!(
            writer.into_inner(),
            "a = 1\u{2028}\u{2028}[t]\u{2028}\tk = 2\u{2028}\u{2028}"
        );
    }

    #[test]
    fn test_quoted_header_segments() {
        let mut doc = Table::new();
        let mut inner = Table::new();
        inner.insert("k".to_string(), Value::from(1));
        doc.insert("dotted.name".to_string(), Value::Table(inner));
        let text = write(&doc).unwrap();
        assert!(text.starts_with("[\"dotted.name\"]\n"));
    }
}

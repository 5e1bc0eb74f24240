//! Recursive-descent reader turning TOML text into a [`Table`].
//!
//! The reader works in two layers:
//!
//! - **Value parser**: dispatches on the first significant character of a
//!   value to the number-or-date, string, array, inline-table or boolean
//!   sub-parser.
//! - **Table-body parser**: reads runs of `key = value` lines into a table,
//!   and `[header]` / `[[header]]` lines that pick the table the following
//!   run goes into.
//!
//! Parsing is atomic: the first error aborts the read and nothing of the
//! partially built document escapes.

use crate::scanner::Scanner;
use crate::{datetime, Error, Integer, ReaderOptions, Result, Table, Value};
use log::{debug, trace};
use std::collections::HashSet;

/// Classification of a number-or-date lexeme, decided in a single scan.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LexemeKind {
    Integer,
    Float,
    Date,
    Invalid,
}

/// One step from the root to a table: a key, or an element of a table-array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Step {
    Key(String),
    Index(usize),
}

/// A `[path]` or `[[path]]` header line.
struct Header {
    path: Vec<String>,
    is_array: bool,
    line: usize,
}

pub(crate) struct Reader<'a> {
    scanner: Scanner<'a>,
    strict_keys: bool,
    /// Where table-arrays written as inline arrays live; headers may not
    /// extend them.
    inline_arrays: HashSet<Vec<Step>>,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str, options: &ReaderOptions) -> Self {
        Reader {
            scanner: Scanner::new(input),
            strict_keys: options.strict_keys,
            inline_arrays: HashSet::new(),
        }
    }

    /// Reads the whole input into a root table.
    pub(crate) fn read(mut self) -> Result<Table> {
        let mut root = Table::new();
        self.read_table_body(&mut root, &[])?;

        while self.scanner.peek_significant(true).is_some() {
            let header = self.read_header()?;
            let (target, location) = select_table(&mut root, &header, &self.inline_arrays)?;
            self.read_table_body(target, &location)?;
        }

        debug!(
            "read {} top-level keys over {} lines",
            root.len(),
            self.scanner.line()
        );
        Ok(root)
    }

    /// Reads `key = value` lines into `table` until a header or end of input.
    ///
    /// `location` is the path of `table` from the root.
    fn read_table_body(&mut self, table: &mut Table, location: &[Step]) -> Result<()> {
        loop {
            match self.scanner.peek_significant(true) {
                None | Some('[') => return Ok(()),
                Some(_) => {}
            }

            let key = self.read_key()?;
            if table.contains_key(&key) {
                return Err(self.scanner.error(format!("duplicate key \"{}\"", key)));
            }
            let value = self.read_assigned_value()?;
            self.expect_line_end("value")?;
            if value.is_table() || value.is_table_array() {
                let mut path = location.to_vec();
                path.push(Step::Key(key.clone()));
                record_inline_arrays(&mut self.inline_arrays, &mut path, &value);
            }
            table.insert(key, value);
        }
    }

    /// Reads a key and the `=` that follows it.
    fn read_key(&mut self) -> Result<String> {
        let key = match self.scanner.peek() {
            Some('"') => {
                self.scanner.next();
                if self.scanner.rest().starts_with("\"\"") {
                    return Err(self.scanner.error("multi-line strings cannot be keys"));
                }
                self.read_basic_string()?
            }
            Some('\'') => {
                self.scanner.next();
                if self.scanner.rest().starts_with("''") {
                    return Err(self.scanner.error("multi-line strings cannot be keys"));
                }
                self.read_literal_string()?
            }
            _ => self.read_bare_key(&['=', ' ', '\t'])?,
        };

        self.scanner.skip_blank();
        if !self.scanner.eat('=') {
            return Err(self
                .scanner
                .error(format!("expected '=' after key \"{}\"", key)));
        }
        Ok(key)
    }

    /// Reads an unquoted key up to one of `ends`, which is left unconsumed.
    fn read_bare_key(&mut self, ends: &[char]) -> Result<String> {
        let mut key = String::new();
        loop {
            match self.scanner.peek() {
                None => return Err(self.scanner.error("unexpected end of input in key")),
                Some(ch) if ends.contains(&ch) => break,
                Some(ch) => {
                    if !self.is_bare_key_char(ch) {
                        return Err(self
                            .scanner
                            .error(format!("forbidden character {:?} in bare key", ch)));
                    }
                    key.push(ch);
                    self.scanner.next();
                }
            }
        }

        if key.is_empty() {
            return Err(self.scanner.error("empty bare key"));
        }
        Ok(key)
    }

    fn is_bare_key_char(&self, ch: char) -> bool {
        if self.strict_keys {
            ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
        } else {
            !(ch.is_whitespace() || ch.is_control() || matches!(ch, '#' | '=' | '.' | '[' | ']'))
        }
    }

    /// Reads the value right of `=`, which must start on the same line.
    fn read_assigned_value(&mut self) -> Result<Value> {
        self.scanner.skip_blank();
        match self.scanner.peek() {
            None | Some('\n') | Some('#') => Err(self.scanner.error("missing value after '='")),
            Some(_) => self.read_value(),
        }
    }

    /// After a value or header only a comment may follow before the newline.
    fn expect_line_end(&mut self, what: &str) -> Result<()> {
        self.scanner.skip_blank();
        self.scanner.skip_comment();
        match self.scanner.next() {
            None | Some('\n') => Ok(()),
            Some(ch) => Err(self
                .scanner
                .error(format!("unexpected character {:?} after {}", ch, what))),
        }
    }

    fn read_header(&mut self) -> Result<Header> {
        let line = self.scanner.line();
        if !self.scanner.eat('[') {
            return Err(self.scanner.error("expected table header"));
        }
        let is_array = self.scanner.eat('[');

        let mut path = Vec::new();
        loop {
            self.scanner.skip_blank();
            let segment = match self.scanner.peek() {
                None => return Err(self.scanner.error("unterminated table header")),
                Some('"') => {
                    self.scanner.next();
                    self.read_basic_string()?
                }
                Some('\'') => {
                    self.scanner.next();
                    self.read_literal_string()?
                }
                Some('.') | Some(']') => {
                    return Err(self.scanner.error("empty segment in table name"))
                }
                Some(_) => self.read_bare_key(&['.', ']', ' ', '\t'])?,
            };
            path.push(segment);

            self.scanner.skip_blank();
            match self.scanner.next() {
                Some('.') => continue,
                Some(']') => break,
                None => return Err(self.scanner.error("unterminated table header")),
                Some(ch) => {
                    return Err(self
                        .scanner
                        .error(format!("unexpected character {:?} in table name", ch)))
                }
            }
        }

        if is_array && !self.scanner.eat(']') {
            return Err(self
                .scanner
                .error("expected ']]' at the end of a table-array header"));
        }
        self.expect_line_end("table header")?;

        Ok(Header {
            path,
            is_array,
            line,
        })
    }

    fn read_value(&mut self) -> Result<Value> {
        match self.scanner.peek() {
            None => Err(self.scanner.error("expected a value, found end of input")),
            Some('"') => {
                self.scanner.next();
                let s = if self.scanner.eat_str("\"\"") {
                    self.read_multiline_basic_string()?
                } else {
                    self.read_basic_string()?
                };
                Ok(Value::String(s))
            }
            Some('\'') => {
                self.scanner.next();
                let s = if self.scanner.eat_str("''") {
                    self.read_multiline_literal_string()?
                } else {
                    self.read_literal_string()?
                };
                Ok(Value::String(s))
            }
            Some('[') => {
                self.scanner.next();
                self.read_array()
            }
            Some('{') => {
                self.scanner.next();
                Ok(Value::Table(self.read_inline_table()?))
            }
            Some('t') => self.read_boolean("true", true),
            Some('f') => self.read_boolean("false", false),
            Some(ch) if ch.is_ascii_digit() || ch == '+' || ch == '-' => {
                self.read_number_or_date()
            }
            Some(ch) => Err(self
                .scanner
                .error(format!("unexpected character {:?}, expected a value", ch))),
        }
    }

    fn read_boolean(&mut self, literal: &str, value: bool) -> Result<Value> {
        if self.scanner.eat_str(literal) {
            Ok(Value::Boolean(value))
        } else {
            Err(self.scanner.error(format!("invalid value, expected {}", literal)))
        }
    }

    /// Scans a number or date lexeme and classifies it in the same pass.
    ///
    /// Each candidate kind starts out possible and is ruled out by the
    /// characters seen: `:`/`T`/`Z` rule out numbers, `e`/`E` rule out integers
    /// and dates, `.` rules out integers, a `-` not following an exponent marker
    /// rules out numbers, and `_` rules out dates. Integer wins over float,
    /// float over date. An `_` without a digit on both sides makes the lexeme
    /// invalid.
    fn scan_number_or_date(&mut self) -> (String, LexemeKind) {
        let mut lexeme = String::new();
        let mut maybe_integer = true;
        let mut maybe_float = true;
        let mut maybe_date = true;
        let mut well_grouped = true;
        let mut previous: Option<char> = None;

        while let Some(ch) = self.scanner.peek() {
            match ch {
                ',' | ' ' | '\t' | '\r' | '\n' | ']' | '}' | '#' => break,
                ':' | 'T' | 'Z' => {
                    maybe_integer = false;
                    maybe_float = false;
                }
                'e' | 'E' => {
                    maybe_integer = false;
                    maybe_date = false;
                }
                '.' => maybe_integer = false,
                '-' if previous.is_some() && !matches!(previous, Some('e' | 'E')) => {
                    maybe_integer = false;
                    maybe_float = false;
                }
                _ => {}
            }
            self.scanner.next();
            if ch == '_' {
                maybe_date = false;
                let digit_before = previous.is_some_and(|c| c.is_ascii_digit());
                let digit_after = self.scanner.peek().is_some_and(|c| c.is_ascii_digit());
                well_grouped &= digit_before && digit_after;
            } else {
                lexeme.push(ch);
            }
            previous = Some(ch);
        }

        let kind = if !well_grouped {
            LexemeKind::Invalid
        } else if maybe_integer {
            LexemeKind::Integer
        } else if maybe_float {
            LexemeKind::Float
        } else if maybe_date {
            LexemeKind::Date
        } else {
            LexemeKind::Invalid
        };
        (lexeme, kind)
    }

    fn read_number_or_date(&mut self) -> Result<Value> {
        let (lexeme, kind) = self.scan_number_or_date();
        let invalid = || Error::format(self.scanner.line(), format!("invalid value: {}", lexeme));

        match kind {
            LexemeKind::Integer => parse_integer(&lexeme).ok_or_else(invalid),
            LexemeKind::Float => {
                let f = parse_float(&lexeme).ok_or_else(invalid)?;
                if !f.is_finite() {
                    return Err(self
                        .scanner
                        .error(format!("float out of range: {}", lexeme)));
                }
                Ok(Value::Float(f))
            }
            LexemeKind::Date => datetime::parse(&lexeme).ok_or_else(invalid),
            LexemeKind::Invalid => Err(invalid()),
        }
    }

    /// Reads a basic string; the opening quote is already consumed.
    fn read_basic_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.scanner.next() {
                None => return Err(self.scanner.error("unterminated string")),
                Some('"') => return Ok(out),
                Some('\n') => return Err(self.scanner.error("newline in single-line string")),
                Some('\\') => self.read_escape(&mut out)?,
                Some(ch) => out.push(ch),
            }
        }
    }

    /// Reads a literal string; the opening quote is already consumed.
    fn read_literal_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.scanner.next() {
                None => return Err(self.scanner.error("unterminated literal string")),
                Some('\'') => return Ok(out),
                Some('\n') => return Err(self.scanner.error("newline in single-line string")),
                Some(ch) => out.push(ch),
            }
        }
    }

    fn skip_leading_newline(&mut self) {
        if !self.scanner.eat_str("\r\n") {
            self.scanner.eat('\n');
        }
    }

    fn read_multiline_basic_string(&mut self) -> Result<String> {
        self.skip_leading_newline();
        let mut out = String::new();
        loop {
            if self.scanner.eat_str("\"\"\"") {
                return Ok(out);
            }
            match self.scanner.next() {
                None => return Err(self.scanner.error("unterminated multi-line string")),
                Some('\\') if self.at_line_continuation() => {
                    while matches!(self.scanner.peek(), Some(' ' | '\t' | '\r' | '\n')) {
                        self.scanner.next();
                    }
                }
                Some('\\') => self.read_escape(&mut out)?,
                Some(ch) => out.push(ch),
            }
        }
    }

    /// A backslash followed only by blanks up to the newline joins lines.
    fn at_line_continuation(&self) -> bool {
        self.scanner
            .rest()
            .trim_start_matches([' ', '\t', '\r'])
            .starts_with('\n')
    }

    fn read_multiline_literal_string(&mut self) -> Result<String> {
        self.skip_leading_newline();
        let mut out = String::new();
        loop {
            if self.scanner.eat_str("'''") {
                return Ok(out);
            }
            match self.scanner.next() {
                None => {
                    return Err(self
                        .scanner
                        .error("unterminated multi-line literal string"))
                }
                Some(ch) => out.push(ch),
            }
        }
    }

    /// Decodes the escape after a backslash.
    fn read_escape(&mut self, out: &mut String) -> Result<()> {
        match self.scanner.next() {
            Some('b') => out.push('\u{0008}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(self.read_unicode_escape(4)?),
            Some('U') => out.push(self.read_unicode_escape(8)?),
            Some(other) => {
                return Err(self
                    .scanner
                    .error(format!("illegal escape sequence \\{}", other)))
            }
            None => return Err(self.scanner.error("unterminated string")),
        }
        Ok(())
    }

    fn read_unicode_escape(&mut self, digits: usize) -> Result<char> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.scanner.next() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                _ => {
                    return Err(self.scanner.error(format!(
                        "invalid unicode escape (expected {} hex digits)",
                        digits
                    )))
                }
            }
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                self.scanner
                    .error(format!("invalid unicode scalar value U+{}", hex))
            })
    }

    /// Reads an array; the opening bracket is already consumed.
    fn read_array(&mut self) -> Result<Value> {
        let mut elements: Vec<Value> = Vec::new();
        loop {
            match self.scanner.peek_significant(true) {
                None => return Err(self.scanner.error("unterminated array")),
                Some(']') => {
                    self.scanner.next();
                    break;
                }
                Some(_) => {}
            }

            let value = self.read_value()?;
            if let Some(first) = elements.first() {
                if first.type_str() != value.type_str() {
                    return Err(self.scanner.error(format!(
                        "mixed types in array: expected {}, found {}",
                        first.type_str(),
                        value.type_str()
                    )));
                }
            }
            elements.push(value);

            match self.scanner.next_significant(true) {
                Some(',') => continue,
                Some(']') => break,
                None => return Err(self.scanner.error("unterminated array")),
                Some(ch) => {
                    return Err(self.scanner.error(format!(
                        "unexpected character {:?} in array, expected ',' or ']'",
                        ch
                    )))
                }
            }
        }
        Ok(Value::array_or_table_array(elements))
    }

    /// Reads an inline table; the opening brace is already consumed.
    fn read_inline_table(&mut self) -> Result<Table> {
        let mut table = Table::new();
        self.scanner.skip_blank();
        if self.scanner.eat('}') {
            return Ok(table);
        }

        loop {
            self.scanner.skip_blank();
            match self.scanner.peek() {
                None => return Err(self.scanner.error("unterminated inline table")),
                Some('\n') => return Err(self.scanner.error("newline in inline table")),
                Some('}') => return Err(self.scanner.error("trailing comma in inline table")),
                Some(_) => {}
            }

            let key = self.read_key()?;
            if table.contains_key(&key) {
                return Err(self.scanner.error(format!("duplicate key \"{}\"", key)));
            }
            let value = self.read_assigned_value()?;
            table.insert(key, value);

            match self.scanner.next_significant_or_linebreak() {
                Some(',') => continue,
                Some('}') => return Ok(table),
                Some('\n') => return Err(self.scanner.error("newline in inline table")),
                None => return Err(self.scanner.error("unterminated inline table")),
                Some(ch) => {
                    return Err(self.scanner.error(format!(
                        "unexpected character {:?} in inline table, expected ',' or '}}'",
                        ch
                    )))
                }
            }
        }
    }
}

fn parse_integer(lexeme: &str) -> Option<Value> {
    let digits = lexeme.trim_start_matches(['+', '-']);
    if digits.is_empty()
        || lexeme.len() - digits.len() > 1
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }

    let integer = if digits.len() < 10 {
        Integer::Int(lexeme.parse().ok()?)
    } else {
        Integer::Long(lexeme.parse().ok()?)
    };
    Some(Value::Integer(integer))
}

fn parse_float(lexeme: &str) -> Option<f64> {
    let unsigned = lexeme.trim_start_matches(['+', '-']);
    let integer_part = unsigned.find(['.', 'e', 'E']).unwrap_or(unsigned.len());
    if integer_part > 1 && unsigned.starts_with('0') {
        return None;
    }

    let bytes = lexeme.as_bytes();
    // a decimal point needs a digit on both sides
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'.' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            if !before.is_some_and(|c| c.is_ascii_digit()) || !after.is_some_and(|c| c.is_ascii_digit()) {
                return None;
            }
        }
    }
    if !bytes.iter().any(|b| b.is_ascii_digit()) {
        return None;
    }
    lexeme.parse::<f64>().ok()
}

/// Notes every table-array inside an inline value, following inline tables.
fn record_inline_arrays(found: &mut HashSet<Vec<Step>>, path: &mut Vec<Step>, value: &Value) {
    match value {
        Value::TableArray(_) => {
            found.insert(path.clone());
        }
        Value::Table(table) => {
            for (key, value) in table {
                path.push(Step::Key(key.clone()));
                record_inline_arrays(found, path, value);
                path.pop();
            }
        }
        _ => {}
    }
}

/// Picks the table a header's body goes into, creating what is missing.
///
/// Returns the table together with its path from the root.
fn select_table<'t>(
    root: &'t mut Table,
    header: &Header,
    inline_arrays: &HashSet<Vec<Step>>,
) -> Result<(&'t mut Table, Vec<Step>)> {
    trace!(
        "header {}{}{} at line {}",
        if header.is_array { "[[" } else { "[" },
        header.path.join("."),
        if header.is_array { "]]" } else { "]" },
        header.line
    );

    let Some((last, parents)) = header.path.split_last() else {
        return Err(Error::format(header.line, "empty table name"));
    };
    let inline_array_error = |name: &str| {
        Error::format(
            header.line,
            format!("array \"{}\" was defined inline and cannot be extended", name),
        )
    };

    let mut location = Vec::with_capacity(header.path.len() + 1);
    let mut current = root;
    for segment in parents {
        location.push(Step::Key(segment.clone()));
        current = match current.get_or_insert_with(segment, || Value::Table(Table::new())) {
            Value::Table(table) => table,
            Value::TableArray(tables) => {
                if inline_arrays.contains(&location) {
                    return Err(inline_array_error(segment.as_str()));
                }
                let Some(index) = tables.len().checked_sub(1) else {
                    return Err(Error::format(
                        header.line,
                        format!("table-array \"{}\" has no element to extend", segment),
                    ));
                };
                location.push(Step::Index(index));
                &mut tables[index]
            }
            other => {
                return Err(Error::format(
                    header.line,
                    format!("key \"{}\" is already defined as {}", segment, other.type_str()),
                ))
            }
        };
    }

    location.push(Step::Key(last.clone()));
    if header.is_array {
        match current.get_or_insert_with(last, || Value::TableArray(Vec::new())) {
            Value::TableArray(tables) => {
                if inline_arrays.contains(&location) {
                    return Err(inline_array_error(last.as_str()));
                }
                let index = tables.len();
                tables.push(Table::new());
                location.push(Step::Index(index));
                Ok((&mut tables[index], location))
            }
            other => Err(Error::format(
                header.line,
                format!("cannot append to \"{}\": already defined as {}", last, other.type_str()),
            )),
        }
    } else {
        match current.get_or_insert_with(last, || Value::Table(Table::new())) {
            Value::Table(table) => Ok((table, location)),
            other => Err(Error::format(
                header.line,
                format!("key \"{}\" is already defined as {}", last, other.type_str()),
            )),
        }
    }
}

//! Dynamic value representation for TOML data.
//!
//! [`Value`] covers every kind a document can hold: strings, integers, floats,
//! booleans, the three date/time flavours, arrays, tables and arrays of tables.
//!
//! ## Creating and inspecting values
//!
//! ```rust
//! use tomlite::{Integer, Value};
//!
//! let port = Value::from(8080);
//! assert_eq!(port, Value::Integer(Integer::Int(8080)));
//! assert_eq!(port.as_i64(), Some(8080));
//! assert_eq!(port.type_str(), "integer");
//!
//! let name = Value::from("db");
//! assert_eq!(name.as_str(), Some("db"));
//! ```
//!
//! ## Integer width
//!
//! Integers keep the width the literal was written with: fewer than ten digits
//! is an [`Integer::Int`], ten or more an [`Integer::Long`]. Values built from
//! Rust integers follow the same rule, so a document always re-reads to the
//! same widths it was written with.

use crate::{datetime, Table};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Any value that can appear in a TOML document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(Integer),
    Float(f64),
    Boolean(bool),
    /// Date without time, e.g. `1979-05-27`
    Date(NaiveDate),
    /// Date and time without offset, e.g. `1979-05-27T07:32:00`
    DateTime(NaiveDateTime),
    /// Date and time with offset, e.g. `1979-05-27T07:32:00-08:00`
    OffsetDateTime(DateTime<FixedOffset>),
    Array(Vec<Value>),
    Table(Table),
    /// Tables declared with `[[name]]` headers, or an array of inline tables
    TableArray(Vec<Table>),
}

/// An integer, remembering whether its literal needed 64 bits.
///
/// # Examples
///
/// ```rust
/// use tomlite::Integer;
///
/// assert_eq!(Integer::new(123_456_789), Integer::Int(123_456_789));
/// assert_eq!(Integer::new(1_234_567_890), Integer::Long(1_234_567_890));
/// assert_eq!(Integer::Int(7).as_i64(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Integer {
    Int(i32),
    Long(i64),
}

impl Integer {
    /// Picks the width a literal of this value would be read back with.
    #[must_use]
    pub fn new(value: i64) -> Self {
        if value.unsigned_abs() <= 999_999_999 {
            // at most nine digits, always in i32 range
            Integer::Int(value as i32)
        } else {
            Integer::Long(value)
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        match self {
            Integer::Int(i) => *i as i64,
            Integer::Long(l) => *l,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Integer::Long(_))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Int(i) => write!(f, "{}", i),
            Integer::Long(l) => write!(f, "{}", l),
        }
    }
}

impl Value {
    /// Name of this value's kind, as used in error messages.
    ///
    /// Both integer widths share the name `"integer"` and both array shapes
    /// share `"array"`; arrays must hold elements of a single kind.
    #[must_use]
    pub const fn type_str(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::OffsetDateTime(_) => "offset datetime",
            Value::Array(_) | Value::TableArray(_) => "array",
            Value::Table(_) => "table",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` for any of the three date/time kinds.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(
            self,
            Value::Date(_) | Value::DateTime(_) | Value::OffsetDateTime(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table_array(&self) -> bool {
        matches!(self, Value::TableArray(_))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the integer value regardless of its width.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().map(|i| i.as_i64())
    }

    /// Returns floats as-is and widens integers.
    ///
    /// ```rust
    /// use tomlite::Value;
    ///
    /// assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
    /// assert_eq!(Value::from(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::from("2").as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(i.as_i64() as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_offset_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::OffsetDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table_array(&self) -> Option<&Vec<Table>> {
        match self {
            Value::TableArray(tables) => Some(tables),
            _ => None,
        }
    }

    /// Returns `true` if a writer emits this value as a `[table]` or
    /// `[[table-array]]` block rather than a `key = value` line.
    pub(crate) fn is_block(&self) -> bool {
        match self {
            Value::Table(_) => true,
            Value::TableArray(tables) => !tables.is_empty(),
            Value::Array(arr) => matches!(arr.first(), Some(Value::Table(_))),
            _ => false,
        }
    }
}

/// Formats the value as it would appear on the right-hand side of `key = `.
///
/// ```rust
/// use tomlite::Value;
///
/// assert_eq!(Value::from("a\tb").to_string(), r#""a\tb""#);
/// assert_eq!(Value::Float(2.0).to_string(), "2.0");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::writer::write_inline_value(&mut out, self).map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;

        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(Integer::Int(i)) => serializer.serialize_i32(*i),
            Value::Integer(Integer::Long(l)) => serializer.serialize_i64(*l),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Date(_) | Value::DateTime(_) | Value::OffsetDateTime(_) => {
                // is_datetime guarantees a formatted string
                let text = datetime::format(self).unwrap_or_default();
                serializer.serialize_str(&text)
            }
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::TableArray(tables) => {
                let mut seq = serializer.serialize_seq(Some(tables.len()))?;
                for table in tables {
                    seq.serialize_element(table)?;
                }
                seq.end()
            }
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(Integer::new(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(|v| Value::Integer(Integer::new(v)))
                    .map_err(|_| E::custom(format!("{} does not fit in 64-bit signed", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("TOML has no null value"))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("TOML has no null value"))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::array_or_table_array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Table::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Table(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(serde::de::Error::custom(format!(
                "expected table, found {}",
                other.type_str()
            ))),
        }
    }
}

impl Value {
    /// Builds an array, turning a non-empty list of tables into a table-array.
    pub(crate) fn array_or_table_array(elements: Vec<Value>) -> Value {
        if !elements.is_empty() && elements.iter().all(Value::is_table) {
            let tables = elements
                .into_iter()
                .filter_map(|v| match v {
                    Value::Table(t) => Some(t),
                    _ => None,
                })
                .collect();
            Value::TableArray(tables)
        } else {
            Value::Array(elements)
        }
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i.as_i64()),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.type_str()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| {
            crate::Error::custom(format!("expected float, found {}", value.type_str()))
        })
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value.type_str()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.type_str()
            ))),
        }
    }
}

impl TryFrom<Value> for Table {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Table(t) => Ok(t),
            _ => Err(crate::Error::custom(format!(
                "expected table, found {}",
                value.type_str()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(Integer::Int(value as i32))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(Integer::Int(value as i32))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(Integer::new(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(Integer::new(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(Integer::Int(value as i32))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(Integer::Int(value as i32))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(Integer::new(value as i64))
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::OffsetDateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl From<Vec<Table>> for Value {
    fn from(value: Vec<Table>) -> Self {
        Value::TableArray(value)
    }
}

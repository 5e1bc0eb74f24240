//! Serde serializer producing [`Value`] trees.
//!
//! Rust data is first converted into a [`Value`]; the writer then turns the
//! root [`Table`] into text. Going through the value tree lets the writer see a
//! whole table before emitting it, which the two-pass table layout needs.
//!
//! ## Type mapping
//!
//! | Rust                         | TOML value                         |
//! |------------------------------|------------------------------------|
//! | `bool`                       | boolean                            |
//! | integers                     | integer (width from digit count)   |
//! | `f32`, `f64`                 | float                              |
//! | `char`, `&str`, `String`     | string                             |
//! | `Vec<T>`, tuples             | array (table-array if all tables)  |
//! | structs, maps                | table                              |
//! | unit enum variant            | string holding the variant name    |
//! | newtype enum variant         | single-entry table                 |
//! | `Option<T>` field            | omitted when `None`                |
//!
//! `()` and unit structs have no TOML form and fail with
//! [`Error::UnsupportedValue`]. A `None` that is not a table field fails with
//! [`Error::UnsupportedNone`].

use crate::{Error, Integer, Result, Table, Value};
use serde::{ser, Serialize};

/// Serializer whose output is a [`Value`].
///
/// ```rust
/// use serde::Serialize;
/// use tomlite::{ser::ValueSerializer, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = Point { x: 1, y: 2 }.serialize(ValueSerializer).unwrap();
/// let table = value.as_table().unwrap();
/// assert_eq!(table.get("x"), Some(&Value::from(1)));
/// ```
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    table: Table,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(Integer::Int(v as i32)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(Integer::Int(v as i32)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(Integer::new(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(Integer::new(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(Integer::Int(v as i32)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(Integer::Int(v as i32)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Integer(Integer::new(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(|v| Value::Integer(Integer::new(v)))
            .map_err(|_| Error::UnsupportedValue(format!("{} does not fit in 64-bit signed", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Integer(Integer::Int(b as i32)))
            .collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::UnsupportedNone)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unsupported_value("unit type"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::UnsupportedValue(format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut table = Table::with_capacity(1);
        table.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Table(table))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_value("tuple variants"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_value("struct variants"))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        Value::array_or_table_array(self.vec)
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            table: Table::with_capacity(capacity),
            current_key: None,
        }
    }

    /// Stores a field, leaving it out entirely when its value is `None`.
    fn insert_field<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(value) {
            Ok(value) => {
                self.table.insert(key, value);
                Ok(())
            }
            Err(Error::UnsupportedNone) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::UnsupportedValue(format!(
                "map keys must be strings, found {}",
                other.type_str()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert_field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert_field(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Table(self.table))
    }
}

/// Converts any `Serialize` type into a [`Value`].
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

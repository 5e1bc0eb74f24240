//! Property-based tests for the core round-trip guarantees
//!
//! These complement the reader and writer tests by checking, across generated
//! inputs, that anything written reads back as the same document.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tomlite::{from_str, read, to_string, write, Table, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    value: T,
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: T,
) -> bool {
    let wrapped = Wrapper { value };
    match to_string(&wrapped) {
        Ok(serialized) => match from_str::<Wrapper<T>>(&serialized) {
            Ok(deserialized) => wrapped == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_-]{0,8}",
        "[ -~]{0,6}",
        "\\PC{1,4}",
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        "\\PC*".prop_map(Value::String),
        any::<String>().prop_map(Value::String),
    ]
}

fn array() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(any::<i64>().prop_map(Value::from), 0..6).prop_map(Value::Array),
        prop::collection::vec("\\PC*".prop_map(Value::String), 1..6).prop_map(Value::Array),
    ]
}

fn leaf_table() -> impl Strategy<Value = Table> {
    prop::collection::btree_map(key(), prop_oneof![scalar(), array()], 0..6)
        .prop_map(|entries: BTreeMap<String, Value>| entries.into_iter().collect())
}

fn document() -> impl Strategy<Value = Table> {
    (
        leaf_table(),
        prop::collection::btree_map(key(), leaf_table(), 0..3),
        prop::collection::btree_map(key(), prop::collection::vec(leaf_table(), 1..3), 0..2),
    )
        .prop_map(|(mut root, tables, table_arrays)| {
            for (k, t) in tables {
                root.insert(k, Value::Table(t));
            }
            for (k, ts) in table_arrays {
                root.insert(k, Value::TableArray(ts));
            }
            root
        })
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(n));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(f));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(b));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(opt));
    }

    #[test]
    fn prop_tuple_i32_i64(t in (any::<i32>(), any::<i64>())) {
        prop_assert!(roundtrip(t));
    }

    #[test]
    fn prop_integer_width_follows_digits(n in any::<i64>()) {
        let doc = read(&format!("n = {}", n)).unwrap();
        let integer = doc.get("n").and_then(Value::as_integer).unwrap();
        let digits = n.unsigned_abs().to_string().len();
        prop_assert_eq!(integer.is_long(), digits >= 10);
        prop_assert_eq!(integer.as_i64(), n);
    }

    #[test]
    fn prop_document_roundtrip(doc in document()) {
        let text = write(&doc).unwrap();
        let back = read(&text);
        prop_assert!(back.is_ok(), "{:?}\n{}", back, text);
        prop_assert_eq!(back.unwrap(), doc);
    }

    #[test]
    fn prop_reader_never_panics(input in "\\PC{0,64}") {
        let _ = read(&input);
    }
}

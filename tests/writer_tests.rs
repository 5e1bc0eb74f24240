use tomlite::{
    read, write_file, write_to, write_with_options, Error, LineEnding, ReaderOptions, Table, Value,
    WriterOptions,
};

fn lf() -> WriterOptions {
    WriterOptions::new().with_line_ending(LineEnding::Lf)
}

fn write(table: &Table) -> String {
    write_with_options(table, &lf()).unwrap()
}

fn assert_round_trip(input: &str) {
    let doc = read(input).unwrap();
    let text = write(&doc);
    let again = read(&text).unwrap_or_else(|e| panic!("{}\n---\n{}", e, text));
    assert_eq!(again, doc, "rewritten text:\n{}", text);
}

#[test]
fn test_round_trip_full_document() {
    assert_round_trip(
        r#"
# This is a TOML document.

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers]

  [servers.alpha]
  ip = "10.0.0.1"
  dc = "eqdc10"

  [servers.beta]
  ip = "10.0.0.2"
  dc = "eqdc10"

[clients]
data = [ ["gamma", "delta"], [1, 2] ]
hosts = [
  "alpha",
  "omega"
]
"#,
    );
}

#[test]
fn test_round_trip_scalars() {
    assert_round_trip(
        "i = 123456789\nl = 1234567890\nneg = -9223372036854775808\nf = 0.1\nbig = 1e300\ntiny = 5e-324\nzero = -0.0\n",
    );
    assert_round_trip(
        "d = 2015-03-20\nl = 2015-03-20T19:04:35.123\no = 2015-03-20T19:04:35+01:00\nz = 1979-05-27T07:32:00Z\n",
    );
    assert_round_trip("s = \"a\\tb\\u0001\\\"q\\\" é\"\nlit = 'C:\\path'\nml = \"\"\"\nline one\nline two\"\"\"\n");
}

#[test]
fn test_round_trip_table_arrays() {
    assert_round_trip(
        r#"
[[fruit]]
name = "apple"
[fruit.physical]
color = "red"
[[fruit.variety]]
name = "red delicious"
[[fruit.variety]]
name = "granny smith"

[[fruit]]
name = "banana"
[[fruit.variety]]
name = "plantain"
"#,
    );
    assert_round_trip("points = [ { x = 1, y = 2 }, { x = 3, y = 4 } ]\n");
    assert_round_trip("nested = [ [ { a = 1 } ], [ { a = 2 } ] ]\n");
}

#[test]
fn test_round_trip_quoted_keys() {
    assert_round_trip("\"a.b\" = 1\n\"\" = 2\n\"sp ace\" = 3\nclé = 4\n[\"dotted.table\"]\nk = 5\n[\"x y\".z]\nk = 6\n");
}

#[test]
fn test_escape_fidelity() {
    let doc = read(r#"s = "a\tb""#).unwrap();
    assert_eq!(write(&doc), "s = \"a\\tb\"\n");
}

#[test]
fn test_plain_entries_before_tables() {
    let mut doc = Table::new();
    doc.insert_path("t.x", Value::from(1)).unwrap();
    doc.insert("late".to_string(), Value::from(2));
    let text = write(&doc);
    assert!(text.find("late").unwrap() < text.find("[t]").unwrap());
    assert_eq!(read(&text).unwrap().get("late"), Some(&Value::from(2)));
}

#[test]
fn test_at_most_one_blank_line() {
    let doc = read("[a]\n[a.b]\n[a.b.c]\n[d]\n[[e]]\n[[e]]\n").unwrap();
    let text = write(&doc);
    assert!(!text.contains("\n\n\n"), "{:?}", text);
    assert!(!text.starts_with('\n'));
}

#[test]
fn test_indentation() {
    let doc = read("[a.b]\nk = 1\n").unwrap();
    assert_eq!(write(&doc), "[a]\n\n\t[a.b]\n\t\tk = 1\n\n");
}

#[test]
fn test_empty_containers() {
    let mut doc = Table::new();
    doc.insert("arr".to_string(), Value::Array(Vec::new()));
    doc.insert("tables".to_string(), Value::TableArray(Vec::new()));
    doc.insert("t".to_string(), Value::Table(Table::new()));
    let text = write(&doc);
    assert_eq!(text, "arr = []\ntables = []\n\n[t]\n\n");

    let back = read(&text).unwrap();
    assert_eq!(back.get("tables"), Some(&Value::Array(Vec::new())));
    assert_eq!(back.get("t"), Some(&Value::Table(Table::new())));
}

#[test]
fn test_non_finite_floats() {
    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut doc = Table::new();
        doc.insert("f".to_string(), Value::Float(f));
        assert!(matches!(
            write_with_options(&doc, &lf()),
            Err(Error::UnsupportedValue(_))
        ));
    }
}

#[test]
fn test_value_display() {
    assert_eq!(Value::from(1.5).to_string(), "1.5");
    assert_eq!(Value::from(vec![Value::from("a")]).to_string(), "[\"a\"]");
    let doc = read("t = { k = true }").unwrap();
    assert_eq!(doc.get("t").unwrap().to_string(), "{ k = true }");
}

#[test]
fn test_write_to_sink() {
    let doc = read("a = 1\n").unwrap();
    let mut sink = Vec::new();
    write_to(&mut sink, &doc, &lf()).unwrap();
    assert_eq!(sink, b"a = 1\n");
}

#[test]
fn test_write_file() {
    let path = std::env::temp_dir().join(format!("tomlite-write-{}.toml", std::process::id()));
    let doc = read("[server]\nport = 8080\n").unwrap();
    write_file(&path, &doc, &WriterOptions::default()).unwrap();
    let back = tomlite::read_file(&path, &ReaderOptions::default()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_line_ending_from_str() {
    assert_eq!(LineEnding::from("\n"), LineEnding::Lf);
    assert_eq!(LineEnding::from("\r\n"), LineEnding::CrLf);
    assert_eq!(LineEnding::from(";"), LineEnding::Custom(";".to_string()));

    let doc = read("a = 1\nb = 2\n").unwrap();
    let options = WriterOptions::new().with_line_ending(LineEnding::from(";"));
    assert_eq!(write_with_options(&doc, &options).unwrap(), "a = 1;b = 2;");
}

#[test]
fn test_platform_line_ending_default() {
    let doc = read("a = 1").unwrap();
    let text = tomlite::write(&doc).unwrap();
    assert!(text.ends_with(LineEnding::platform().as_str()));
}

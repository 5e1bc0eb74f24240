//! Reading, editing and writing a TOML document.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use tomlite::{read, write, Value};

const DOCUMENT: &str = r#"
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

[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
color = "gray"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = read(DOCUMENT)?;

    if let Some(dob) = doc.get_path("owner.dob").and_then(Value::as_offset_datetime) {
        println!("owner born {}", dob.date_naive());
    }
    let products = doc
        .get("products")
        .and_then(Value::as_table_array)
        .map_or(0, Vec::len);
    println!("{} products", products);

    doc.insert_path("database.connection_max", Value::from(10_000))?;
    doc.insert_path("servers.alpha.ip", Value::from("10.0.0.1"))?;
    doc.remove_path("database.server");

    let text = write(&doc)?;
    println!("Updated document:\n{}", text);

    assert_eq!(read(&text)?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}

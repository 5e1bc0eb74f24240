//! Loading and saving a configuration struct through serde.
//!
//! Run with: cargo run --example typed_config

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tomlite::{from_str, to_string};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum LogLevel {
    Error,
    Info,
    Debug,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Listener {
    host: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    released: NaiveDate,
    level: LogLevel,
    retry_factor: f64,
    proxy: Option<String>,
    listeners: Vec<Listener>,
}

const CONFIG: &str = r#"
name = "gateway"
released = 2015-03-20
level = "Info"
retry_factor = 1.5

[[listeners]]
host = "0.0.0.0"
port = 80

[[listeners]]
host = "::1"
port = 8443
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(CONFIG)?;
    println!("{:#?}\n", config);

    let text = to_string(&config)?;
    println!("Serialized:\n{}", text);

    let back: Config = from_str(&text)?;
    assert_eq!(config, back);
    println!("✓ Round-trip successful");

    Ok(())
}

//! Key modes, indentation and line endings.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use tomlite::{
    read_with_options, write_with_options, IndentStyle, LineEnding, ReaderOptions, WriterOptions,
};

const DOCUMENT: &str = "clé = \"lenient keys accept this\"\n\n[a.b]\nc = 1\n";

fn main() -> Result<(), Box<dyn Error>> {
    // Lenient keys (the default)
    let doc = read_with_options(DOCUMENT, &ReaderOptions::new())?;
    println!("Lenient read: {} top-level keys", doc.len());

    // Strict keys refuse anything outside A-Z a-z 0-9 _ -
    let strict = ReaderOptions::new().with_strict_keys(true);
    match read_with_options(DOCUMENT, &strict) {
        Ok(_) => println!("Strict read unexpectedly succeeded"),
        Err(e) => println!("Strict read: {}\n", e),
    }

    println!("Default (tabs, platform line ending):");
    println!("{}", write_with_options(&doc, &WriterOptions::new())?);

    println!("Four spaces, LF:");
    let spaces = WriterOptions::new()
        .with_indent(IndentStyle::Spaces)
        .with_indent_size(4)
        .with_line_ending(LineEnding::Lf);
    println!("{}", write_with_options(&doc, &spaces)?);

    println!("Two tabs, CRLF (escaped):");
    let crlf = WriterOptions::new()
        .with_indent_size(2)
        .with_line_ending(LineEnding::CrLf);
    println!("{:?}", write_with_options(&doc, &crlf)?);

    Ok(())
}

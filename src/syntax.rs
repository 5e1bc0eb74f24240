//! The TOML dialect read and written by this library
//!
//! This module documents the subset of TOML v0.4 implemented here, including
//! the places where this library is stricter or looser than the published
//! grammar.
//!
//! # Documents
//!
//! A document is a root table followed by any number of header sections:
//!
//! ```text
//! title = "example"          # root table entry
//!
//! [owner]                    # table header
//! name = "Tom"
//!
//! [[products]]               # table-array header, one element per header
//! name = "Hammer"
//! ```
//!
//! Blank lines and `#` comments may appear anywhere a new line may start, and a
//! comment may follow any value or header on the same line.
//!
//! ## Keys
//!
//! | Form    | Example        | Notes                                        |
//! |---------|----------------|----------------------------------------------|
//! | Bare    | `port`         | see the key modes below                      |
//! | Basic   | `"a.b c"`      | basic string escapes apply                   |
//! | Literal | `'C:\path'`    | no escapes                                   |
//!
//! Whitespace is allowed between a key and its `=`. The value must start on
//! the same line. A key may be defined only once per table.
//!
//! **Key modes**:
//! - *strict*: bare keys contain only `A-Z a-z 0-9 _ -`
//! - *lenient* (default): bare keys contain anything but whitespace, control
//!   characters and `# = . [ ]`, so `clé = 1` is accepted
//!
//! ## Headers
//!
//! - `[a.b.c]` selects the table at that path, creating missing tables on the
//!   way. Selecting a table that already exists extends it; keys must still be
//!   unique within it.
//! - `[[a.b.c]]` appends a new table to the table-array at that path and makes
//!   it the target of the following entries.
//! - A segment naming a table-array descends into its most recent element, so
//!   `[fruit.physical]` after `[[fruit]]` adds to the last fruit.
//! - Segments may be quoted and may be surrounded by spaces or tabs.
//! - A segment naming any other kind of value is an error.
//!
//! # Values
//!
//! ## Strings
//!
//! | Form              | Delimiters  | Escapes | Newlines |
//! |-------------------|-------------|---------|----------|
//! | Basic             | `"`         | yes     | no       |
//! | Multi-line basic  | `"""`       | yes     | yes      |
//! | Literal           | `'`         | no      | no       |
//! | Multi-line literal| `'''`       | no      | yes      |
//!
//! Escapes: `\b \t \n \f \r \" \\ \uXXXX \UXXXXXXXX`. Any other escape, or a
//! code point that is not a Unicode scalar value, is an error.
//!
//! In multi-line strings a newline directly after the opening delimiter is
//! dropped. In multi-line basic strings a backslash ending a line removes the
//! line break and all whitespace up to the next non-blank character.
//!
//! ## Numbers and dates
//!
//! Numbers and dates share one lexical form. The lexeme runs until `,`,
//! whitespace, `]`, `}`, `#` or the end of input, and is classified while it is
//! scanned:
//!
//! | Character | Rules out            |
//! |-----------|----------------------|
//! | `:` `T` `Z` | integer, float     |
//! | `e` `E`   | integer, date        |
//! | `.`       | integer              |
//! | `-` (not leading, not after `e`) | integer, float |
//! | `_`       | date (and is dropped)|
//!
//! An `_` must sit between two digits, as in `1_000` or `1e1_0`.
//!
//! The first remaining kind in the order integer, float, date is parsed; if it
//! fails to parse the value is an error, the other kinds are not tried.
//!
//! **Integers** carry an optional sign and no leading zeros. Literals of fewer
//! than ten digits become [`Integer::Int`](crate::Integer::Int), longer ones
//! [`Integer::Long`](crate::Integer::Long). Values beyond 64 bits are errors.
//!
//! **Floats** need a digit on both sides of the decimal point and follow the
//! integer rules for their integer part, so `01.5` is an error. An exponent is
//! optional. `inf` and `nan` are not part of TOML v0.4, and a float too large
//! for 64 bits, such as `1e400`, is an error.
//!
//! **Dates** come in three kinds:
//!
//! ```text
//! 1979-05-27                  date
//! 1979-05-27T07:32:00.999     local date-time
//! 1979-05-27T07:32:00-08:00   offset date-time (Z for UTC)
//! ```
//!
//! ## Booleans
//!
//! `true` and `false`, lowercase.
//!
//! ## Arrays
//!
//! `[ v1, v2, ... ]`. Elements must all be of one kind; integers of both widths
//! count as one kind, and so do all arrays. Newlines, comments and a trailing
//! comma are allowed inside the brackets. An array whose elements are all
//! inline tables is read as a table-array, but it stays closed: a later
//! `[[a]]` or `[a.b]` header naming it is an error.
//!
//! ## Inline tables
//!
//! `{ k1 = v1, k2 = v2 }` on a single line, with no trailing comma and no
//! duplicate keys.
//!
//! # Writing
//!
//! Output is always valid input:
//!
//! - plain entries come before `[table]` and `[[table-array]]` blocks at every
//!   level
//! - keys outside `A-Z a-z 0-9 _ -` are quoted
//! - strings are written as basic strings; control characters without a short
//!   escape are written as `\uXXXX`
//! - floats always carry a `.` or an exponent; NaN and infinities are refused
//! - tables inside arrays are written inline
//! - headers are indented one level less than their bodies, and at most one
//!   blank line separates blocks

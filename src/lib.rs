//! # gram-csv
//!
//! Strict CSV loading into column-major `f64` tables, and emission of those
//! tables as static C declarations for embedding in another program.
//!
//! ## Loading
//!
//! ```no_run
//! use gram_csv::CsvLoader;
//!
//! let mut loader = CsvLoader::new();
//! let table = loader.load("measurements.csv")?;
//! for (header, values) in table.iter() {
//!     println!("{}: {} values", header, values.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Emitting a header
//!
//! ```no_run
//! use gram_csv::{load, emit_declaration};
//!
//! let table = load("measurements.csv")?;
//! emit_declaration(&table, "measurements.h")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Input rules
//!
//! - Comma delimiter, optional double-quote quoting with `""` escapes
//! - LF or CRLF line endings; a bare CR is an error
//! - The first non-blank record is the header; every other non-blank
//!   record must have the same number of fields
//! - Empty fields are `0.0`; other fields are read leniently unless
//!   [`NumericMode::Strict`] is selected

pub mod csv;
pub mod csv_reader;
pub mod declaration;
pub mod error;
pub mod options;
pub mod reporter;
pub mod table;

pub use csv_reader::{load, CsvLoader};
pub use declaration::{emit_declaration, emit_declaration_with, CHeader, DeclarationFormat};
pub use error::{CsvError, LineError, Result};
pub use options::{LoadOptions, NumericMode};
pub use reporter::{Diagnostic, ErrorReporter};
pub use table::Table;

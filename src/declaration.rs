//! Emitting a table as a static data declaration
//!
//! The provided format is a C header holding one struct literal with an
//! array per column:
//!
//! ```text
//! #ifndef _DATA_DATASET_H
//! #define _DATA_DATASET_H
//! struct _gram_dataset_DATA {
//!     unsigned long column_count;
//!     unsigned long data_count;
//!     double hx[2];
//! } DDATA = {
//!     .column_count = 1,
//!     .data_count = 2,
//!     .hx = { 1.000000, 2.000000 },
//! };
//! #endif
//! ```
//!
//! Other targets plug in through [`DeclarationFormat`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::table::Table;

/// Guard used when the file name yields no identifier
pub const UNNAMED_GUARD: &str = "UNNAMED";

/// Serializes a table into a source-code declaration
pub trait DeclarationFormat {
    fn write_declaration(&self, table: &Table, out: &mut dyn Write) -> io::Result<()>;
}

/// C header with include guards and a designated-initializer struct literal
#[derive(Debug, Clone, Copy, Default)]
pub struct CHeader;

impl DeclarationFormat for CHeader {
    fn write_declaration(&self, table: &Table, out: &mut dyn Write) -> io::Result<()> {
        let guard = guard_identifier(table.file_name());
        let fields: Vec<String> = table.headers().iter().map(|h| field_identifier(h)).collect();
        let mut counts = itoa::Buffer::new();

        writeln!(out, "#ifndef _{}_DATASET_H", guard)?;
        writeln!(out, "#define _{}_DATASET_H", guard)?;

        writeln!(out, "struct _gram_dataset_{} {{", guard)?;
        writeln!(out, "    unsigned long column_count;")?;
        writeln!(out, "    unsigned long data_count;")?;
        let data_count = counts.format(table.col_len()).to_owned();
        for field in &fields {
            writeln!(out, "    double h{}[{}];", field, data_count)?;
        }
        writeln!(out, "}} D{} = {{", guard)?;

        writeln!(out, "    .column_count = {},", counts.format(table.col_count()))?;
        writeln!(out, "    .data_count = {},", data_count)?;
        for (field, column) in fields.iter().zip(table.columns()) {
            write!(out, "    .h{} = {{", field)?;
            for (i, value) in column.iter().enumerate() {
                if i > 0 {
                    out.write_all(b",")?;
                }
                write_value(out, *value)?;
            }
            writeln!(out, " }},")?;
        }
        writeln!(out, "}};")?;
        writeln!(out, "#endif")?;
        Ok(())
    }
}

/// Fixed-point literal, or a constant expression for values C has no
/// literal for
fn write_value(out: &mut dyn Write, value: f64) -> io::Result<()> {
    if value.is_nan() {
        out.write_all(b" (0.0/0.0)")
    } else if value.is_infinite() {
        if value.is_sign_negative() {
            out.write_all(b" (-1.0/0.0)")
        } else {
            out.write_all(b" (1.0/0.0)")
        }
    } else {
        write!(out, " {:.6}", value)
    }
}

/// Include-guard identifier for a file name.
///
/// ASCII alphanumerics are uppercased, every other byte becomes `_`, and
/// the name stops at the first `.`. Falls back to [`UNNAMED_GUARD`].
///
/// ```
/// use gram_csv::declaration::guard_identifier;
///
/// assert_eq!(guard_identifier("data.csv"), "DATA");
/// assert_eq!(guard_identifier("my-set 2.csv"), "MY_SET_2");
/// assert_eq!(guard_identifier(".hidden"), "UNNAMED");
/// ```
pub fn guard_identifier(file_name: &str) -> String {
    let guard: String = file_name
        .bytes()
        .take_while(|&b| b != b'.')
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                b.to_ascii_uppercase() as char
            } else {
                '_'
            }
        })
        .collect();
    if guard.is_empty() {
        UNNAMED_GUARD.to_string()
    } else {
        guard
    }
}

/// Struct field identifier for a header: ASCII alphanumerics lowercased,
/// every other byte replaced by `_`.
///
/// The emitted field is this identifier prefixed with `h`.
pub fn field_identifier(header: &str) -> String {
    header
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                b.to_ascii_lowercase() as char
            } else {
                '_'
            }
        })
        .collect()
}

/// Write `table` to `path` as a C header
pub fn emit_declaration<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    emit_declaration_with(&CHeader, table, path)
}

/// Write `table` to `path` using `format`.
///
/// The file is created or truncated; any I/O failure is returned as
/// `CsvError::Io`.
#[instrument(level = "debug", skip(format, table, path), fields(path = %path.as_ref().display()))]
pub fn emit_declaration_with<F, P>(format: &F, table: &Table, path: P) -> Result<()>
where
    F: DeclarationFormat + ?Sized,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    format.write_declaration(table, &mut writer)?;
    writer.flush()?;
    debug!(
        columns = table.col_count(),
        rows = table.col_len(),
        "declaration written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvLoader;

    fn render(table: &Table) -> String {
        let mut buffer = Vec::new();
        CHeader.write_declaration(table, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_guard() {
        assert_eq!(guard_identifier("data.csv"), "DATA");
        assert_eq!(guard_identifier("data"), "DATA");
        assert_eq!(guard_identifier("a.b.c"), "A");
        assert_eq!(guard_identifier(""), UNNAMED_GUARD);
        assert_eq!(guard_identifier("été.csv"), "__T__");
    }

    #[test]
    fn test_field_identifier() {
        assert_eq!(field_identifier("X Y"), "x_y");
        assert_eq!(field_identifier("Z.2"), "z_2");
        assert_eq!(field_identifier("Temp\t(C)"), "temp__c_");
        assert_eq!(field_identifier(""), "");
    }

    #[test]
    fn test_full_layout() {
        let table = CsvLoader::new()
            .load_from_reader("data.csv", "X Y,Z.2\n1,2.5\n-3,0.125\n".as_bytes())
            .unwrap();
        let expected = "\
#ifndef _DATA_DATASET_H
#define _DATA_DATASET_H
struct _gram_dataset_DATA {
    unsigned long column_count;
    unsigned long data_count;
    double hx_y[2];
    double hz_2[2];
} DDATA = {
    .column_count = 2,
    .data_count = 2,
    .hx_y = { 1.000000, -3.000000 },
    .hz_2 = { 2.500000, 0.125000 },
};
#endif
";
        assert_eq!(render(&table), expected);
    }

    #[test]
    fn test_no_rows() {
        let table = CsvLoader::new()
            .load_from_reader("empty.csv", "a\n".as_bytes())
            .unwrap();
        let out = render(&table);
        assert!(out.contains("    double ha[0];\n"));
        assert!(out.contains("    .ha = { },\n"));
        assert!(out.contains("    .data_count = 0,\n"));
    }

    #[test]
    fn test_large_values_stay_fixed_point() {
        let table = CsvLoader::new()
            .load_from_reader("big.csv", "v\n1e20\n1e-7\n".as_bytes())
            .unwrap();
        let out = render(&table);
        assert!(out.contains("100000000000000000000.000000"));
        assert!(out.contains("0.000000 }"));
        assert!(!out.contains("e+"));
    }

    #[test]
    fn test_non_finite_values_are_c_expressions() {
        let table = CsvLoader::new()
            .load_from_reader("odd.csv", "x\nnan\ninf\n-inf\n".as_bytes())
            .unwrap();
        assert!(table.column("x").unwrap()[0].is_nan());

        let out = render(&table);
        assert!(out.contains("    .hx = { (0.0/0.0), (1.0/0.0), (-1.0/0.0) },\n"));
        assert!(!out.contains("NaN"));
        assert!(!out.contains("inf"));
    }
}

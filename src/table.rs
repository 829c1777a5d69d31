//! Column-major numeric dataset

use std::fmt;
use std::path::Path;

/// A loaded CSV file: ordered headers and one `f64` column per header.
///
/// Every column has the same length. Header order is the file's order;
/// `column` resolves a repeated name to its last occurrence.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    file_name: String,
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Table {
    pub(crate) fn new(file_name: String, headers: Vec<String>, columns: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(headers.len(), columns.len());
        debug_assert!(columns.windows(2).all(|w| w[0].len() == w[1].len()));
        Table {
            file_name,
            headers,
            columns,
        }
    }

    /// Input file name without its directory
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of columns (always equal to `header_count`)
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows, i.e. the length of every column
    pub fn col_len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// True when the file had a header but no data rows
    pub fn is_empty(&self) -> bool {
        self.col_len() == 0
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn column_at(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Column of the header equal to `name`. With duplicate headers the
    /// last one wins, as if each column were assigned by name in order.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .rposition(|h| h == name)
            .and_then(|i| self.column_at(i))
    }

    /// `(header, values)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Release the table and everything it owns.
    ///
    /// Same as dropping it; provided so callers can make the teardown
    /// point explicit.
    pub fn release(self) {
        drop(self);
    }
}

/// Summary of the table: name, shape, headers, then one line per row
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSV file: `{}`", self.file_name)?;
        writeln!(f, "Fields per record: {}", self.header_count())?;
        writeln!(f, "Data per column: {}", self.col_len())?;
        writeln!(f, "Headers:")?;
        for header in &self.headers {
            write!(f, "`{}`\t", header)?;
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "Column Data:")?;
        for row in 0..self.col_len() {
            for column in &self.columns {
                write!(f, "{:.6}\t", column[row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Display name of an input path: everything after the last `/` or `\`
pub(crate) fn display_name(path: &Path) -> String {
    let full = path.to_string_lossy();
    full.rsplit(['/', '\\']).next().unwrap_or_default().to_string()
}

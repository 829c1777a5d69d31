//! Loading CSV files into column-major tables

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument, trace, warn};

use crate::csv::LineTokenizer;
use crate::error::{CsvError, Result};
use crate::options::{LoadOptions, NumericMode};
use crate::reporter::{Diagnostic, ErrorReporter};
use crate::table::{display_name, Table};

/// Loads CSV files into [`Table`]s and remembers the last failure.
///
/// The first non-blank record is the header; every later non-blank record
/// must have the same number of fields. A load either returns a complete
/// table or an error, never a partial table.
///
/// # Examples
///
/// ```no_run
/// use gram_csv::CsvLoader;
///
/// let mut loader = CsvLoader::new();
/// match loader.load("data.csv") {
///     Ok(table) => println!("{} rows", table.col_len()),
///     Err(_) => eprintln!("{}", loader.last_error_message().unwrap_or_default()),
/// }
/// ```
///
/// # Strict numbers
///
/// ```no_run
/// use gram_csv::{CsvLoader, NumericMode};
///
/// let mut loader = CsvLoader::new().numeric_mode(NumericMode::Strict);
/// let table = loader.load("data.csv");
/// ```
#[derive(Debug, Default)]
pub struct CsvLoader {
    options: LoadOptions,
    reporter: ErrorReporter,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        CsvLoader {
            options,
            reporter: ErrorReporter::new(),
        }
    }

    /// Set numeric conversion mode (builder pattern)
    pub fn numeric_mode(mut self, mode: NumericMode) -> Self {
        self.options = self.options.numeric_mode(mode);
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Open and load `path`.
    ///
    /// The table's file name is the last path component. The file is closed
    /// before this returns, whatever the outcome.
    #[instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<Table> {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(|source| CsvError::CouldNotOpenFile {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|file| build_table(display_name(path), file, &self.options));
        self.finish(result)
    }

    /// Load from any reader, using `file_name` as the table's name
    #[instrument(level = "debug", skip(self, reader))]
    pub fn load_from_reader<R: Read>(&mut self, file_name: &str, reader: R) -> Result<Table> {
        let result = build_table(file_name.to_string(), reader, &self.options);
        self.finish(result)
    }

    /// Message of the most recent failed load.
    ///
    /// Stays until the next failure overwrites it or `clear_error` is
    /// called; successful loads leave it alone.
    pub fn last_error_message(&self) -> Option<&str> {
        self.reporter.message()
    }

    pub fn last_diagnostic(&self) -> Option<&Diagnostic> {
        self.reporter.diagnostic()
    }

    pub fn clear_error(&mut self) {
        self.reporter.clear();
    }

    fn finish(&mut self, result: Result<Table>) -> Result<Table> {
        match &result {
            Ok(table) => debug!(
                file = table.file_name(),
                columns = table.col_count(),
                rows = table.col_len(),
                "loaded table"
            ),
            Err(e) => {
                warn!(error = %e, "CSV load failed");
                self.reporter.record(e);
            }
        }
        result
    }
}

/// Load `path` with default options.
///
/// Use a [`CsvLoader`] to keep the failure message around.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Table> {
    CsvLoader::new().load(path)
}

/// Column storage that grows all columns together, doubling capacity
struct ColumnBuilder {
    columns: Vec<Vec<f64>>,
    capacity: usize,
    rows: usize,
}

impl ColumnBuilder {
    fn new(count: usize, capacity: usize) -> Self {
        ColumnBuilder {
            columns: (0..count).map(|_| Vec::with_capacity(capacity)).collect(),
            capacity,
            rows: 0,
        }
    }

    fn push_row(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.columns.len());
        if self.rows == self.capacity {
            self.capacity *= 2;
            for column in &mut self.columns {
                column.reserve_exact(self.capacity - column.len());
            }
        }
        for (column, &value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
        self.rows += 1;
    }

    fn into_columns(self) -> Vec<Vec<f64>> {
        self.columns
    }
}

fn build_table<R: Read>(file_name: String, reader: R, options: &LoadOptions) -> Result<Table> {
    let mut tokenizer = LineTokenizer::new(reader);

    let headers = loop {
        match tokenizer.read_record()? {
            None => return Err(CsvError::FileEmpty),
            Some(fields) if fields.is_empty() => trace!("skipping blank line before header"),
            Some(fields) => break fields,
        }
    };
    let expected = headers.len();
    debug!(columns = expected, "header established");

    let mut builder = ColumnBuilder::new(expected, options.get_initial_capacity());
    let mut values = Vec::with_capacity(expected);

    while let Some(record) = tokenizer.read_record()? {
        let line = tokenizer.position().line;
        if record.is_empty() {
            trace!(line, "skipping blank line");
            continue;
        }
        if record.len() != expected {
            return Err(CsvError::IrregularFieldNumber {
                line,
                found: record.len(),
                expected,
            });
        }

        values.clear();
        for (index, field) in record.iter().enumerate() {
            let value = options
                .get_numeric_mode()
                .convert(field)
                .ok_or_else(|| CsvError::InvalidNumber {
                    line,
                    field: index + 1,
                    value: field.clone(),
                })?;
            values.push(value);
        }
        builder.push_row(&values);
    }

    Ok(Table::new(file_name, headers, builder.into_columns()))
}

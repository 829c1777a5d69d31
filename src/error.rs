//! Error types for loading CSV files and emitting declarations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::reporter::Diagnostic;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CsvError>;

/// Everything that can terminate a load or an emission.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input file could not be opened for reading
    #[error("Could not open file `{}` for reading: {source}", path.display())]
    CouldNotOpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No record with at least one field was found
    #[error("File was empty")]
    FileEmpty,

    /// A data record's field count differs from the header's
    #[error(
        "Mismatch between the number ({found}) of fields in line ({line}) and the number of headers ({expected})"
    )]
    IrregularFieldNumber {
        line: usize,
        found: usize,
        expected: usize,
    },

    /// A tokenizer-level syntax error
    #[error(transparent)]
    ReadLine(#[from] LineError),

    /// A field that is not a number, only raised in strict numeric mode
    #[error("Invalid number `{value}` in field {field} of line {line}")]
    InvalidNumber {
        line: usize,
        field: usize,
        value: String,
    },

    /// Reading or writing an already opened stream failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Fatal syntax conditions raised while tokenizing a record.
///
/// `line` is the 1-based record number and `column` the 1-based byte offset
/// inside that record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("Unclosed quotation ({line}:{column})")]
    UnclosedQuotation { line: usize, column: usize },

    #[error("Improper usage of quote ({line}:{column})")]
    ImproperQuoteUsage { line: usize, column: usize },

    #[error("Quote start inside of field ({line}:{column})")]
    QuoteInsideUnquotedField { line: usize, column: usize },

    /// Text after a closing quote. The loader reports this case as
    /// `ImproperQuoteUsage`, since the quoted reader sees the byte first.
    #[error("Improper quoting in field ({line}:{column})")]
    ImproperQuotingInField { line: usize, column: usize },

    #[error("Line ending not proper CRLF (CR present, but LF missing) ({line}:{column})")]
    MalformedLineEnding { line: usize, column: usize },
}

impl LineError {
    /// Record number and byte offset the error points at
    pub fn location(&self) -> (usize, usize) {
        match *self {
            LineError::UnclosedQuotation { line, column }
            | LineError::ImproperQuoteUsage { line, column }
            | LineError::QuoteInsideUnquotedField { line, column }
            | LineError::ImproperQuotingInField { line, column }
            | LineError::MalformedLineEnding { line, column } => (line, column),
        }
    }
}

impl CsvError {
    /// Project the error onto a `(line, column, message)` diagnostic.
    ///
    /// Errors without a position in the input (open failures, empty files,
    /// I/O) report line and column 0.
    pub fn diagnostic(&self) -> Diagnostic {
        let (line, column) = match self {
            CsvError::IrregularFieldNumber { line, .. } => (*line, 0),
            CsvError::ReadLine(e) => e.location(),
            CsvError::InvalidNumber { line, field, .. } => (*line, *field),
            CsvError::CouldNotOpenFile { .. } | CsvError::FileEmpty | CsvError::Io(_) => (0, 0),
        };
        Diagnostic::new(line, column, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irregular_message_mentions_counts() {
        let err = CsvError::IrregularFieldNumber {
            line: 2,
            found: 2,
            expected: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("(2) of fields"));
        assert!(msg.contains("line (2)"));
        assert!(msg.contains("headers (3)"));
    }

    #[test]
    fn test_line_error_is_transparent() {
        let err: CsvError = LineError::UnclosedQuotation { line: 4, column: 7 }.into();
        assert_eq!(err.to_string(), "Unclosed quotation (4:7)");
        let diag = err.diagnostic();
        assert_eq!(diag.line, 4);
        assert_eq!(diag.column, 7);
    }

    #[test]
    fn test_positionless_diagnostic() {
        let diag = CsvError::FileEmpty.diagnostic();
        assert_eq!((diag.line, diag.column), (0, 0));
        assert_eq!(diag.message, "File was empty");
    }
}

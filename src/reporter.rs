//! Last-error slot for loaders

use std::fmt;

use crate::error::CsvError;

/// Location and message of a failed load.
///
/// `line` is the 1-based record number, `column` the 1-based byte offset in
/// that record (or field index for numeric errors). Both are 0 when the
/// failure has no position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Holds the most recent diagnostic.
///
/// Each record overwrites the previous one. A reporter belongs to a single
/// loader, so loads on different loaders never see each other's errors.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    last: Option<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with the diagnostic of `err`
    pub fn record(&mut self, err: &CsvError) {
        self.last = Some(err.diagnostic());
    }

    /// Message of the last failure, if any
    pub fn message(&self) -> Option<&str> {
        self.last.as_ref().map(|d| d.message.as_str())
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;

    #[test]
    fn test_record_overwrites() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.message(), None);

        reporter.record(&CsvError::FileEmpty);
        assert_eq!(reporter.message(), Some("File was empty"));

        reporter.record(&LineError::MalformedLineEnding { line: 3, column: 5 }.into());
        let diag = reporter.diagnostic().unwrap();
        assert_eq!((diag.line, diag.column), (3, 5));
        assert!(!diag.message.contains("empty"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_diagnostic_serde() {
        let diag = CsvError::from(LineError::UnclosedQuotation { line: 2, column: 1 }).diagnostic();
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"line\":2"));
        assert!(json.contains("Unclosed quotation (2:1)"));

        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diag);
    }

    #[test]
    fn test_clear() {
        let mut reporter = ErrorReporter::new();
        reporter.record(&CsvError::FileEmpty);
        reporter.clear();
        assert!(reporter.diagnostic().is_none());
    }
}

//! Load configuration

/// How non-empty fields are turned into numbers.
///
/// Empty fields are always `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericMode {
    /// Read the longest leading number (after leading whitespace) and fall
    /// back to `0.0` when there is none, so `12abc` is `12.0` and `abc` is
    /// `0.0`.
    #[default]
    Lenient,
    /// The whole field, surrounding whitespace aside, must be a number.
    Strict,
}

impl NumericMode {
    /// Convert one field. `None` means the field is rejected, which only
    /// happens in strict mode.
    pub fn convert(self, field: &str) -> Option<f64> {
        if field.is_empty() {
            return Some(0.0);
        }
        match self {
            NumericMode::Lenient => Some(
                fast_float2::parse_partial::<f64, _>(field.trim_start())
                    .map(|(value, _)| value)
                    .unwrap_or(0.0),
            ),
            NumericMode::Strict => fast_float2::parse::<f64, _>(field.trim()).ok(),
        }
    }
}

/// Options for a `CsvLoader`
///
/// # Examples
///
/// ```
/// use gram_csv::{LoadOptions, NumericMode};
///
/// let options = LoadOptions::default()
///     .numeric_mode(NumericMode::Strict)
///     .initial_capacity(1024);
/// assert_eq!(options.get_numeric_mode(), NumericMode::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    numeric_mode: NumericMode,
    initial_capacity: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            numeric_mode: NumericMode::Lenient,
            initial_capacity: 16,
        }
    }
}

impl LoadOptions {
    /// Set numeric conversion mode (builder pattern)
    pub fn numeric_mode(mut self, mode: NumericMode) -> Self {
        self.numeric_mode = mode;
        self
    }

    /// Set the number of rows each column reserves up front (builder pattern)
    ///
    /// Columns double their capacity when full. A value of 0 is raised to 1.
    pub fn initial_capacity(mut self, rows: usize) -> Self {
        self.initial_capacity = rows.max(1);
        self
    }

    pub fn get_numeric_mode(&self) -> NumericMode {
        self.numeric_mode
    }

    pub fn get_initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(NumericMode::Lenient.convert(""), Some(0.0));
        assert_eq!(NumericMode::Strict.convert(""), Some(0.0));
    }

    #[test]
    fn test_lenient_reads_prefix() {
        assert_eq!(NumericMode::Lenient.convert("3.25"), Some(3.25));
        assert_eq!(NumericMode::Lenient.convert("-1e3"), Some(-1000.0));
        assert_eq!(NumericMode::Lenient.convert("  7.5"), Some(7.5));
        assert_eq!(NumericMode::Lenient.convert("12abc"), Some(12.0));
    }

    #[test]
    fn test_lenient_falls_back_to_zero() {
        // Non-numeric text is accepted as zero rather than rejected
        assert_eq!(NumericMode::Lenient.convert("abc"), Some(0.0));
        assert_eq!(NumericMode::Lenient.convert("   "), Some(0.0));
    }

    #[test]
    fn test_strict_rejects_text() {
        assert_eq!(NumericMode::Strict.convert("12abc"), None);
        assert_eq!(NumericMode::Strict.convert("abc"), None);
        assert_eq!(NumericMode::Strict.convert(" 4.5 "), Some(4.5));
    }

    #[test]
    fn test_initial_capacity_floor() {
        let options = LoadOptions::default().initial_capacity(0);
        assert_eq!(options.get_initial_capacity(), 1);
        assert_eq!(LoadOptions::default().get_initial_capacity(), 16);
    }
}

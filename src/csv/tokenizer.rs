//! Record tokenizer with RFC 4180-like quoting and strict line endings

use std::io::Read;

use super::quoted::read_quoted;
use super::stream::{ByteStream, Position};
use super::{COMMA, CR, LF, QUOTE};
use crate::error::{LineError, Result};

/// Where the tokenizer is inside the current field.
///
/// Reading the body of a quoted field is delegated to `read_quoted`, so the
/// only quoted state visible here is the one right after it closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Unquoted,
    QuotedClosed,
}

/// Splits a byte stream into records of raw field strings.
///
/// # Examples
///
/// ```
/// use gram_csv::csv::LineTokenizer;
///
/// let mut tokenizer = LineTokenizer::new("a,\"b,c\",d\n".as_bytes());
/// let record = tokenizer.read_record().unwrap().unwrap();
/// assert_eq!(record, vec!["a", "b,c", "d"]);
/// assert!(tokenizer.read_record().unwrap().is_none());
/// ```
pub struct LineTokenizer<R> {
    stream: ByteStream<R>,
}

impl<R: Read> LineTokenizer<R> {
    pub fn new(reader: R) -> Self {
        LineTokenizer {
            stream: ByteStream::new(reader),
        }
    }

    /// Position of the last byte consumed. `line` is the number of the
    /// record most recently started.
    pub fn position(&self) -> Position {
        self.stream.position()
    }

    /// Read one logical record.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. A blank line yields
    /// `Ok(Some(vec![]))`. Fields are kept in order and empty fields are
    /// preserved.
    pub fn read_record(&mut self) -> Result<Option<Vec<String>>> {
        if self.stream.at_eof()? {
            return Ok(None);
        }
        self.stream.begin_record();

        let mut fields = Vec::with_capacity(4);
        let mut field = Vec::with_capacity(512);
        let mut state = FieldState::Unquoted;
        // Any byte before the terminator makes the record non-blank
        let mut has_content = false;

        loop {
            let byte = self.stream.next_byte()?;

            // `read_quoted` only hands back a terminator after the closing
            // quote; anything else already failed as `ImproperQuoteUsage`.
            if state == FieldState::QuotedClosed {
                match byte {
                    Some(COMMA) => {
                        state = FieldState::Unquoted;
                        continue;
                    }
                    Some(CR) => self.expect_lf()?,
                    _ => {}
                }
                break;
            }

            match byte {
                Some(COMMA) => {
                    fields.push(decode(std::mem::take(&mut field)));
                    has_content = true;
                }
                None | Some(LF) => {
                    if has_content {
                        fields.push(decode(field));
                    }
                    break;
                }
                Some(CR) => {
                    self.expect_lf()?;
                    if has_content {
                        fields.push(decode(field));
                    }
                    break;
                }
                Some(QUOTE) if field.is_empty() => {
                    let quoted = read_quoted(&mut self.stream)?;
                    fields.push(decode(quoted));
                    state = FieldState::QuotedClosed;
                    has_content = true;
                }
                Some(QUOTE) => {
                    let pos = self.stream.position();
                    return Err(LineError::QuoteInsideUnquotedField {
                        line: pos.line,
                        column: pos.column,
                    }
                    .into());
                }
                Some(other) => {
                    field.push(other);
                    has_content = true;
                }
            }
        }

        Ok(Some(fields))
    }

    /// Called right after a CR: the next byte must be LF
    fn expect_lf(&mut self) -> Result<()> {
        let cr = self.stream.position();
        match self.stream.next_byte()? {
            Some(LF) => Ok(()),
            _ => Err(LineError::MalformedLineEnding {
                line: cr.line,
                column: cr.column,
            }
            .into()),
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

//! Reader for one RFC 4180 quoted field

use std::io::Read;

use super::stream::ByteStream;
use super::{COMMA, CR, LF, QUOTE};
use crate::error::{LineError, Result};

/// Read a quoted field whose opening quote has just been consumed.
///
/// Returns the unescaped bytes. The byte that ends the field (comma, LF or
/// CR) is pushed back for the caller.
pub(crate) fn read_quoted<R: Read>(stream: &mut ByteStream<R>) -> Result<Vec<u8>> {
    // The opening quote is the anchor for unclosed-quote errors
    let start = stream.position();
    let mut field = Vec::with_capacity(128);

    loop {
        match stream.next_byte()? {
            None => {
                return Err(LineError::UnclosedQuotation {
                    line: start.line,
                    column: start.column,
                }
                .into())
            }
            Some(QUOTE) => match stream.next_byte()? {
                // Escaped quote ("")
                Some(QUOTE) => field.push(QUOTE),
                Some(byte @ (COMMA | LF | CR)) => {
                    stream.unread(byte);
                    return Ok(field);
                }
                None => return Ok(field),
                Some(_) => {
                    let pos = stream.position();
                    return Err(LineError::ImproperQuoteUsage {
                        line: pos.line,
                        column: pos.column,
                    }
                    .into());
                }
            },
            Some(byte) => field.push(byte),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;

    fn quoted(input: &[u8]) -> (Result<Vec<u8>>, Option<u8>) {
        let mut stream = ByteStream::new(input);
        stream.begin_record();
        // Consume the opening quote like the tokenizer does
        assert_eq!(stream.next_byte().unwrap(), Some(QUOTE));
        let field = read_quoted(&mut stream);
        let rest = stream.next_byte().unwrap();
        (field, rest)
    }

    #[test]
    fn test_simple() {
        let (field, rest) = quoted(b"\"b,c\",d");
        assert_eq!(field.unwrap(), b"b,c");
        assert_eq!(rest, Some(COMMA));
    }

    #[test]
    fn test_escaped_quotes() {
        let (field, rest) = quoted(b"\"he said \"\"hi\"\"\"");
        assert_eq!(field.unwrap(), b"he said \"hi\"");
        assert_eq!(rest, None);
    }

    #[test]
    fn test_embedded_newline() {
        let (field, rest) = quoted(b"\"Line 1\nLine 2\"\n");
        assert_eq!(field.unwrap(), b"Line 1\nLine 2");
        assert_eq!(rest, Some(LF));
    }

    #[test]
    fn test_cr_is_pushed_back() {
        let (field, rest) = quoted(b"\"x\"\r\n");
        assert_eq!(field.unwrap(), b"x");
        assert_eq!(rest, Some(CR));
    }

    #[test]
    fn test_empty() {
        let (field, _) = quoted(b"\"\",");
        assert!(field.unwrap().is_empty());
    }

    #[test]
    fn test_unclosed_anchors_at_opening_quote() {
        let mut stream = ByteStream::new(&b"ab,\"abc"[..]);
        stream.begin_record();
        for _ in 0..4 {
            stream.next_byte().unwrap();
        }
        let err = read_quoted(&mut stream).unwrap_err();
        assert!(matches!(
            err,
            CsvError::ReadLine(LineError::UnclosedQuotation { line: 1, column: 4 })
        ));
    }

    #[test]
    fn test_quote_followed_by_garbage() {
        let (field, _) = quoted(b"\"ab\"c");
        assert!(matches!(
            field.unwrap_err(),
            CsvError::ReadLine(LineError::ImproperQuoteUsage { line: 1, column: 5 })
        ));
    }
}

//! Byte source with one byte of pushback and a record-relative position

use std::io::{self, BufRead, BufReader, Read};

/// Location inside the input, used for diagnostics only.
///
/// `line` counts logical records (a quoted field spanning several physical
/// lines still belongs to one record). `column` is the number of bytes
/// consumed from the current record, so the byte just read sits at `column`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Buffered byte reader that can put back a single byte.
///
/// Each stream carries its own `Position`, so two loads never share
/// counters.
pub(crate) struct ByteStream<R> {
    inner: BufReader<R>,
    pushed: Option<u8>,
    pos: Position,
}

impl<R: Read> ByteStream<R> {
    pub(crate) fn new(reader: R) -> Self {
        ByteStream {
            inner: BufReader::new(reader),
            pushed: None,
            pos: Position::default(),
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    /// Start a new record: bump the record number and rewind the column
    pub(crate) fn begin_record(&mut self) {
        self.pos.line += 1;
        self.pos.column = 0;
    }

    /// True when no byte is left, without consuming anything
    pub(crate) fn at_eof(&mut self) -> io::Result<bool> {
        if self.pushed.is_some() {
            return Ok(false);
        }
        Ok(self.fill()?.is_none())
    }

    /// Read the next byte, `None` at end of stream
    pub(crate) fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushed.take() {
            self.pos.column += 1;
            return Ok(Some(byte));
        }

        let byte = self.fill()?;
        if byte.is_some() {
            self.inner.consume(1);
            self.pos.column += 1;
        }
        Ok(byte)
    }

    /// Push `byte` back so the next `next_byte` returns it again
    pub(crate) fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushed.is_none(), "only one byte of pushback");
        self.pushed = Some(byte);
        self.pos.column = self.pos.column.saturating_sub(1);
    }

    fn fill(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

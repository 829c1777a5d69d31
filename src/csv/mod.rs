//! Byte-level CSV tokenizing
//!
//! Only the comma delimiter and the double-quote quote character are
//! recognised. Scanning is byte-wise; fields are decoded as UTF-8 (lossy)
//! once complete.

mod quoted;
mod stream;
mod tokenizer;

pub use stream::Position;
pub use tokenizer::LineTokenizer;

pub(crate) const COMMA: u8 = b',';
pub(crate) const QUOTE: u8 = b'"';
pub(crate) const LF: u8 = b'\n';
pub(crate) const CR: u8 = b'\r';

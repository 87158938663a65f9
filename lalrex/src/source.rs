//! Byte sources the scanner reads from.
//!
//! The scanner needs more than an iterator: it walks ahead of a token, then
//! rewinds to the token start and reads the accepted bytes again. [`LexSource`]
//! captures exactly that contract, and [`ByteSource`] implements it over any
//! in-memory buffer.

use crate::SourceError;
use std::io::{self, Read};

/// Random-access byte input with line tracking.
pub trait LexSource {
    /// Absolute offset of the next byte to be read.
    fn cursor(&self) -> usize;

    /// 1-based line number of the cursor position.
    fn line(&self) -> usize;

    fn is_at_end(&self) -> bool;

    /// The byte at the cursor, without consuming it.
    fn peek(&self) -> Option<u8>;

    /// Consumes and returns the byte at the cursor.
    fn read_byte(&mut self) -> Option<u8>;

    /// Consumes exactly `len` bytes.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, SourceError>;

    /// Moves the cursor to an absolute offset (the end offset is allowed).
    fn seek(&mut self, offset: usize) -> Result<(), SourceError>;
}

/// A [`LexSource`] over an in-memory buffer.
///
/// Newline offsets are indexed once on construction, so the line of any
/// cursor position is a binary search away and seeking backwards is cheap.
#[derive(Debug, Clone)]
pub struct ByteSource<B = Vec<u8>> {
    bytes: B,
    pos: usize,
    newlines: Vec<usize>,
}

impl<B: AsRef<[u8]>> ByteSource<B> {
    pub fn new(bytes: B) -> Self {
        let newlines = bytes
            .as_ref()
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self {
            bytes,
            pos: 0,
            newlines,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.as_ref().is_empty()
    }
}

impl ByteSource<Vec<u8>> {
    /// Buffers everything `reader` yields.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::new(bytes))
    }
}

impl<'a> From<&'a str> for ByteSource<&'a [u8]> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for ByteSource<&'a [u8]> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<B: AsRef<[u8]>> LexSource for ByteSource<B> {
    #[inline]
    fn cursor(&self) -> usize {
        self.pos
    }

    #[inline]
    fn line(&self) -> usize {
        // newlines strictly before the cursor
        self.newlines.partition_point(|&nl| nl < self.pos) + 1
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos >= self.len()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.as_ref().get(self.pos).copied()
    }

    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        let available = self.len() - self.pos;
        if len > available {
            return Err(SourceError::Truncated {
                offset: self.pos,
                requested: len,
                available,
            });
        }
        let out = self.bytes.as_ref()[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(out)
    }

    fn seek(&mut self, offset: usize) -> Result<(), SourceError> {
        let len = self.len();
        if offset > len {
            return Err(SourceError::SeekOutOfRange { offset, len });
        }
        self.pos = offset;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_forward_and_backward() {
        let mut src = ByteSource::from("ab\ncd\n\nef");
        assert_eq!(src.line(), 1);
        assert_eq!(src.read_bytes(3).unwrap(), b"ab\n");
        assert_eq!(src.line(), 2);
        src.seek(7).unwrap();
        assert_eq!(src.line(), 4);
        assert_eq!(src.peek(), Some(b'e'));
        src.seek(2).unwrap();
        assert_eq!(src.line(), 1);
        assert_eq!(src.read_byte(), Some(b'\n'));
        assert_eq!(src.line(), 2);
    }

    #[test]
    fn end_of_source() {
        let mut src = ByteSource::from("x");
        assert!(!src.is_at_end());
        assert_eq!(src.read_byte(), Some(b'x'));
        assert!(src.is_at_end());
        assert_eq!(src.read_byte(), None);
        assert_eq!(src.peek(), None);
        assert_eq!(src.cursor(), 1);
        // seeking to the end offset itself is allowed
        src.seek(1).unwrap();
    }

    #[test]
    fn out_of_range_requests_fail() {
        let mut src = ByteSource::from("abc");
        assert_eq!(
            src.seek(4),
            Err(SourceError::SeekOutOfRange { offset: 4, len: 3 })
        );
        src.seek(1).unwrap();
        assert_eq!(
            src.read_bytes(5),
            Err(SourceError::Truncated {
                offset: 1,
                requested: 5,
                available: 2
            })
        );
        // failed read does not move the cursor
        assert_eq!(src.cursor(), 1);
        assert_eq!(src.read_bytes(2).unwrap(), b"bc");
    }

    #[test]
    fn buffers_a_reader() {
        let reader = io::Cursor::new(b"1 +\n2".to_vec());
        let mut src = ByteSource::from_reader(reader).unwrap();
        assert_eq!(src.len(), 5);
        src.seek(4).unwrap();
        assert_eq!(src.line(), 2);
        assert_eq!(src.read_byte(), Some(b'2'));
    }
}

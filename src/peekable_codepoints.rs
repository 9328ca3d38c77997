use std::io::{
    Bytes,
    Read,
};

use anyhow::{
    Result,
    Context,
};
use unicode_reader::CodePoints;

/// Code points decoded from a reader, with arbitrary look-ahead.
pub struct PeekableCodePoints<R>
    where R: Read
{
    codepoints: CodePoints<Bytes<R>>,
    buffer: Vec<char>,
    consumed: usize,
}

impl<R: Read> PeekableCodePoints<R> {
    pub fn new(reader: R) -> Self {
        PeekableCodePoints {
            codepoints: CodePoints::from(reader),
            buffer: Vec::new(),
            consumed: 0,
        }
    }

    /// Pulls up to `count` more chars into the buffer, returns how many arrived.
    fn feed_buffer(&mut self, count: usize) -> Result<usize> {
        for i in 0..count {
            match self.codepoints.next() {
                None => return Ok(i),
                Some(Err(e)) => {
                    return Err(e).with_context(|| format!("failed to decode input at char {}", self.consumed + self.buffer.len()));
                }
                Some(Ok(c)) => self.buffer.push(c),
            }
        }

        Ok(count)
    }

    pub fn peek_char(&mut self, index: usize) -> Result<Option<char>> {
        if index >= self.buffer.len() {
            self.feed_buffer(index + 1 - self.buffer.len())?;
        }

        Ok(self.buffer.get(index).copied())
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.buffer.len() {
            self.feed_buffer(count - self.buffer.len())?;
        }
        self.discard_buffer(count);

        Ok(())
    }

    /// Removes and returns the next `count` chars, fewer if input ends first.
    pub fn pop(&mut self, count: usize) -> Result<String> {
        if count > self.buffer.len() {
            self.feed_buffer(count - self.buffer.len())?;
        }

        let actual_count = count.min(self.buffer.len());
        let popped = self.buffer[..actual_count].iter().collect();
        self.discard_buffer(actual_count);

        Ok(popped)
    }

    fn discard_buffer(&mut self, count: usize) {
        let actual_count = count.min(self.buffer.len());
        self.buffer.drain(0..actual_count);
        self.consumed += actual_count;
    }

    /// Number of chars consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod peekable_codepoints_tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() -> Result<()> {
        let mut cp = PeekableCodePoints::new("aµc".as_bytes());
        assert_eq!(cp.peek_char(1)?, Some('µ'));
        assert_eq!(cp.peek_char(0)?, Some('a'));
        assert_eq!(cp.position(), 0);
        assert_eq!(cp.pop(1)?, "a");
        assert_eq!(cp.position(), 1);
        Ok(())
    }

    #[test]
    fn test_pop_past_end() -> Result<()> {
        let mut cp = PeekableCodePoints::new("abc".as_bytes());
        cp.skip(1)?;
        assert_eq!(cp.pop(10)?, "bc");
        assert_eq!(cp.peek_char(0)?, None);
        assert_eq!(cp.pop(1)?, "");
        assert_eq!(cp.position(), 3);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = &[b'a', 0xff, 0xfe];
        let mut cp = PeekableCodePoints::new(bytes);
        assert!(cp.peek_char(2).is_err());
    }
}

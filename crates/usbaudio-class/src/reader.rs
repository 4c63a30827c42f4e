//! Bounds-checked little-endian cursor over an immutable byte slice.
//!
//! Descriptor bodies are short (a declared length fits in one byte), so the
//! reader deliberately has no seek: decoders consume fields front to back and
//! the final position is the number of bytes understood.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("buffer ends early: needed {needed} bytes, have {actual}")]
    Truncated { needed: usize, actual: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let needed = self.pos + n;
        if needed > self.data.len() {
            return Err(ReadError::Truncated {
                needed,
                actual: self.data.len(),
            });
        }
        let out = &self.data[self.pos..needed];
        self.pos = needed;
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.take(1)?[0])
    }

    pub fn le_u16(&mut self) -> Result<u16, ReadError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// 3-byte little-endian integer (USB audio sample rates).
    pub fn le_u24(&mut self) -> Result<u32, ReadError> {
        let b = self.take(3)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], 0]))
    }

    pub fn le_u32(&mut self) -> Result<u32, ReadError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        self.take(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_little_endian_and_sequential() {
        let mut r = Reader::new(&[0x01, 0x34, 0x12, 0x56, 0x34, 0x12, 0xFF]);
        assert_eq!(r.u8().unwrap(), 0x01);
        assert_eq!(r.le_u16().unwrap(), 0x1234);
        assert_eq!(r.le_u24().unwrap(), 0x123456);
        assert_eq!(r.position(), 6);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn overrun_reports_needed_and_actual() {
        let mut r = Reader::new(&[0xAA]);
        assert_eq!(r.u8().unwrap(), 0xAA);
        assert_eq!(
            r.le_u16(),
            Err(ReadError::Truncated {
                needed: 3,
                actual: 1
            })
        );
        // a failed read consumes nothing
        assert_eq!(r.position(), 1);
    }
}

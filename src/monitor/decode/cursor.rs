//! Bounds-checked cursor over a byte buffer.

use super::DecodeError;

/// A read position over a borrowed byte buffer.
///
/// All reads are bounds-checked and fail with [`DecodeError::Truncated`]
/// instead of panicking. Multi-byte integers are read in native byte order,
/// as the kernel writes them.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the current offset from the start of the buffer.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns true if every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next `len` bytes without advancing.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if fewer than `len` bytes remain.
    pub fn peek(&self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        Ok(&self.buf[self.pos..self.pos + len])
    }

    /// Returns the next `len` bytes and advances past them.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if fewer than `len` bytes remain.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.peek(len)?;
        self.pos += len;
        Ok(bytes)
    }

    /// Advances past `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if fewer than `len` bytes remain.
    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.take(len).map(|_| ())
    }

    /// Advances past up to `len` bytes, stopping at the end of the buffer.
    ///
    /// Used for trailing alignment padding, which a final record may omit.
    pub fn skip_padding(&mut self, len: usize) {
        self.pos += len.min(self.remaining());
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] at the end of the buffer.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a native-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_ne_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a native-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_position() {
        let data = [1u8, 2, 3, 4, 5, 6, 7];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_eq!(cursor.read_u16().unwrap(), u16::from_ne_bytes([2, 3]));
        assert_eq!(cursor.read_u32().unwrap(), u32::from_ne_bytes([4, 5, 6, 7]));
        assert!(cursor.is_empty());
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [9u8, 8];
        let cursor = ByteCursor::new(&data);

        assert_eq!(cursor.peek(2).unwrap(), &[9, 8]);
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn short_read_reports_truncation() {
        let data = [0u8; 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(2).unwrap();

        let error = cursor.read_u32().unwrap_err();

        assert_eq!(
            error,
            DecodeError::Truncated {
                offset: 2,
                needed: 4,
                available: 1,
            }
        );
        // A failed read leaves the position where it was.
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn skip_padding_clamps_to_end() {
        let data = [0u8; 5];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(3).unwrap();

        cursor.skip_padding(8);

        assert!(cursor.is_empty());
    }
}

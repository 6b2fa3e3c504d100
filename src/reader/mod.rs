#![doc = r#"
Low level access to the bytes of a midi file.

The [`Reader`] walks a borrowed byte slice front to back. While a track chunk
is being scanned it also carries a limit, the offset where that chunk ends.
A read that would run past the buffer fails with
[`ReaderErrorKind::OutOfBounds`]; a read that stays inside the buffer but runs
past the limit fails with [`ReaderErrorKind::MalformedFile`].
"#]

mod error;
pub use error::*;

mod vlq;
pub use vlq::*;

use crate::TrackError;

/// A forward-only cursor over the bytes of a midi file
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    limit: Option<usize>,
}

impl<'slc> Reader<'slc> {
    /// Create a reader positioned at the start of `data`
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            limit: None,
        }
    }

    /// Returns the offset of the next byte to be read
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes in the whole buffer
    pub const fn buffer_len(&self) -> usize {
        self.data.len()
    }

    /// True if every byte of the buffer has been read
    pub const fn is_eof(&self) -> bool {
        self.position >= self.data.len()
    }

    /// True if the reader has reached its limit (or the end of the buffer
    /// when no limit is set)
    pub fn at_limit(&self) -> bool {
        self.position >= self.limit.unwrap_or(self.data.len())
    }

    /// Returns the current limit, if any
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Restrict reads to end at `limit`
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    /// Remove the limit set by [`Reader::set_limit`]
    pub fn clear_limit(&mut self) {
        self.limit = None;
    }

    /// Checks that `len` more bytes can be read, returning the offset the
    /// read would end at.
    fn check(&self, len: usize) -> ReadResult<usize> {
        let end = self
            .position
            .checked_add(len)
            .ok_or(ReaderError::oob(self.data.len()))?;
        if end > self.data.len() {
            return Err(ReaderError::oob(self.data.len()));
        }
        if let Some(chunk_end) = self.limit
            && end > chunk_end
        {
            return Err(ReaderError::track(
                self.position,
                TrackError::Overrun {
                    chunk_end,
                    required: end,
                },
            ));
        }
        Ok(end)
    }

    /// Returns the next byte without advancing
    pub fn peek_byte(&self) -> ReadResult<u8> {
        self.check(1)?;
        Ok(self.data[self.position])
    }

    /// Read a single byte
    pub fn read_byte(&mut self) -> ReadResult<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read `SIZE` bytes into an array
    pub fn read_exact_size<const SIZE: usize>(&mut self) -> ReadResult<[u8; SIZE]> {
        let slice = self.read_slice(SIZE)?;
        let mut bytes = [0; SIZE];
        bytes.copy_from_slice(slice);
        Ok(bytes)
    }

    /// Read `len` bytes, borrowing them from the underlying buffer
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        let end = self.check(len)?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Advance past `len` bytes
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.position = self.check(len)?;
        Ok(())
    }

    /// Move straight to `position`.
    ///
    /// Only forward jumps inside the buffer are allowed.
    pub fn jump_to(&mut self, position: usize) -> ReadResult<()> {
        let len = position
            .checked_sub(self.position)
            .ok_or(ReaderError::oob(position))?;
        self.skip(len)
    }

    /// Read a big endian `u16`
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big endian `u32`
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read a variable length quantity.
    ///
    /// See [`decode_vlq`].
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let (value, consumed) = decode_vlq(self.data, self.position)?;
        self.skip(consumed as usize)?;
        Ok(value)
    }
}

#[test]
fn reads_big_endian_fields() {
    let bytes = [0x00, 0x06, 0x00, 0x00, 0x01, 0xE0];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u16().unwrap(), 6);
    assert_eq!(reader.read_u32().unwrap(), 480);
    assert!(reader.is_eof());
    assert!(reader.read_byte().unwrap_err().is_out_of_bounds());
}

#[test]
fn limit_turns_overrun_into_malformed() {
    let bytes = [0x01, 0x02, 0x03, 0x04];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.set_limit(2);
    assert_eq!(reader.read_byte().unwrap(), 0x01);

    let err = reader.read_slice(2).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::MalformedFile(TrackError::Overrun {
            chunk_end: 2,
            required: 3
        })
    );
    assert_eq!(reader.buffer_position(), 1);

    // past the buffer is reported before the limit
    let err = reader.skip(10).unwrap_err();
    assert!(err.is_out_of_bounds());

    reader.clear_limit();
    assert_eq!(reader.read_slice(3).unwrap(), &[0x02, 0x03, 0x04]);
}

#[test]
fn vlq_must_end_inside_limit() {
    let bytes = [0x81, 0x00, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.set_limit(1);
    let err = reader.read_vlq().unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedFile(TrackError::Overrun { .. })
    ));
}

#[test]
fn jump_only_moves_forward() {
    let bytes = [0; 8];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.jump_to(5).unwrap();
    assert_eq!(reader.buffer_position(), 5);
    assert!(reader.jump_to(2).is_err());
    assert!(reader.jump_to(9).unwrap_err().is_out_of_bounds());
}

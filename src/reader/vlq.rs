use super::{ReadResult, ReaderError};

/// Decodes a variable length quantity starting at `offset`.
///
/// Each byte contributes its lower seven bits, most significant group first.
/// A set high bit means another byte follows. Returns the value together with
/// the number of bytes read, which is always at least one.
///
/// Canonical quantities are one to four bytes long. Longer runs are still
/// read to their terminator, with the high bits shifted out of the `u32`.
///
/// # Errors
/// [`ReaderErrorKind::OutOfBounds`](super::ReaderErrorKind::OutOfBounds) if the
/// buffer ends before a byte with a clear high bit.
///
/// # Example
/// ```rust
/// # use smf_score::prelude::*;
/// let bytes = [0x00, 0x81, 0x48];
/// assert_eq!(decode_vlq(&bytes, 1).unwrap(), (200, 2));
/// ```
pub fn decode_vlq(bytes: &[u8], offset: usize) -> ReadResult<(u32, u32)> {
    let mut value: u32 = 0;
    let mut consumed: u32 = 0;
    loop {
        let position = offset + consumed as usize;
        let byte = *bytes.get(position).ok_or(ReaderError::oob(position))?;
        value = (value << 7) | (byte & 0x7F) as u32;
        consumed += 1;
        if byte & 0x80 == 0 {
            return Ok((value, consumed));
        }
    }
}

#[cfg(test)]
pub(crate) fn encode_vlq(mut value: u32) -> alloc::vec::Vec<u8> {
    let mut bytes = alloc::vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes
}

#[test]
fn single_byte_quantities() {
    assert_eq!(decode_vlq(&[0x00], 0).unwrap(), (0, 1));
    assert_eq!(decode_vlq(&[0x40], 0).unwrap(), (0x40, 1));
    assert_eq!(decode_vlq(&[0x7F], 0).unwrap(), (0x7F, 1));
}

#[test]
fn known_encodings() {
    // values from the SMF 1.0 document
    let cases: [(&[u8], u32); 8] = [
        (&[0x81, 0x00], 0x80),
        (&[0xC0, 0x00], 0x2000),
        (&[0xFF, 0x7F], 0x3FFF),
        (&[0x81, 0x80, 0x00], 0x4000),
        (&[0xC0, 0x80, 0x00], 0x10_0000),
        (&[0xFF, 0xFF, 0x7F], 0x1F_FFFF),
        (&[0x81, 0x80, 0x80, 0x00], 0x20_0000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];
    for (bytes, expected) in cases {
        assert_eq!(
            decode_vlq(bytes, 0).unwrap(),
            (expected, bytes.len() as u32)
        );
    }
}

#[test]
fn length_boundaries() {
    let cases = [
        (0x7F, 1),
        (0x80, 2),
        (0x3FFF, 2),
        (0x4000, 3),
        (0x1F_FFFF, 3),
        (0x20_0000, 4),
        (0x0FFF_FFFF, 4),
    ];
    for (value, len) in cases {
        let bytes = encode_vlq(value);
        assert_eq!(bytes.len(), len);
        assert_eq!(decode_vlq(&bytes, 0).unwrap(), (value, len as u32));
    }
}

#[test]
fn reads_from_offset_and_stops_at_terminator() {
    let bytes = [0xFF, 0x83, 0x60, 0x90, 0x3C];
    assert_eq!(decode_vlq(&bytes, 1).unwrap(), (480, 2));
}

#[test]
fn truncated_quantity_is_out_of_bounds() {
    let err = decode_vlq(&[0x00, 0x81, 0x80], 1).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 3);

    let err = decode_vlq(&[], 0).unwrap_err();
    assert!(err.is_out_of_bounds());
}

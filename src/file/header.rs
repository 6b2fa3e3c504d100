use super::FormatType;
use crate::{
    HeaderError,
    reader::{ReadResult, Reader, ReaderError},
};

/// The `MThd` chunk tag
pub const HEADER_TAG: [u8; 4] = *b"MThd";

const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The fields of the `MThd` chunk.

`division` is read as ticks per quarter note; SMPTE divisions are not
interpreted.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format_type: u16,
    number_of_tracks: u16,
    division: u16,
}

impl Header {
    /// Create a new header
    pub const fn new(format_type: u16, number_of_tracks: u16, division: u16) -> Self {
        Self {
            format_type,
            number_of_tracks,
            division,
        }
    }

    /// Reads the 14 byte header chunk.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let tag = reader.read_exact_size::<4>()?;
        if tag != HEADER_TAG {
            return Err(ReaderError::header(start, HeaderError::InvalidTag(tag)));
        }

        let length_at = reader.buffer_position();
        let length = reader.read_u32()?;
        if length != HEADER_LENGTH {
            return Err(ReaderError::header(
                length_at,
                HeaderError::InvalidLength(length),
            ));
        }

        Ok(Self {
            format_type: reader.read_u16()?,
            number_of_tracks: reader.read_u16()?,
            division: reader.read_u16()?,
        })
    }

    /// The raw format type, bytes 8-9
    pub const fn format_type(&self) -> u16 {
        self.format_type
    }

    /// The format type, if it is one of the three defined formats
    pub fn format(&self) -> Option<FormatType> {
        FormatType::try_from(self.format_type).ok()
    }

    /// The number of `MTrk` chunks that follow, bytes 10-11
    pub const fn number_of_tracks(&self) -> u16 {
        self.number_of_tracks
    }

    /// Ticks per quarter note, bytes 12-13
    pub const fn division(&self) -> u16 {
        self.division
    }
}

#[test]
fn reads_each_field_from_its_own_bytes() {
    use pretty_assertions::assert_eq;
    let bytes = [
        b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = Header::read(&mut reader).unwrap();

    assert_eq!(header, Header::new(1, 2, 480));
    assert_eq!(header.format(), Some(FormatType::Simultaneous));
    assert_eq!(reader.buffer_position(), 14);
}

#[test]
fn high_bytes_are_not_mixed_between_fields() {
    let bytes = [
        b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x01, 0x03, 0x00, 0x60,
    ];
    let header = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.format_type(), 0);
    assert_eq!(header.number_of_tracks(), 259);
    assert_eq!(header.division(), 96);
}

#[test]
fn rejects_bad_tag_and_length() {
    use crate::reader::ReaderErrorKind;
    let bytes = [
        b'R', b'I', b'F', b'F', 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0,
    ];
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidHeader(HeaderError::InvalidTag(*b"RIFF"))
    );
    assert_eq!(err.position(), 0);

    let bytes = [
        b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x08, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0,
    ];
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::InvalidHeader(HeaderError::InvalidLength(8))
    );
    assert_eq!(err.position(), 4);
}

#[test]
fn short_header_is_out_of_bounds() {
    let bytes = [b'M', b'T', b'h', b'd', 0x00, 0x00, 0x00, 0x06, 0x00];
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(err.is_out_of_bounds());
}

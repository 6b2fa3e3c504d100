#![doc = r#"
Meta events (`FF <kind> <length> <data>`)

Only two kinds change what the decoder produces:

- `FF 51 03 tt tt tt` Set Tempo, microseconds per quarter note
- `FF 2F 00` End of Track

Every other kind is read past using its length.
"#]

mod tempo;
pub use tempo::*;

use crate::{
    TrackError,
    reader::{ReadResult, Reader, ReaderError},
};
use num_enum::TryFromPrimitive;

/// Meta event kinds the decoder acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum MetaKind {
    /// `0x2F`
    EndOfTrack = 0x2F,
    /// `0x51`
    Tempo = 0x51,
}

/// A meta event read from a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaEvent<'a> {
    /// The track's tempo changes
    Tempo(Tempo),
    /// The track is finished
    EndOfTrack,
    /// Any other meta event, kept as its kind and raw data
    Other {
        /// The kind byte following `FF`
        kind: u8,
        /// The event's data, without the length prefix
        data: &'a [u8],
    },
}

impl<'a> MetaEvent<'a> {
    /// Reads a meta event. The reader must be positioned just after `FF`.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let kind = reader.read_byte()?;
        let length_at = reader.buffer_position();
        let length = reader.read_vlq()?;

        match MetaKind::try_from(kind) {
            Ok(MetaKind::Tempo) => {
                if length != 3 {
                    return Err(ReaderError::track(
                        length_at,
                        TrackError::InvalidTempoLength(length),
                    ));
                }
                Ok(Self::Tempo(Tempo::new_from_bytes(reader.read_exact_size()?)))
            }
            Ok(MetaKind::EndOfTrack) if length == 0 => Ok(Self::EndOfTrack),
            _ => Ok(Self::Other {
                kind,
                data: reader.read_slice(length as usize)?,
            }),
        }
    }

    /// Returns the kind byte of the event
    pub const fn kind(&self) -> u8 {
        match self {
            Self::Tempo(_) => MetaKind::Tempo as u8,
            Self::EndOfTrack => MetaKind::EndOfTrack as u8,
            Self::Other { kind, .. } => *kind,
        }
    }
}

#[test]
fn reads_tempo() {
    let bytes = [0x51, 0x03, 0x07, 0xA1, 0x20, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let event = MetaEvent::read(&mut reader).unwrap();
    assert_eq!(event, MetaEvent::Tempo(Tempo::new(500_000)));
    assert_eq!(reader.buffer_position(), 5);
}

#[test]
fn tempo_length_must_be_three() {
    use crate::reader::ReaderErrorKind;
    let bytes = [0x51, 0x04, 0x00, 0x07, 0xA1, 0x20];
    let err = MetaEvent::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::MalformedFile(TrackError::InvalidTempoLength(4))
    );
}

#[test]
fn end_of_track_needs_empty_length() {
    let bytes = [0x2F, 0x00];
    let event = MetaEvent::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(event, MetaEvent::EndOfTrack);
    assert_eq!(event.kind(), 0x2F);

    let bytes = [0x2F, 0x01, 0x7F];
    let event = MetaEvent::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(
        event,
        MetaEvent::Other {
            kind: 0x2F,
            data: &[0x7F]
        }
    );
}

#[test]
fn skips_other_kinds_by_length() {
    // track name "Piano"
    let bytes = [0x03, 0x05, b'P', b'i', b'a', b'n', b'o', 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let event = MetaEvent::read(&mut reader).unwrap();
    assert_eq!(
        event,
        MetaEvent::Other {
            kind: 0x03,
            data: b"Piano"
        }
    );
    assert_eq!(reader.buffer_position(), 7);
}

//! Track events and the status bytes that identify them

use super::meta::MetaEvent;
use crate::reader::{ReadResult, Reader, ReaderError};

#[doc = r#"
The category of an event, identified by its status byte.

```text
0x80..=0x8F  Note Off                 2 data bytes
0x90..=0x9F  Note On                  2 data bytes
0xA0..=0xAF  Polyphonic Key Pressure  2 data bytes
0xB0..=0xBF  Control Change           2 data bytes
0xC0..=0xCF  Program Change           1 data byte
0xD0..=0xDF  Channel Pressure         1 data byte
0xE0..=0xEF  Pitch Bend               2 data bytes
0xF0..=0xFE  System Exclusive         length + data
0xFF         Meta                     kind + length + data
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// `0x8n`
    NoteOff,
    /// `0x9n`
    NoteOn,
    /// `0xAn`
    PolyPressure,
    /// `0xBn`
    ControlChange,
    /// `0xCn`
    ProgramChange,
    /// `0xDn`
    ChannelPressure,
    /// `0xEn`
    PitchBend,
    /// `0xF0`, `0xF7`, and every other `0xFn` below `0xFF`
    SystemExclusive,
    /// `0xFF`
    Meta,
}

impl StatusCategory {
    /// Classifies a status byte.
    ///
    /// Returns `None` for data bytes (below `0x80`).
    pub const fn classify(status: u8) -> Option<Self> {
        Some(match status {
            0xFF => Self::Meta,
            0xF0..=0xFE => Self::SystemExclusive,
            0xE0..=0xEF => Self::PitchBend,
            0xD0..=0xDF => Self::ChannelPressure,
            0xC0..=0xCF => Self::ProgramChange,
            0xB0..=0xBF => Self::ControlChange,
            0xA0..=0xAF => Self::PolyPressure,
            0x90..=0x9F => Self::NoteOn,
            0x80..=0x8F => Self::NoteOff,
            _ => return None,
        })
    }
}

/// An event read from a track, without its delta time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent<'a> {
    /// A key was released
    NoteOff {
        /// channel 0-15
        channel: u8,
        /// key number
        note: u8,
        /// release velocity
        velocity: u8,
    },
    /// A key was pressed. A velocity of 0 releases the key instead.
    NoteOn {
        /// channel 0-15
        channel: u8,
        /// key number
        note: u8,
        /// attack velocity
        velocity: u8,
    },
    /// Aftertouch for one key
    PolyPressure {
        /// channel 0-15
        channel: u8,
        /// key number
        note: u8,
        /// pressure
        pressure: u8,
    },
    /// A controller moved
    ControlChange {
        /// channel 0-15
        channel: u8,
        /// controller number
        controller: u8,
        /// new value
        value: u8,
    },
    /// The channel's instrument changed
    ProgramChange {
        /// channel 0-15
        channel: u8,
        /// program number
        program: u8,
    },
    /// Aftertouch for the whole channel
    ChannelPressure {
        /// channel 0-15
        channel: u8,
        /// pressure
        pressure: u8,
    },
    /// The pitch wheel moved
    PitchBend {
        /// channel 0-15
        channel: u8,
        /// 14 bit value, `0x2000` is centered
        value: u16,
    },
    /// A system exclusive message. The payload is not interpreted.
    SystemExclusive(&'a [u8]),
    /// A meta event
    Meta(MetaEvent<'a>),
}

impl<'a> TrackEvent<'a> {
    /// Reads a status byte and the payload it calls for.
    ///
    /// # Errors
    /// [`UnknownEventType`](crate::reader::ReaderErrorKind::UnknownEventType)
    /// if the next byte is a data byte. Running status is not supported.
    pub fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let status_at = reader.buffer_position();
        let status = reader.read_byte()?;
        let Some(category) = StatusCategory::classify(status) else {
            return Err(ReaderError::unknown_event(status_at, status));
        };
        let channel = status & 0x0F;

        use StatusCategory::*;
        let event = match category {
            NoteOff => {
                let [note, velocity] = reader.read_exact_size()?;
                Self::NoteOff {
                    channel,
                    note,
                    velocity,
                }
            }
            NoteOn => {
                let [note, velocity] = reader.read_exact_size()?;
                Self::NoteOn {
                    channel,
                    note,
                    velocity,
                }
            }
            PolyPressure => {
                let [note, pressure] = reader.read_exact_size()?;
                Self::PolyPressure {
                    channel,
                    note,
                    pressure,
                }
            }
            ControlChange => {
                let [controller, value] = reader.read_exact_size()?;
                Self::ControlChange {
                    channel,
                    controller,
                    value,
                }
            }
            ProgramChange => Self::ProgramChange {
                channel,
                program: reader.read_byte()?,
            },
            ChannelPressure => Self::ChannelPressure {
                channel,
                pressure: reader.read_byte()?,
            },
            PitchBend => {
                let [lsb, msb] = reader.read_exact_size()?;
                Self::PitchBend {
                    channel,
                    value: ((msb as u16 & 0x7F) << 7) | (lsb as u16 & 0x7F),
                }
            }
            SystemExclusive => {
                let length = reader.read_vlq()?;
                Self::SystemExclusive(reader.read_slice(length as usize)?)
            }
            Meta => Self::Meta(MetaEvent::read(reader)?),
        };
        Ok(event)
    }
}

#[test]
fn classify_ranges() {
    use StatusCategory::*;
    let cases = [
        (0x80, Some(NoteOff)),
        (0x8F, Some(NoteOff)),
        (0x90, Some(NoteOn)),
        (0xA3, Some(PolyPressure)),
        (0xBF, Some(ControlChange)),
        (0xC0, Some(ProgramChange)),
        (0xD9, Some(ChannelPressure)),
        (0xEF, Some(PitchBend)),
        (0xF0, Some(SystemExclusive)),
        (0xF7, Some(SystemExclusive)),
        (0xF8, Some(SystemExclusive)),
        (0xFF, Some(Meta)),
        (0x7F, None),
        (0x00, None),
    ];
    for (status, expected) in cases {
        assert_eq!(StatusCategory::classify(status), expected, "{status:#04X}");
    }
}

#[test]
fn reads_channel_events() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x93, 0x3C, 0x64, // note on
        0x83, 0x3C, 0x40, // note off
        0xC1, 0x05, // program change
        0xD2, 0x30, // channel pressure
        0xB0, 0x07, 0x7F, // control change
        0xA0, 0x3C, 0x10, // poly pressure
        0xE0, 0x00, 0x40, // pitch bend, centered
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let mut events = alloc::vec::Vec::new();
    while !reader.is_eof() {
        events.push(TrackEvent::read(&mut reader).unwrap());
    }

    assert_eq!(
        events,
        alloc::vec![
            TrackEvent::NoteOn {
                channel: 3,
                note: 60,
                velocity: 100
            },
            TrackEvent::NoteOff {
                channel: 3,
                note: 60,
                velocity: 64
            },
            TrackEvent::ProgramChange {
                channel: 1,
                program: 5
            },
            TrackEvent::ChannelPressure {
                channel: 2,
                pressure: 0x30
            },
            TrackEvent::ControlChange {
                channel: 0,
                controller: 7,
                value: 127
            },
            TrackEvent::PolyPressure {
                channel: 0,
                note: 60,
                pressure: 0x10
            },
            TrackEvent::PitchBend {
                channel: 0,
                value: 0x2000
            },
        ]
    );
}

#[test]
fn reads_sysex_by_length() {
    let bytes = [0xF0, 0x04, 0x43, 0x12, 0x00, 0xF7, 0x90];
    let mut reader = Reader::from_byte_slice(&bytes);
    let event = TrackEvent::read(&mut reader).unwrap();
    assert_eq!(event, TrackEvent::SystemExclusive(&[0x43, 0x12, 0x00, 0xF7]));
    assert_eq!(reader.buffer_position(), 6);
}

#[test]
fn data_byte_is_unknown_event() {
    use crate::reader::ReaderErrorKind;
    let bytes = [0x90, 0x3C, 0x64, 0x3E, 0x64];
    let mut reader = Reader::from_byte_slice(&bytes);
    TrackEvent::read(&mut reader).unwrap();

    let err = TrackEvent::read(&mut reader).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::UnknownEventType(0x3E));
    assert_eq!(err.position(), 3);
}

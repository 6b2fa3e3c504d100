#![doc = r#"
Decoding a Standard MIDI File into a [`DecodedScore`]

# Layout

```text
[Header Chunk: "MThd", length 6, format, track count, division]
[Track Chunk 0: "MTrk", length, events...]
[Track Chunk 1: "MTrk", length, events...]
...
```

Each track event is a delta time followed by a status byte and its payload.
Note On/Off pairs become [`ScoreEvent`](crate::score::ScoreEvent)s, Set Tempo
events update the file's tempo, and End of Track marks how long the track is.
Chunks with any other tag are skipped.
"#]

mod format;
pub use format::*;

mod header;
pub use header::*;

pub mod event;
pub mod meta;

mod track;
pub use track::TRACK_TAG;

use crate::{
    UMicros,
    reader::{ReadResult, Reader},
    score::{ActiveNotes, OptTimedNotes, Score, ScoreAssembler, ScoreEvent, TimedNotes},
};
use meta::Tempo;
use track::TrackScanner;

/// Decodes a midi file held in memory.
///
/// See [`DecodedScore::decode`].
pub fn decode(bytes: &[u8]) -> ReadResult<DecodedScore> {
    DecodedScore::decode(bytes)
}

/// Everything one decode accumulates. Lives only as long as the call.
#[derive(Debug, Default)]
pub(crate) struct DecodeState {
    pub(crate) tempo: Tempo,
    pub(crate) end_of_track: u32,
    pub(crate) active: ActiveNotes,
    pub(crate) assembler: ScoreAssembler,
}

impl DecodeState {
    /// Ends the oldest pending press of `note_number`, if there is one that
    /// started at or before `time`.
    pub(crate) fn release(&mut self, track: u32, note_number: u8, time: u32) {
        let Some(pending) = self.active.release(note_number, time) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "track {} releases note {} at tick {} without an earlier press",
                track,
                note_number,
                time
            );
            return;
        };
        // the table never hands back a press that starts after `time`
        self.assembler.emit(ScoreEvent::new(
            track,
            pending.onset_time(),
            note_number,
            pending.velocity(),
            time - pending.onset_time(),
        ));
    }
}

#[doc = r#"
The notes and timing of a midi file.

# Example
```rust
# use smf_score::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 11,
    0x00, 0xFF, 0x51, 0x03, 0x09, 0x27, 0xC0, // 600,000us per quarter note
    0x60, 0xFF, 0x2F, 0x00,
];
let decoded = DecodedScore::decode(&bytes).unwrap();

assert_eq!(decoded.tempo(), Tempo::new(600_000));
assert_eq!(decoded.end_of_track(), 96);
assert_eq!(decoded.duration(), Some(UMicros::new(600_000)));
assert!(decoded.score().is_empty());
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedScore {
    header: Header,
    tempo: Tempo,
    end_of_track: u32,
    score: Score,
    unreleased_notes: usize,
}

impl DecodedScore {
    /// Decodes a midi file held in memory.
    ///
    /// The header is read first, then `number_of_tracks` track chunks in
    /// order. The tempo is the last Set Tempo seen in any track, and the end
    /// of track is the latest End of Track across all tracks.
    ///
    /// # Errors
    /// Decoding stops at the first structural problem; no partial score is
    /// returned. See [`ReaderErrorKind`](crate::reader::ReaderErrorKind).
    pub fn decode(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = Header::read(&mut reader)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "format {}, {} tracks, {} ticks per quarter note",
            header.format_type(),
            header.number_of_tracks(),
            header.division()
        );

        let mut state = DecodeState::default();
        for index in 0..header.number_of_tracks() as u32 {
            let chunk_end = track::next_track_chunk(&mut reader)?;
            #[cfg(feature = "tracing")]
            let (start, emitted) = (reader.buffer_position(), state.assembler.len());

            let _end = TrackScanner::new(&mut reader, index).scan(chunk_end, &mut state)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                "track {}: {} bytes, {} notes, end of track {:?}",
                index,
                chunk_end - start,
                state.assembler.len() - emitted,
                _end
            );
        }

        let unreleased_notes = state.active.len();
        #[cfg(feature = "tracing")]
        if unreleased_notes > 0 {
            tracing::warn!("{} notes were never released", unreleased_notes);
        }

        Ok(Self {
            header,
            tempo: state.tempo,
            end_of_track: state.end_of_track,
            score: state.assembler.finish(),
            unreleased_notes,
        })
    }

    /// Returns the header
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Ticks per quarter note
    pub const fn division(&self) -> u16 {
        self.header.division()
    }

    /// The last tempo set in the file, or [`Tempo::DEFAULT`]
    pub const fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// The number of tracks the header declares
    pub const fn number_of_tracks(&self) -> u16 {
        self.header.number_of_tracks()
    }

    /// The latest End of Track tick across all tracks
    pub const fn end_of_track(&self) -> u32 {
        self.end_of_track
    }

    /// The finished notes, in release order
    pub const fn score(&self) -> &Score {
        &self.score
    }

    /// Consumes self, returning the score
    pub fn into_score(self) -> Score {
        self.score
    }

    /// Notes that were pressed but never released. They are not in the score.
    pub const fn unreleased_notes(&self) -> usize {
        self.unreleased_notes
    }

    /// Converts ticks to microseconds using the file's tempo and division.
    ///
    /// Returns `None` if the division is zero.
    pub const fn ticks_to_micros(&self, ticks: u32) -> Option<UMicros> {
        self.tempo.ticks_to_micros(ticks, self.division())
    }

    /// The length of the file, up to the latest End of Track
    pub const fn duration(&self) -> Option<UMicros> {
        self.ticks_to_micros(self.end_of_track)
    }

    /// Returns each note with its onset and length in microseconds
    pub fn timed_notes(&self) -> OptTimedNotes<'_> {
        match TimedNotes::new(&self.score, self.tempo, self.division()) {
            Some(iter) => OptTimedNotes::Some(iter),
            None => OptTimedNotes::None,
        }
    }
}

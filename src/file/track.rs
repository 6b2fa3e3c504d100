use super::{
    DecodeState,
    event::TrackEvent,
    meta::MetaEvent,
};
use crate::{
    TrackError,
    reader::{ReadResult, Reader, ReaderError},
    score::PendingNote,
};

/// The `MTrk` chunk tag
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// Finds the next `MTrk` chunk, skipping any chunk with another tag.
///
/// Returns the offset where the track's events end.
pub(crate) fn next_track_chunk(reader: &mut Reader<'_>) -> ReadResult<usize> {
    loop {
        let tag = reader.read_exact_size::<4>()?;
        let length = reader.read_u32()? as usize;
        if tag == TRACK_TAG {
            return reader
                .buffer_position()
                .checked_add(length)
                .ok_or(ReaderError::oob(reader.buffer_len()));
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            "skipping unknown chunk {:02X?} of {} bytes at {}",
            tag,
            length,
            reader.buffer_position()
        );
        reader.skip(length)?;
    }
}

/// Walks the events of one track chunk.
pub(crate) struct TrackScanner<'r, 'slc> {
    reader: &'r mut Reader<'slc>,
    index: u32,
    time: u32,
}

impl<'r, 'slc> TrackScanner<'r, 'slc> {
    pub(crate) fn new(reader: &'r mut Reader<'slc>, index: u32) -> Self {
        Self {
            reader,
            index,
            time: 0,
        }
    }

    /// Scans events until End of Track or the end of the chunk, then leaves
    /// the reader at the chunk end.
    ///
    /// Returns the tick of the End of Track event, if the track had one.
    pub(crate) fn scan(mut self, chunk_end: usize, state: &mut DecodeState) -> ReadResult<Option<u32>> {
        self.reader.set_limit(chunk_end);
        let end = self.scan_events(state);
        self.reader.clear_limit();
        let end = end?;

        self.reader.jump_to(chunk_end)?;
        Ok(end)
    }

    fn scan_events(&mut self, state: &mut DecodeState) -> ReadResult<Option<u32>> {
        while !self.reader.at_limit() {
            let delta_at = self.reader.buffer_position();
            let delta = self.reader.read_vlq()?;
            self.time = self
                .time
                .checked_add(delta)
                .ok_or(ReaderError::track(delta_at, TrackError::TickOverflow))?;

            match TrackEvent::read(self.reader)? {
                TrackEvent::NoteOn { note, velocity, .. } if velocity > 0 => {
                    state
                        .active
                        .press(PendingNote::new(self.time, note, velocity));
                }
                TrackEvent::NoteOn { note, .. } | TrackEvent::NoteOff { note, .. } => {
                    state.release(self.index, note, self.time);
                }
                TrackEvent::Meta(MetaEvent::Tempo(tempo)) => {
                    state.tempo = tempo;
                }
                TrackEvent::Meta(MetaEvent::EndOfTrack) => {
                    state.end_of_track = state.end_of_track.max(self.time);
                    return Ok(Some(self.time));
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
fn scan_bytes(track: &[u8]) -> (ReadResult<Option<u32>>, DecodeState, usize) {
    let mut reader = Reader::from_byte_slice(track);
    let mut state = DecodeState::default();
    let result = TrackScanner::new(&mut reader, 0).scan(track.len(), &mut state);
    (result, state, reader.buffer_position())
}

#[test]
fn pairs_note_on_with_note_off() {
    let track = [
        0x00, 0x90, 60, 100, // note on
        0x83, 0x60, 0x80, 60, 0, // note off after 480
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let (result, state, position) = scan_bytes(&track);
    assert_eq!(result.unwrap(), Some(480));
    assert_eq!(state.end_of_track, 480);
    assert_eq!(position, track.len());

    let score = state.assembler.finish();
    assert_eq!(score.len(), 1);
    assert_eq!(score[0], crate::score::ScoreEvent::new(0, 0, 60, 100, 480));
}

#[test]
fn stops_at_end_of_track_and_skips_trailing_bytes() {
    let track = [
        0x00, 0xFF, 0x2F, 0x00, // end of track
        0x00, 0x90, 60, 100, // ignored
    ];
    let (result, state, position) = scan_bytes(&track);
    assert_eq!(result.unwrap(), Some(0));
    assert!(state.active.is_empty());
    assert_eq!(position, track.len());
}

#[test]
fn chunk_end_without_end_of_track_is_tolerated() {
    let track = [0x10, 0x90, 60, 100];
    let (result, state, _) = scan_bytes(&track);
    assert_eq!(result.unwrap(), None);
    assert_eq!(state.end_of_track, 0);
    assert_eq!(state.active.len(), 1);
}

#[test]
fn event_crossing_chunk_end_is_malformed() {
    use crate::reader::ReaderErrorKind;
    let bytes = [0x00, 0x90, 60, 100, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let mut state = DecodeState::default();
    // the chunk claims only three bytes
    let err = TrackScanner::new(&mut reader, 0)
        .scan(3, &mut state)
        .unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::MalformedFile(TrackError::Overrun {
            chunk_end: 3,
            required: 4
        })
    );
    assert_eq!(reader.limit(), None);
}

#[test]
fn skips_unknown_chunks() {
    let bytes = [
        b'X', b'F', b'I', b'H', 0, 0, 0, 2, 0xAA, 0xBB, // alien chunk
        b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let chunk_end = next_track_chunk(&mut reader).unwrap();
    assert_eq!(reader.buffer_position(), 18);
    assert_eq!(chunk_end, 22);
}

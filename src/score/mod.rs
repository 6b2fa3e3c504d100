#![doc = r#"
The decoder's output: one [`ScoreEvent`] per note that was pressed and released.

The [`ActiveNotes`] table holds presses until their release arrives, and the
[`ScoreAssembler`] collects the finished notes into a [`Score`].
"#]

mod active;
pub use active::*;

mod assembler;
pub use assembler::*;

mod timed;
pub use timed::*;

use crate::Note;
use alloc::vec::Vec;
use core::ops::Deref;

#[doc = r#"
A note with a known start and length, both in ticks.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreEvent {
    track: u32,
    onset: u32,
    note_number: u8,
    velocity: u8,
    gate: u32,
}

impl ScoreEvent {
    /// Create a new score event
    pub const fn new(track: u32, onset: u32, note_number: u8, velocity: u8, gate: u32) -> Self {
        Self {
            track,
            onset,
            note_number,
            velocity,
            gate,
        }
    }
    /// The index of the track the note was released in
    pub const fn track(&self) -> u32 {
        self.track
    }
    /// The tick at which the note starts
    pub const fn onset(&self) -> u32 {
        self.onset
    }
    /// The key number
    pub const fn note_number(&self) -> u8 {
        self.note_number
    }
    /// The attack velocity
    pub const fn velocity(&self) -> u8 {
        self.velocity
    }
    /// How many ticks the note sounds for
    pub const fn gate(&self) -> u32 {
        self.gate
    }
    /// The tick at which the note was released
    pub const fn release(&self) -> u32 {
        self.onset + self.gate
    }
    /// The pitch, if the key number is a valid 7 bit value
    pub const fn note(&self) -> Option<Note> {
        Note::new(self.note_number)
    }
}

#[doc = r#"
Every finished note of a file, in the order the notes were released.

Tracks are scanned one after another, so all of track 0's notes come before
track 1's. Within a track notes are ordered by release, not onset; use
[`Score::sorted_by_onset`] for chronological order.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    events: Vec<ScoreEvent>,
}

impl Score {
    /// Create a score from events
    pub fn new(events: Vec<ScoreEvent>) -> Self {
        Self { events }
    }

    /// Returns the events of a single track
    pub fn track(&self, index: u32) -> impl Iterator<Item = &ScoreEvent> {
        self.events.iter().filter(move |e| e.track == index)
    }

    /// Returns a copy ordered by onset, then by track.
    ///
    /// Notes that tie keep their release order.
    pub fn sorted_by_onset(&self) -> Self {
        let mut events = self.events.clone();
        events.sort_by_key(|e| (e.onset, e.track));
        Self { events }
    }

    /// Returns the underlying events
    pub fn into_inner(self) -> Vec<ScoreEvent> {
        self.events
    }
}

impl Deref for Score {
    type Target = [ScoreEvent];
    fn deref(&self) -> &Self::Target {
        &self.events
    }
}

impl<'a> IntoIterator for &'a Score {
    type Item = &'a ScoreEvent;
    type IntoIter = core::slice::Iter<'a, ScoreEvent>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for Score {
    type Item = ScoreEvent;
    type IntoIter = alloc::vec::IntoIter<ScoreEvent>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

#[test]
fn sort_is_explicit_and_stable() {
    use pretty_assertions::assert_eq;
    let score = Score::new(alloc::vec![
        ScoreEvent::new(0, 480, 64, 90, 480),
        ScoreEvent::new(0, 0, 60, 100, 960),
        ScoreEvent::new(1, 0, 48, 80, 240),
        ScoreEvent::new(0, 0, 67, 70, 960),
    ]);

    let sorted = score.sorted_by_onset();
    assert_eq!(
        sorted.into_inner(),
        alloc::vec![
            ScoreEvent::new(0, 0, 60, 100, 960),
            ScoreEvent::new(0, 0, 67, 70, 960),
            ScoreEvent::new(1, 0, 48, 80, 240),
            ScoreEvent::new(0, 480, 64, 90, 480),
        ]
    );
    // the original is untouched
    assert_eq!(score[0].onset(), 480);
}

#[test]
fn filters_by_track() {
    let score = Score::new(alloc::vec![
        ScoreEvent::new(0, 0, 60, 100, 960),
        ScoreEvent::new(1, 0, 48, 80, 240),
        ScoreEvent::new(1, 240, 50, 80, 240),
    ]);
    assert_eq!(score.track(1).count(), 2);
    assert_eq!(score.track(2).count(), 0);
    assert_eq!(score[2].release(), 480);
}

use super::ScoreEvent;
use crate::{UMicros, file::meta::Tempo};
use core::num::NonZeroU16;

/// A [`ScoreEvent`] placed in real time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedNote {
    /// When the note starts
    pub onset: UMicros,
    /// How long the note sounds
    pub duration: UMicros,
    /// The note in ticks
    pub event: ScoreEvent,
}

/// An iterator returned from [`DecodedScore::timed_notes`](crate::file::DecodedScore::timed_notes).
pub enum OptTimedNotes<'a> {
    /// The division is zero, so ticks have no length
    None,
    /// Iterator over the score
    Some(TimedNotes<'a>),
}

impl<'a> Iterator for OptTimedNotes<'a> {
    type Item = TimedNote;
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OptTimedNotes::Some(iter) => iter.next(),
            OptTimedNotes::None => None,
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            OptTimedNotes::None => (0, Some(0)),
            OptTimedNotes::Some(iter) => iter.size_hint(),
        }
    }
}

/// Converts each note's ticks to microseconds at a single tempo.
pub struct TimedNotes<'a> {
    tempo: Tempo,
    division: NonZeroU16,
    events: core::slice::Iter<'a, ScoreEvent>,
}

impl<'a> TimedNotes<'a> {
    /// Returns `None` if `division` is zero.
    pub fn new(events: &'a [ScoreEvent], tempo: Tempo, division: u16) -> Option<Self> {
        Some(Self {
            tempo,
            division: NonZeroU16::new(division)?,
            events: events.iter(),
        })
    }

    fn micros(&self, ticks: u32) -> UMicros {
        let scaled = ticks as u64 * self.tempo.micros_per_quarter_note() as u64;
        UMicros::new(scaled / self.division.get() as u64)
    }
}

impl Iterator for TimedNotes<'_> {
    type Item = TimedNote;
    fn next(&mut self) -> Option<Self::Item> {
        let event = *self.events.next()?;
        Some(TimedNote {
            onset: self.micros(event.onset()),
            duration: self.micros(event.gate()),
            event,
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

#[test]
fn converts_ticks_at_tempo() {
    let events = [
        ScoreEvent::new(0, 0, 60, 100, 480),
        ScoreEvent::new(0, 480, 62, 80, 240),
        ScoreEvent::new(1, 240, 36, 80, 960),
    ];
    let timed: alloc::vec::Vec<_> = TimedNotes::new(&events, Tempo::new(500_000), 480)
        .unwrap()
        .collect();

    assert_eq!(timed.len(), 3);
    assert_eq!(timed[0].onset, UMicros::ZERO);
    assert_eq!(timed[0].duration, UMicros::new(500_000));
    assert_eq!(timed[1].onset, UMicros::new(500_000));
    assert_eq!(timed[1].duration, UMicros::new(250_000));
    assert_eq!(timed[2].onset, UMicros::new(250_000));
    assert_eq!(timed[2].duration, UMicros::from_secs(1));
    assert_eq!(timed[2].event.note_number(), 36);
}

#[test]
fn zero_division_yields_nothing() {
    let events = [ScoreEvent::new(0, 0, 60, 100, 480)];
    assert!(TimedNotes::new(&events, Tempo::DEFAULT, 0).is_none());

    let mut none = OptTimedNotes::None;
    assert_eq!(none.size_hint(), (0, Some(0)));
    assert_eq!(none.next(), None);
}

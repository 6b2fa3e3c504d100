use alloc::collections::{BTreeMap, VecDeque};

/// A note that has been pressed and not yet released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNote {
    onset_time: u32,
    note_number: u8,
    velocity: u8,
}

impl PendingNote {
    /// Create a new pending note
    pub const fn new(onset_time: u32, note_number: u8, velocity: u8) -> Self {
        Self {
            onset_time,
            note_number,
            velocity,
        }
    }
    /// The tick at which the note was pressed
    pub const fn onset_time(&self) -> u32 {
        self.onset_time
    }
    /// The key number
    pub const fn note_number(&self) -> u8 {
        self.note_number
    }
    /// The attack velocity
    pub const fn velocity(&self) -> u8 {
        self.velocity
    }
}

#[doc = r#"
Notes currently sounding, waiting for their release.

Each key number holds its own queue, oldest first, so overlapping presses of
the same key are released in the order they were pressed.
"#]
#[derive(Debug, Default, Clone)]
pub struct ActiveNotes {
    queues: BTreeMap<u8, VecDeque<PendingNote>>,
    len: usize,
}

impl ActiveNotes {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press
    pub fn press(&mut self, note: PendingNote) {
        self.queues
            .entry(note.note_number)
            .or_default()
            .push_back(note);
        self.len += 1;
    }

    /// Removes and returns the oldest pending press of `note_number`.
    ///
    /// Returns `None` if that key is not sounding, or if its oldest press
    /// starts after `time`. The press then stays queued.
    pub fn release(&mut self, note_number: u8, time: u32) -> Option<PendingNote> {
        let queue = self.queues.get_mut(&note_number)?;
        if queue.front()?.onset_time > time {
            return None;
        }
        let pending = queue.pop_front()?;
        if queue.is_empty() {
            self.queues.remove(&note_number);
        }
        self.len -= 1;
        Some(pending)
    }

    /// The number of presses still waiting for a release
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if no note is sounding
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `note_number` has at least one pending press
    pub fn is_sounding(&self, note_number: u8) -> bool {
        self.queues.contains_key(&note_number)
    }
}

#[test]
fn release_is_fifo_per_key() {
    let mut notes = ActiveNotes::new();
    notes.press(PendingNote::new(0, 60, 100));
    notes.press(PendingNote::new(10, 64, 90));
    notes.press(PendingNote::new(20, 60, 80));
    assert_eq!(notes.len(), 3);

    assert_eq!(notes.release(60, 30), Some(PendingNote::new(0, 60, 100)));
    assert!(notes.is_sounding(60));
    assert_eq!(notes.release(60, 30), Some(PendingNote::new(20, 60, 80)));
    assert!(!notes.is_sounding(60));
    assert_eq!(notes.release(64, 30), Some(PendingNote::new(10, 64, 90)));
    assert!(notes.is_empty());
}

#[test]
fn releasing_silent_key_is_none() {
    let mut notes = ActiveNotes::new();
    assert_eq!(notes.release(70, 0), None);
    // key 0 is not special
    assert_eq!(notes.release(0, 0), None);

    notes.press(PendingNote::new(5, 0, 1));
    assert_eq!(notes.release(1, 5), None);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes.release(0, 5), Some(PendingNote::new(5, 0, 1)));
}

#[test]
fn release_before_onset_keeps_press() {
    let mut notes = ActiveNotes::new();
    notes.press(PendingNote::new(1000, 60, 100));

    assert_eq!(notes.release(60, 10), None);
    assert!(notes.is_sounding(60));
    assert_eq!(notes.len(), 1);

    assert_eq!(notes.release(60, 1000), Some(PendingNote::new(1000, 60, 100)));
    assert!(notes.is_empty());
}

use super::{Score, ScoreEvent};
use alloc::vec::Vec;

/// Collects finished notes in the order they are released.
#[derive(Debug, Default, Clone)]
pub struct ScoreAssembler {
    events: Vec<ScoreEvent>,
}

impl ScoreAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finished note
    pub fn emit(&mut self, event: ScoreEvent) {
        self.events.push(event);
    }

    /// The number of notes emitted so far
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Finishes assembly, keeping emission order
    pub fn finish(self) -> Score {
        Score::new(self.events)
    }
}

#[test]
fn keeps_emission_order() {
    let mut assembler = ScoreAssembler::new();
    assembler.emit(ScoreEvent::new(0, 480, 64, 90, 480));
    assembler.emit(ScoreEvent::new(0, 0, 60, 100, 960));
    assembler.emit(ScoreEvent::new(1, 0, 48, 80, 240));
    assert_eq!(assembler.len(), 3);

    let score = assembler.finish();
    let onsets: Vec<u32> = score.iter().map(ScoreEvent::onset).collect();
    assert_eq!(onsets, [480, 0, 0]);
}

use crate::UMicros;

#[doc = r#"
Microseconds per quarter note, as set by the `FF 51 03` meta event.

Files without a Set Tempo event play at the default of 500,000 (120 BPM).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tempo {
    /// 120 beats per minute
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Create a tempo from the three payload bytes of a Set Tempo event
    pub const fn new_from_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Returns quarter notes per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }

    /// Converts a tick count to microseconds at this tempo.
    ///
    /// `ticks * tempo / division`. Returns `None` if `division` is zero.
    pub const fn ticks_to_micros(&self, ticks: u32, division: u16) -> Option<UMicros> {
        let scaled = ticks as u64 * self.0 as u64;
        match scaled.checked_div(division as u64) {
            Some(micros) => Some(UMicros::new(micros)),
            None => None,
        }
    }
}

#[test]
fn tempo_from_bytes() {
    assert_eq!(Tempo::new_from_bytes([0x07, 0xA1, 0x20]), Tempo::new(500_000));
    assert_eq!(Tempo::new_from_bytes([0x09, 0x27, 0xC0]), Tempo::new(600_000));
    assert_eq!(Tempo::default(), Tempo::new(500_000));
}

#[test]
fn bpm_and_ticks() {
    let tempo = Tempo::new(500_000);
    assert!((tempo.bpm() - 120.).abs() < f64::EPSILON);

    assert_eq!(tempo.ticks_to_micros(480, 480), Some(UMicros::new(500_000)));
    assert_eq!(tempo.ticks_to_micros(1920, 480), Some(UMicros::from_secs(2)));
    assert_eq!(tempo.ticks_to_micros(480, 0), None);
}

use core::fmt;

#[doc = r#"
A 7-bit key number, as carried by note events.

[`Note`] `0` is `C(-1)`, [`Note`] `60` is middle C (`C4`), and [`Note`] `127` is `G9`.

# Example
```rust
# use smf_score::prelude::*;

let note = Note::new(63).unwrap(); // 63 is between 0-127

assert_eq!(note.key(), Key::DSharp);
assert_eq!(note.octave(), Octave::new(4));
assert!(Note::new(128).is_none());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
pub struct Note(u8);

impl Note {
    /// Returns `None` if `byte` is greater than 127
    pub const fn new(byte: u8) -> Option<Self> {
        if byte > 127 {
            return None;
        }
        Some(Self(byte))
    }

    /// Create a note from a key and an octave.
    ///
    /// Returns `None` past `G9`.
    pub const fn from_key(key: Key, octave: Octave) -> Option<Self> {
        let byte = (octave.value() as i16 + 1) * 12 + key.get_mod_12() as i16;
        if byte > 127 {
            return None;
        }
        Some(Self(byte as u8))
    }

    /// Identifies the key of the note
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_byte(self.0)
    }

    /// Identifies the octave of the note
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave((self.0 / 12) as i8 - 1)
    }

    /// Returns the underlying byte of the note
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// Equal tempered frequency in Hz, with `A4` (69) at 440 Hz
    pub fn frequency(&self) -> f64 {
        440. * libm::pow(2., (self.0 as f64 - 69.) / 12.)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key(), self.octave())
    }
}

/// The pitch class of a [`Note`]
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    const fn from_byte(byte: u8) -> Self {
        use Key::*;
        match byte % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    const fn get_mod_12(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#/Db",
            D => "D",
            DSharp => "D#/Eb",
            E => "E",
            F => "F",
            FSharp => "F#/Gb",
            G => "G",
            GSharp => "G#/Ab",
            A => "A",
            ASharp => "A#/Bb",
            B => "B",
        };
        f.write_str(name)
    }
}

#[doc = r#"
Identifies the octave of a [`Note`]. Values range from -1 to 9.
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct Octave(i8);

impl Octave {
    /// Should be a value between [-1, 9]. Clamps between these two values.
    pub const fn new(mut octave: i8) -> Self {
        if octave < -1 {
            octave = -1
        } else if octave > 9 {
            octave = 9;
        }
        Self(octave)
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[test]
fn key_and_octave_round_trip() {
    for byte in 0..128 {
        let note = Note::new(byte).unwrap();
        assert_eq!(Note::from_key(note.key(), note.octave()), Some(note));
    }
    assert_eq!(Note::from_key(Key::GSharp, Octave::new(9)), None);
}

#[test]
fn test_note() {
    let c = Note::new(12).unwrap();
    assert_eq!(Key::C, c.key());
    assert_eq!(0, c.octave().value());

    let a_sharp = Note::new(94).unwrap();
    assert_eq!(Key::ASharp, a_sharp.key());
    assert_eq!(6, a_sharp.octave().value());
}

#[test]
fn frequencies() {
    let a4 = Note::new(69).unwrap();
    assert!((a4.frequency() - 440.).abs() < 1e-9);

    let e5 = Note::new(76).unwrap();
    assert!((e5.frequency() - 659.255).abs() < 1e-3);

    let c4 = Note::new(60).unwrap();
    assert!((c4.frequency() - 261.626).abs() < 1e-3);
}

#[test]
fn display() {
    use alloc::string::ToString;
    assert_eq!(Note::new(61).unwrap().to_string(), "C#/Db:4");
}

#[test]
fn octave_clamps() {
    assert_eq!(Octave::new(-4).value(), -1);
    assert_eq!(Octave::new(12).value(), 9);
    assert_eq!(Note::from_key(Key::C, Octave::new(-3)), Note::new(0));
}

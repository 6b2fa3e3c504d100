#![doc = r#"
Decode Standard MIDI Files into a flat score of notes.

A [`DecodedScore`](crate::file::DecodedScore) holds what a synthesizer needs
to render a file: the division (ticks per quarter note), the last tempo seen,
the number of tracks, the tick at which the longest track ends, and one
[`ScoreEvent`](crate::score::ScoreEvent) per sounded note.

# Example
```rust
use smf_score::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 13,
    0x00, 0x90, 60, 100,       // note on
    0x83, 0x60, 0x80, 60, 0,   // note off, 480 ticks later
    0x00, 0xFF, 0x2F, 0x00,    // end of track
];

let decoded = decode(&bytes).unwrap();
assert_eq!(decoded.division(), 480);

let note = decoded.score()[0];
assert_eq!(note.onset(), 0);
assert_eq!(note.gate(), 480);
```

# Features
- `std` (default): implements `std::error::Error` for the error types.
- `serde`: serialization for the decoded value types.
- `tracing`: structured diagnostics while decoding.
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::*;

pub mod file;
pub mod reader;
pub mod score;

mod micros;
pub use micros::*;

mod note;
pub use note::*;

pub use file::decode;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        HeaderError, Key, Note, Octave, TrackError, UMicros,
        file::{
            DecodedScore, FormatType, Header, decode,
            meta::{MetaEvent, MetaKind, Tempo},
        },
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind, decode_vlq},
        score::{Score, ScoreEvent, TimedNote},
    };
}

use crate::{HeaderError, TrackError};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a midi file.

Every error carries the byte offset at which decoding stopped.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    OutOfBounds,
    /// The header chunk is not a valid `MThd` chunk
    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),
    /// A data byte was found where a status byte was expected.
    ///
    /// Running status is not supported.
    #[error("Unknown event type {0:#04X}")]
    UnknownEventType(u8),
    /// The track's declared length disagrees with its contents
    #[error("Malformed file: {0}")]
    MalformedFile(#[from] TrackError),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }

    /// Create a new invalid header error
    pub const fn header(position: usize, error: HeaderError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::InvalidHeader(error),
        }
    }

    /// Create a new malformed track error
    pub const fn track(position: usize, error: TrackError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::MalformedFile(error),
        }
    }

    /// Create a new unknown event error
    pub const fn unknown_event(position: usize, status: u8) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::UnknownEventType(status),
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

#[test]
fn display_includes_position() {
    use alloc::string::ToString;

    let err = ReaderError::unknown_event(22, 0x3C);
    assert_eq!(
        err.to_string(),
        "Reading at Position 22, Unknown event type 0x3C"
    );

    let err = ReaderError::track(
        30,
        TrackError::Overrun {
            chunk_end: 28,
            required: 30,
        },
    );
    assert!(!err.is_out_of_bounds());
    assert_eq!(err.position(), 30);
}

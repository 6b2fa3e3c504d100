use thiserror::Error;

#[doc = r#"
Problems with the `MThd` chunk at the start of a file
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The file does not begin with `MThd`
    #[error("Expected tag \"MThd\", found {0:02X?}")]
    InvalidTag([u8; 4]),
    /// The header chunk does not declare a length of 6
    #[error("Expected a header length of 6, found {0}")]
    InvalidLength(u32),
}

#[doc = r#"
Problems with the contents of an `MTrk` chunk.

These are structural: the bytes disagree with the lengths the chunk declares.
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// A read needed bytes past the end of the track chunk
    #[error("Read to {required} crosses the track chunk end at {chunk_end}")]
    Overrun {
        /// Offset where the track chunk ends
        chunk_end: usize,
        /// Offset the read would have reached
        required: usize,
    },
    /// A Set Tempo meta event did not carry exactly three bytes
    #[error("Set Tempo must have a length of 3, found {0}")]
    InvalidTempoLength(u32),
    /// The accumulated delta times no longer fit in 32 bits
    #[error("Accumulated ticks overflowed")]
    TickOverflow,
}

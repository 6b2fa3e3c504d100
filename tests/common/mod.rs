#![allow(dead_code)]

/// Encodes a variable length quantity, most significant group first
pub fn encode_vlq(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes
}

/// Builds the bytes of a midi file
#[derive(Default)]
pub struct SmfBuilder {
    bytes: Vec<u8>,
}

impl SmfBuilder {
    pub fn new(format: u16, tracks: u16, division: u16) -> Self {
        let mut bytes = b"MThd".to_vec();
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&format.to_be_bytes());
        bytes.extend_from_slice(&tracks.to_be_bytes());
        bytes.extend_from_slice(&division.to_be_bytes());
        Self { bytes }
    }

    pub fn track(self, track: TrackBuilder) -> Self {
        self.chunk(b"MTrk", &track.bytes)
    }

    pub fn chunk(mut self, tag: &[u8; 4], body: &[u8]) -> Self {
        self.bytes.extend_from_slice(tag);
        self.bytes
            .extend_from_slice(&(body.len() as u32).to_be_bytes());
        self.bytes.extend_from_slice(body);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builds the body of an `MTrk` chunk
#[derive(Default)]
pub struct TrackBuilder {
    bytes: Vec<u8>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, delta: u32, event: &[u8]) -> Self {
        self.bytes.extend(encode_vlq(delta));
        self.bytes.extend_from_slice(event);
        self
    }

    pub fn note_on(self, delta: u32, note: u8, velocity: u8) -> Self {
        self.event(delta, &[0x90, note, velocity])
    }

    pub fn note_off(self, delta: u32, note: u8) -> Self {
        self.event(delta, &[0x80, note, 0x40])
    }

    pub fn tempo(self, delta: u32, micros_per_quarter: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter.to_be_bytes();
        self.event(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn end_of_track(self, delta: u32) -> Self {
        self.event(delta, &[0xFF, 0x2F, 0x00])
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

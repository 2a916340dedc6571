use crate::{Decode, Encode};

/// Marker byte + X high, X low, Y high, Y low
pub const FRAME_LEN: usize = 1 + PAYLOAD_LEN;
/// Bytes following the marker
pub const PAYLOAD_LEN: usize = 4;

/// Advertised coordinate range. Decoded values are not clamped to it.
pub const MIN_COORD: u16 = 0;
pub const MAX_COORD: u16 = 0x8000;

/// First byte of every frame. Doubles as the touch state of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Press = 0xC8,
    Release = 0x88,
}

impl Marker {
    pub fn from_byte(byte: u8) -> Option<Marker> {
        match byte {
            x if x == Marker::Press as u8 => Some(Marker::Press),
            x if x == Marker::Release as u8 => Some(Marker::Release),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// One absolute-coordinate touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchEvent {
    pub x: u16,
    pub y: u16,
    pub pressed: bool,
}

impl TouchEvent {
    /// Assemble an event from a complete big-endian payload.
    pub fn from_payload(payload: [u8; PAYLOAD_LEN], pressed: bool) -> TouchEvent {
        TouchEvent {
            x: u16::from_be_bytes([payload[0], payload[1]]),
            y: u16::from_be_bytes([payload[2], payload[3]]),
            pressed,
        }
    }

    pub fn marker(&self) -> Marker {
        if self.pressed {
            Marker::Press
        } else {
            Marker::Release
        }
    }

    pub fn to_frame(&self) -> [u8; FRAME_LEN] {
        let x = self.x.to_be_bytes();
        let y = self.y.to_be_bytes();
        [self.marker().to_byte(), x[0], x[1], y[0], y[1]]
    }
}

/// Errors from the whole-frame codec. The streaming decoder never produces these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    BufferTooSmall { expected: usize, found: usize },
    UnknownMarker { found: u8 },
}

impl Encode for TouchEvent {
    type Error = FrameError;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        if buffer.len() < FRAME_LEN {
            return Err(FrameError::BufferTooSmall {
                expected: FRAME_LEN,
                found: buffer.len(),
            });
        }
        buffer[0..FRAME_LEN].copy_from_slice(&self.to_frame());
        Ok(FRAME_LEN)
    }
}

impl<'a> Decode<'a> for TouchEvent {
    type Error = FrameError;

    fn decode(data: &'a [u8]) -> Result<Self, Self::Error> {
        if data.len() < FRAME_LEN {
            return Err(FrameError::BufferTooSmall {
                expected: FRAME_LEN,
                found: data.len(),
            });
        }
        let marker = Marker::from_byte(data[0]).ok_or(FrameError::UnknownMarker { found: data[0] })?;
        let payload = [data[1], data[2], data[3], data[4]];
        Ok(TouchEvent::from_payload(payload, marker == Marker::Press))
    }
}

//! Decoder for the FlyPOS Pro serial touchscreen.
//!
//! The panel streams five byte frames with no delimiter or checksum:
//! ```text
//! ┌────────┬──────┬──────┬──────┬──────┐
//! │ MARKER │ X hi │ X lo │ Y hi │ Y lo │
//! └────────┴──────┴──────┴──────┴──────┘
//! ```
//! `0xC8` marks a press, `0x88` a release. Feed bytes to a [`Decoder`] as they
//! arrive, or let a [`Connection`] own the decoder and pass events on to an
//! [`EventSink`].
#![no_std]

pub mod connection;
pub mod decoder;
pub mod device;
pub mod event;

pub trait Encode {
    type Error;

    /// Write into `buffer`, returning the number of bytes used.
    fn encode(&self, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Decode<'a> where Self: Sized {
    type Error;

    fn decode(data: &'a [u8]) -> Result<Self, Self::Error>;
}

pub use connection::{Connection, EventSink, FnSink, Stats};
pub use decoder::{Decoder, DecoderConfig, Phase, StaleMarkerPolicy, Step, TouchKind, DEFAULT_STALE_MARKER_POLICY};
pub use event::{FrameError, Marker, TouchEvent, FRAME_LEN, MAX_COORD, MIN_COORD, PAYLOAD_LEN};

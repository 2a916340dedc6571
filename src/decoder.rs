//! Streaming frame decoder.
//!
//! Bytes arrive one at a time from the serial line. Every frame is a marker
//! byte followed by four payload bytes, with no delimiter or checksum, so the
//! decoder can only count: the byte at index 0 of each five byte window is
//! read as a marker, the next four as payload. A window that did not start
//! with a valid marker is consumed and dropped, which resynchronizes on the
//! next window boundary.

use crate::event::{Marker, PAYLOAD_LEN, TouchEvent};

/// Whether the next byte is a marker or payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingPayload,
}

/// Touch state carried by the marker of the frame being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchKind {
    #[default]
    None,
    Pressed,
    Released,
}

impl TouchKind {
    fn pressed(self) -> Option<bool> {
        match self {
            TouchKind::None => None,
            TouchKind::Pressed => Some(true),
            TouchKind::Released => Some(false),
        }
    }
}

/// What an unrecognized byte in marker position does to the touch kind.
///
/// `Retain` keeps the previous kind, which is how the kernel driver for this
/// panel behaves. Under the transitions of [`Decoder::step`] the kind is
/// always `None` at a window boundary, so the two policies only diverge if
/// that ever stops being true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleMarkerPolicy {
    /// Leave the touch kind untouched
    Retain,
    /// Clear the touch kind so the window is always discarded
    Reset,
}

pub const DEFAULT_STALE_MARKER_POLICY: StaleMarkerPolicy = StaleMarkerPolicy::Retain;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub stale_marker: StaleMarkerPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            stale_marker: DEFAULT_STALE_MARKER_POLICY,
        }
    }
}

/// Outcome of a single [`Decoder::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Byte consumed, nothing to report
    Pending,
    /// Last payload byte of a valid frame
    Event(TouchEvent),
    /// Byte in marker position was neither press nor release
    UnknownMarker(u8),
    /// Last payload byte of a window that had no valid marker
    Discarded,
}

impl Step {
    pub fn event(self) -> Option<TouchEvent> {
        match self {
            Step::Event(e) => Some(e),
            _ => None,
        }
    }
}

/// Per-connection decode state.
#[derive(Debug, Clone)]
pub struct Decoder {
    config: DecoderConfig,
    kind: TouchKind,
    payload: [u8; PAYLOAD_LEN],
    /// Payload bytes received in the current window, 0..=PAYLOAD_LEN
    index: u8,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Decoder {
        Decoder::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Decoder {
        Decoder {
            config,
            kind: TouchKind::None,
            payload: [0; PAYLOAD_LEN],
            index: 0,
        }
    }

    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// Back to the initial state. Configuration is kept.
    pub fn reset(&mut self) {
        self.kind = TouchKind::None;
        self.payload = [0; PAYLOAD_LEN];
        self.index = 0;
    }

    pub fn phase(&self) -> Phase {
        if self.index == 0 {
            Phase::Idle
        } else {
            Phase::AwaitingPayload
        }
    }

    pub fn touch_kind(&self) -> TouchKind {
        self.kind
    }

    pub fn write_index(&self) -> usize {
        self.index as usize
    }

    /// Feed a single byte, returning an event if it completed a valid frame.
    pub fn feed(&mut self, byte: u8) -> Option<TouchEvent> {
        self.step(byte).event()
    }

    /// Feed a single byte and report what it did to the frame in progress.
    pub fn step(&mut self, byte: u8) -> Step {
        let index = self.index as usize;
        let mut step = Step::Pending;

        if index == 0 {
            match Marker::from_byte(byte) {
                Some(Marker::Press) => self.kind = TouchKind::Pressed,
                Some(Marker::Release) => self.kind = TouchKind::Released,
                None => {
                    if self.config.stale_marker == StaleMarkerPolicy::Reset {
                        self.kind = TouchKind::None;
                    }
                    step = Step::UnknownMarker(byte);
                }
            }
        } else if let Some(pressed) = self.kind.pressed() {
            self.payload[index - 1] = byte;
            if index == PAYLOAD_LEN {
                step = Step::Event(TouchEvent::from_payload(self.payload, pressed));
                self.kind = TouchKind::None;
            }
        } else if index == PAYLOAD_LEN {
            step = Step::Discarded;
        }

        // The window always closes after PAYLOAD_LEN payload bytes, valid or not
        if index == PAYLOAD_LEN {
            self.index = 0;
        } else {
            self.index += 1;
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(d: &mut Decoder, data: &[u8]) -> heapless::Vec<TouchEvent, 8> {
        let mut out = heapless::Vec::new();
        for b in data {
            if let Some(e) = d.feed(*b) {
                out.push(e).unwrap();
            }
        }
        out
    }

    #[test]
    fn initial_state() {
        let d = Decoder::new();
        assert_eq!(d.phase(), Phase::Idle);
        assert_eq!(d.touch_kind(), TouchKind::None);
        assert_eq!(d.write_index(), 0);
        assert_eq!(d.config().stale_marker, StaleMarkerPolicy::Retain);
    }

    #[test]
    fn press_frame() {
        let mut d = Decoder::new();
        let events = feed_all(&mut d, &[0xC8, 0x12, 0x34, 0x56, 0x78]);
        assert_eq!(events.as_slice(), &[TouchEvent { x: 0x1234, y: 0x5678, pressed: true }]);
        assert_eq!(d.write_index(), 0);
        assert_eq!(d.touch_kind(), TouchKind::None);
    }

    #[test]
    fn release_frame() {
        let mut d = Decoder::new();
        let events = feed_all(&mut d, &[0x88, 0x00, 0x01, 0x00, 0x02]);
        assert_eq!(events.as_slice(), &[TouchEvent { x: 1, y: 2, pressed: false }]);
    }

    #[test]
    fn steps_through_a_frame() {
        let mut d = Decoder::new();
        assert_eq!(d.step(0xC8), Step::Pending);
        assert_eq!(d.touch_kind(), TouchKind::Pressed);
        assert_eq!(d.phase(), Phase::AwaitingPayload);
        for (i, b) in [0xAA, 0xBB, 0xCC].into_iter().enumerate() {
            assert_eq!(d.step(b), Step::Pending);
            assert_eq!(d.write_index(), i + 2);
        }
        assert_eq!(
            d.step(0xDD),
            Step::Event(TouchEvent { x: 0xAABB, y: 0xCCDD, pressed: true })
        );
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn unknown_marker_consumes_a_window() {
        let mut d = Decoder::new();
        assert_eq!(d.step(0xFF), Step::UnknownMarker(0xFF));
        assert_eq!(d.write_index(), 1);
        assert_eq!(d.step(0x11), Step::Pending);
        assert_eq!(d.step(0x22), Step::Pending);
        assert_eq!(d.step(0x33), Step::Pending);
        assert_eq!(d.step(0x44), Step::Discarded);
        assert_eq!(d.write_index(), 0);
        let events = feed_all(&mut d, &[0xC8, 0, 0, 0, 0]);
        assert_eq!(events.as_slice(), &[TouchEvent { x: 0, y: 0, pressed: true }]);
    }

    #[test]
    fn marker_bytes_inside_payload_are_data() {
        let mut d = Decoder::new();
        let events = feed_all(&mut d, &[0x88, 0xC8, 0x88, 0xC8, 0x88]);
        assert_eq!(events.as_slice(), &[TouchEvent { x: 0xC888, y: 0xC888, pressed: false }]);
    }

    #[test]
    fn boundary_values_are_not_clamped() {
        let mut d = Decoder::new();
        let events = feed_all(&mut d, &[0xC8, 0xFF, 0xFF, 0x00, 0x00, 0x88, 0x00, 0x00, 0xFF, 0xFF]);
        assert_eq!(
            events.as_slice(),
            &[
                TouchEvent { x: 0xFFFF, y: 0, pressed: true },
                TouchEvent { x: 0, y: 0xFFFF, pressed: false },
            ]
        );
    }

    #[test]
    fn stale_kind_is_retained_on_unknown_marker() {
        // Seed the state the transitions never produce on their own
        let mut d = Decoder::new();
        d.kind = TouchKind::Pressed;
        assert_eq!(d.step(0x00), Step::UnknownMarker(0x00));
        assert_eq!(d.touch_kind(), TouchKind::Pressed);
        let events = feed_all(&mut d, &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(events.as_slice(), &[TouchEvent { x: 0x0102, y: 0x0304, pressed: true }]);
    }

    #[test]
    fn reset_policy_clears_stale_kind() {
        let mut d = Decoder::with_config(DecoderConfig {
            stale_marker: StaleMarkerPolicy::Reset,
        });
        d.kind = TouchKind::Released;
        assert_eq!(d.step(0x00), Step::UnknownMarker(0x00));
        assert_eq!(d.touch_kind(), TouchKind::None);
        assert!(feed_all(&mut d, &[0x01, 0x02, 0x03, 0x04]).is_empty());
        assert_eq!(d.write_index(), 0);
    }

    #[test]
    fn reset_mid_frame() {
        let mut d = Decoder::new();
        feed_all(&mut d, &[0xC8, 0x01, 0x02]);
        d.reset();
        assert_eq!(d.phase(), Phase::Idle);
        assert_eq!(d.touch_kind(), TouchKind::None);
        let events = feed_all(&mut d, &[0x88, 0x00, 0x05, 0x00, 0x06]);
        assert_eq!(events.as_slice(), &[TouchEvent { x: 5, y: 6, pressed: false }]);
    }
}

use embedded_hal_nb::serial::Read;

use crate::decoder::{Decoder, DecoderConfig, Step};
use crate::event::{FRAME_LEN, TouchEvent};

/// Receives decoded events in emission order.
pub trait EventSink {
    /// Hand over one event. A sink that cannot take it gives it back.
    fn report(&mut self, event: TouchEvent) -> Result<(), TouchEvent>;
}

/// Adapts a closure into an [`EventSink`] that never refuses an event.
#[derive(Debug)]
pub struct FnSink<F: FnMut(TouchEvent)>(pub F);

impl<F: FnMut(TouchEvent)> EventSink for FnSink<F> {
    fn report(&mut self, event: TouchEvent) -> Result<(), TouchEvent> {
        (self.0)(event);
        Ok(())
    }
}

impl<const N: usize> EventSink for heapless::Vec<TouchEvent, N> {
    fn report(&mut self, event: TouchEvent) -> Result<(), TouchEvent> {
        self.push(event)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub bytes: u32,
    pub events: u32,
    pub unknown_markers: u32,
    pub discarded_frames: u32,
    /// Events the sink refused
    pub dropped_events: u32,
}

/// Decode state and event sink for one attached serial port.
///
/// Created when the port is attached and consumed when it goes away. Every
/// byte must go through the same `Connection`, in arrival order.
#[derive(Debug)]
pub struct Connection<S: EventSink> {
    decoder: Decoder,
    sink: S,
    stats: Stats,
}

impl<S: EventSink> Connection<S> {
    pub fn connect(sink: S) -> Connection<S> {
        Connection::connect_with(DecoderConfig::default(), sink)
    }

    pub fn connect_with(config: DecoderConfig, sink: S) -> Connection<S> {
        log::debug!("connect: {:?}", config);
        Connection {
            decoder: Decoder::with_config(config),
            sink,
            stats: Stats::default(),
        }
    }

    /// Tear down decode state and give the sink back.
    pub fn disconnect(self) -> S {
        log::debug!("disconnect: {:?}", self.stats);
        self.sink
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Per-byte entry point, called from the transport's receive callback.
    pub fn receive(&mut self, byte: u8) {
        self.stats.bytes = self.stats.bytes.wrapping_add(1);
        match self.decoder.step(byte) {
            Step::Pending => {}
            Step::Event(event) => {
                log::trace!("touch {:?}", event);
                self.stats.events = self.stats.events.wrapping_add(1);
                if let Err(event) = self.sink.report(event) {
                    log::warn!("sink refused {:?}", event);
                    self.stats.dropped_events = self.stats.dropped_events.wrapping_add(1);
                }
            }
            Step::UnknownMarker(b) => {
                log::debug!("out of order state byte received: {:#x}", b);
                self.stats.unknown_markers = self.stats.unknown_markers.wrapping_add(1);
            }
            Step::Discarded => {
                log::trace!("discarded frame without marker");
                self.stats.discarded_frames = self.stats.discarded_frames.wrapping_add(1);
            }
        }
    }

    /// Deliver every byte the port has ready, one at a time, until it would block.
    ///
    /// Returns the number of bytes delivered.
    pub fn poll<Rx: Read>(&mut self, rx: &mut Rx) -> Result<usize, Rx::Error> {
        let mut count = 0;
        loop {
            match rx.read() {
                Ok(b) => {
                    self.receive(b);
                    count += 1;
                }
                Err(nb::Error::WouldBlock) => return Ok(count),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }

    /// One blocking read of up to a frame's worth of bytes, delivered in order.
    ///
    /// Returns 0 at end of stream.
    pub fn pump<R: embedded_io::Read>(&mut self, reader: &mut R) -> Result<usize, R::Error> {
        let mut buf = [0; FRAME_LEN];
        let n = reader.read(&mut buf)?;
        for b in &buf[0..n] {
            self.receive(*b);
        }
        Ok(n)
    }
}

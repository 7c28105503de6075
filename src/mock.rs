//! Scripted bus used by the unit tests.
//!
//! Records every transport call in order, replays queued read data, and can
//! be told to fail a specific send or any receive.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::transport::{AsyncTransport, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Init,
    Deinit,
    Send(u8, Vec<u8>),
    Receive(u8, usize),
}

#[derive(Default)]
pub(crate) struct MockBus {
    pub events: Vec<Event>,
    /// Zero-based index of the send call that should fail.
    pub fail_send_at: Option<usize>,
    pub fail_receive: bool,
    pub fail_init: bool,
    reads: VecDeque<Vec<u8>>,
    sends: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes returned by the next receive.
    pub fn queue_read(&mut self, data: &[u8]) {
        self.reads.push_back(data.to_vec());
    }

    /// Payloads of every send, in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Send(_, data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn do_send(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.events.push(Event::Send(address, data.to_vec()));
        let index = self.sends;
        self.sends += 1;
        if self.fail_send_at == Some(index) {
            return Err(BusError);
        }
        Ok(())
    }

    fn do_receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.events.push(Event::Receive(address, buffer.len()));
        if self.fail_receive {
            // Scribble over the buffer the way a half-finished transfer would.
            buffer.fill(0xEE);
            return Err(BusError);
        }
        let data = self.reads.pop_front().unwrap_or_default();
        for (slot, byte) in buffer.iter_mut().zip(data.iter().chain(core::iter::repeat(&0))) {
            *slot = *byte;
        }
        Ok(())
    }

    fn do_init(&mut self) -> Result<(), BusError> {
        self.events.push(Event::Init);
        if self.fail_init {
            return Err(BusError);
        }
        Ok(())
    }
}

impl Transport for MockBus {
    type Error = BusError;

    fn send(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.do_send(address, data)
    }

    fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.do_receive(address, buffer)
    }

    fn init(&mut self) -> Result<(), BusError> {
        self.do_init()
    }

    fn deinit(&mut self) -> Result<(), BusError> {
        self.events.push(Event::Deinit);
        Ok(())
    }
}

impl AsyncTransport for MockBus {
    type Error = BusError;

    async fn send(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.do_send(address, data)
    }

    async fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), BusError> {
        self.do_receive(address, buffer)
    }

    async fn init(&mut self) -> Result<(), BusError> {
        self.do_init()
    }

    async fn deinit(&mut self) -> Result<(), BusError> {
        self.events.push(Event::Deinit);
        Ok(())
    }
}

//! Control handoff between a UI/driver thread and the audio thread.
//!
//! The engine itself takes no locks. A controlling thread pushes
//! [`ControlMessage`]s into a single-producer/single-consumer ring buffer and
//! the audio thread drains it right before each block, so frequency and gate
//! stay fixed for the whole block.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    SetFrequency(f32),
    SetGate(bool),
    /// Zero all history (note-off and silence)
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Messages queued up front; handy for offline rendering and tests.
impl MessageReceiver for std::collections::VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control requests for a tone generator living on the audio thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToneMessage {
    Start,
    Stop,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ToneMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        Consumer::pop(self).ok()
    }
}

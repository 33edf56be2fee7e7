use rtrb::{Consumer, Producer, RingBuffer};

use crate::dsp::generator::{ToneGenerator, ToneSource};
use crate::synth::message::{MessageReceiver, ToneMessage};

const CONTROL_QUEUE_SIZE: usize = 64;

/// Control-thread side of a shared tone. Pushing never blocks; if the queue
/// is somehow full the request is dropped rather than stalling the caller.
pub struct ToneHandle {
    tx: Producer<ToneMessage>,
}

impl ToneHandle {
    pub fn start(&mut self) {
        let _ = self.tx.push(ToneMessage::Start);
    }

    pub fn stop(&mut self) {
        let _ = self.tx.push(ToneMessage::Stop);
    }
}

/// Audio-thread side: a generator plus the consumer end of its control queue.
///
/// Pending requests are drained at the top of each block, so start/stop and
/// phase mutation are serialized with rendering by construction.
pub struct SharedTone {
    tone: ToneGenerator,
    rx: Consumer<ToneMessage>,
}

impl SharedTone {
    pub fn new(tone: ToneGenerator) -> (Self, ToneHandle) {
        let (tx, rx) = RingBuffer::<ToneMessage>::new(CONTROL_QUEUE_SIZE);
        (Self { tone, rx }, ToneHandle { tx })
    }

    pub fn generator(&self) -> &ToneGenerator {
        &self.tone
    }
}

impl ToneSource for SharedTone {
    fn render_block(&mut self, out: &mut [f32]) {
        while let Some(msg) = MessageReceiver::pop(&mut self.rx) {
            match msg {
                ToneMessage::Start => self.tone.start(),
                ToneMessage::Stop => self.tone.stop(),
            }
        }

        self.tone.fill(out);
    }

    fn is_active(&self) -> bool {
        ToneSource::is_active(&self.tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::generator::GeneratorState;
    use crate::dsp::pitch::PitchName;
    use crate::dsp::profile::SignalProfile;

    fn shared_a4() -> (SharedTone, ToneHandle) {
        let tone = SignalProfile::default().tone(PitchName::A, 4, 48_000.0);
        SharedTone::new(tone)
    }

    #[test]
    fn messages_apply_before_rendering() {
        let (mut shared, mut handle) = shared_a4();
        let mut buffer = vec![0.0; 128];

        shared.render_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0), "idle until started");

        handle.start();
        shared.render_block(&mut buffer);
        assert_eq!(shared.generator().state(), GeneratorState::Playing);
        assert!(buffer.iter().any(|&s| s != 0.0));

        handle.stop();
        shared.render_block(&mut buffer);
        assert_eq!(shared.generator().state(), GeneratorState::Releasing);
    }

    #[test]
    fn stop_before_start_is_harmless() {
        let (mut shared, mut handle) = shared_a4();
        handle.stop();
        handle.stop();
        let mut buffer = vec![0.0; 64];
        shared.render_block(&mut buffer);
        assert_eq!(shared.generator().state(), GeneratorState::Idle);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}

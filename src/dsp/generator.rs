use crate::dsp::profile::SignalProfile;

/*
Tone Generator
==============

The generator is the realtime half of the crate: everything else prepares
data, this fills audio buffers under a deadline.

Vocabulary
----------

  phase        Position within the waveform cycle, in [0, 1). Advanced by
               frequency / sample_rate once per sample and wrapped at 1.0 so
               floating-point error stays bounded on long-held notes.

  gain         Product of the profile's envelope (a function of phase) and,
               after stop(), the release curve (a function of cycles elapsed
               since the stop).

  state        Idle, Playing, or Releasing. start() resets phase and enters
               Playing; stop() enters Releasing; the release curve falling
               below RELEASE_FLOOR returns the generator to Idle.

The fill loop writes gain * envelope(phase) * waveform(phase) per sample.
It never allocates, never blocks, and never lets a non-finite value through:
degenerate frequency or sample rate renders silence, and any NaN or infinite
sample is squashed to 0.0 before it reaches the buffer. A buffer of
non-finite samples can wedge output hardware, so this is a correctness
guarantee rather than cosmetics.

Threading contract: fill exclusively owns phase and state. Call start(),
stop(), and fill() from one context, or wrap the generator in
synth::SharedTone so control messages cross over a lock-free queue and all
mutation happens on the audio side.
*/

/// Release gain below which a tone is considered silent and returns to Idle.
const RELEASE_FLOOR: f32 = 1e-4;

/// A source of mono audio blocks, pulled by the output sink once per buffer.
///
/// `render_block` must overwrite every sample of `out` and complete within
/// the buffer deadline: no allocation, no blocking, no panics.
pub trait ToneSource: Send {
    fn render_block(&mut self, out: &mut [f32]);

    /// Whether the source is currently producing sound.
    fn is_active(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Playing,
    Releasing,
}

/// A single tone at a fixed frequency, shaped by a [`SignalProfile`].
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    frequency: f32,
    sample_rate: f32,
    profile: SignalProfile,
    phase: f32,
    release_elapsed: f32,
    state: GeneratorState,
}

impl ToneGenerator {
    pub fn new(frequency: f32, profile: SignalProfile, sample_rate: f32) -> Self {
        Self {
            frequency,
            sample_rate,
            profile,
            phase: 0.0,
            release_elapsed: 0.0,
            state: GeneratorState::Idle,
        }
    }

    /// Begin sounding from the top of the cycle.
    ///
    /// Restarting an already-playing tone leaves the same state a single
    /// start() would: phase 0, Playing.
    pub fn start(&mut self) {
        self.phase = 0.0;
        self.release_elapsed = 0.0;
        self.state = GeneratorState::Playing;
    }

    /// Stop sounding, fading out along the profile's release curve.
    ///
    /// Safe to call repeatedly and before start(); only a Playing tone
    /// transitions, so a fade already in progress is not restarted.
    pub fn stop(&mut self) {
        if self.state == GeneratorState::Playing {
            self.release_elapsed = 0.0;
            self.state = GeneratorState::Releasing;
        }
    }

    /// Fill `out` with the next block of samples.
    pub fn fill(&mut self, out: &mut [f32]) {
        if !(self.frequency.is_finite() && self.frequency > 0.0)
            || !(self.sample_rate.is_finite() && self.sample_rate > 0.0)
        {
            out.fill(0.0);
            return;
        }

        let step = self.frequency / self.sample_rate;
        let waveform = self.profile.waveform_fn();
        let envelope = self.profile.envelope_fn();
        let release = self.profile.release_fn();

        for slot in out.iter_mut() {
            let gain = match self.state {
                GeneratorState::Idle => {
                    *slot = 0.0;
                    continue;
                }
                GeneratorState::Playing => 1.0,
                GeneratorState::Releasing => {
                    let gain = release(self.release_elapsed);
                    self.release_elapsed += step;
                    if gain < RELEASE_FLOOR {
                        self.state = GeneratorState::Idle;
                        *slot = 0.0;
                        continue;
                    }
                    gain
                }
            };

            let sample = gain * envelope(self.phase) * waveform(self.phase);
            *slot = if sample.is_finite() { sample } else { 0.0 };

            self.phase += step;
            self.phase -= self.phase.floor();
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current position within the cycle, in [0, 1).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GeneratorState::Playing
    }

    pub fn profile(&self) -> &SignalProfile {
        &self.profile
    }
}

impl ToneSource for ToneGenerator {
    fn render_block(&mut self, out: &mut [f32]) {
        self.fill(out);
    }

    fn is_active(&self) -> bool {
        self.state != GeneratorState::Idle
    }
}

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::generator::ToneGenerator;
use crate::dsp::pitch::{self, PitchName, CONCERT_A4};

/// A pure function of phase, evaluated once per sample inside the audio
/// callback. Implementations must not allocate or block.
///
/// For waveforms the argument is a position within the cycle in [0, 1) and
/// the result lies in [-1, 1]. For envelopes the result is a gain in [0, 1].
/// For release curves the argument is the number of cycles elapsed since the
/// tone was stopped and the result decays toward zero.
pub type PhaseFn = fn(f32) -> f32;

/// One cycle of a sine wave.
pub fn sine(phase: f32) -> f32 {
    (TAU * phase).sin()
}

/// Rising sawtooth, -1 at the start of the cycle to +1 at the end.
pub fn saw(phase: f32) -> f32 {
    2.0 * (phase - phase.floor()) - 1.0
}

/// Square wave with a fixed 50% duty cycle.
pub fn square(phase: f32) -> f32 {
    if phase - phase.floor() < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Triangle wave, starting at 0 and peaking a quarter cycle in.
pub fn triangle(phase: f32) -> f32 {
    let p = phase - phase.floor();
    if p < 0.25 {
        4.0 * p
    } else if p < 0.75 {
        2.0 - 4.0 * p
    } else {
        4.0 * p - 4.0
    }
}

/// Default envelope: a constant half-scale gain.
pub fn half_level(_phase: f32) -> f32 {
    0.5
}

/// Default release curve: exponential falloff with a 40-cycle time constant
/// (roughly 90 ms at A4).
pub fn exp_falloff(cycles: f32) -> f32 {
    (-cycles / 40.0).exp()
}

/// Named waveform shapes, resolvable to their [`PhaseFn`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    pub fn function(self) -> PhaseFn {
        match self {
            Waveform::Sine => sine,
            Waveform::Saw => saw,
            Waveform::Square => square,
            Waveform::Triangle => triangle,
        }
    }
}

/// Optional overrides for [`SignalProfile::new`]. Unset fields resolve to the
/// named defaults exactly once, at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileConfig {
    pub waveform: Option<PhaseFn>,
    pub envelope: Option<PhaseFn>,
    pub release: Option<PhaseFn>,
    pub reference_pitch: Option<f32>,
}

/// An immutable bundle of waveform, envelope, and release functions plus the
/// tuning reference. Cheap to copy; any number of generators may share one.
#[derive(Debug, Clone, Copy)]
pub struct SignalProfile {
    waveform: PhaseFn,
    envelope: PhaseFn,
    release: PhaseFn,
    reference_pitch: f32,
}

impl SignalProfile {
    pub fn new(config: ProfileConfig) -> Self {
        Self {
            waveform: config.waveform.unwrap_or(sine),
            envelope: config.envelope.unwrap_or(half_level),
            release: config.release.unwrap_or(exp_falloff),
            reference_pitch: config.reference_pitch.unwrap_or(CONCERT_A4),
        }
    }

    /// Default profile with the given waveform shape.
    pub fn with_waveform(waveform: Waveform) -> Self {
        Self::new(ProfileConfig {
            waveform: Some(waveform.function()),
            ..ProfileConfig::default()
        })
    }

    pub fn reference_pitch(&self) -> f32 {
        self.reference_pitch
    }

    /// Equal-tempered frequency of a pitch under this profile's tuning.
    pub fn frequency(&self, pitch: PitchName, octave: i32) -> f32 {
        pitch::frequency(pitch, octave, self.reference_pitch)
    }

    /// Build a generator for a pitch, bound to this profile.
    pub fn tone(&self, pitch: PitchName, octave: i32, sample_rate: f32) -> ToneGenerator {
        ToneGenerator::new(self.frequency(pitch, octave), *self, sample_rate)
    }

    pub(crate) fn waveform_fn(&self) -> PhaseFn {
        self.waveform
    }

    pub(crate) fn envelope_fn(&self) -> PhaseFn {
        self.envelope
    }

    pub(crate) fn release_fn(&self) -> PhaseFn {
        self.release
    }
}

impl Default for SignalProfile {
    fn default() -> Self {
        Self::new(ProfileConfig::default())
    }
}

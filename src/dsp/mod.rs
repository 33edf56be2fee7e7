//! Low-level synthesis primitives.
//!
//! These components are allocation-free and realtime-safe, making them safe
//! to drive directly from an audio callback. They stay focused on the
//! pitch-and-phase math so the `synth` and `io` layers can handle control
//! messaging and device plumbing.

/// Phase-accumulator tone generation with start/stop lifecycle.
pub mod generator;
/// Pitch names and equal-tempered frequency derivation.
pub mod pitch;
/// Waveform, envelope, and release functions bundled with a tuning reference.
pub mod profile;

pub use generator::{GeneratorState, ToneGenerator, ToneSource};
pub use pitch::{PitchName, CONCERT_A4};
pub use profile::{ProfileConfig, SignalProfile, Waveform};

pub mod dsp;
pub mod io; // Audio device output sink
pub mod keyboard; // Key-span layout data for keyboard frontends
pub mod synth; // Lock-free control messaging for the audio thread

pub use dsp::{PitchName, SignalProfile, ToneGenerator, ToneSource};

pub const MAX_BLOCK_SIZE: usize = 2048;

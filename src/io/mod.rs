// Purpose - external interfaces: the audio output device.

pub mod output;

pub use output::{AudioContext, OutputError, OutputSink};

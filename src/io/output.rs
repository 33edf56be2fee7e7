use std::fmt;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    BuildStreamError, DefaultStreamConfigError, PauseStreamError, PlayStreamError,
    SupportedStreamConfig,
};

use crate::dsp::generator::ToneSource;
use crate::MAX_BLOCK_SIZE;

/// Handle to an output device and its negotiated stream configuration.
///
/// The context is an explicit object owned by the caller: open it at
/// application start, pass it to [`OutputSink::open`], drop it on shutdown.
/// Sample rate and channel count are fixed for the lifetime of any sink
/// opened from it.
pub struct AudioContext {
    device: cpal::Device,
    config: SupportedStreamConfig,
}

impl AudioContext {
    /// Open the default output device with its default configuration.
    pub fn new() -> Result<Self, OutputError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(OutputError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        log::info!(
            "output device: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "<unknown>".into()),
            config.sample_rate().0,
            config.channels(),
        );

        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    pub fn channels(&self) -> usize {
        self.config.channels() as usize
    }
}

/// A running output stream pulling blocks from a [`ToneSource`].
///
/// The stream calls the source sequentially, one buffer at a time, on a
/// realtime callback thread. The mono block is duplicated across every
/// channel the device reports. Dropping the sink tears the stream down; no
/// fill calls are issued after that.
pub struct OutputSink {
    stream: cpal::Stream,
}

impl OutputSink {
    /// Build the stream and start pulling from `source`.
    pub fn open<S>(context: &AudioContext, mut source: S) -> Result<Self, OutputError>
    where
        S: ToneSource + 'static,
    {
        let channels = context.channels();
        let config: cpal::StreamConfig = context.config.clone().into();

        // Scratch block, allocated here so the callback never does.
        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = context.device.build_output_stream(
            &config,
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut written = 0;

                while written < total_frames {
                    let frames = (total_frames - written).min(MAX_BLOCK_SIZE);
                    let chunk = &mut block[..frames];
                    source.render_block(chunk);

                    // Mono to every device channel.
                    let base = written * channels;
                    for (i, &sample) in chunk.iter().enumerate() {
                        for ch in 0..channels {
                            data[base + i * channels + ch] = sample;
                        }
                    }

                    written += frames;
                }
            },
            |err| log::warn!("output stream error: {err}"),
            None,
        )?;

        stream.play()?;

        Ok(Self { stream })
    }

    /// Stop requesting buffers. The source keeps its state.
    pub fn pause(&self) -> Result<(), OutputError> {
        self.stream.pause()?;
        Ok(())
    }

    /// Resume requesting buffers after [`pause`](OutputSink::pause).
    pub fn resume(&self) -> Result<(), OutputError> {
        self.stream.play()?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum OutputError {
    NoOutputDevice,
    DefaultConfig(DefaultStreamConfigError),
    BuildStream(BuildStreamError),
    PlayStream(PlayStreamError),
    PauseStream(PauseStreamError),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::NoOutputDevice => write!(f, "no default output device available"),
            OutputError::DefaultConfig(e) => write!(f, "failed to fetch output config: {e}"),
            OutputError::BuildStream(e) => write!(f, "failed to build output stream: {e}"),
            OutputError::PlayStream(e) => write!(f, "failed to start output stream: {e}"),
            OutputError::PauseStream(e) => write!(f, "failed to pause output stream: {e}"),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<DefaultStreamConfigError> for OutputError {
    fn from(e: DefaultStreamConfigError) -> Self {
        OutputError::DefaultConfig(e)
    }
}

impl From<BuildStreamError> for OutputError {
    fn from(e: BuildStreamError) -> Self {
        OutputError::BuildStream(e)
    }
}

impl From<PlayStreamError> for OutputError {
    fn from(e: PlayStreamError) -> Self {
        OutputError::PlayStream(e)
    }
}

impl From<PauseStreamError> for OutputError {
    fn from(e: PauseStreamError) -> Self {
        OutputError::PauseStream(e)
    }
}

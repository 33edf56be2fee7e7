//! keytone - terminal keyboard
//!
//! Run with: cargo run [-- sine|saw|square|triangle]

mod app;
mod ui;

use app::Keytone;
use color_eyre::eyre::eyre;
use keytone::dsp::Waveform;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let waveform = match std::env::args().nth(1).as_deref() {
        None | Some("sine") => Waveform::Sine,
        Some("saw") => Waveform::Saw,
        Some("square") => Waveform::Square,
        Some("triangle") => Waveform::Triangle,
        Some(other) => {
            return Err(eyre!(
                "unknown waveform '{other}' (expected sine, saw, square, or triangle)"
            ))
        }
    };

    Keytone::new(waveform).run()
}

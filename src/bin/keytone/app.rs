//! Keytone - application wiring: audio sink, key bindings, event loop.
//!
//! This is the UI collaborator the core stays agnostic of: it resolves keys
//! to pitches, binds press to start() and release to stop(), and leaves all
//! rendering of sound to the library.

use std::io::stdout;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::ui;

use keytone::dsp::{SignalProfile, ToneSource, Waveform};
use keytone::io::{AudioContext, OutputSink};
use keytone::keyboard::{Key, KeySpan};
use keytone::synth::{SharedTone, ToneHandle};
use keytone::{PitchName, MAX_BLOCK_SIZE};

/// Chromatic key bindings from C4 upward: white keys on the home row, black
/// keys on the row above, tracker style.
const KEY_CHARS: [char; 13] = [
    'a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k',
];

/// One bound key: the character that triggers it, the pitch it sounds, and
/// the control handle for its tone.
pub struct KeyBinding {
    pub ch: char,
    pub key: Key,
    pub held: bool,
    handle: ToneHandle,
}

/// Sums all per-key tones into one block. Lives on the audio thread; the
/// scratch buffer is preallocated so rendering never allocates.
struct KeyboardSource {
    tones: Vec<SharedTone>,
    scratch: Vec<f32>,
}

impl ToneSource for KeyboardSource {
    fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        let scratch = &mut self.scratch[..out.len()];
        for tone in &mut self.tones {
            tone.render_block(scratch);
            for (slot, &sample) in out.iter_mut().zip(scratch.iter()) {
                *slot += sample;
            }
        }
    }

    fn is_active(&self) -> bool {
        self.tones.iter().any(|tone| tone.is_active())
    }
}

/// Main application builder.
pub struct Keytone {
    waveform: Waveform,
}

impl Keytone {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform }
    }

    /// Run the application (takes over the terminal, plays audio).
    pub fn run(self) -> EyreResult<()> {
        let context = AudioContext::new()?;
        let sample_rate = context.sample_rate();

        let profile = SignalProfile::with_waveform(self.waveform);
        let span = KeySpan::new(PitchName::C, 4, KEY_CHARS.len());

        let mut tones = Vec::with_capacity(span.len());
        let mut bindings = Vec::with_capacity(span.len());
        for (&ch, key) in KEY_CHARS.iter().zip(span.keys()) {
            let (shared, handle) =
                SharedTone::new(profile.tone(key.pitch, key.octave, sample_rate));
            tones.push(shared);
            bindings.push(KeyBinding {
                ch,
                key,
                held: false,
                handle,
            });
        }

        let source = KeyboardSource {
            tones,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        };

        // The sink keeps pulling until dropped at the end of run().
        let _sink = OutputSink::open(&context, source)?;

        let mut terminal = ratatui::init();
        let result = event_loop(&mut terminal, &mut bindings, self.waveform, sample_rate);
        ratatui::restore();
        result
    }
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    bindings: &mut [KeyBinding],
    waveform: Waveform,
    sample_rate: f32,
) -> EyreResult<()> {
    // Key-release events need the kitty keyboard protocol. Where the
    // terminal lacks it, fall back to one held note at a time.
    let release_events = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let mut last_pressed: Option<usize> = None;

    loop {
        terminal
            .draw(|frame| ui::render(frame, &*bindings, waveform, sample_rate, release_events))?;

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('q') | KeyCode::Char('Q') if key.kind == KeyEventKind::Press => break,
            KeyCode::Char(' ') if key.kind == KeyEventKind::Press => {
                for binding in bindings.iter_mut() {
                    binding.handle.stop();
                    binding.held = false;
                }
                last_pressed = None;
            }
            KeyCode::Char(ch) => {
                let Some(index) = bindings.iter().position(|b| b.ch == ch) else {
                    continue;
                };
                match key.kind {
                    KeyEventKind::Press => {
                        if !release_events {
                            // No release events: the previous note ends when
                            // the next one begins.
                            if let Some(last) = last_pressed.filter(|&l| l != index) {
                                bindings[last].handle.stop();
                                bindings[last].held = false;
                            }
                            last_pressed = Some(index);
                        }
                        bindings[index].handle.start();
                        bindings[index].held = true;
                    }
                    KeyEventKind::Release => {
                        bindings[index].handle.stop();
                        bindings[index].held = false;
                    }
                    KeyEventKind::Repeat => {}
                }
            }
            _ => {}
        }
    }

    if release_events {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    Ok(())
}

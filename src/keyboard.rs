//! Key-span layout: a run of consecutive keys mapped to pitches.
//!
//! This is the data behind a keyboard widget, not the widget itself. A
//! [`KeySpan`] resolves key positions to `(pitch, octave)` pairs with
//! black/white classification and octave carry, so a UI layer only has to
//! draw keys and forward press/release to a tone handle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::pitch::PitchName;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColor {
    White,
    Black,
}

/// One key of a span: which pitch it sounds and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub pitch: PitchName,
    pub octave: i32,
    pub color: KeyColor,
}

/// A run of `count` consecutive chromatic keys starting at a pitch.
///
/// Spans may cross octave boundaries; the octave carries over as the run
/// walks past B.
#[derive(Debug, Clone, Copy)]
pub struct KeySpan {
    start: PitchName,
    octave: i32,
    count: usize,
}

impl KeySpan {
    pub fn new(start: PitchName, octave: i32, count: usize) -> Self {
        Self {
            start,
            octave,
            count,
        }
    }

    /// All twelve keys of one octave, C through B.
    pub fn full_octave(octave: i32) -> Self {
        Self::new(PitchName::C, octave, PitchName::ALL.len())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The keys of the span, left to right.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        let base = self.start.semitone();
        (0..self.count).map(move |i| {
            let position = base + i as i32;
            let pitch = PitchName::ALL[(position % 12) as usize];
            Key {
                pitch,
                octave: self.octave + position / 12,
                color: if pitch.is_sharp() {
                    KeyColor::Black
                } else {
                    KeyColor::White
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_octave_has_twelve_keys() {
        let span = KeySpan::full_octave(4);
        let keys: Vec<Key> = span.keys().collect();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0].pitch, PitchName::C);
        assert_eq!(keys[11].pitch, PitchName::B);
        assert!(keys.iter().all(|k| k.octave == 4));
    }

    #[test]
    fn octave_carries_past_b() {
        let span = KeySpan::new(PitchName::A, 4, 5);
        let keys: Vec<Key> = span.keys().collect();
        assert_eq!(keys[0].pitch, PitchName::A);
        assert_eq!(keys[0].octave, 4);
        assert_eq!(keys[2].pitch, PitchName::B);
        assert_eq!(keys[2].octave, 4);
        assert_eq!(keys[3].pitch, PitchName::C);
        assert_eq!(keys[3].octave, 5);
        assert_eq!(keys[4].pitch, PitchName::Cs);
        assert_eq!(keys[4].octave, 5);
    }

    #[test]
    fn sharps_are_black() {
        let span = KeySpan::full_octave(3);
        for key in span.keys() {
            let expected = if key.pitch.is_sharp() {
                KeyColor::Black
            } else {
                KeyColor::White
            };
            assert_eq!(key.color, expected, "{}", key.pitch);
        }
        let black = span.keys().filter(|k| k.color == KeyColor::Black).count();
        assert_eq!(black, 5);
    }
}

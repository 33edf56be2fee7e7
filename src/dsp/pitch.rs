use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Concert pitch: the frequency of A4 when no other reference is given.
pub const CONCERT_A4: f32 = 440.0;

/// Semitone position of A within the octave (C = 0 .. B = 11).
const A_SEMITONE: i32 = 9;

/// Octave that carries the tuning reference (A4).
const REFERENCE_OCTAVE: i32 = 4;

/// The twelve pitch names of the chromatic scale, in semitone order.
///
/// `Cs` is C sharp, `Ds` is D sharp, and so on. Flat spellings (Db, Eb, ...)
/// parse as aliases for the same pitch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchName {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchName {
    /// All twelve names in semitone order, one octave.
    pub const ALL: [PitchName; 12] = [
        PitchName::C,
        PitchName::Cs,
        PitchName::D,
        PitchName::Ds,
        PitchName::E,
        PitchName::F,
        PitchName::Fs,
        PitchName::G,
        PitchName::Gs,
        PitchName::A,
        PitchName::As,
        PitchName::B,
    ];

    /// Position within the octave: C = 0, C# = 1, ... B = 11.
    pub fn semitone(self) -> i32 {
        self as i32
    }

    /// True for the five sharp names (the black keys).
    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchName::Cs | PitchName::Ds | PitchName::Fs | PitchName::Gs | PitchName::As
        )
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PitchName::C => "C",
            PitchName::Cs => "C#",
            PitchName::D => "D",
            PitchName::Ds => "D#",
            PitchName::E => "E",
            PitchName::F => "F",
            PitchName::Fs => "F#",
            PitchName::G => "G",
            PitchName::Gs => "G#",
            PitchName::A => "A",
            PitchName::As => "A#",
            PitchName::B => "B",
        };
        f.write_str(name)
    }
}

/// Error returned when a string is not one of the twelve pitch spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePitchError {
    text: String,
}

impl fmt::Display for ParsePitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown pitch name '{}' (expected C, C#, D, ... B, or a flat alias like Eb)",
            self.text
        )
    }
}

impl std::error::Error for ParsePitchError {}

impl FromStr for PitchName {
    type Err = ParsePitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pitch = match s {
            "C" => PitchName::C,
            "C#" | "Cs" | "Db" => PitchName::Cs,
            "D" => PitchName::D,
            "D#" | "Ds" | "Eb" => PitchName::Ds,
            "E" => PitchName::E,
            "F" => PitchName::F,
            "F#" | "Fs" | "Gb" => PitchName::Fs,
            "G" => PitchName::G,
            "G#" | "Gs" | "Ab" => PitchName::Gs,
            "A" => PitchName::A,
            "A#" | "As" | "Bb" => PitchName::As,
            "B" => PitchName::B,
            _ => {
                return Err(ParsePitchError {
                    text: s.to_string(),
                })
            }
        };
        Ok(pitch)
    }
}

/// Equal-tempered frequency of a pitch, relative to a tuning reference for A4.
///
/// Each semitone step multiplies the frequency by the twelfth root of two, so
/// A in octave 4 yields exactly `reference` and every octave doubles. Any
/// integer octave is valid; extreme octaves simply produce very low or very
/// high frequencies.
pub fn frequency(pitch: PitchName, octave: i32, reference: f32) -> f32 {
    let semitones = (octave - REFERENCE_OCTAVE) * 12 + pitch.semitone() - A_SEMITONE;
    reference * 2.0_f32.powf(semitones as f32 / 12.0)
}

//! # Scales and Tonality
//!
//! Maps a tonic and mode to the seven diatonic pitch classes, and spells pitches
//! against letter names.
//!
//! Pitch classes are `0..12` with C = 0. Lookups are total: an unrecognized tonic
//! is read as C and an unrecognized mode as major, so playback always has
//! something to render.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interval pattern of the major scale, in semitones above the tonic
const MAJOR_STEPS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Interval pattern of the natural minor scale
const NATURAL_MINOR_STEPS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Scale mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Mode {
    #[default]
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "minor-natural")]
    NaturalMinor,
}

impl Mode {
    /// Parse a mode name. Anything that is not a minor spelling is major.
    pub fn from_symbol(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "minor" | "minor-natural" | "natural-minor" | "aeolian" | "m" => Mode::NaturalMinor,
            "major" | "ionian" | "" => Mode::Major,
            other => {
                tracing::debug!("unrecognized mode '{}', using major", other);
                Mode::Major
            }
        }
    }

    pub fn steps(self) -> [u8; 7] {
        match self {
            Mode::Major => MAJOR_STEPS,
            Mode::NaturalMinor => NATURAL_MINOR_STEPS,
        }
    }
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        Mode::from_symbol(&s)
    }
}

/// Note letter (A-G)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        let letter = match c.to_ascii_uppercase() {
            'C' => Letter::C,
            'D' => Letter::D,
            'E' => Letter::E,
            'F' => Letter::F,
            'G' => Letter::G,
            'A' => Letter::A,
            'B' => Letter::B,
            _ => return None,
        };
        Some(letter)
    }

    /// Pitch class of the unaltered letter
    pub fn natural_pitch_class(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// The letter `steps` places above this one (E + 2 = G, B + 1 = C)
    pub fn step(self, steps: usize) -> Letter {
        Self::ALL[(self as usize + steps) % 7]
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// A letter plus chromatic alteration in semitones (-2 = double flat, +1 = sharp)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpelledPitch {
    pub letter: Letter,
    pub alter: i8,
}

impl SpelledPitch {
    pub const C: SpelledPitch = SpelledPitch {
        letter: Letter::C,
        alter: 0,
    };

    /// Spell `pitch_class` on `letter`, choosing the smallest alteration.
    pub fn on_letter(letter: Letter, pitch_class: u8) -> Self {
        let diff = (i16::from(pitch_class) - i16::from(letter.natural_pitch_class())).rem_euclid(12);
        let alter = if diff > 6 { diff - 12 } else { diff };
        Self {
            letter,
            alter: alter as i8,
        }
    }

    /// Parse a note name like "Bb", "f#" or "C♯". Double alterations are accepted.
    /// Only `#`/`♯` and `b`/`♭` alter the letter; German names ("Es", "Fis") are not read.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.trim().chars();
        let letter = Letter::from_char(chars.next()?)?;
        let mut alter = 0i8;
        for c in chars {
            match c {
                '#' | '♯' => alter += 1,
                'b' | '♭' => alter -= 1,
                _ => return None,
            }
        }
        if alter.abs() > 2 {
            return None;
        }
        Some(Self { letter, alter })
    }

    pub fn pitch_class(self) -> u8 {
        (self.letter.natural_pitch_class() as i8 + self.alter).rem_euclid(12) as u8
    }

    /// Same letter, moved by `semitones`
    pub fn altered(self, semitones: i8) -> Self {
        Self {
            letter: self.letter,
            alter: self.alter + semitones,
        }
    }

    /// Semitones above C of the octave the letter belongs to (B#4 is 12, Cb4 is -1)
    pub fn offset_in_octave(self) -> i16 {
        i16::from(self.letter.natural_pitch_class()) + i16::from(self.alter)
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let symbol = if self.alter < 0 { "b" } else { "#" };
        for _ in 0..self.alter.unsigned_abs() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// The tonic spelled as a pitch. Unrecognized names resolve to C.
fn parse_tonic(tonic: &str) -> SpelledPitch {
    SpelledPitch::from_name(tonic).unwrap_or_else(|| {
        tracing::debug!("unrecognized tonic '{}', using C", tonic);
        SpelledPitch::C
    })
}

/// Pitch class of a tonic name. Unrecognized names resolve to C (0).
pub fn tonic_pitch_class(tonic: &str) -> u8 {
    parse_tonic(tonic).pitch_class()
}

/// The seven diatonic pitch classes of a key, ordered by scale degree.
///
/// # Examples
/// ```
/// use numerals::scale::{scale_pitch_classes, Mode};
///
/// assert_eq!(scale_pitch_classes("C", Mode::Major), [0, 2, 4, 5, 7, 9, 11]);
/// assert_eq!(scale_pitch_classes("A", Mode::NaturalMinor), [9, 11, 0, 2, 4, 5, 7]);
/// ```
pub fn scale_pitch_classes(tonic: &str, mode: Mode) -> [u8; 7] {
    let root = tonic_pitch_class(tonic);
    mode.steps().map(|step| (root + step) % 12)
}

/// Key context for an exercise: a tonic name plus a mode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tonality {
    pub tonic: String,
    #[serde(default)]
    pub mode: Mode,
}

impl Default for Tonality {
    fn default() -> Self {
        Self::new("C", Mode::Major)
    }
}

impl Tonality {
    pub fn new(tonic: impl Into<String>, mode: Mode) -> Self {
        Self {
            tonic: tonic.into(),
            mode,
        }
    }

    pub fn pitch_classes(&self) -> [u8; 7] {
        scale_pitch_classes(&self.tonic, self.mode)
    }

    /// Diatonic pitch of a scale degree (0 = tonic), spelled on the degree's letter
    pub fn degree_pitch(&self, index: usize) -> SpelledPitch {
        let index = index % 7;
        let letter = parse_tonic(&self.tonic).letter.step(index);
        SpelledPitch::on_letter(letter, self.pitch_classes()[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tonic_lookup() {
        assert_eq!(tonic_pitch_class("C"), 0);
        assert_eq!(tonic_pitch_class("Bb"), 10);
        assert_eq!(tonic_pitch_class("f#"), 6);
        assert_eq!(tonic_pitch_class("Eb"), 3);
        assert_eq!(tonic_pitch_class("Cb"), 11);
        assert_eq!(tonic_pitch_class("B#"), 0);
    }

    #[test]
    fn test_unknown_tonic_defaults_to_c() {
        assert_eq!(tonic_pitch_class(""), 0);
        assert_eq!(tonic_pitch_class("H"), 0);
        assert_eq!(tonic_pitch_class("Cx"), 0);
        // "Es" is not E sharp
        assert_eq!(tonic_pitch_class("Es"), 0);
        assert_eq!(tonic_pitch_class("Ff"), 0);
        assert_eq!(scale_pitch_classes("???", Mode::Major), MAJOR_STEPS);
    }

    #[test]
    fn test_scales() {
        assert_eq!(scale_pitch_classes("G", Mode::Major), [7, 9, 11, 0, 2, 4, 6]);
        assert_eq!(scale_pitch_classes("C", Mode::NaturalMinor), [0, 2, 3, 5, 7, 8, 10]);
        assert_eq!(scale_pitch_classes("Eb", Mode::Major), [3, 5, 7, 8, 10, 0, 2]);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(Mode::from_symbol("minor-natural"), Mode::NaturalMinor);
        assert_eq!(Mode::from_symbol("Natural Minor"), Mode::NaturalMinor);
        assert_eq!(Mode::from_symbol("major"), Mode::Major);
        assert_eq!(Mode::from_symbol("lydian"), Mode::Major);
        let mode: Mode = serde_yaml::from_str("minor").unwrap();
        assert_eq!(mode, Mode::NaturalMinor);
        assert_eq!(serde_json::to_string(&Mode::NaturalMinor).unwrap(), r#""minor-natural""#);
    }

    #[test]
    fn test_degree_spelling_follows_letters() {
        let f_major = Tonality::new("F", Mode::Major);
        let names: Vec<String> = (0..7).map(|i| f_major.degree_pitch(i).to_string()).collect();
        assert_eq!(names, vec!["F", "G", "A", "Bb", "C", "D", "E"]);

        let c_sharp_minor = Tonality::new("C#", Mode::NaturalMinor);
        assert_eq!(c_sharp_minor.degree_pitch(2).to_string(), "E");
        assert_eq!(c_sharp_minor.degree_pitch(4).to_string(), "G#");
    }

    #[test]
    fn test_spelled_pitch() {
        assert_eq!(SpelledPitch::on_letter(Letter::E, 3).to_string(), "Eb");
        assert_eq!(SpelledPitch::on_letter(Letter::D, 3).to_string(), "D#");
        assert_eq!(SpelledPitch::on_letter(Letter::B, 0).to_string(), "B#");
        assert_eq!(SpelledPitch::on_letter(Letter::B, 9).to_string(), "Bbb");
        assert_eq!(SpelledPitch::on_letter(Letter::B, 0).offset_in_octave(), 12);
        assert_eq!(Letter::B.step(1), Letter::C);
        assert_eq!(SpelledPitch::from_name("Ebb").map(|p| p.pitch_class()), Some(2));
        assert_eq!(SpelledPitch::from_name("C###"), None);
    }
}

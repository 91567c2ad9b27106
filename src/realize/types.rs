//! Realized chord type definitions
//!
//! This module defines the pitch data handed to audio playback and keyboard highlighting.

use serde::Serialize;
use std::fmt;

/// One concrete, octave-resolved chord tone
///
/// # Fields
/// - `name`: Spelled pitch class without octave ("C", "F#", "Bb")
/// - `octave`: Scientific-pitch octave (C4 = middle C)
/// - `midi_note`: MIDI note number (C4 = 60), used to order and compare tones
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedNote {
    pub name: String,
    pub octave: i8,
    pub midi_note: u8,
}

impl RealizedNote {
    /// Note name with octave, e.g. "Eb4"
    pub fn label(&self) -> String {
        format!("{}{}", self.name, self.octave)
    }

    pub fn pitch_class(&self) -> u8 {
        self.midi_note % 12
    }
}

impl fmt::Display for RealizedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// A realized chord: tones ordered from bass to top, strictly ascending
///
/// Playback and the highlighted-key overlay both read from the same voicing, so
/// what is shown always matches what is heard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Voicing {
    pub notes: Vec<RealizedNote>,
}

impl Voicing {
    /// Note names with octave, bass first: `["C4", "E4", "G4"]`
    pub fn names(&self) -> Vec<String> {
        self.notes.iter().map(RealizedNote::label).collect()
    }

    pub fn midi_notes(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.midi_note).collect()
    }

    pub fn bass(&self) -> Option<&RealizedNote> {
        self.notes.first()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl fmt::Display for Voicing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(" "))
    }
}

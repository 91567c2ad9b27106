//! Chord realization engine
//!
//! Converts a symbolic chord descriptor into an ordered, octave-resolved voicing.

use super::types::{RealizedNote, Voicing};
use crate::descriptor::{ChordDescriptor, Degree, Figure, Quality};
use crate::scale::{SpelledPitch, Tonality};

/// Lowest octave a chord tone may be placed in
pub const MIN_OCTAVE: i8 = 2;

/// Highest octave a chord tone may be placed in
pub const MAX_OCTAVE: i8 = 6;

const MINOR_THIRD: u8 = 3;
const MAJOR_THIRD: u8 = 4;
const DIMINISHED_FIFTH: u8 = 6;
const PERFECT_FIFTH: u8 = 7;
const MINOR_SEVENTH: u8 = 10;

/// Chord tones spelled above the root: root, third, fifth, seventh
struct ChordStack {
    tones: [SpelledPitch; 4],
}

impl ChordStack {
    fn build(root: SpelledPitch, quality: Quality) -> Self {
        let third = match quality {
            Quality::Diminished | Quality::Minor => MINOR_THIRD,
            Quality::Augmented | Quality::Major => MAJOR_THIRD,
        };
        // Only the diminished triad alters the fifth; augmented keeps it perfect
        let fifth = match quality {
            Quality::Diminished => DIMINISHED_FIFTH,
            Quality::Augmented | Quality::Minor | Quality::Major => PERFECT_FIFTH,
        };
        let above = |letter_steps: usize, semitones: u8| {
            SpelledPitch::on_letter(
                root.letter.step(letter_steps),
                (root.pitch_class() + semitones) % 12,
            )
        };
        Self {
            tones: [root, above(2, third), above(4, fifth), above(6, MINOR_SEVENTH)],
        }
    }

    /// Chord tones from the bass up for a figured-bass code.
    ///
    /// Seventh figures always include the seventh, whatever the quality.
    fn voices(&self, figure: Figure) -> Vec<SpelledPitch> {
        let order: &[usize] = match figure {
            Figure::Five => &[0, 1, 2],
            Figure::Six => &[1, 2, 0],
            Figure::SixFour => &[2, 0, 1],
            Figure::Seven => &[0, 1, 2, 3],
            Figure::SixFive => &[1, 2, 3, 0],
            Figure::FourThree => &[2, 3, 0, 1],
            Figure::Two => &[3, 0, 1, 2],
        };
        order.iter().map(|&i| self.tones[i]).collect()
    }
}

/// Chord root after applying the accidental and the lowered-root marker.
/// Alterations keep the diatonic letter (bVI in C is Ab, the Neapolitan is Db).
fn chord_root(descriptor: &ChordDescriptor, tonality: &Tonality) -> SpelledPitch {
    let degree = descriptor.degree.unwrap_or(Degree::I);
    let root = tonality.degree_pitch(degree.index());
    // Accidental first, then the lowered-root marker on top of it
    root.altered(descriptor.root_offset())
}

fn midi(pitch: SpelledPitch, octave: i8) -> i16 {
    (i16::from(octave) + 1) * 12 + pitch.offset_in_octave()
}

/// Realize a chord descriptor as concrete pitches.
///
/// The bass tone is placed in `base_octave`; each following voice takes the lowest
/// octave that keeps it strictly above the previous one. Octaves are clamped to
/// [`MIN_OCTAVE`]..=[`MAX_OCTAVE`], and the result is de-duplicated and sorted by
/// pitch, so it is always strictly ascending.
///
/// Never fails: an absent degree is read as I, absent quality as major and absent
/// figure as root position.
///
/// # Examples
/// ```
/// use numerals::realize::realize;
/// use numerals::scale::{Mode, Tonality};
/// use numerals::{ChordDescriptor, Degree, Figure};
///
/// let c_major = Tonality::new("C", Mode::Major);
///
/// let tonic = ChordDescriptor::new(Degree::I).with_figure(Figure::Five);
/// assert_eq!(realize(&tonic, &c_major, 4).names(), vec!["C4", "E4", "G4"]);
///
/// let dominant = ChordDescriptor::new(Degree::V).with_figure(Figure::Seven);
/// assert_eq!(realize(&dominant, &c_major, 4).names(), vec!["G4", "B4", "D5", "F5"]);
/// ```
pub fn realize(descriptor: &ChordDescriptor, tonality: &Tonality, base_octave: i8) -> Voicing {
    let root = chord_root(descriptor, tonality);
    let stack = ChordStack::build(root, descriptor.effective_quality());

    // Bass starts in the clamped base octave
    let mut octave = base_octave.clamp(MIN_OCTAVE, MAX_OCTAVE);
    let mut previous: Option<i16> = None;
    let mut notes = Vec::with_capacity(4);

    for pitch in stack.voices(descriptor.effective_figure()) {
        // Climb until this voice sits above the one below it
        if let Some(prev) = previous {
            while midi(pitch, octave) <= prev && octave < MAX_OCTAVE {
                octave += 1;
            }
        }
        let midi_note = midi(pitch, octave);
        previous = Some(midi_note);
        notes.push(RealizedNote {
            name: pitch.to_string(),
            octave,
            midi_note: midi_note as u8,
        });
    }

    // Clamping can fold voices onto or below each other at the top of the range
    notes.sort_by_key(|n| n.midi_note);
    notes.dedup_by_key(|n| n.midi_note);

    Voicing { notes }
}

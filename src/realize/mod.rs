//! # Realize Module
//!
//! Turn symbolic chord descriptors into concrete pitches for audio playback and
//! keyboard highlighting.
//!
//! ## Sub-modules
//! - `types` - RealizedNote and Voicing type definitions
//! - `engine` - Root resolution, chord stacking, inversion and octave assignment
//!
//! ## Pipeline
//! 1. Resolve the degree to a diatonic pitch class in the tonality
//! 2. Apply the accidental (±1) and the lowered-root marker (−1)
//! 3. Stack third, fifth and seventh according to the quality
//! 4. Order the tones from the bass up according to the figure
//! 5. Place each tone in the lowest octave above the previous one
//!
//! ## Example
//! ```rust
//! use numerals::realize::realize;
//! use numerals::scale::{Mode, Tonality};
//! use numerals::{ChordDescriptor, Degree, Figure};
//!
//! let chord = ChordDescriptor::new(Degree::I).with_figure(Figure::Six);
//! let voicing = realize(&chord, &Tonality::new("C", Mode::Major), 4);
//!
//! assert_eq!(voicing.names(), vec!["E4", "G4", "C5"]);
//! assert_eq!(voicing.midi_notes(), vec![64, 67, 72]);
//! ```
//!
//! ## Determinism
//! Realization is a pure function of (descriptor, tonality, base octave). The same
//! input always produces the same voicing, which keeps what is heard and what is
//! highlighted in agreement.

mod engine;
mod types;


pub use engine::{realize, MAX_OCTAVE, MIN_OCTAVE};
pub use types::{RealizedNote, Voicing};

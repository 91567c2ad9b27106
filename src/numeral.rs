//! Compact Roman-numeral parsing
//!
//! Parses numeral strings (V7, ii6, viio7, bVI, N6, I64 cadential) into chord descriptors.

use crate::descriptor::{Accidental, Cadence, ChordDescriptor, Degree, Figure, Quality};

/// Parse a compact Roman-numeral string into a [`ChordDescriptor`].
///
/// Never fails: input that does not start with a recognizable numeral yields the
/// empty descriptor, which realizes as a root-position tonic triad.
///
/// # Syntax
/// - **Accidental**: optional leading `b`/`♭` or `#`/`♯` on the root; `bb` marks a
///   flat on top of a lowered root
/// - **Neapolitan**: `N` stands for the lowered second degree as a major triad, `n`
///   for the same root as a minor triad
/// - **Numeral**: `I` to `VII`; an all-lowercase numeral means a minor triad
/// - **Quality mark**: `o`, `°` or `ø` (diminished), `+` (augmented)
/// - **Figure**: `5`, `6`, `64`, `7`, `65`, `43`, `2` (also `53`, `63`, `42`)
/// - **Cadence**: optional words after whitespace, e.g. `V7 perfect`, `I64 cad`
///
/// # Examples
/// ```
/// use numerals::numeral::parse_numeral;
/// use numerals::{Degree, Figure, Quality};
///
/// let d = parse_numeral("ii65");
/// assert_eq!(d.degree, Some(Degree::II));
/// assert_eq!(d.quality, Some(Quality::Minor));
/// assert_eq!(d.figure, Some(Figure::SixFive));
///
/// assert!(parse_numeral("N6").special_root);
/// ```
pub fn parse_numeral(numeral: &str) -> ChordDescriptor {
    let mut words = numeral.split_whitespace();
    let Some(chord) = words.next() else {
        return ChordDescriptor::default();
    };

    let chars: Vec<char> = chord.chars().collect();
    let mut idx = 0;

    // Leading accidentals; a doubled flat is a flat on top of the lowered root
    let mut offset = 0i8;
    while let Some(c) = chars.get(idx) {
        match c {
            'b' | '♭' => offset -= 1,
            '#' | '♯' => offset += 1,
            _ => break,
        }
        idx += 1;
    }
    let (accidental, lowered) = match offset {
        -2 => (Some(Accidental::Flat), true),
        -1 => (Some(Accidental::Flat), false),
        0 => (None, false),
        1 => (Some(Accidental::Sharp), false),
        _ => return ChordDescriptor::default(),
    };

    let mut descriptor = match chars.get(idx) {
        // Neapolitan, lowercase for a minor triad
        Some(&n) if n == 'N' || n == 'n' => {
            idx += 1;
            let mut neapolitan = ChordDescriptor::neapolitan();
            neapolitan.accidental = accidental;
            if n == 'n' {
                neapolitan.quality = Some(Quality::Minor);
            }
            neapolitan
        }
        _ => {
            // Roman numeral letters
            let start = idx;
            while idx < chars.len() && matches!(chars[idx], 'I' | 'V' | 'i' | 'v') {
                idx += 1;
            }
            let letters: String = chars[start..idx].iter().collect();
            let Some(degree) = Degree::from_symbol(&letters) else {
                return ChordDescriptor::default();
            };
            let mut d = ChordDescriptor::new(degree);
            d.accidental = accidental;
            d.special_root = lowered;
            if letters.chars().all(|c| c.is_ascii_lowercase()) {
                d.quality = Some(Quality::Minor);
            }
            d
        }
    };

    // Quality mark overrides the case of the numeral
    match chars.get(idx) {
        Some('o') | Some('°') | Some('ø') => {
            idx += 1;
            descriptor.quality = Some(Quality::Diminished);
        }
        Some('+') => {
            idx += 1;
            descriptor.quality = Some(Quality::Augmented);
        }
        _ => {}
    }

    // Whatever remains is the figured-bass code
    let figure: String = chars[idx..].iter().collect();
    descriptor.figure = Figure::from_symbol(&figure);

    // Cadence words, e.g. "cadential six four" -> "cadential-six-four"
    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        descriptor.cadence = Cadence::from_symbol(&rest.join("-"));
    }

    descriptor
}

//! # Chord Descriptor Types
//!
//! The symbolic chord model shared by exercise definitions (correct answers) and
//! learner submissions.
//!
//! ## Type Hierarchy
//! ```text
//! ChordDescriptor
//!   ├── degree: Option<Degree> (I-VII)
//!   ├── accidental: Option<Accidental> (flat, sharp; None = diatonic root)
//!   ├── special_root: bool (root lowered a half-step, Neapolitan)
//!   ├── quality: Option<Quality> (diminished, augmented, minor, major)
//!   ├── figure: Option<Figure> (5, 6, 64, 7, 65, 43, 2)
//!   ├── cadence: Option<Cadence>
//!   └── selected_function: Option<HarmonicFunction> (Tonic, Subdominant, Dominant)
//! ```
//!
//! ## Lenient Input
//! Every field is optional and unknown values are dropped rather than rejected, so a
//! garbled record still realizes and grades. Input field names follow the camelCase
//! records used by the surrounding application (`specialRoot`, `selectedFunction`,
//! with `function` accepted as an alias). A descriptor may also be written as a
//! compact numeral string such as `"V65"` or `"bVI"`; see [`crate::numeral`].
//!
//! ## Related Modules
//! - `numeral` - Parses compact numeral strings into descriptors
//! - `realize` - Turns descriptors into pitches
//! - `grading` - Compares two descriptors

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Roman-numeral scale degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Degree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl Degree {
    pub const ALL: [Degree; 7] = [
        Degree::I,
        Degree::II,
        Degree::III,
        Degree::IV,
        Degree::V,
        Degree::VI,
        Degree::VII,
    ];

    /// Scale-degree index, 0 for I through 6 for VII
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a numeral like "V", "vii" or "Iv" (case-insensitive).
    pub fn from_symbol(s: &str) -> Option<Self> {
        let degree = match s.trim().to_ascii_uppercase().as_str() {
            "I" => Degree::I,
            "II" => Degree::II,
            "III" => Degree::III,
            "IV" => Degree::IV,
            "V" => Degree::V,
            "VI" => Degree::VI,
            "VII" => Degree::VII,
            _ => return None,
        };
        Some(degree)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Degree::I => "I",
            Degree::II => "II",
            Degree::III => "III",
            Degree::IV => "IV",
            Degree::V => "V",
            Degree::VI => "VI",
            Degree::VII => "VII",
        }
    }
}

/// Chromatic alteration of the chord root relative to the diatonic degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Flat,
    Sharp,
}

impl Accidental {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "flat" | "♭" | "-" | "-1" => Some(Accidental::Flat),
            "#" | "sharp" | "♯" | "s" | "+" | "1" => Some(Accidental::Sharp),
            _ => None,
        }
    }

    pub fn semitones(self) -> i8 {
        match self {
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Accidental::Flat => "b",
            Accidental::Sharp => "#",
        }
    }
}

/// Triad color. An absent quality is treated as [`Quality::Major`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Diminished,
    Augmented,
    Minor,
    #[default]
    Major,
}

impl Quality {
    /// Parse a quality symbol. "m" is minor and "M" is major; everything else is case-insensitive.
    pub fn from_symbol(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        match trimmed {
            "m" => return Some(Quality::Minor),
            "M" => return Some(Quality::Major),
            _ => {}
        }
        match trimmed.to_lowercase().as_str() {
            "dim" | "diminished" | "o" | "°" | "ø" | "half-diminished" => Some(Quality::Diminished),
            "aug" | "augmented" | "+" => Some(Quality::Augmented),
            "min" | "minor" | "-" => Some(Quality::Minor),
            "maj" | "major" | "default" => Some(Quality::Major),
            _ => None,
        }
    }
}

/// Figured-bass inversion code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Figure {
    /// Root-position triad
    #[default]
    #[serde(rename = "5")]
    Five,
    /// First-inversion triad
    #[serde(rename = "6")]
    Six,
    /// Second-inversion triad
    #[serde(rename = "64")]
    SixFour,
    /// Root-position seventh chord
    #[serde(rename = "7")]
    Seven,
    /// First-inversion seventh chord
    #[serde(rename = "65")]
    SixFive,
    /// Second-inversion seventh chord
    #[serde(rename = "43")]
    FourThree,
    /// Third-inversion seventh chord
    #[serde(rename = "2")]
    Two,
}

impl Figure {
    /// Parse a figure code. "53", "63" and "42" are accepted as long forms.
    pub fn from_symbol(s: &str) -> Option<Self> {
        let figure = match s.trim() {
            "5" | "53" => Figure::Five,
            "6" | "63" => Figure::Six,
            "64" => Figure::SixFour,
            "7" => Figure::Seven,
            "65" => Figure::SixFive,
            "43" => Figure::FourThree,
            "2" | "42" => Figure::Two,
            _ => return None,
        };
        Some(figure)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Figure::Five => "5",
            Figure::Six => "6",
            Figure::SixFour => "64",
            Figure::Seven => "7",
            Figure::SixFive => "65",
            Figure::FourThree => "43",
            Figure::Two => "2",
        }
    }

    pub fn has_seventh(self) -> bool {
        matches!(
            self,
            Figure::Seven | Figure::SixFive | Figure::FourThree | Figure::Two
        )
    }
}

/// Cadence classification, carried by correct answers (and by learner answers
/// when cadence identification is part of the exercise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    Perfect,
    Imperfect,
    Plagal,
    Deceptive,
    Half,
    CadentialSixFour,
}

impl Cadence {
    pub fn from_symbol(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        let cadence = match normalized.as_str() {
            "perfect" | "authentic" | "pac" => Cadence::Perfect,
            "imperfect" | "iac" => Cadence::Imperfect,
            "plagal" => Cadence::Plagal,
            "deceptive" | "interrupted" => Cadence::Deceptive,
            "half" => Cadence::Half,
            "cadential-six-four" | "cadential" | "cadential64" | "cadential-64" | "cad64" | "cad"
            | "64" => {
                Cadence::CadentialSixFour
            }
            _ => return None,
        };
        Some(cadence)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cadence::Perfect => "perfect",
            Cadence::Imperfect => "imperfect",
            Cadence::Plagal => "plagal",
            Cadence::Deceptive => "deceptive",
            Cadence::Half => "half",
            Cadence::CadentialSixFour => "cadential-six-four",
        }
    }
}

/// Tonal function label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "t" | "tonic" => Some(HarmonicFunction::Tonic),
            "s" | "sd" | "pd" | "subdominant" | "predominant" => {
                Some(HarmonicFunction::Subdominant)
            }
            "d" | "dominant" => Some(HarmonicFunction::Dominant),
            _ => None,
        }
    }
}

/// A symbolic chord. Used both as the correct answer of a marker and as a learner's answer.
///
/// All fields are optional; see the accessor methods for how absent fields are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DescriptorInput")]
pub struct ChordDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub special_root: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_function: Option<HarmonicFunction>,
}

impl ChordDescriptor {
    pub fn new(degree: Degree) -> Self {
        Self {
            degree: Some(degree),
            ..Self::default()
        }
    }

    /// Neapolitan chord: a major triad on the lowered second degree
    pub fn neapolitan() -> Self {
        Self {
            degree: Some(Degree::II),
            special_root: true,
            quality: Some(Quality::Major),
            ..Self::default()
        }
    }

    /// Answer that only names a tonal function
    pub fn function_only(function: HarmonicFunction) -> Self {
        Self {
            selected_function: Some(function),
            ..Self::default()
        }
    }

    pub fn with_accidental(mut self, accidental: Accidental) -> Self {
        self.accidental = Some(accidental);
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_figure(mut self, figure: Figure) -> Self {
        self.figure = Some(figure);
        self
    }

    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn with_function(mut self, function: HarmonicFunction) -> Self {
        self.selected_function = Some(function);
        self
    }

    pub fn effective_figure(&self) -> Figure {
        self.figure.unwrap_or_default()
    }

    pub fn effective_quality(&self) -> Quality {
        self.quality.unwrap_or_default()
    }

    /// Semitones the root sits away from its diatonic position. The lowered-root
    /// marker counts as one flat on top of any accidental.
    pub fn root_offset(&self) -> i8 {
        let accidental = self.accidental.map_or(0, Accidental::semitones);
        if self.special_root {
            accidental - 1
        } else {
            accidental
        }
    }

    /// Two descriptors name the same root when they share a degree and sound the
    /// same alteration, so `bII` and the Neapolitan are one root.
    pub fn same_root(&self, other: &ChordDescriptor) -> bool {
        self.degree == other.degree && self.root_offset() == other.root_offset()
    }

    /// Tonal function implied by the chord itself (not the learner's label).
    ///
    /// I, III and VI are tonic; II and IV subdominant; V and VII dominant, whatever
    /// the alteration (the Neapolitan stays subdominant). A tonic six-four marked as
    /// the cadential six-four belongs to the dominant.
    pub fn harmonic_function(&self) -> Option<HarmonicFunction> {
        let degree = self.degree?;
        if degree == Degree::I
            && self.effective_figure() == Figure::SixFour
            && self.cadence == Some(Cadence::CadentialSixFour)
        {
            return Some(HarmonicFunction::Dominant);
        }
        let function = match degree {
            Degree::I | Degree::III | Degree::VI => HarmonicFunction::Tonic,
            Degree::II | Degree::IV => HarmonicFunction::Subdominant,
            Degree::V | Degree::VII => HarmonicFunction::Dominant,
        };
        Some(function)
    }

    /// Label of the root alone ("V", "bVI", "N"), used as a statistics key.
    pub fn root_label(&self) -> String {
        let Some(degree) = self.degree else {
            return "?".to_string();
        };
        let offset = self.root_offset();
        if self.special_root && degree == Degree::II && offset == -1 {
            return "N".to_string();
        }
        let prefix = match offset {
            o if o < -1 => "bb",
            -1 => "b",
            0 => "",
            _ => "#",
        };
        format!("{}{}", prefix, degree.as_str())
    }
}

/// Formats as a compact numeral that [`crate::numeral::parse_numeral`] reads back,
/// e.g. `viio7`, `bVI`, `N6`, `V65`. Minor and diminished chords use lowercase numerals,
/// including the Neapolitan (`n6`). A lowered root on top of a flat prints as `bb`.
impl fmt::Display for ChordDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root_label();
        let quality = self.effective_quality();
        match quality {
            Quality::Minor | Quality::Diminished => write!(f, "{}", root.to_lowercase())?,
            _ => write!(f, "{}", root)?,
        }
        match quality {
            Quality::Diminished => write!(f, "o")?,
            Quality::Augmented => write!(f, "+")?,
            _ => {}
        }
        let figure = self.effective_figure();
        if figure != Figure::Five {
            write!(f, "{}", figure.as_str())?;
        }
        if let Some(cadence) = self.cadence {
            write!(f, " {}", cadence.as_str())?;
        }
        Ok(())
    }
}

/// Any scalar a record field might hold. Maps and sequences land in `Other`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Scalar {
    fn text(&self) -> Option<String> {
        match self {
            Scalar::Bool(_) | Scalar::Other(_) => None,
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(x) if x.fract() == 0.0 => Some(format!("{}", *x as i64)),
            Scalar::Float(x) => Some(x.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Int(n) => *n != 0,
            Scalar::Float(x) => *x != 0.0,
            Scalar::Text(s) => !matches!(
                s.trim().to_lowercase().as_str(),
                "" | "false" | "no" | "0" | "none" | "null"
            ),
            Scalar::Other(_) => false,
        }
    }
}

trait FromSymbol: Sized {
    fn parse_symbol(s: &str) -> Option<Self>;
}

macro_rules! from_symbol_impls {
    ($($ty:ty),*) => {
        $(impl FromSymbol for $ty {
            fn parse_symbol(s: &str) -> Option<Self> {
                <$ty>::from_symbol(s)
            }
        })*
    };
}

from_symbol_impls!(Degree, Accidental, Quality, Figure, Cadence, HarmonicFunction);

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromSymbol,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.text()).and_then(|s| T::parse_symbol(&s)))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.truthy()).unwrap_or(false))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorInput {
    Numeral(String),
    Fields(DescriptorFields),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorFields {
    #[serde(default, deserialize_with = "lenient")]
    degree: Option<Degree>,
    #[serde(default, deserialize_with = "lenient")]
    accidental: Option<Accidental>,
    #[serde(default, alias = "special_root", deserialize_with = "lenient_flag")]
    special_root: bool,
    #[serde(default, deserialize_with = "lenient")]
    quality: Option<Quality>,
    #[serde(default, deserialize_with = "lenient")]
    figure: Option<Figure>,
    #[serde(default, deserialize_with = "lenient")]
    cadence: Option<Cadence>,
    #[serde(
        default,
        alias = "function",
        alias = "selected_function",
        deserialize_with = "lenient"
    )]
    selected_function: Option<HarmonicFunction>,
}

impl From<DescriptorInput> for ChordDescriptor {
    fn from(input: DescriptorInput) -> Self {
        match input {
            DescriptorInput::Numeral(s) => crate::numeral::parse_numeral(&s),
            DescriptorInput::Fields(f) => ChordDescriptor {
                degree: f.degree,
                accidental: f.accidental,
                special_root: f.special_root,
                quality: f.quality,
                figure: f.figure,
                cadence: f.cadence,
                selected_function: f.selected_function,
            },
            DescriptorInput::Other(_) => ChordDescriptor::default(),
        }
    }
}

//! # Answer Grading
//!
//! Compares a learner's chord answer with the correct chord and assigns a
//! partial-credit level.
//!
//! ## Levels
//! | level | meaning                                                    | credit |
//! |-------|------------------------------------------------------------|--------|
//! | 1     | exact: same root, figure and quality                       | 1.0    |
//! | 2     | right chord root, wrong inversion or quality                | 0.6    |
//! | 0.5   | wrong chord, but the selected function label is right      | 0.5    |
//! | 3     | wrong root, but a chord of the same tonal function          | 0.4    |
//! | 0     | incorrect, or no answer                                    | 0.0    |
//!
//! Level 0.5 is only reachable when the exercise allows function-only answers.
//!
//! ## Cadence Bonus
//! When the correct chord carries a cadence and the learner names the same cadence,
//! the outcome carries [`CADENCE_BONUS_XP`] on top of the chord level, whatever the
//! chord level is.
//!
//! ## Related Modules
//! - `descriptor` - Root equality and derived tonal function
//! - `scoring` - Converts levels into experience points and statistics buckets

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::descriptor::{ChordDescriptor, HarmonicFunction};

/// Experience points for naming the cadence correctly
pub const CADENCE_BONUS_XP: u32 = 5;

/// Partial-credit level of a graded answer.
///
/// Serialized as its numeric value (`1`, `2`, `3`, `0.5`, `0`), the form stored in
/// attempt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Level 0
    Incorrect,
    /// Level 0.5
    FunctionOnly,
    /// Level 1
    Exact,
    /// Level 2
    RightRoot,
    /// Level 3
    RightFunction,
}

impl Level {
    pub fn value(self) -> f64 {
        match self {
            Level::Incorrect => 0.0,
            Level::FunctionOnly => 0.5,
            Level::Exact => 1.0,
            Level::RightRoot => 2.0,
            Level::RightFunction => 3.0,
        }
    }

    pub fn from_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Level::Incorrect)
        } else if value == 0.5 {
            Some(Level::FunctionOnly)
        } else if value == 1.0 {
            Some(Level::Exact)
        } else if value == 2.0 {
            Some(Level::RightRoot)
        } else if value == 3.0 {
            Some(Level::RightFunction)
        } else {
            None
        }
    }

    /// Fraction of full credit, used for running averages
    pub fn credit(self) -> f64 {
        match self {
            Level::Exact => 1.0,
            Level::RightRoot => 0.6,
            Level::FunctionOnly => 0.5,
            Level::RightFunction => 0.4,
            Level::Incorrect => 0.0,
        }
    }

    pub fn is_correct(self) -> bool {
        self == Level::Exact
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.value();
        if value.fract() == 0.0 {
            serializer.serialize_u8(value as u8)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Level::from_value(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown grading level {}", value)))
    }
}

/// Result of grading one answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedOutcome {
    pub level: Level,
    pub score: f64,
    pub cadence_bonus: u32,
}

impl GradedOutcome {
    fn new(level: Level, cadence_bonus: u32) -> Self {
        Self {
            level,
            score: level.credit(),
            cadence_bonus,
        }
    }

    pub fn incorrect() -> Self {
        Self::new(Level::Incorrect, 0)
    }
}

/// Exercise-level grading switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOptions {
    /// Learners may answer with a tonal function instead of a full numeral
    #[serde(default)]
    pub function_only_available: bool,
}

/// Grade a learner answer against the correct chord.
///
/// `selected_function` is the function label chosen outside the answer record; when
/// absent the answer's own `selected_function` field is used. A missing answer is
/// level 0 with score 0.
///
/// # Examples
/// ```
/// use numerals::grading::{grade, GradeOptions, Level};
/// use numerals::numeral::parse_numeral;
///
/// let correct = parse_numeral("V7");
///
/// let exact = grade(Some(&parse_numeral("V7")), &correct, None, &GradeOptions::default());
/// assert_eq!(exact.level, Level::Exact);
///
/// let inversion = grade(Some(&parse_numeral("V65")), &correct, None, &GradeOptions::default());
/// assert_eq!(inversion.level, Level::RightRoot);
///
/// let missing = grade(None, &correct, None, &GradeOptions::default());
/// assert_eq!(missing.score, 0.0);
/// ```
pub fn grade(
    answer: Option<&ChordDescriptor>,
    correct: &ChordDescriptor,
    selected_function: Option<HarmonicFunction>,
    options: &GradeOptions,
) -> GradedOutcome {
    let Some(answer) = answer else {
        return GradedOutcome::incorrect();
    };

    let level = chord_level(answer, correct)
        .or_else(|| function_only_level(answer, correct, selected_function, options))
        .unwrap_or(Level::Incorrect);

    GradedOutcome::new(level, cadence_bonus(answer, correct))
}

/// Levels 1, 2 and 3, which need the answer to name a chord
fn chord_level(answer: &ChordDescriptor, correct: &ChordDescriptor) -> Option<Level> {
    answer.degree?;
    if answer.same_root(correct) {
        let same_figure = answer.effective_figure() == correct.effective_figure();
        let same_quality = answer.effective_quality() == correct.effective_quality();
        if same_figure && same_quality {
            return Some(Level::Exact);
        }
        return Some(Level::RightRoot);
    }
    let expected = correct.harmonic_function()?;
    (answer.harmonic_function() == Some(expected)).then_some(Level::RightFunction)
}

fn function_only_level(
    answer: &ChordDescriptor,
    correct: &ChordDescriptor,
    selected_function: Option<HarmonicFunction>,
    options: &GradeOptions,
) -> Option<Level> {
    if !options.function_only_available {
        return None;
    }
    let chosen = selected_function.or(answer.selected_function)?;
    (correct.harmonic_function() == Some(chosen)).then_some(Level::FunctionOnly)
}

fn cadence_bonus(answer: &ChordDescriptor, correct: &ChordDescriptor) -> u32 {
    match (correct.cadence, answer.cadence) {
        (Some(expected), Some(named)) if expected == named => CADENCE_BONUS_XP,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Cadence, Degree, Figure, Quality};
    use crate::numeral::parse_numeral;

    fn grade_numerals(answer: &str, correct: &str) -> GradedOutcome {
        grade(
            Some(&parse_numeral(answer)),
            &parse_numeral(correct),
            None,
            &GradeOptions::default(),
        )
    }

    fn function_mode() -> GradeOptions {
        GradeOptions {
            function_only_available: true,
        }
    }

    #[test]
    fn test_exact_match() {
        let outcome = grade_numerals("V7", "V7");
        assert_eq!(outcome.level, Level::Exact);
        assert_eq!(outcome.score, 1.0);
        assert_eq!(outcome.cadence_bonus, 0);
    }

    #[test]
    fn test_absent_figure_equals_root_position() {
        let with_five = ChordDescriptor::new(Degree::IV).with_figure(Figure::Five);
        let bare = ChordDescriptor::new(Degree::IV);
        let outcome = grade(Some(&bare), &with_five, None, &GradeOptions::default());
        assert_eq!(outcome.level, Level::Exact);
    }

    #[test]
    fn test_right_root_wrong_inversion_or_quality() {
        assert_eq!(grade_numerals("V", "V7").level, Level::RightRoot);
        assert_eq!(grade_numerals("I6", "I").level, Level::RightRoot);
        assert_eq!(grade_numerals("ii", "II").level, Level::RightRoot);
        assert_eq!(grade_numerals("V43", "V7").score, 0.6);
    }

    #[test]
    fn test_chromatic_root_must_match() {
        // bVI is a different root from VI; both are tonic chords
        assert_eq!(grade_numerals("VI", "bVI").level, Level::RightFunction);
        assert_eq!(grade_numerals("N6", "N6").level, Level::Exact);
        // Plain ii6 for a Neapolitan: same function, different root
        assert_eq!(grade_numerals("ii6", "N6").level, Level::RightFunction);
    }

    #[test]
    fn test_flat_two_names_the_neapolitan_root() {
        // bII6 and N6 sound the same chord, so either spelling is exact
        let outcome = grade_numerals("bII6", "N6");
        assert_eq!(outcome.level, Level::Exact);
        assert_eq!(outcome.score, 1.0);
        assert_eq!(grade_numerals("N6", "bII6").level, Level::Exact);
        assert_eq!(grade_numerals("bII", "N6").level, Level::RightRoot);
        assert_eq!(grade_numerals("n6", "N6").level, Level::RightRoot);
    }

    #[test]
    fn test_same_function_different_degree() {
        let outcome = grade_numerals("viio", "V");
        assert_eq!(outcome.level, Level::RightFunction);
        assert_eq!(outcome.score, 0.4);
        assert_eq!(grade_numerals("IV", "ii6").level, Level::RightFunction);
        assert_eq!(grade_numerals("vi", "I").level, Level::RightFunction);
    }

    #[test]
    fn test_wrong_function_is_incorrect() {
        let outcome = grade_numerals("IV", "V");
        assert_eq!(outcome.level, Level::Incorrect);
        assert_eq!(outcome.score, 0.0);
    }

    #[test]
    fn test_cadential_six_four_is_dominant() {
        let correct = parse_numeral("I64 cadential");
        let answer = parse_numeral("V");
        let outcome = grade(Some(&answer), &correct, None, &GradeOptions::default());
        assert_eq!(outcome.level, Level::RightFunction);
    }

    #[test]
    fn test_missing_answer() {
        for numeral in ["I", "V7", "N6", "viio7", "I64 cadential"] {
            let outcome = grade(None, &parse_numeral(numeral), None, &function_mode());
            assert_eq!(outcome.level, Level::Incorrect);
            assert_eq!(outcome.score, 0.0);
            assert_eq!(outcome.cadence_bonus, 0);
        }
    }

    #[test]
    fn test_empty_answer_is_incorrect() {
        let outcome = grade(
            Some(&ChordDescriptor::default()),
            &parse_numeral("I"),
            None,
            &function_mode(),
        );
        assert_eq!(outcome.level, Level::Incorrect);
    }

    #[test]
    fn test_function_only_answers() {
        let correct = parse_numeral("V7");
        let answer = ChordDescriptor::function_only(HarmonicFunction::Dominant);

        // Needs the exercise switch
        let off = grade(Some(&answer), &correct, None, &GradeOptions::default());
        assert_eq!(off.level, Level::Incorrect);

        let on = grade(Some(&answer), &correct, None, &function_mode());
        assert_eq!(on.level, Level::FunctionOnly);
        assert_eq!(on.score, 0.5);

        let wrong = ChordDescriptor::function_only(HarmonicFunction::Tonic);
        assert_eq!(
            grade(Some(&wrong), &correct, None, &function_mode()).level,
            Level::Incorrect
        );
    }

    #[test]
    fn test_selected_function_argument_overrides_answer_field() {
        let correct = parse_numeral("IV");
        // Chord of the wrong function, labelled with the wrong function...
        let answer = parse_numeral("V").with_function(HarmonicFunction::Dominant);
        assert_eq!(
            grade(Some(&answer), &correct, None, &function_mode()).level,
            Level::Incorrect
        );
        // ...but the separately selected function is right
        let outcome = grade(
            Some(&answer),
            &correct,
            Some(HarmonicFunction::Subdominant),
            &function_mode(),
        );
        assert_eq!(outcome.level, Level::FunctionOnly);
    }

    #[test]
    fn test_chord_levels_take_precedence_over_function_label() {
        let correct = parse_numeral("V7");
        let answer = parse_numeral("V").with_function(HarmonicFunction::Dominant);
        let outcome = grade(Some(&answer), &correct, None, &function_mode());
        assert_eq!(outcome.level, Level::RightRoot);
    }

    #[test]
    fn test_cadence_bonus() {
        let correct = parse_numeral("I").with_cadence(Cadence::Perfect);

        let named = parse_numeral("I").with_cadence(Cadence::Perfect);
        let outcome = grade(Some(&named), &correct, None, &GradeOptions::default());
        assert_eq!(outcome.level, Level::Exact);
        assert_eq!(outcome.cadence_bonus, CADENCE_BONUS_XP);

        let misnamed = parse_numeral("I").with_cadence(Cadence::Plagal);
        assert_eq!(
            grade(Some(&misnamed), &correct, None, &GradeOptions::default()).cadence_bonus,
            0
        );

        // Bonus is independent of the chord level
        let wrong_chord = parse_numeral("IV").with_cadence(Cadence::Perfect);
        let outcome = grade(Some(&wrong_chord), &correct, None, &GradeOptions::default());
        assert_eq!(outcome.level, Level::Incorrect);
        assert_eq!(outcome.cadence_bonus, CADENCE_BONUS_XP);

        // No cadence on the correct chord, no bonus
        let plain = parse_numeral("I");
        assert_eq!(
            grade(Some(&named), &plain, None, &GradeOptions::default()).cadence_bonus,
            0
        );
    }

    #[test]
    fn test_grading_is_deterministic() {
        let answer = parse_numeral("ii65").with_quality(Quality::Minor);
        let correct = parse_numeral("IV");
        let first = grade(Some(&answer), &correct, None, &function_mode());
        let second = grade(Some(&answer), &correct, None, &function_mode());
        assert_eq!(first, second);
    }

    #[test]
    fn test_level_serialization() {
        assert_eq!(serde_json::to_string(&Level::Exact).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Level::FunctionOnly).unwrap(), "0.5");
        assert_eq!(serde_json::from_str::<Level>("3").unwrap(), Level::RightFunction);
        assert_eq!(serde_json::from_str::<Level>("0.5").unwrap(), Level::FunctionOnly);
        assert!(serde_json::from_str::<Level>("4").is_err());

        let outcome = GradedOutcome::incorrect();
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"level":0,"score":0.0,"cadenceBonus":0}"#
        );
    }
}

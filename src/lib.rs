pub mod descriptor;
pub mod error;
pub mod exercise;
pub mod grading;
pub mod numeral;
pub mod realize;
pub mod scale;
pub mod scoring;
pub mod stats;

pub use descriptor::*;
pub use error::*;
pub use exercise::{grade_exercise, validate_exercise, Exercise, ExerciseReport, Submission};
pub use grading::{grade, GradeOptions, GradedOutcome, Level};
pub use numeral::parse_numeral;
pub use realize::{realize, Voicing};
pub use scale::{Mode, Tonality};
pub use stats::AttemptSummary;

/// Realize a compact numeral in a key, e.g. `realize_numeral("V65", "Bb", Mode::Major, 4)`.
pub fn realize_numeral(numeral: &str, tonic: &str, mode: Mode, base_octave: i8) -> Voicing {
    realize(
        &parse_numeral(numeral),
        &Tonality::new(tonic, mode),
        base_octave,
    )
}

/// Load, validate and grade an exercise against a learner submission.
/// This is the main entry point for the library.
pub fn grade_exercise_source(
    exercise_source: &str,
    answers_source: &str,
) -> Result<ExerciseReport, NumeralsError> {
    let exercise = Exercise::from_yaml(exercise_source)?;
    validate_exercise(&exercise)?;
    let submission = Submission::from_yaml(answers_source)?;
    Ok(grade_exercise(&exercise, &submission.answers))
}

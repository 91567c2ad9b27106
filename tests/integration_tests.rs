//! Integration tests for numerals
//!
//! Tests the full pipeline from exercise and submission documents to graded reports.

use numerals::scoring::{self, Bucket};
use numerals::{
    grade, grade_exercise_source, parse_numeral, realize, realize_numeral, ChordDescriptor, Degree,
    Figure, GradeOptions, Level, Mode, NumeralsError, Tonality,
};

#[test]
fn test_three_exact_answers() {
    let exercise = r#"
title: Tonic, subdominant, dominant
key: C
markers:
  - { time: 0, answer: { degree: I, figure: "5" } }
  - { time: 1, answer: { degree: IV, figure: "5" } }
  - { time: 2, answer: { degree: V, figure: "5" } }
"#;
    let answers = r#"
answers:
  - { degree: I, figure: "5" }
  - { degree: IV, figure: "5" }
  - { degree: V, figure: "5" }
"#;
    let report = grade_exercise_source(exercise, answers).unwrap();

    assert_eq!(report.summary.buckets.correct, 3);
    assert_eq!(report.summary.buckets.partial, 0);
    assert_eq!(report.summary.buckets.incorrect, 0);
    assert_eq!(report.summary.total_xp, 30);
    assert_eq!(report.summary.percentage, 100.0);
}

#[test]
fn test_mixed_attempt_in_minor() {
    let exercise = r#"
key: A
mode: minor-natural
base-octave: 3
markers:
  - { time: 0.0, answer: i }
  - { time: 1.5, answer: iv6 }
  - { time: 3.0, answer: V7 half }
  - { time: 4.0, answer: VI deceptive }
"#;
    let answers = r#"{"answers": ["i", "iv", {"degree": "VII"}, {"degree": "I", "cadence": "deceptive"}]}"#;
    let report = grade_exercise_source(exercise, answers).unwrap();

    let levels: Vec<Level> = report.results.iter().map(|r| r.outcome.level).collect();
    assert_eq!(
        levels,
        vec![
            Level::Exact,
            Level::RightRoot,
            Level::RightFunction,
            Level::RightFunction
        ]
    );
    assert_eq!(report.results[0].pitches, vec!["A3", "C4", "E4"]);
    assert_eq!(report.results[3].outcome.cadence_bonus, 5);
    assert_eq!(report.summary.total_xp, 10 + 6 + 4 + 4 + 5);
    assert_eq!(report.summary.by_cadence["deceptive"].partial, 1);
    assert_eq!(report.summary.by_cadence["half"].partial, 1);
}

#[test]
fn test_report_serializes() {
    let exercise = "key: F\nmarkers:\n  - { time: 0, answer: V7 }\n";
    let report = grade_exercise_source(exercise, "answers: [V7]").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["results"][0]["expected"], "V7");
    assert_eq!(json["results"][0]["outcome"]["level"], 1);
    assert_eq!(json["results"][0]["xp"], 10);
    assert_eq!(
        json["results"][0]["pitches"],
        serde_json::json!(["C4", "E4", "G4", "Bb4"])
    );
    assert_eq!(json["summary"]["totalXp"], 10);
}

#[test]
fn test_invalid_documents_are_reported() {
    assert!(matches!(
        grade_exercise_source("markers: nope", "answers: []"),
        Err(NumeralsError::ExerciseError(_))
    ));
    assert!(matches!(
        grade_exercise_source(
            "markers:\n  - { time: 1, answer: I }\n  - { time: 0, answer: V }\n",
            "answers: []"
        ),
        Err(NumeralsError::MarkerError { marker: 2, .. })
    ));
    assert!(matches!(
        grade_exercise_source("markers:\n  - { time: 0, answer: I }\n", "answers: {}"),
        Err(NumeralsError::AnswerError(_))
    ));
}

#[test]
fn test_realize_examples() {
    let c_major = Tonality::new("C", Mode::Major);

    let root = ChordDescriptor::new(Degree::I).with_figure(Figure::Five);
    assert_eq!(realize(&root, &c_major, 4).names(), vec!["C4", "E4", "G4"]);

    let first = ChordDescriptor::new(Degree::I).with_figure(Figure::Six);
    let voicing = realize(&first, &c_major, 4);
    assert_eq!(voicing.bass().map(|n| n.name.as_str()), Some("E"));

    let fallback = realize(&ChordDescriptor::default(), &c_major, 4);
    assert_eq!(fallback.names(), vec!["C4", "E4", "G4"]);

    assert_eq!(
        realize_numeral("V65", "Bb", Mode::Major, 4).names(),
        vec!["A4", "C5", "Eb5", "F5"]
    );
}

#[test]
fn test_garbled_json_record_still_realizes_and_grades() {
    let correct: ChordDescriptor =
        serde_json::from_str(r#"{"degree": "v", "figure": 7, "quality": "???"}"#).unwrap();
    let answer: ChordDescriptor =
        serde_json::from_str(r#"{"degree": "V", "figure": "7", "accidental": null}"#).unwrap();

    let voicing = realize(&correct, &Tonality::new("D", Mode::Major), 4);
    assert_eq!(voicing.names(), vec!["A4", "C#5", "E5", "G5"]);

    let outcome = grade(Some(&answer), &correct, None, &GradeOptions::default());
    assert_eq!(outcome.level, Level::Exact);
    assert_eq!(scoring::bucket(outcome.level), Bucket::Correct);
}

#[test]
fn test_playback_and_highlight_agree() {
    let descriptor = parse_numeral("viio43");
    let tonality = Tonality::new("E", Mode::Major);
    let for_audio = realize(&descriptor, &tonality, 3);
    let for_keyboard = realize(&descriptor, &tonality, 3);
    assert_eq!(for_audio.midi_notes(), for_keyboard.midi_notes());
    assert_eq!(for_audio.names(), for_keyboard.names());
}

#[test]
fn test_sample_exercise() {
    let report = grade_exercise_source(
        include_str!("../exercises/cadences-in-g.yaml"),
        include_str!("../exercises/cadences-in-g.answers.yaml"),
    )
    .unwrap();

    assert_eq!(report.title.as_deref(), Some("Cadences in G major"));
    assert_eq!(report.results.len(), 7);
    assert_eq!(report.results[2].pitches, vec!["D3", "G3", "B3"]);
    assert_eq!(report.results[2].outcome.level, Level::RightFunction);
    assert_eq!(report.results[5].expected, "N6");
    assert_eq!(report.results[5].pitches, vec!["C3", "Eb3", "Ab3"]);
    assert_eq!(report.results[6].given, None);

    assert_eq!(report.summary.buckets.correct, 3);
    assert_eq!(report.summary.buckets.partial, 3);
    assert_eq!(report.summary.buckets.incorrect, 1);
    assert_eq!(report.summary.total_xp, 49);
    assert_eq!(report.summary.by_degree["N"].partial, 1);
}

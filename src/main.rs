use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "numerals",
    version,
    about = "Realize Roman-numeral chords and grade harmonic analysis answers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pitches of a numeral, e.g. `numerals realize V65 --key Bb`
    Realize {
        /// Numeral such as I, V7, ii6, viio7, bVI, N6
        numeral: String,

        /// Tonic of the key
        #[arg(long, default_value = "C")]
        key: String,

        /// major or minor-natural
        #[arg(long, default_value = "major")]
        mode: String,

        /// Octave of the bass note
        #[arg(long, default_value = "4", allow_negative_numbers = true)]
        octave: i8,
    },

    /// Grade a learner's answers against an exercise
    Grade {
        /// Exercise YAML file
        exercise: PathBuf,

        /// Answers file (YAML or JSON)
        answers: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value = "json")]
        format: ReportFormat,
    },

    /// Check an exercise file for errors
    Validate {
        /// Exercise YAML file
        exercise: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Json,
    Yaml,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading file '{}'", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Realize {
            numeral,
            key,
            mode,
            octave,
        } => {
            let mode = numerals::Mode::from_symbol(&mode);
            let voicing = numerals::realize_numeral(&numeral, &key, mode, octave);
            println!("{}", voicing);
        }
        Commands::Grade {
            exercise,
            answers,
            format,
        } => {
            let report = numerals::grade_exercise_source(&read(&exercise)?, &read(&answers)?)
                .with_context(|| format!("Grading '{}' failed", exercise.display()))?;
            let output = match format {
                ReportFormat::Json => serde_json::to_string_pretty(&report)?,
                ReportFormat::Yaml => serde_yaml::to_string(&report)?,
            };
            println!("{}", output);
        }
        Commands::Validate { exercise } => {
            let parsed = numerals::Exercise::from_yaml(&read(&exercise)?)?;
            numerals::validate_exercise(&parsed)?;
            println!(
                "{}: {} markers, valid.",
                exercise.display(),
                parsed.markers.len()
            );
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("numerals=info".parse().expect("static directive")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

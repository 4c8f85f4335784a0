use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Rule-based severity staging for suspected nasal airway obstruction
#[derive(Parser, Debug)]
#[command(
    name = "nasalstage",
    about = "Rule-based severity staging for suspected nasal airway obstruction",
    version,
    long_about = "nasalstage compares airway and air-volume measurements against reference \
                  normals and, together with optional BMI and symptom flags, assigns a \
                  severity stage (Normal, A, B, C). Screening support only, not a clinical \
                  diagnosis."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify a set of measurements",
        long_about = "Computes airway and air-volume deficits and assigns a severity stage.\n\n\
                      Examples:\n  \
                      nasalstage classify --airway-cc 17 --volume-mm2 120 --bmi 29\n  \
                      nasalstage classify --airway-cc 18 --volume-mm2 100 --mouth-breathing no --bruxism no\n  \
                      nasalstage classify --input request.json --format json\n  \
                      echo '{\"airway_cc\": 10, \"volume_mm2\": 50}' | nasalstage classify --input -"
    )]
    Classify(ClassifyArgs),

    #[command(about = "Show the reference normals and thresholds used for staging")]
    Normals(NormalsArgs),

    #[command(about = "Show the effective configuration")]
    Config(NormalsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(
        long,
        value_name = "CC",
        allow_negative_numbers = true,
        required_unless_present = "input",
        conflicts_with = "input",
        help = "Airway cross-section in cubic centimeters"
    )]
    pub airway_cc: Option<f64>,

    #[arg(
        long,
        value_name = "MM2",
        allow_negative_numbers = true,
        required_unless_present = "input",
        conflicts_with = "input",
        help = "Nasal air volume in square millimeters"
    )]
    pub volume_mm2: Option<f64>,

    #[arg(long, value_name = "BMI", conflicts_with = "input", help = "Body mass index (optional)")]
    pub bmi: Option<f64>,

    #[arg(
        long,
        value_enum,
        default_value = "unknown",
        conflicts_with = "input",
        help = "Whether the patient mouth-breathes"
    )]
    pub mouth_breathing: SymptomArg,

    #[arg(
        long,
        value_enum,
        default_value = "unknown",
        conflicts_with = "input",
        help = "Whether the patient grinds their teeth"
    )]
    pub bruxism: SymptomArg,

    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        help = "Read a JSON or YAML request body from FILE ('-' for stdin)"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        help = "Output format (defaults to NASALSTAGE_FORMAT, then human)"
    )]
    pub format: Option<OutputFormatArg>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

/// Arguments shared by the display-only commands
#[derive(Parser, Debug, Clone)]
pub struct NormalsArgs {
    #[arg(short = 'f', long, value_enum, help = "Output format")]
    pub format: Option<OutputFormatArg>,
}

/// Tri-state answer for a symptom flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymptomArg {
    Yes,
    No,
    Unknown,
}

impl From<SymptomArg> for Option<bool> {
    fn from(arg: SymptomArg) -> Self {
        match arg {
            SymptomArg::Yes => Some(true),
            SymptomArg::No => Some(false),
            SymptomArg::Unknown => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

//! nasalstage - severity staging for suspected nasal airway obstruction
//!
//! Compares airway cross-section and nasal air-volume measurements against
//! fixed reference normals and, together with optional risk factors (BMI,
//! mouth breathing, bruxism), assigns a severity stage: Normal, A, B or C.
//! Staging is a deterministic, ordered rule table; there is no trained model.
//!
//! # Core Concepts
//!
//! - **Deficit**: fractional shortfall of a measurement below its reference
//!   normal, clamped to zero at or above normal
//! - **Obstruction score**: unweighted mean of the airway and volume deficits
//! - **Staging rules**: guarded branches evaluated in order; the first match
//!   decides the stage, label and optional note
//! - **Proxy fallback**: when no symptom flag is known, the obstruction score
//!   stands in for symptom reporting
//!
//! # Example Usage
//!
//! ```
//! use nasalstage::{classify, Measurements, RiskFactors, Stage};
//!
//! let result = classify(
//!     &Measurements::new(17.0, 120.0),
//!     &RiskFactors::unknown().with_bmi(29.0),
//! );
//!
//! assert_eq!(result.stage, Stage::A);
//! assert_eq!(result.obstruction_score, 0.175);
//! assert!(result.note.is_some());
//! ```
//!
//! # Project Structure
//!
//! - [`severity`]: classifier, staging rules and the request mapping
//! - [`cli`]: command-line arguments, handlers and output formatting
//! - [`config`]: environment-driven configuration
//! - [`util`]: logging setup

pub mod cli;
pub mod config;
pub mod severity;
pub mod util;

pub use config::{ConfigError, NasalstageConfig};
pub use severity::{
    classify, predict_severity, Classification, Measurements, ReferenceNormals, RequestError,
    RiskFactors, SeverityClassifier, SeverityRequest, Stage,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

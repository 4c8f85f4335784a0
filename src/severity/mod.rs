//! Severity staging for suspected nasal airway obstruction
//!
//! - [`types`]: measurements, risk factors, stages and the classification result
//! - [`rules`]: the ordered staging rules
//! - [`classifier`]: deficit computation and rule evaluation
//! - [`request`]: the request mapping adapters decode into

pub mod classifier;
pub mod request;
pub mod rules;
pub mod types;

pub use classifier::{classify, SeverityClassifier};
pub use request::{predict_severity, RequestError, RequestFormat, SeverityRequest};
pub use rules::{Finding, RuleContext, StagingRule};
pub use types::{
    AlertLevel, Classification, Deficits, Measurements, ReferenceNormals, RiskFactors, Stage,
};

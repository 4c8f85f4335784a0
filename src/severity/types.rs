//! Core data types for severity staging
//!
//! Measurements and risk factors go in, a [`Classification`] comes out. Risk
//! factors are tri-state: `Some(true)`, `Some(false)` and `None` (unknown) are
//! three distinct inputs and drive different staging rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference values every measurement is compared against.
///
/// These are fixed by the rule table; the classifier always uses
/// [`ReferenceNormals::STANDARD`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceNormals {
    /// Airway cross-section at or above which there is no airway deficit (cc)
    pub airway_cc: f64,
    /// Air volume at or above which there is no volume deficit (mm²)
    pub volume_mm2: f64,
    /// BMI at or above which the patient counts as obese
    pub obesity_bmi: f64,
    /// Obstruction score at or above which the proxy rule assigns stage B
    pub proxy_score: f64,
}

impl ReferenceNormals {
    pub const STANDARD: ReferenceNormals = ReferenceNormals {
        airway_cc: 20.0,
        volume_mm2: 150.0,
        obesity_bmi: 30.0,
        proxy_score: 0.35,
    };
}

impl Default for ReferenceNormals {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Required clinical measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub airway_cc: f64,
    pub volume_mm2: f64,
}

impl Measurements {
    pub fn new(airway_cc: f64, volume_mm2: f64) -> Self {
        Self {
            airway_cc,
            volume_mm2,
        }
    }

    /// Obstruction gate, evaluated on the raw measurements rather than on the
    /// clamped deficits.
    pub fn is_obstructed(&self, normals: &ReferenceNormals) -> bool {
        self.airway_cc < normals.airway_cc || self.volume_mm2 < normals.volume_mm2
    }

    /// Fractional shortfall of each measurement below its normal.
    ///
    /// Values are not range-checked: a negative airway produces a deficit
    /// above 1.0.
    pub fn deficits(&self, normals: &ReferenceNormals) -> Deficits {
        let airway = ((normals.airway_cc - self.airway_cc) / normals.airway_cc).max(0.0);
        let volume = ((normals.volume_mm2 - self.volume_mm2) / normals.volume_mm2).max(0.0);
        Deficits { airway, volume }
    }
}

/// Optional risk factors, each independently unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub bmi: Option<f64>,
    pub mouth_breathing: Option<bool>,
    pub bruxism: Option<bool>,
}

impl RiskFactors {
    /// All risk factors unknown
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn with_bmi(mut self, bmi: f64) -> Self {
        self.bmi = Some(bmi);
        self
    }

    pub fn with_mouth_breathing(mut self, present: bool) -> Self {
        self.mouth_breathing = Some(present);
        self
    }

    pub fn with_bruxism(mut self, present: bool) -> Self {
        self.bruxism = Some(present);
        self
    }

    /// Only a known BMI can establish obesity
    pub fn is_obese(&self, normals: &ReferenceNormals) -> bool {
        self.bmi.is_some_and(|bmi| bmi >= normals.obesity_bmi)
    }

    /// True when at least one symptom flag was reported, either way
    pub fn symptoms_known(&self) -> bool {
        self.mouth_breathing.is_some() || self.bruxism.is_some()
    }

    /// True when any reported symptom flag is positive
    pub fn has_symptoms(&self) -> bool {
        self.mouth_breathing == Some(true) || self.bruxism == Some(true)
    }
}

/// Unrounded deficit fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deficits {
    pub airway: f64,
    pub volume: f64,
}

impl Deficits {
    /// Unweighted mean of the two deficits
    pub fn obstruction_score(&self) -> f64 {
        0.5 * self.airway + 0.5 * self.volume
    }
}

/// Severity stage, ordered by increasing severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Normal,
    A,
    B,
    C,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Normal, Stage::A, Stage::B, Stage::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Normal => "Normal",
            Stage::A => "A",
            Stage::B => "B",
            Stage::C => "C",
        }
    }

    /// How prominently a result at this stage should be presented
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            Stage::Normal => AlertLevel::Success,
            Stage::A => AlertLevel::Info,
            Stage::B => AlertLevel::Warning,
            Stage::C => AlertLevel::Error,
        }
    }

    /// Canned explanation of what places a result in this stage
    pub fn rationale(&self) -> &'static [&'static str] {
        match self {
            Stage::C => &[
                "Airway and/or air volume are below normal reference values",
                "BMI indicates obesity (>= 30)",
                "Combined factors place this in the highest severity group",
            ],
            Stage::B => &[
                "Nasal obstruction is present (airway < 20 and/or air volume < 150)",
                "Classified as Stage B based on either symptom flags or deviation-from-normal (proxy if symptoms are Unknown)",
            ],
            Stage::A => &[
                "Nasal obstruction is present",
                "No obesity factor (BMI < 30 or BMI not provided)",
                "Lower deviation indicates Stage A rather than Stage B",
            ],
            Stage::Normal => &["Airway and air volume are within normal reference ranges"],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Stage::Normal),
            "a" => Ok(Stage::A),
            "b" => Ok(Stage::B),
            "c" => Ok(Stage::C),
            other => Err(format!(
                "Invalid stage: {}. Valid options: Normal, A, B, C",
                other
            )),
        }
    }
}

/// Presentation severity of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn symbol(&self) -> &'static str {
        match self {
            AlertLevel::Success => "\u{2713}",
            AlertLevel::Info => "\u{2139}",
            AlertLevel::Warning => "\u{26A0}",
            AlertLevel::Error => "\u{2716}",
        }
    }
}

/// Result of staging one set of inputs.
///
/// Serializes to the response mapping: `note` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub stage: Stage,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Rounded to 3 decimals
    pub obstruction_score: f64,
    /// Rounded to 1 decimal
    pub airway_deficit_pct: f64,
    /// Rounded to 1 decimal
    pub volume_deficit_pct: f64,
}

impl Classification {
    pub fn has_note(&self) -> bool {
        self.note.is_some()
    }
}

/// Rounds the exact binary value to the given number of decimal places.
///
/// Goes through `{:.N}` formatting, which rounds correctly, so a value stored
/// just below a half-way point (0.5575 is 0.55749999...) rounds down.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: ReferenceNormals = ReferenceNormals::STANDARD;

    #[test]
    fn test_standard_normals() {
        assert_eq!(N.airway_cc, 20.0);
        assert_eq!(N.volume_mm2, 150.0);
        assert_eq!(N.obesity_bmi, 30.0);
        assert_eq!(N.proxy_score, 0.35);
        assert_eq!(ReferenceNormals::default(), N);
    }

    #[test]
    fn test_deficits_clamped_at_zero() {
        let d = Measurements::new(25.0, 400.0).deficits(&N);
        assert_eq!(d.airway, 0.0);
        assert_eq!(d.volume, 0.0);
        assert_eq!(d.obstruction_score(), 0.0);
    }

    #[test]
    fn test_deficits_below_normal() {
        let d = Measurements::new(10.0, 75.0).deficits(&N);
        assert!((d.airway - 0.5).abs() < 1e-12);
        assert!((d.volume - 0.5).abs() < 1e-12);
        assert!((d.obstruction_score() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_negative_measurement_flows_through() {
        let d = Measurements::new(-20.0, 150.0).deficits(&N);
        assert!((d.airway - 2.0).abs() < 1e-12);
        assert_eq!(d.volume, 0.0);
    }

    #[test]
    fn test_obstruction_gate() {
        assert!(!Measurements::new(20.0, 150.0).is_obstructed(&N));
        assert!(Measurements::new(19.9, 150.0).is_obstructed(&N));
        assert!(Measurements::new(20.0, 149.9).is_obstructed(&N));
    }

    #[test]
    fn test_risk_factor_tri_state() {
        let unknown = RiskFactors::unknown();
        assert!(!unknown.symptoms_known());
        assert!(!unknown.has_symptoms());
        assert!(!unknown.is_obese(&N));

        let denied = RiskFactors::unknown().with_bruxism(false);
        assert!(denied.symptoms_known());
        assert!(!denied.has_symptoms());

        let reported = RiskFactors::unknown()
            .with_mouth_breathing(false)
            .with_bruxism(true);
        assert!(reported.has_symptoms());
    }

    #[test]
    fn test_obesity_threshold_inclusive() {
        assert!(RiskFactors::unknown().with_bmi(30.0).is_obese(&N));
        assert!(!RiskFactors::unknown().with_bmi(29.99).is_obese(&N));
    }

    #[test]
    fn test_stage_parse_and_display() {
        for stage in Stage::ALL {
            assert_eq!(stage.to_string().parse::<Stage>(), Ok(stage));
        }
        assert_eq!("normal".parse::<Stage>(), Ok(Stage::Normal));
        assert!("D".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::Normal < Stage::A);
        assert!(Stage::A < Stage::B);
        assert!(Stage::B < Stage::C);
    }

    #[test]
    fn test_stage_alert_levels() {
        assert_eq!(Stage::Normal.alert_level(), AlertLevel::Success);
        assert_eq!(Stage::A.alert_level(), AlertLevel::Info);
        assert_eq!(Stage::B.alert_level(), AlertLevel::Warning);
        assert_eq!(Stage::C.alert_level(), AlertLevel::Error);
    }

    #[test]
    fn test_every_stage_has_rationale() {
        for stage in Stage::ALL {
            assert!(!stage.rationale().is_empty());
        }
        assert!(Stage::C.rationale()[1].contains("obesity"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.58333, 3), 0.583);
        assert_eq!(round_to(66.6666, 1), 66.7);
        assert_eq!(round_to(0.0, 3), 0.0);
        assert_eq!(round_to(0.5575, 3), 0.557);
        assert_eq!(round_to(13.499999999999996, 1), 13.5);
    }

    #[test]
    fn test_classification_omits_absent_note() {
        let c = Classification {
            stage: Stage::A,
            label: "Nasal obstruction".to_string(),
            note: None,
            obstruction_score: 0.1,
            airway_deficit_pct: 10.0,
            volume_deficit_pct: 10.0,
        };
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["stage"], "A");
    }
}

//! Output formatting for multiple formats
//!
//! This module renders classification results, reference normals and
//! configuration as JSON, YAML, or human-readable text.
//!
//! # Example
//!
//! ```
//! use nasalstage::cli::output::{OutputFormat, OutputFormatter};
//! use nasalstage::severity::{classify, Measurements, RiskFactors};
//!
//! let result = classify(&Measurements::new(17.0, 120.0), &RiskFactors::unknown());
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format(&result).unwrap();
//! assert!(output.contains("\"stage\": \"A\""));
//! ```

use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

use crate::config::NasalstageConfig;
use crate::severity::{Classification, ReferenceNormals, Stage};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

const DISCLAIMER: &str = "Screening support only - not a clinical diagnosis.";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Human => "human",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!(
                "Invalid output format: {}. Valid options: json, yaml, human",
                other
            )),
        }
    }
}

/// Output formatter for classification results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &Classification) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize classification to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("Failed to serialize classification to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(result)),
        }
    }

    pub fn format_normals(&self, normals: &ReferenceNormals) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(normals)
                .context("Failed to serialize reference normals to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(normals)
                .context("Failed to serialize reference normals to YAML"),
            OutputFormat::Human => Ok(self.format_normals_human(normals)),
        }
    }

    pub fn format_config(&self, config: &NasalstageConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_human(&self, result: &Classification) -> String {
        let mut output = String::new();

        let symbol = result.stage.alert_level().symbol();
        match result.stage {
            Stage::Normal => output.push_str(&format!("{} {}\n", symbol, result.label)),
            stage => output.push_str(&format!(
                "{} Severity: {} - {}\n",
                symbol, stage, result.label
            )),
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str("Deviation from normal:\n");
        output.push_str(&format!(
            "\u{251C}\u{2500} Airway deficit:      {}%\n",
            result.airway_deficit_pct
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Air volume deficit:  {}%\n",
            result.volume_deficit_pct
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} Obstruction score:   {}\n",
            result.obstruction_score
        ));

        if let Some(ref note) = result.note {
            output.push_str(&format!("\nNote: {}\n", note));
        }

        output.push_str("\nWhy this result?\n");
        for line in result.stage.rationale() {
            output.push_str(&format!("  \u{2022} {}\n", line));
        }

        output.push_str(&format!("\n\u{26A0} {}\n", DISCLAIMER));
        output
    }

    fn format_normals_human(&self, normals: &ReferenceNormals) -> String {
        let mut output = String::new();
        output.push_str("Reference normals used:\n");
        output.push_str(&format!(
            "\u{251C}\u{2500} Airway:       >= {} cc\n",
            normals.airway_cc
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Air volume:   >= {} mm\u{00B2}\n",
            normals.volume_mm2
        ));
        output.push_str(&format!(
            "\u{251C}\u{2500} Obesity:      BMI >= {}\n",
            normals.obesity_bmi
        ));
        output.push_str(&format!(
            "\u{2514}\u{2500} Proxy stage B: obstruction score >= {}\n",
            normals.proxy_score
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{classify, Measurements, RiskFactors};

    fn proxy_result() -> Classification {
        classify(&Measurements::new(10.0, 50.0), &RiskFactors::unknown())
    }

    #[test]
    fn test_json_format() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format(&proxy_result()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["stage"], "B");
        assert_eq!(parsed["obstruction_score"], 0.583);
        assert_eq!(parsed["volume_deficit_pct"], 66.7);
        assert!(parsed["note"].is_string());
    }

    #[test]
    fn test_json_omits_note_when_absent() {
        let result = classify(&Measurements::new(25.0, 160.0), &RiskFactors::unknown());
        let output = OutputFormatter::new(OutputFormat::Json)
            .format(&result)
            .unwrap();
        assert!(!output.contains("note"));
    }

    #[test]
    fn test_yaml_format() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format(&proxy_result()).unwrap();
        assert!(output.contains("stage: B"));
        assert!(output.contains("airway_deficit_pct: 50.0"));
    }

    #[test]
    fn test_human_format() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format(&proxy_result()).unwrap();

        assert!(output.contains("Severity: B"));
        assert!(output.contains("Airway deficit:      50%"));
        assert!(output.contains("Air volume deficit:  66.7%"));
        assert!(output.contains("Obstruction score:   0.583"));
        assert!(output.contains("Note: Symptoms not provided"));
        assert!(output.contains("Why this result?"));
        assert!(output.contains(DISCLAIMER));
    }

    #[test]
    fn test_human_format_normal_shows_label_only() {
        let result = classify(&Measurements::new(20.0, 150.0), &RiskFactors::unknown());
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&result)
            .unwrap();
        assert!(output.starts_with("\u{2713} No nasal obstruction"));
        assert!(!output.contains("Severity:"));
        assert!(!output.contains("Note:"));
        assert!(output.contains("within normal reference ranges"));
    }

    #[test]
    fn test_normals_format() {
        let normals = ReferenceNormals::STANDARD;

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_normals(&normals)
            .unwrap();
        assert!(human.contains(">= 20 cc"));
        assert!(human.contains("BMI >= 30"));

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_normals(&normals)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["volume_mm2"], 150.0);
        assert_eq!(parsed["proxy_score"], 0.35);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }
}

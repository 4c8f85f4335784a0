//! Severity classifier
//!
//! Computes the deficits and the obstruction gate, runs the ordered staging
//! rules and assembles a [`Classification`] from the first finding. The
//! classifier holds no mutable state and is safe to share across threads.

use crate::severity::rules::{default_rules, DeviationProxyRule, Finding, RuleContext, StagingRule};
use crate::severity::types::{
    round_to, Classification, Deficits, Measurements, ReferenceNormals, RiskFactors,
};
use tracing::{debug, trace};

pub struct SeverityClassifier {
    rules: Vec<Box<dyn StagingRule>>,
}

impl SeverityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom rule table. A table with no terminal rule falls back to
    /// the deviation proxy.
    pub fn with_rules(rules: Vec<Box<dyn StagingRule>>) -> Self {
        Self { rules }
    }

    pub fn normals(&self) -> &'static ReferenceNormals {
        &ReferenceNormals::STANDARD
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn classify(&self, measurements: &Measurements, risk: &RiskFactors) -> Classification {
        let normals = self.normals();
        let obstructed = measurements.is_obstructed(normals);
        let deficits = measurements.deficits(normals);

        trace!(
            airway_cc = measurements.airway_cc,
            volume_mm2 = measurements.volume_mm2,
            airway_deficit = deficits.airway,
            volume_deficit = deficits.volume,
            obstructed,
            "computed deficits"
        );

        let ctx = RuleContext {
            measurements,
            risk,
            deficits: &deficits,
            normals,
            obstructed,
        };

        let (rule, finding) = self
            .rules
            .iter()
            .find_map(|rule| rule.evaluate(&ctx).map(|finding| (rule.name(), finding)))
            .unwrap_or_else(|| {
                let fallback = DeviationProxyRule;
                (fallback.name(), DeviationProxyRule::finding(&ctx))
            });

        debug!(
            rule,
            stage = %finding.stage(),
            score = deficits.obstruction_score(),
            "staging rule matched"
        );

        build_classification(finding, &deficits)
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

fn build_classification(finding: Finding, deficits: &Deficits) -> Classification {
    Classification {
        stage: finding.stage(),
        label: finding.label().to_string(),
        note: finding.note().map(str::to_string),
        obstruction_score: round_to(deficits.obstruction_score(), 3),
        airway_deficit_pct: round_to(100.0 * deficits.airway, 1),
        volume_deficit_pct: round_to(100.0 * deficits.volume, 1),
    }
}

/// Stages one set of inputs with the standard rule table.
pub fn classify(measurements: &Measurements, risk: &RiskFactors) -> Classification {
    SeverityClassifier::default().classify(measurements, risk)
}

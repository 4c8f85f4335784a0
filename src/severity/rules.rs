use crate::severity::types::{Deficits, Measurements, ReferenceNormals, RiskFactors, Stage};

/// Everything a staging rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub measurements: &'a Measurements,
    pub risk: &'a RiskFactors,
    pub deficits: &'a Deficits,
    pub normals: &'a ReferenceNormals,
    /// Raw-measurement obstruction gate, computed before any rule runs
    pub obstructed: bool,
}

impl RuleContext<'_> {
    pub fn obstruction_score(&self) -> f64 {
        self.deficits.obstruction_score()
    }
}

/// Outcome of the staging rule that matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    NoObstruction,
    ObeseObstruction,
    SymptomaticObstruction,
    AsymptomaticObstruction,
    ProxySevere,
    ProxyMild,
}

impl Finding {
    pub fn stage(&self) -> Stage {
        match self {
            Finding::NoObstruction => Stage::Normal,
            Finding::ObeseObstruction => Stage::C,
            Finding::SymptomaticObstruction | Finding::ProxySevere => Stage::B,
            Finding::AsymptomaticObstruction | Finding::ProxyMild => Stage::A,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Finding::NoObstruction => "No nasal obstruction (at/above reference normals)",
            Finding::ObeseObstruction => "Nasal obstruction, bruxism, and obese",
            Finding::SymptomaticObstruction => "Nasal obstruction + mouth breathing/bruxism",
            Finding::ProxySevere => {
                "Nasal obstruction + mouth breathing/bruxism (proxy from deviation)"
            }
            Finding::AsymptomaticObstruction | Finding::ProxyMild => "Nasal obstruction",
        }
    }

    /// Present only for the obesity and proxy findings
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Finding::ObeseObstruction => Some(
                "Obesity inferred from BMI >= 30. Bruxism may be self-reported or inferred in future versions.",
            ),
            Finding::ProxySevere => {
                Some("Symptoms not provided; B inferred from deviation-from-normal threshold.")
            }
            Finding::ProxyMild => Some("Symptoms not provided; classified based on mild deviation."),
            Finding::NoObstruction
            | Finding::SymptomaticObstruction
            | Finding::AsymptomaticObstruction => None,
        }
    }
}

/// One guarded branch of the staging decision.
///
/// Rules are evaluated in order and the first `Some` wins.
pub trait StagingRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Finding>;
}

/// Measurements at or above both normals. Risk factors are ignored.
pub struct NoObstructionRule;

impl StagingRule for NoObstructionRule {
    fn name(&self) -> &'static str {
        "NoObstruction"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Finding> {
        (!ctx.obstructed).then_some(Finding::NoObstruction)
    }
}

/// Obstruction with a known BMI at or above the obesity threshold.
///
/// Symptom flags are not consulted, even when both are known to be absent.
pub struct ObesityRule;

impl StagingRule for ObesityRule {
    fn name(&self) -> &'static str {
        "Obesity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Finding> {
        ctx.risk
            .is_obese(ctx.normals)
            .then_some(Finding::ObeseObstruction)
    }
}

/// At least one symptom flag was reported.
pub struct ReportedSymptomsRule;

impl StagingRule for ReportedSymptomsRule {
    fn name(&self) -> &'static str {
        "ReportedSymptoms"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Finding> {
        if !ctx.risk.symptoms_known() {
            return None;
        }
        if ctx.risk.has_symptoms() {
            Some(Finding::SymptomaticObstruction)
        } else {
            Some(Finding::AsymptomaticObstruction)
        }
    }
}

/// Terminal rule: no symptom information, so the obstruction score stands in.
pub struct DeviationProxyRule;

impl DeviationProxyRule {
    pub fn finding(ctx: &RuleContext<'_>) -> Finding {
        if ctx.obstruction_score() >= ctx.normals.proxy_score {
            Finding::ProxySevere
        } else {
            Finding::ProxyMild
        }
    }
}

impl StagingRule for DeviationProxyRule {
    fn name(&self) -> &'static str {
        "DeviationProxy"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Finding> {
        Some(Self::finding(ctx))
    }
}

/// The staging table in evaluation order
pub fn default_rules() -> Vec<Box<dyn StagingRule>> {
    vec![
        Box::new(NoObstructionRule),
        Box::new(ObesityRule),
        Box::new(ReportedSymptomsRule),
        Box::new(DeviationProxyRule),
    ]
}

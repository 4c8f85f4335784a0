//! Property tests for the staging rules

use nasalstage::{classify, Measurements, RiskFactors, Stage};
use proptest::prelude::*;

fn tri_state() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
}

fn any_bmi() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (10.0f64..60.0).prop_map(Some)]
}

fn non_obese_bmi() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (10.0f64..29.99).prop_map(Some)]
}

/// Measurements with at least one value below its normal
fn obstructed() -> impl Strategy<Value = Measurements> {
    prop_oneof![
        (0.0f64..19.99, 0.0f64..300.0),
        (0.0f64..40.0, 0.0f64..149.99),
    ]
    .prop_map(|(airway, volume)| Measurements::new(airway, volume))
}

proptest! {
    #[test]
    fn at_or_above_normals_is_always_normal(
        airway in 20.0f64..200.0,
        volume in 150.0f64..2000.0,
        bmi in any_bmi(),
        mouth_breathing in tri_state(),
        bruxism in tri_state(),
    ) {
        let risk = RiskFactors { bmi, mouth_breathing, bruxism };
        let result = classify(&Measurements::new(airway, volume), &risk);

        prop_assert_eq!(result.stage, Stage::Normal);
        prop_assert_eq!(result.airway_deficit_pct, 0.0);
        prop_assert_eq!(result.volume_deficit_pct, 0.0);
        prop_assert_eq!(result.obstruction_score, 0.0);
        prop_assert!(result.note.is_none());
    }

    #[test]
    fn scores_stay_in_range(
        airway in 0.0f64..100.0,
        volume in 0.0f64..1000.0,
        bmi in any_bmi(),
        mouth_breathing in tri_state(),
        bruxism in tri_state(),
    ) {
        let risk = RiskFactors { bmi, mouth_breathing, bruxism };
        let result = classify(&Measurements::new(airway, volume), &risk);

        prop_assert!((0.0..=100.0).contains(&result.airway_deficit_pct));
        prop_assert!((0.0..=100.0).contains(&result.volume_deficit_pct));
        prop_assert!((0.0..=1.0).contains(&result.obstruction_score));

        // Score is the mean of the deficit fractions, up to rounding
        let mean = (result.airway_deficit_pct + result.volume_deficit_pct) / 200.0;
        prop_assert!((result.obstruction_score - mean).abs() < 0.0015);
    }

    #[test]
    fn obesity_with_obstruction_is_stage_c(
        m in obstructed(),
        bmi in 30.0f64..60.0,
        mouth_breathing in tri_state(),
        bruxism in tri_state(),
    ) {
        let risk = RiskFactors { bmi: Some(bmi), mouth_breathing, bruxism };
        let result = classify(&m, &risk);

        prop_assert_eq!(result.stage, Stage::C);
        prop_assert!(result.note.is_some());
    }

    #[test]
    fn reported_symptom_is_stage_b_without_note(
        m in obstructed(),
        bmi in non_obese_bmi(),
        other in tri_state(),
        reported_first in any::<bool>(),
    ) {
        let risk = if reported_first {
            RiskFactors { bmi, mouth_breathing: Some(true), bruxism: other }
        } else {
            RiskFactors { bmi, mouth_breathing: other, bruxism: Some(true) }
        };
        let result = classify(&m, &risk);

        prop_assert_eq!(result.stage, Stage::B);
        prop_assert!(result.note.is_none());
    }

    #[test]
    fn denied_symptoms_are_stage_a_without_note(
        m in obstructed(),
        bmi in non_obese_bmi(),
    ) {
        let risk = RiskFactors { bmi, mouth_breathing: Some(false), bruxism: Some(false) };
        let result = classify(&m, &risk);

        prop_assert_eq!(result.stage, Stage::A);
        prop_assert!(result.note.is_none());
    }

    #[test]
    fn unknown_symptoms_use_the_proxy(
        m in obstructed(),
        bmi in non_obese_bmi(),
    ) {
        let risk = RiskFactors { bmi, mouth_breathing: None, bruxism: None };
        let result = classify(&m, &risk);

        let deficits = m.deficits(&nasalstage::ReferenceNormals::STANDARD);
        let expected = if deficits.obstruction_score() >= 0.35 { Stage::B } else { Stage::A };
        prop_assert_eq!(result.stage, expected);
        prop_assert!(result.note.is_some());
    }
}

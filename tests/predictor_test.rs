//! Tests for the premium classifier adapter

use std::collections::HashMap;

use caredesk::ServiceError;
use caredesk::models::types::{AgeGroup, LifestyleRisk, Occupation};
use caredesk::models::user_profile::{FeatureRow, UserProfile};
use caredesk::predictor::{PremiumModel, ScoreCutoff, WeightedScoreModel};

// Helper function to create a model with transparent scoring: the numeric
// coefficients are zero, so the score is just the sum of the table entries.
fn create_test_model() -> WeightedScoreModel {
    WeightedScoreModel {
        model_name: "test-model".to_string(),
        bias: 0.0,
        bmi_weight: 0.0,
        income_weight: 0.0,
        age_group_scores: HashMap::from([
            ("young".to_string(), 0.0),
            ("adult".to_string(), 1.0),
            ("middle_aged".to_string(), 2.0),
            ("senior".to_string(), 3.0),
        ]),
        lifestyle_scores: HashMap::from([
            ("low".to_string(), 0.0),
            ("medium".to_string(), 1.0),
            ("high".to_string(), 2.0),
        ]),
        city_tier_scores: HashMap::from([
            ("1".to_string(), 1.0),
            ("2".to_string(), 0.5),
            ("3".to_string(), 0.0),
        ]),
        occupation_scores: HashMap::from([
            ("student".to_string(), 0.0),
            ("retired".to_string(), 1.0),
        ]),
        cutoffs: vec![
            ScoreCutoff {
                min_score: 4.0,
                category: "high".to_string(),
            },
            ScoreCutoff {
                min_score: 2.0,
                category: "medium".to_string(),
            },
            ScoreCutoff {
                min_score: 0.0,
                category: "low".to_string(),
            },
        ],
    }
}

fn create_test_row() -> FeatureRow {
    FeatureRow {
        bmi: 22.0,
        age_group: AgeGroup::Young,
        lifestyle_risk: LifestyleRisk::Low,
        city_tier: 3,
        income_lpa: 10.0,
        occupation: Occupation::Student,
    }
}

#[test]
fn test_predict_maps_score_to_category() {
    let model = create_test_model();

    // young + low + tier 3 + student = 0.0
    let low = model.predict(&create_test_row()).expect("predict");
    assert_eq!(low, "low");

    // senior + high + tier 1 + retired = 7.0
    let row = FeatureRow {
        age_group: AgeGroup::Senior,
        lifestyle_risk: LifestyleRisk::High,
        city_tier: 1,
        occupation: Occupation::Retired,
        ..create_test_row()
    };
    let high = model.predict(&row).expect("predict");
    assert_eq!(high, "high");

    // adult + medium + tier 3 + student = 2.0, exactly on the medium cutoff
    let row = FeatureRow {
        age_group: AgeGroup::Adult,
        lifestyle_risk: LifestyleRisk::Medium,
        ..create_test_row()
    };
    let medium = model.predict(&row).expect("predict");
    assert_eq!(medium, "medium");
}

#[test]
fn test_predict_is_deterministic() {
    let model = create_test_model();
    let row = create_test_row();
    let first = model.predict(&row).expect("predict");
    let second = model.predict(&row).expect("predict");
    assert_eq!(first, second);
}

#[test]
fn test_uncovered_feature_value_is_a_model_error() {
    let model = create_test_model();

    // The occupation table has no entry for this value
    let row = FeatureRow {
        occupation: Occupation::Freelancer,
        ..create_test_row()
    };
    let err = model
        .predict(&row)
        .expect_err("schema mismatch must be a distinct error");
    assert!(matches!(err, ServiceError::Model(_)));
    assert!(err.to_string().contains("occupation"));
}

#[test]
fn test_load_model_from_json_file() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.json");
    let artifact = serde_json::to_string(&create_test_model()).expect("serialize");
    std::fs::write(&path, artifact).expect("write");

    let model = WeightedScoreModel::load(&path).expect("load");
    assert_eq!(model.model_name, "test-model");
    assert_eq!(model.cutoffs.len(), 3);
}

#[test]
fn test_load_normalizes_cutoff_order() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.json");
    let mut model = create_test_model();
    // Artifact lists the cutoffs ascending; load must reorder them
    model.cutoffs.reverse();
    let artifact = serde_json::to_string(&model).expect("serialize");
    std::fs::write(&path, artifact).expect("write");

    let loaded = WeightedScoreModel::load(&path).expect("load");
    assert_eq!(loaded.cutoffs[0].min_score, 4.0);
    assert_eq!(loaded.cutoffs[2].min_score, 0.0);

    // senior + high + tier 1 + retired = 7.0 must not stop at the "low" floor
    let row = FeatureRow {
        age_group: AgeGroup::Senior,
        lifestyle_risk: LifestyleRisk::High,
        city_tier: 1,
        occupation: Occupation::Retired,
        ..create_test_row()
    };
    assert_eq!(loaded.predict(&row).expect("predict"), "high");
}

#[test]
fn test_load_rejects_invalid_artifact() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.json");
    std::fs::write(&path, r#"{"weights": [0.1, 0.2]}"#).expect("write");

    let err = WeightedScoreModel::load(&path).expect_err("bad artifact must fail load");
    assert!(matches!(err, ServiceError::Model(_)));
}

#[test]
fn test_load_rejects_empty_cutoffs() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let path = tmp.path().join("model.json");
    let mut model = create_test_model();
    model.cutoffs.clear();
    let artifact = serde_json::to_string(&model).expect("serialize");
    std::fs::write(&path, artifact).expect("write");

    let err = WeightedScoreModel::load(&path).expect_err("empty cutoffs must fail load");
    assert!(matches!(err, ServiceError::Model(_)));
}

#[test]
fn test_profile_to_features_feeds_the_model() {
    let profile = UserProfile {
        age: 65,
        weight: 95.0,
        height: 1.7,
        income_lpa: 12.0,
        smoker: true,
        city: "Mumbai".to_string(),
        occupation: Occupation::Retired,
    };
    profile.validate().expect("valid profile");

    let row = profile.to_features();
    assert_eq!(row.age_group, AgeGroup::Senior);
    assert_eq!(row.lifestyle_risk, LifestyleRisk::High);
    assert_eq!(row.city_tier, 1);

    // senior + high + tier 1 + retired = 7.0
    let label = create_test_model().predict(&row).expect("predict");
    assert_eq!(label, "high");
}

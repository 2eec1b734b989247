//! Premium category classifier.
//!
//! The trained classifier is an external artifact. It is loaded once at
//! process start and exposed behind the `PremiumModel` trait, so request
//! handlers and tests only depend on the feature-row-to-label contract and a
//! stub can stand in for the real artifact.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::models::user_profile::FeatureRow;

/// A premium classifier: one feature row in, one category label out.
///
/// Implementations are shared read-only across request tasks.
pub trait PremiumModel: Send + Sync {
    /// Map a feature row to a premium category label.
    fn predict(&self, row: &FeatureRow) -> Result<String>;
}

/// Score cutoff mapping a minimum score to a category label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCutoff {
    /// Lowest score that still falls into this category
    pub min_score: f64,
    /// Category label returned for scores at or above `min_score`
    pub category: String,
}

/// Weighted scoring classifier deserialized from a JSON artifact.
///
/// Numeric features (BMI, income) are scored through plain coefficients;
/// categorical features through per-value weight tables keyed by the wire name
/// of the value. The weighted sum is mapped to a label via cutoffs ordered by
/// descending `min_score`, the last entry acting as the floor category.
/// `load` sorts the cutoffs into that order regardless of how the artifact
/// lists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedScoreModel {
    pub model_name: String,
    pub bias: f64,
    pub bmi_weight: f64,
    pub income_weight: f64,
    pub age_group_scores: HashMap<String, f64>,
    pub lifestyle_scores: HashMap<String, f64>,
    pub city_tier_scores: HashMap<String, f64>,
    pub occupation_scores: HashMap<String, f64>,
    pub cutoffs: Vec<ScoreCutoff>,
}

impl WeightedScoreModel {
    /// Load the artifact from disk. Called once at startup; a bad artifact
    /// fails the process rather than the first request that hits it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut model: Self = serde_json::from_str(&raw).map_err(|e| {
            ServiceError::Model(format!("invalid model artifact {}: {e}", path.display()))
        })?;
        if model.cutoffs.is_empty() {
            return Err(ServiceError::Model(format!(
                "model artifact {} has no score cutoffs",
                path.display()
            )));
        }
        // Prediction walks the cutoffs top-down, so normalize the order here
        // instead of trusting the artifact.
        model
            .cutoffs
            .sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
        info!(
            "Loaded premium model '{}' from {}",
            model.model_name,
            path.display()
        );
        Ok(model)
    }

    fn table_score(table: &HashMap<String, f64>, feature: &str, key: &str) -> Result<f64> {
        table.get(key).copied().ok_or_else(|| {
            ServiceError::Model(format!("model has no {feature} entry for '{key}'"))
        })
    }
}

impl PremiumModel for WeightedScoreModel {
    fn predict(&self, row: &FeatureRow) -> Result<String> {
        let mut score = self.bias + self.bmi_weight * row.bmi + self.income_weight * row.income_lpa;
        score += Self::table_score(&self.age_group_scores, "age_group", row.age_group.as_str())?;
        score += Self::table_score(
            &self.lifestyle_scores,
            "life_style",
            row.lifestyle_risk.as_str(),
        )?;
        score += Self::table_score(
            &self.city_tier_scores,
            "city_tier",
            &row.city_tier.to_string(),
        )?;
        score += Self::table_score(&self.occupation_scores, "occupation", row.occupation.as_str())?;

        let cutoff = self
            .cutoffs
            .iter()
            .find(|c| score >= c.min_score)
            .or_else(|| self.cutoffs.last())
            .ok_or_else(|| ServiceError::Model("model has no score cutoffs".to_string()))?;
        Ok(cutoff.category.clone())
    }
}

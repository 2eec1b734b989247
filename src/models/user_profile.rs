//! Premium applicant profile and the engineered feature row.
//!
//! `UserProfile` is the raw, request-scoped input to the predictor.
//! Validation is an explicit step; feature derivation only runs on inputs
//! that passed it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::features;
use crate::models::types::{AgeGroup, LifestyleRisk, Occupation};

/// Raw applicant attributes posted to the predictor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters
    pub height: f64,
    /// Annual income in lakhs
    pub income_lpa: f64,
    /// Whether the applicant smokes
    pub smoker: bool,
    /// City of residence
    pub city: String,
    /// Occupation category
    pub occupation: Occupation,
}

impl UserProfile {
    /// Range checks on the raw attributes, run before any feature derivation.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 || self.age >= 120 {
            return Err(ServiceError::Validation(
                "age must be between 1 and 119".to_string(),
            ));
        }
        if self.weight <= 0.0 {
            return Err(ServiceError::Validation(
                "weight must be positive".to_string(),
            ));
        }
        if self.height <= 0.0 || self.height >= 2.5 {
            return Err(ServiceError::Validation(
                "height must be between 0 and 2.5 meters".to_string(),
            ));
        }
        if self.income_lpa <= 0.0 {
            return Err(ServiceError::Validation(
                "income_lpa must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Derive the feature row consumed by the classifier.
    /// Deterministic and side-effect free; call after `validate`.
    #[must_use]
    pub fn to_features(&self) -> FeatureRow {
        let bmi = features::bmi(self.weight, self.height);
        FeatureRow {
            bmi,
            age_group: features::age_group(self.age),
            lifestyle_risk: features::lifestyle_risk(self.smoker, bmi),
            city_tier: features::city_tier(&self.city),
            income_lpa: self.income_lpa,
            occupation: self.occupation,
        }
    }
}

/// Single-row feature table handed to the premium classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Unrounded body-mass index
    pub bmi: f64,
    /// Age bracket
    pub age_group: AgeGroup,
    /// Life-style risk tier
    pub lifestyle_risk: LifestyleRisk,
    /// City tier (1, 2 or 3)
    pub city_tier: u8,
    /// Annual income in lakhs, passed through unchanged
    pub income_lpa: f64,
    /// Occupation category, passed through unchanged
    pub occupation: Occupation,
}

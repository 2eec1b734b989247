//! Patient record model, validation and partial-update merge.
//!
//! A `Patient` is persisted with its derived fields (`bmi`, `verdict`)
//! included; both are recomputed from height and weight on every mutation, so
//! stored values never go stale. `PatientUpdate` carries the sparse fields of
//! a partial update, absent fields leaving the record untouched.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::features;
use crate::models::types::{BmiVerdict, Gender};

/// A patient record as persisted, derived fields included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier, immutable once created
    pub id: String,
    /// Name of the patient
    pub name: String,
    /// City where the patient lives
    pub city: String,
    /// Age in years
    pub age: u32,
    /// Gender of the patient
    pub gender: Gender,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// BMI rounded to two decimals
    pub bmi: f64,
    /// Health verdict derived from the rounded BMI
    pub verdict: BmiVerdict,
}

/// Patient fields as supplied by a create request, before derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDraft {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

fn validate_fields(id: &str, name: &str, age: u32, height: f64, weight: f64) -> Result<()> {
    if id.is_empty() {
        return Err(ServiceError::Validation("id must not be empty".to_string()));
    }
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    if age == 0 || age >= 120 {
        return Err(ServiceError::Validation(
            "age must be between 1 and 119".to_string(),
        ));
    }
    if height <= 0.0 {
        return Err(ServiceError::Validation(
            "height must be positive".to_string(),
        ));
    }
    if weight <= 0.0 {
        return Err(ServiceError::Validation(
            "weight must be positive".to_string(),
        ));
    }
    Ok(())
}

impl PatientDraft {
    /// Range checks on the supplied fields.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.id, &self.name, self.age, self.height, self.weight)
    }

    /// Validate and attach the derived fields, producing a full record.
    pub fn into_patient(self) -> Result<Patient> {
        self.validate()?;
        let bmi = features::bmi_rounded(self.weight, self.height);
        Ok(Patient {
            verdict: features::verdict(bmi),
            bmi,
            id: self.id,
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        })
    }
}

/// Sparse partial update: only present fields are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// True when the update carries no fields at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }
}

impl Patient {
    /// Range checks on the current field values.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.id, &self.name, self.age, self.height, self.weight)
    }

    /// Overlay the provided fields onto a copy of this record, keep the id,
    /// recompute the derived fields, and re-validate.
    ///
    /// A failed validation rejects the whole update; the existing record is
    /// never partially modified.
    pub fn merge(&self, update: &PatientUpdate) -> Result<Self> {
        let mut merged = self.clone();
        if let Some(name) = &update.name {
            merged.name = name.clone();
        }
        if let Some(city) = &update.city {
            merged.city = city.clone();
        }
        if let Some(age) = update.age {
            merged.age = age;
        }
        if let Some(gender) = update.gender {
            merged.gender = gender;
        }
        if let Some(height) = update.height {
            merged.height = height;
        }
        if let Some(weight) = update.weight {
            merged.weight = weight;
        }
        merged.bmi = features::bmi_rounded(merged.weight, merged.height);
        merged.verdict = features::verdict(merged.bmi);
        merged.validate()?;
        Ok(merged)
    }
}

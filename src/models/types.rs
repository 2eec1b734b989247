//! Common domain type definitions
//!
//! This module contains the enum types shared by the premium predictor and the
//! patient record service. Wire names match the original request/response
//! vocabulary, so serde renames are attached here rather than at the call sites.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender of a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male gender
    Male,
    /// Female gender
    Female,
    /// Any other or unspecified gender
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupation category of a premium applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retired => "retired",
            Self::Freelancer => "freelancer",
            Self::Student => "student",
            Self::GovernmentJob => "government_job",
            Self::BusinessOwner => "business_owner",
            Self::Unemployed => "unemployed",
            Self::PrivateJob => "private_job",
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age bracket used as a pricing feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// Under 25
    Young,
    /// 25 to 44
    Adult,
    /// 45 to 59
    MiddleAged,
    /// 60 and above
    Senior,
}

impl AgeGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Young => "young",
            Self::Adult => "adult",
            Self::MiddleAged => "middle_aged",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Life-style risk tier derived from smoking status and BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleRisk {
    Low,
    Medium,
    High,
}

impl LifestyleRisk {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for LifestyleRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health categorization derived from BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiVerdict {
    /// BMI below 18.5
    Underweight,
    /// BMI below 25
    Normal,
    /// BMI of 25 or above
    #[serde(rename = "Overweight/Obese")]
    OverweightObese,
}

impl BmiVerdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::OverweightObese => "Overweight/Obese",
        }
    }
}

impl fmt::Display for BmiVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

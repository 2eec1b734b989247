//! Domain models for the predictor and the patient record service.

pub mod patient;
pub mod types;
pub mod user_profile;

pub use patient::{Patient, PatientDraft, PatientUpdate};
pub use types::{AgeGroup, BmiVerdict, Gender, LifestyleRisk, Occupation};
pub use user_profile::{FeatureRow, UserProfile};

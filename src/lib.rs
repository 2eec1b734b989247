//! HTTP services for insurance premium category prediction and patient
//! record management, backed by a single flat JSON file.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod predictor;
pub mod store;

// Re-export the most common types for easier use
// Core types
pub use config::ServiceConfig;
pub use error::{Result, ServiceError};

// Domain models
pub use models::patient::{Patient, PatientDraft, PatientUpdate};
pub use models::user_profile::{FeatureRow, UserProfile};

// Classifier
pub use predictor::{PremiumModel, WeightedScoreModel};

// Persistence
pub use store::{PatientStore, SortField, SortOrder};

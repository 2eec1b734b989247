//! Flat-file patient store.
//!
//! The whole patient mapping lives in one JSON document. There is no
//! in-memory cache: every operation reads the file, mutates the mapping in
//! memory, and writes the file back. Each load-mutate-save cycle runs under a
//! single async mutex so concurrent requests cannot interleave their
//! read-modify-write, and saves go through a sibling temp file renamed into
//! place so a crash mid-write never leaves a half-written main file.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use log::debug;
use tokio::sync::Mutex;

use crate::error::{Result, ServiceError};
use crate::models::patient::{Patient, PatientDraft, PatientUpdate};

/// The persisted form: one JSON object keyed by patient id
pub type PatientMap = BTreeMap<String, Patient>;

/// Field a patient listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    /// Parse a query-string field name.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "height" => Ok(Self::Height),
            "weight" => Ok(Self::Weight),
            "bmi" => Ok(Self::Bmi),
            _ => Err(ServiceError::Validation(
                "Invalid field; choose from ['bmi', 'height', 'weight']".to_string(),
            )),
        }
    }

    fn value_of(self, patient: &Patient) -> f64 {
        match self {
            Self::Height => patient.height,
            Self::Weight => patient.weight,
            Self::Bmi => patient.bmi,
        }
    }
}

/// Direction of an ordered patient listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a query-string order name.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ServiceError::Validation(
                "Invalid order; choose 'asc' or 'desc'".to_string(),
            )),
        }
    }
}

/// Repository over the single backing file, serializing every
/// load-mutate-save cycle behind one async mutex
pub struct PatientStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PatientStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Whole-file read. An absent file is an empty mapping; an unparseable
    /// file is a store error, not an empty mapping.
    fn load_map(&self) -> Result<PatientMap> {
        if !self.path.exists() {
            return Ok(PatientMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ServiceError::Store(format!("corrupt store file {}: {e}", self.path.display()))
        })
    }

    /// Whole-file overwrite via a sibling temp file renamed into place.
    fn save_map(&self, map: &PatientMap) -> Result<()> {
        let raw = serde_json::to_string_pretty(map).map_err(|e| {
            ServiceError::Store(format!("failed to serialize patient store: {e}"))
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Saved {} patient records to {}", map.len(), self.path.display());
        Ok(())
    }

    /// All records keyed by id.
    pub async fn list(&self) -> Result<PatientMap> {
        let _guard = self.lock.lock().await;
        self.load_map()
    }

    /// One record by id.
    pub async fn get(&self, id: &str) -> Result<Patient> {
        let _guard = self.lock.lock().await;
        let map = self.load_map()?;
        map.get(id).cloned().ok_or(ServiceError::NotFound)
    }

    /// Insert a new record; a duplicate id is a conflict.
    pub async fn create(&self, draft: PatientDraft) -> Result<Patient> {
        let patient = draft.into_patient()?;
        let _guard = self.lock.lock().await;
        let mut map = self.load_map()?;
        if map.contains_key(&patient.id) {
            return Err(ServiceError::Conflict);
        }
        map.insert(patient.id.clone(), patient.clone());
        self.save_map(&map)?;
        Ok(patient)
    }

    /// Merge a sparse update into an existing record and persist the result.
    /// The id under the key always wins over anything in the record.
    pub async fn update(&self, id: &str, update: &PatientUpdate) -> Result<Patient> {
        let _guard = self.lock.lock().await;
        let mut map = self.load_map()?;
        let existing = map.get(id).ok_or(ServiceError::NotFound)?;
        let merged = existing.merge(update)?;
        map.insert(id.to_string(), merged.clone());
        self.save_map(&map)?;
        Ok(merged)
    }

    /// Remove a record by id.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load_map()?;
        if map.remove(id).is_none() {
            return Err(ServiceError::NotFound);
        }
        self.save_map(&map)
    }

    /// Records ordered by the given field. The sort is stable, so ties keep
    /// their id order from the mapping.
    pub async fn sorted(&self, field: SortField, order: SortOrder) -> Result<Vec<Patient>> {
        let _guard = self.lock.lock().await;
        let map = self.load_map()?;
        let mut records: Vec<Patient> = map.into_values().collect();
        records.sort_by(|a, b| {
            let ord = field
                .value_of(a)
                .partial_cmp(&field.value_of(b))
                .unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(records)
    }
}

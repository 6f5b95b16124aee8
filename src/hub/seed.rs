use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::error::Result;

const SAMPLE_DATA: &str = include_str!("../../assets/sample_data.yaml");

/// The records a hub starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub user: User,
}

impl SeedData {
    /// The bundled sample departments, staff, bookings and projects.
    pub fn sample() -> Result<Self> {
        Self::from_yaml(SAMPLE_DATA)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let seed = Self::from_yaml(&yaml)?;
        tracing::info!(
            path = %path.display(),
            departments = seed.departments.len(),
            resources = seed.resources.len(),
            bookings = seed.bookings.len(),
            projects = seed.projects.len(),
            "Loaded seed data"
        );
        Ok(seed)
    }
}

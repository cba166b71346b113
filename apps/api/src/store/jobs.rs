//! Read-only store for the job description sheet.

use std::path::PathBuf;

use crate::errors::AppError;
use crate::models::job::JobDescription;

pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn list_all(&self) -> Result<Vec<JobDescription>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut jobs = Vec::new();
        for row in reader.deserialize() {
            jobs.push(row?);
        }
        Ok(jobs)
    }

    pub fn find(&self, id: u32) -> Result<JobDescription, AppError> {
        self.list_all()?
            .into_iter()
            .find(|job| job.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
    }
}

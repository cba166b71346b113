//! CSV-backed employee record store.
//!
//! The sheet is the sole source of truth: every operation re-reads the file
//! and every mutation rewrites it wholesale before returning, so there is no
//! in-process cache to fall out of sync. Callers serialize access through the
//! mutex in `AppState`; the store itself only knows the file path.

use std::path::PathBuf;

use crate::errors::AppError;
use crate::models::employee::{append_history_entry, AssessmentKind, Employee, EmployeeUpdate};

pub struct EmployeeStore {
    path: PathBuf,
}

impl EmployeeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every record in storage order. A missing backing file reads as an
    /// empty sheet (first-run policy).
    pub fn list_all(&self) -> Result<Vec<Employee>, AppError> {
        self.read_rows()
    }

    pub fn find(&self, id: u32) -> Result<Employee, AppError> {
        self.read_rows()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
    }

    /// Appends a record and persists. Requires a non-zero id and a non-empty
    /// name; the id must not collide with an existing record.
    pub fn add(&self, employee: Employee) -> Result<(), AppError> {
        if employee.id == 0 {
            return Err(AppError::Validation(
                "id is required and must be non-zero".to_string(),
            ));
        }
        if employee.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }

        let mut records = self.read_rows()?;
        if records.iter().any(|record| record.id == employee.id) {
            return Err(AppError::Validation(format!(
                "Employee {} already exists",
                employee.id
            )));
        }

        records.push(employee);
        self.write_rows(&records)
    }

    /// Merges the update into the stored record and persists. Assessment
    /// fields append to their histories instead of replacing them.
    pub fn update(&self, id: u32, update: &EmployeeUpdate) -> Result<Employee, AppError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name cannot be empty".to_string()));
            }
        }

        let mut records = self.read_rows()?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

        update.apply(record);
        let updated = record.clone();
        self.write_rows(&records)?;
        Ok(updated)
    }

    /// Removes the record and persists. Deleting an absent id is NotFound,
    /// including a repeated delete of the same id.
    pub fn delete(&self, id: u32) -> Result<(), AppError> {
        let mut records = self.read_rows()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(AppError::NotFound(format!("Employee {id} not found")));
        }
        self.write_rows(&records)
    }

    /// Pushes a formatted entry onto one of the two assessment histories and
    /// persists.
    pub fn append_assessment(
        &self,
        id: u32,
        kind: AssessmentKind,
        entry: &str,
    ) -> Result<Employee, AppError> {
        let mut records = self.read_rows()?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

        let history = match kind {
            AssessmentKind::SelfAssessment => &mut record.self_assessment,
            AssessmentKind::Hr => &mut record.hr_assessment,
        };
        *history = append_history_entry(history, entry);

        let updated = record.clone();
        self.write_rows(&records)?;
        Ok(updated)
    }

    fn read_rows(&self) -> Result<Vec<Employee>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    // Full rewrite with a header row; struct field order fixes the column
    // order, which is part of the on-disk contract.
    fn write_rows(&self, records: &[Employee]) -> Result<(), AppError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

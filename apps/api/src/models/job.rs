//! Job description row. Field order defines the on-disk column order of the
//! job sheet.

use serde::{Deserialize, Serialize};

/// One row of the job description sheet. The two list-valued columns hold a
/// comma-joined list inside a single cell, mirroring the employee sheet
/// convention for multi-valued attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    pub id: u32,
    pub title: String,
    pub required_skills: String,
    pub required_experience: f64,
    pub required_education: String,
    pub job_level: u32,
    pub required_certifications: String,
}

impl JobDescription {
    /// Required skills parsed out of the comma-joined cell.
    pub fn required_skill_list(&self) -> Vec<&str> {
        split_cell(&self.required_skills)
    }

    /// Required certifications parsed out of the comma-joined cell.
    pub fn required_certification_list(&self) -> Vec<&str> {
        split_cell(&self.required_certifications)
    }
}

fn split_cell(cell: &str) -> Vec<&str> {
    cell.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

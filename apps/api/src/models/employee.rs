//! Employee record row plus the typed partial-update payload.
//!
//! Struct field order defines the on-disk column order of the employee sheet,
//! so reordering fields here is a breaking change to the backing file.

use serde::{Deserialize, Serialize};

/// Number of (name, frequency, importance) skill columns on the sheet.
pub const SKILL_SLOT_COUNT: usize = 3;

/// Delimiter between entries in the append-only assessment histories.
pub const ASSESSMENT_DELIMITER: &str = " | ";

/// One row of the employee sheet. Absent optional fields default to
/// empty/zero; `id` is caller-assigned and unique across the sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub job_role: String,
    pub job_level: u32,
    pub total_experience: f64,
    pub years_in_current_role: f64,
    pub education: String,
    pub department: String,
    pub previous_roles: String,
    pub projects_worked_on: u32,
    pub certifications: u32,
    pub trainings_attended: u32,
    pub performance_rating: f64,
    pub skill_1: String,
    pub skill_2: String,
    pub skill_3: String,
    pub skill_1_frequency: f64,
    pub skill_2_frequency: f64,
    pub skill_3_frequency: f64,
    pub skill_1_importance: f64,
    pub skill_2_importance: f64,
    pub skill_3_importance: f64,
    /// Append-only pipe-delimited history; written via assessment appends.
    pub self_assessment: String,
    /// Append-only pipe-delimited history; written via assessment appends.
    pub hr_assessment: String,
}

/// One of the three (name, frequency, importance) skill columns.
#[derive(Debug, Clone, Copy)]
pub struct SkillSlot<'a> {
    pub name: &'a str,
    pub frequency: f64,
    pub importance: f64,
}

impl Employee {
    /// The three skill slots in sheet column order.
    pub fn skill_slots(&self) -> [SkillSlot<'_>; SKILL_SLOT_COUNT] {
        [
            SkillSlot {
                name: &self.skill_1,
                frequency: self.skill_1_frequency,
                importance: self.skill_1_importance,
            },
            SkillSlot {
                name: &self.skill_2,
                frequency: self.skill_2_frequency,
                importance: self.skill_2_importance,
            },
            SkillSlot {
                name: &self.skill_3,
                frequency: self.skill_3_frequency,
                importance: self.skill_3_importance,
            },
        ]
    }
}

/// Which of the two assessment histories an append targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    SelfAssessment,
    Hr,
}

/// Typed partial-update payload for `POST /updateEmployee/:id`.
///
/// Strict policy: only the fields listed here are updatable and unknown keys
/// are rejected at deserialization time, instead of being silently ignored.
/// `id` is deliberately absent; identifiers are immutable after creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub job_role: Option<String>,
    pub job_level: Option<u32>,
    pub total_experience: Option<f64>,
    pub years_in_current_role: Option<f64>,
    pub education: Option<String>,
    pub department: Option<String>,
    pub previous_roles: Option<String>,
    pub projects_worked_on: Option<u32>,
    pub certifications: Option<u32>,
    pub trainings_attended: Option<u32>,
    pub performance_rating: Option<f64>,
    pub skill_1: Option<String>,
    pub skill_2: Option<String>,
    pub skill_3: Option<String>,
    pub skill_1_frequency: Option<f64>,
    pub skill_2_frequency: Option<f64>,
    pub skill_3_frequency: Option<f64>,
    pub skill_1_importance: Option<f64>,
    pub skill_2_importance: Option<f64>,
    pub skill_3_importance: Option<f64>,
    /// Appended to the history, never replacing it.
    pub self_assessment: Option<String>,
    /// Appended to the history, never replacing it.
    pub hr_assessment: Option<String>,
}

impl EmployeeUpdate {
    /// Merges the set fields into the record. The assessment fields append a
    /// new history entry; every other field replaces the stored value.
    pub fn apply(&self, record: &mut Employee) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(job_role) = &self.job_role {
            record.job_role = job_role.clone();
        }
        if let Some(job_level) = self.job_level {
            record.job_level = job_level;
        }
        if let Some(total_experience) = self.total_experience {
            record.total_experience = total_experience;
        }
        if let Some(years) = self.years_in_current_role {
            record.years_in_current_role = years;
        }
        if let Some(education) = &self.education {
            record.education = education.clone();
        }
        if let Some(department) = &self.department {
            record.department = department.clone();
        }
        if let Some(previous_roles) = &self.previous_roles {
            record.previous_roles = previous_roles.clone();
        }
        if let Some(projects) = self.projects_worked_on {
            record.projects_worked_on = projects;
        }
        if let Some(certifications) = self.certifications {
            record.certifications = certifications;
        }
        if let Some(trainings) = self.trainings_attended {
            record.trainings_attended = trainings;
        }
        if let Some(rating) = self.performance_rating {
            record.performance_rating = rating;
        }
        if let Some(skill) = &self.skill_1 {
            record.skill_1 = skill.clone();
        }
        if let Some(skill) = &self.skill_2 {
            record.skill_2 = skill.clone();
        }
        if let Some(skill) = &self.skill_3 {
            record.skill_3 = skill.clone();
        }
        if let Some(frequency) = self.skill_1_frequency {
            record.skill_1_frequency = frequency;
        }
        if let Some(frequency) = self.skill_2_frequency {
            record.skill_2_frequency = frequency;
        }
        if let Some(frequency) = self.skill_3_frequency {
            record.skill_3_frequency = frequency;
        }
        if let Some(importance) = self.skill_1_importance {
            record.skill_1_importance = importance;
        }
        if let Some(importance) = self.skill_2_importance {
            record.skill_2_importance = importance;
        }
        if let Some(importance) = self.skill_3_importance {
            record.skill_3_importance = importance;
        }
        if let Some(entry) = &self.self_assessment {
            record.self_assessment = append_history_entry(&record.self_assessment, entry);
        }
        if let Some(entry) = &self.hr_assessment {
            record.hr_assessment = append_history_entry(&record.hr_assessment, entry);
        }
    }
}

/// Appends one entry to a pipe-delimited history, never overwriting prior
/// entries.
pub fn append_history_entry(history: &str, entry: &str) -> String {
    if history.is_empty() {
        entry.to_string()
    } else {
        format!("{history}{ASSESSMENT_DELIMITER}{entry}")
    }
}

/// Splits a pipe-delimited history into its entries, oldest first.
pub fn parse_history(history: &str) -> Vec<String> {
    if history.is_empty() {
        return Vec::new();
    }
    history
        .split(ASSESSMENT_DELIMITER)
        .map(str::to_string)
        .collect()
}

/// Formats one assessment entry as stored in the history.
pub fn format_assessment_entry(text: &str, score: f64) -> String {
    format!("{text} (Score: {score})")
}

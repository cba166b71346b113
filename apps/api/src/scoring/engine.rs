//! Weighted skill proficiency scores.
//!
//! For every employee and each of the three skill slots the engine combines
//! raw slot values (frequency, importance) with z-score standardized numeric
//! columns. The statistics are recomputed over the full record set on every
//! invocation, so scores shift as the sheet grows; nothing is persisted.

use crate::models::employee::{Employee, SKILL_SLOT_COUNT};
use crate::scoring::stats::standardize;
use crate::scoring::weights::SkillWeights;

/// Multiplier applied to the performance rating column before it is
/// standardized.
pub const PERFORMANCE_BOOST: f64 = 2.0;

/// Number of standardized numeric feature columns.
pub const NUMERIC_FEATURE_COUNT: usize = 6;

/// Standardized numeric columns, parallel to the record slice they were
/// built from.
pub struct NumericFeatures {
    pub job_level: Vec<f64>,
    pub experience: Vec<f64>,
    pub projects: Vec<f64>,
    pub certifications: Vec<f64>,
    pub trainings: Vec<f64>,
    pub performance: Vec<f64>,
}

impl NumericFeatures {
    pub fn from_records(records: &[Employee]) -> Self {
        let collect = |f: fn(&Employee) -> f64| -> Vec<f64> {
            standardize(&records.iter().map(f).collect::<Vec<f64>>())
        };
        Self {
            job_level: collect(|r| r.job_level as f64),
            experience: collect(|r| r.total_experience),
            projects: collect(|r| r.projects_worked_on as f64),
            certifications: collect(|r| r.certifications as f64),
            trainings: collect(|r| r.trainings_attended as f64),
            performance: collect(|r| r.performance_rating * PERFORMANCE_BOOST),
        }
    }

    /// One regression feature row, in fixed column order.
    pub fn row(&self, index: usize) -> [f64; NUMERIC_FEATURE_COUNT] {
        [
            self.job_level[index],
            self.experience[index],
            self.projects[index],
            self.certifications[index],
            self.trainings[index],
            self.performance[index],
        ]
    }
}

/// Weighted proficiency score for every (record, slot) pair, parallel to the
/// input slice. An empty record set yields an empty result.
pub fn compute_slot_scores(
    records: &[Employee],
    weights: &SkillWeights,
) -> Vec<[f64; SKILL_SLOT_COUNT]> {
    let features = NumericFeatures::from_records(records);
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let base = weights.experience * features.experience[i]
                + weights.projects * features.projects[i]
                + weights.certifications * features.certifications[i]
                + weights.trainings * features.trainings[i]
                + weights.performance * features.performance[i];
            let slots = record.skill_slots();
            let mut scores = [0.0; SKILL_SLOT_COUNT];
            for (slot_index, slot) in slots.iter().enumerate() {
                scores[slot_index] =
                    weights.frequency * slot.frequency + weights.importance * slot.importance + base;
            }
            scores
        })
        .collect()
}

//! Employee-to-job match scoring.
//!
//! Both sides run through compatible weighted formulas over raw attribute
//! values (no standardization), so the ratio stays unit-consistent and
//! explainable on its own.

use crate::models::employee::Employee;
use crate::models::job::JobDescription;
use crate::scoring::weights::SkillWeights;

/// Weighted score over an employee's raw attributes. The slot term averages
/// `w.frequency * frequency + w.importance * importance` across slots with a
/// named skill; an employee with no named skills contributes zero there.
pub fn employee_match_score(employee: &Employee, weights: &SkillWeights) -> f64 {
    let named: Vec<f64> = employee
        .skill_slots()
        .iter()
        .filter(|slot| !slot.name.trim().is_empty())
        .map(|slot| weights.frequency * slot.frequency + weights.importance * slot.importance)
        .collect();
    let slot_term = if named.is_empty() {
        0.0
    } else {
        named.iter().sum::<f64>() / named.len() as f64
    };

    slot_term
        + weights.experience * employee.total_experience
        + weights.projects * employee.projects_worked_on as f64
        + weights.certifications * employee.certifications as f64
        + weights.trainings * employee.trainings_attended as f64
        + weights.performance * employee.performance_rating
}

/// Weighted score over a job description's requirements. Projects,
/// trainings and performance have no job-side counterpart and contribute
/// zero.
pub fn job_match_score(job: &JobDescription, weights: &SkillWeights) -> f64 {
    weights.frequency * job.required_skill_list().len() as f64
        + weights.importance * job.job_level as f64
        + weights.experience * job.required_experience
        + weights.certifications * job.required_certification_list().len() as f64
}

/// `employee_score / job_score`, defined as zero when the job-side score is
/// zero rather than a division failure.
pub fn match_ratio(employee_score: f64, job_score: f64) -> f64 {
    if job_score == 0.0 {
        0.0
    } else {
        employee_score / job_score
    }
}

use serde::{Deserialize, Serialize};

/// Fixed attribute weights for the skill proficiency formula.
///
/// Frequency and importance apply to raw slot values; the remaining weights
/// apply to z-score standardized columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillWeights {
    pub frequency: f64,
    pub importance: f64,
    pub experience: f64,
    pub projects: f64,
    pub certifications: f64,
    pub trainings: f64,
    pub performance: f64,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            frequency: 0.15,
            importance: 0.15,
            experience: 0.20,
            projects: 0.05,
            certifications: 0.05,
            trainings: 0.05,
            performance: 0.35,
        }
    }
}

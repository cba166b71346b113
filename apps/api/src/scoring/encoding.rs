//! One-hot encoding of the categorical job-role feature.

use crate::errors::AppError;

/// One-hot encoder over job-role values, fitted on the training rows.
///
/// Categories are sorted and the first level is dropped, so the first
/// category encodes as the all-zero reference row and the encoded width is
/// one less than the number of distinct roles. Encoding a role that was not
/// seen at fit time fails closed with UnknownCategory.
#[derive(Debug, Clone)]
pub struct RoleEncoder {
    categories: Vec<String>,
}

impl RoleEncoder {
    pub fn fit(roles: &[&str]) -> Self {
        let mut categories: Vec<String> = roles.iter().map(|role| role.to_string()).collect();
        categories.sort();
        categories.dedup();
        Self { categories }
    }

    /// Width of one encoded row (distinct categories minus the dropped one).
    pub fn width(&self) -> usize {
        self.categories.len().saturating_sub(1)
    }

    pub fn encode(&self, role: &str) -> Result<Vec<f64>, AppError> {
        let position = self
            .categories
            .iter()
            .position(|category| category == role)
            .ok_or_else(|| {
                AppError::UnknownCategory(format!("job role '{role}' was not seen during training"))
            })?;

        let mut row = vec![0.0; self.width()];
        if position > 0 {
            row[position - 1] = 1.0;
        }
        Ok(row)
    }
}

//! Per-slot linear regression over encoded employee features.
//!
//! Each of the three skill slots gets its own least-squares model fitted
//! against the weighted slot score, with one-hot encoded job role plus the
//! standardized numeric columns as features. When enough rows exist, 20% are
//! held out behind a seeded shuffle and the holdout RMSE / R-squared are
//! reported as model-quality diagnostics.

use anyhow::anyhow;
use nalgebra::{DMatrix, DVector};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::employee::{Employee, SKILL_SLOT_COUNT};
use crate::scoring::encoding::RoleEncoder;
use crate::scoring::engine::{compute_slot_scores, NumericFeatures, NUMERIC_FEATURE_COUNT};
use crate::scoring::weights::SkillWeights;

/// Seed for the holdout shuffle; fixed so diagnostics are reproducible
/// across invocations on the same sheet.
pub const SPLIT_SEED: u64 = 42;

/// Fraction of rows held out for evaluation.
pub const TEST_FRACTION: f64 = 0.2;

/// Below this many rows there is no holdout: the models fit on every row
/// and the diagnostics are omitted.
pub const MIN_SPLIT_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelDiagnostics {
    pub rmse: f64,
    pub r_squared: f64,
}

/// Fitted model for one skill slot. The first coefficient is the intercept,
/// then the encoded role columns, then the numeric features.
#[derive(Debug)]
pub struct SlotModel {
    coefficients: DVector<f64>,
    pub diagnostics: Option<ModelDiagnostics>,
}

/// One fitted model per skill slot, sharing a single role encoder and
/// holdout split.
#[derive(Debug)]
pub struct SkillModelSet {
    encoder: RoleEncoder,
    models: Vec<SlotModel>,
}

/// Fits the per-slot models over the current record set. Returns `None` on
/// an empty sheet. The encoder is fitted on the training rows only, so a
/// role confined to the holdout fails closed with UnknownCategory.
pub fn train_skill_models(
    records: &[Employee],
    weights: &SkillWeights,
) -> Result<Option<SkillModelSet>, AppError> {
    if records.is_empty() {
        return Ok(None);
    }

    let n = records.len();
    let features = NumericFeatures::from_records(records);
    let targets = compute_slot_scores(records, weights);

    let (train_rows, test_rows) = if n >= MIN_SPLIT_ROWS {
        let (train, test) = train_test_split(n, TEST_FRACTION, SPLIT_SEED);
        (train, Some(test))
    } else {
        ((0..n).collect::<Vec<usize>>(), None)
    };

    let train_roles: Vec<&str> = train_rows
        .iter()
        .map(|&i| records[i].job_role.as_str())
        .collect();
    let encoder = RoleEncoder::fit(&train_roles);

    let x_train = build_design(records, &features, &encoder, &train_rows)?;
    let x_test = match &test_rows {
        Some(rows) => Some(build_design(records, &features, &encoder, rows)?),
        None => None,
    };

    let mut models = Vec::with_capacity(SKILL_SLOT_COUNT);
    for slot in 0..SKILL_SLOT_COUNT {
        let y_train = DVector::from_iterator(
            train_rows.len(),
            train_rows.iter().map(|&i| targets[i][slot]),
        );
        let coefficients = fit_least_squares(&x_train, &y_train)?;

        let diagnostics = match (&x_test, &test_rows) {
            (Some(x_test), Some(rows)) => {
                let actual: Vec<f64> = rows.iter().map(|&i| targets[i][slot]).collect();
                let predicted: Vec<f64> = (x_test * &coefficients).iter().copied().collect();
                Some(ModelDiagnostics {
                    rmse: rmse(&actual, &predicted),
                    r_squared: r_squared(&actual, &predicted),
                })
            }
            _ => None,
        };

        models.push(SlotModel {
            coefficients,
            diagnostics,
        });
    }

    Ok(Some(SkillModelSet { encoder, models }))
}

impl SkillModelSet {
    /// Predicted proficiency per slot for `records[index]`, rounded to the
    /// nearest integer. `records` must be the slice the set was trained on.
    pub fn predict(&self, records: &[Employee], index: usize) -> Result<Vec<f64>, AppError> {
        let features = NumericFeatures::from_records(records);
        let row = design_row(&records[index], &features, index, &self.encoder)?;
        let x = DVector::from_vec(row);
        Ok(self
            .models
            .iter()
            .map(|model| model.coefficients.dot(&x).round())
            .collect())
    }

    pub fn diagnostics(&self) -> Vec<Option<ModelDiagnostics>> {
        self.models.iter().map(|model| model.diagnostics).collect()
    }
}

fn design_row(
    record: &Employee,
    features: &NumericFeatures,
    index: usize,
    encoder: &RoleEncoder,
) -> Result<Vec<f64>, AppError> {
    let mut row = Vec::with_capacity(1 + encoder.width() + NUMERIC_FEATURE_COUNT);
    row.push(1.0);
    row.extend(encoder.encode(&record.job_role)?);
    row.extend(features.row(index));
    Ok(row)
}

fn build_design(
    records: &[Employee],
    features: &NumericFeatures,
    encoder: &RoleEncoder,
    rows: &[usize],
) -> Result<DMatrix<f64>, AppError> {
    let ncols = 1 + encoder.width() + NUMERIC_FEATURE_COUNT;
    let mut flat = Vec::with_capacity(rows.len() * ncols);
    for &i in rows {
        flat.extend(design_row(&records[i], features, i, encoder)?);
    }
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &flat))
}

/// Seeded shuffle of `0..n` split into (train, test) index sets. The test
/// set takes `ceil(n * test_fraction)` rows.
pub(crate) fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((n as f64) * test_fraction).ceil() as usize;
    let test = indices[..test_len].to_vec();
    let train = indices[test_len..].to_vec();
    (train, test)
}

// Minimum-norm least squares via SVD, which also handles underdetermined
// systems on small sheets.
fn fit_least_squares(
    design: &DMatrix<f64>,
    targets: &DVector<f64>,
) -> Result<DVector<f64>, AppError> {
    design
        .clone()
        .svd(true, true)
        .solve(targets, 1e-10)
        .map_err(|msg| AppError::Internal(anyhow!(msg)))
}

pub(crate) fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    mse.sqrt()
}

pub(crate) fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

//! HTTP handlers for the scoring endpoints: external scorer delegation,
//! job-match ratio and per-slot proficiency prediction.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::matching::{employee_match_score, job_match_score, match_ratio};
use crate::scoring::regression::{train_skill_models, ModelDiagnostics};
use crate::state::AppState;

#[derive(Serialize)]
pub struct EmployeeScoreResponse {
    pub employee_id: u32,
    pub score: f64,
}

#[derive(Deserialize)]
pub struct FinalScoreQuery {
    pub employee_id: u32,
    pub job_id: u32,
}

#[derive(Serialize)]
pub struct MatchReport {
    pub employee_id: u32,
    pub job_id: u32,
    pub employee_score: f64,
    pub job_score: f64,
    pub ratio: f64,
}

#[derive(Serialize)]
pub struct SlotPrediction {
    pub skill: String,
    pub predicted_proficiency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<ModelDiagnostics>,
}

#[derive(Serialize)]
pub struct PredictionResponse {
    pub employee_id: u32,
    pub predictions: Vec<SlotPrediction>,
}

/// GET /getEmployeeScore/:id
///
/// Delegates to the external scorer. The store lock is released before the
/// outbound call so a slow scorer never blocks CRUD traffic.
pub async fn handle_get_employee_score(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<EmployeeScoreResponse>, AppError> {
    let employee = {
        let store = state.employees.lock().await;
        store.find(id)?
    };
    let score = state.scorer.score(&employee).await?;
    Ok(Json(EmployeeScoreResponse {
        employee_id: id,
        score,
    }))
}

/// GET /finalScore?employee_id=&job_id=
pub async fn handle_final_score(
    State(state): State<AppState>,
    Query(query): Query<FinalScoreQuery>,
) -> Result<Json<MatchReport>, AppError> {
    let employee = {
        let store = state.employees.lock().await;
        store.find(query.employee_id)?
    };
    let job = state.jobs.find(query.job_id)?;

    let employee_score = employee_match_score(&employee, &state.weights);
    let job_score = job_match_score(&job, &state.weights);
    Ok(Json(MatchReport {
        employee_id: query.employee_id,
        job_id: query.job_id,
        employee_score,
        job_score,
        ratio: match_ratio(employee_score, job_score),
    }))
}

/// GET /predictSkillProficiency/:id
pub async fn handle_predict_skill_proficiency(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<PredictionResponse>, AppError> {
    let records = {
        let store = state.employees.lock().await;
        store.list_all()?
    };
    let index = records
        .iter()
        .position(|record| record.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

    let models = match train_skill_models(&records, &state.weights)? {
        Some(models) => models,
        None => {
            return Ok(Json(PredictionResponse {
                employee_id: id,
                predictions: Vec::new(),
            }))
        }
    };

    let predicted = models.predict(&records, index)?;
    let diagnostics = models.diagnostics();
    let predictions = records[index]
        .skill_slots()
        .iter()
        .zip(predicted)
        .zip(diagnostics)
        .map(|((slot, predicted_proficiency), diagnostics)| SlotPrediction {
            skill: slot.name.to_string(),
            predicted_proficiency,
            diagnostics,
        })
        .collect();

    Ok(Json(PredictionResponse {
        employee_id: id,
        predictions,
    }))
}

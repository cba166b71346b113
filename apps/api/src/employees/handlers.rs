//! HTTP handlers for the employee sheet: CRUD, department grouping and the
//! two assessment histories.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::employees::grouping::group_by_department;
use crate::errors::AppError;
use crate::models::employee::{
    format_assessment_entry, parse_history, AssessmentKind, Employee, EmployeeUpdate,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize)]
pub struct AssessmentRequest {
    pub id: u32,
    pub assessment: String,
    pub score: f64,
}

#[derive(Serialize)]
pub struct AssessmentHistoryResponse {
    pub id: u32,
    pub self_assessment: Vec<String>,
    pub hr_assessment: Vec<String>,
}

/// GET /getAllData
pub async fn handle_get_all_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let store = state.employees.lock().await;
    Ok(Json(store.list_all()?))
}

/// GET /getByDepartment
pub async fn handle_get_by_department(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<Employee>>>, AppError> {
    let store = state.employees.lock().await;
    let records = store.list_all()?;
    Ok(Json(group_by_department(records)))
}

/// POST /addEmployee
///
/// Create is lenient about extra JSON keys; they are dropped rather than
/// rejected (the opposite of the update policy).
pub async fn handle_add_employee(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, AppError> {
    let employee: Employee = serde_json::from_value(payload)
        .map_err(|err| AppError::Validation(format!("invalid employee payload: {err}")))?;

    let store = state.employees.lock().await;
    store.add(employee)?;
    Ok(Json(MessageResponse {
        message: "Employee added successfully".to_string(),
    }))
}

/// POST /updateEmployee/:id
///
/// Strict update policy: unknown keys (including `id`) are a validation
/// error, and an empty payload is rejected rather than treated as a no-op.
pub async fn handle_update_employee(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, AppError> {
    let fields = payload
        .as_object()
        .ok_or_else(|| AppError::Validation("update payload must be a JSON object".to_string()))?;
    if fields.is_empty() {
        return Err(AppError::Validation(
            "update payload contains no fields".to_string(),
        ));
    }
    let update: EmployeeUpdate = serde_json::from_value(payload)
        .map_err(|err| AppError::Validation(format!("invalid update payload: {err}")))?;

    let store = state.employees.lock().await;
    store.update(id, &update)?;
    Ok(Json(MessageResponse {
        message: format!("Employee {id} updated successfully"),
    }))
}

/// DELETE /deleteEmployee/:id
pub async fn handle_delete_employee(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<MessageResponse>, AppError> {
    let store = state.employees.lock().await;
    store.delete(id)?;
    Ok(Json(MessageResponse {
        message: format!("Employee {id} deleted successfully"),
    }))
}

/// POST /selfAssessment
pub async fn handle_self_assessment(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, AppError> {
    append_assessment(&state, payload, AssessmentKind::SelfAssessment).await
}

/// POST /hrAssessment
pub async fn handle_hr_assessment(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, AppError> {
    append_assessment(&state, payload, AssessmentKind::Hr).await
}

async fn append_assessment(
    state: &AppState,
    payload: Value,
    kind: AssessmentKind,
) -> Result<Json<MessageResponse>, AppError> {
    let request: AssessmentRequest = serde_json::from_value(payload)
        .map_err(|err| AppError::Validation(format!("invalid assessment payload: {err}")))?;
    if request.assessment.trim().is_empty() {
        return Err(AppError::Validation("assessment cannot be empty".to_string()));
    }

    let entry = format_assessment_entry(&request.assessment, request.score);
    let store = state.employees.lock().await;
    store.append_assessment(request.id, kind, &entry)?;

    let label = match kind {
        AssessmentKind::SelfAssessment => "Self assessment",
        AssessmentKind::Hr => "HR assessment",
    };
    Ok(Json(MessageResponse {
        message: format!("{label} recorded for employee {}", request.id),
    }))
}

/// GET /getAssessment/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<AssessmentHistoryResponse>, AppError> {
    let store = state.employees.lock().await;
    let record = store.find(id)?;
    Ok(Json(AssessmentHistoryResponse {
        id,
        self_assessment: parse_history(&record.self_assessment),
        hr_assessment: parse_history(&record.hr_assessment),
    }))
}

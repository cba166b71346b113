pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::employees::handlers as employee_handlers;
use crate::scoring::handlers as scoring_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Employee sheet CRUD
        .route("/getAllData", get(employee_handlers::handle_get_all_data))
        .route(
            "/getByDepartment",
            get(employee_handlers::handle_get_by_department),
        )
        .route("/addEmployee", post(employee_handlers::handle_add_employee))
        .route(
            "/updateEmployee/:id",
            post(employee_handlers::handle_update_employee),
        )
        .route(
            "/deleteEmployee/:id",
            delete(employee_handlers::handle_delete_employee),
        )
        // Assessment histories
        .route(
            "/selfAssessment",
            post(employee_handlers::handle_self_assessment),
        )
        .route(
            "/hrAssessment",
            post(employee_handlers::handle_hr_assessment),
        )
        .route(
            "/getAssessment/:id",
            get(employee_handlers::handle_get_assessment),
        )
        // Scoring
        .route(
            "/getEmployeeScore/:id",
            get(scoring_handlers::handle_get_employee_score),
        )
        .route("/finalScore", get(scoring_handlers::handle_final_score))
        .route(
            "/predictSkillProficiency/:id",
            get(scoring_handlers::handle_predict_skill_proficiency),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::models::employee::Employee;
    use crate::models::job::JobDescription;
    use crate::scorer_client::{EmployeeScorer, ScorerError};
    use crate::scoring::weights::SkillWeights;
    use crate::store::employees::EmployeeStore;
    use crate::store::jobs::JobStore;

    struct StubScorer {
        score: f64,
    }

    #[async_trait]
    impl EmployeeScorer for StubScorer {
        async fn score(&self, _employee: &Employee) -> Result<f64, ScorerError> {
            Ok(self.score)
        }
    }

    struct FailingScorer;

    #[async_trait]
    impl EmployeeScorer for FailingScorer {
        async fn score(&self, _employee: &Employee) -> Result<f64, ScorerError> {
            Err(ScorerError::MissingScore)
        }
    }

    fn make_state(dir: &TempDir, scorer: Arc<dyn EmployeeScorer>) -> AppState {
        let employee_sheet = dir.path().join("employees.csv");
        let job_sheet = dir.path().join("jobs.csv");

        let mut writer = csv::Writer::from_path(&job_sheet).unwrap();
        writer
            .serialize(JobDescription {
                id: 1,
                title: "Backend Engineer".to_string(),
                required_skills: "Rust, SQL".to_string(),
                required_experience: 4.0,
                required_education: "Bachelors".to_string(),
                job_level: 3,
                required_certifications: "AWS SA".to_string(),
            })
            .unwrap();
        // A job with no requirements at all scores zero.
        writer
            .serialize(JobDescription {
                id: 2,
                ..JobDescription::default()
            })
            .unwrap();
        writer.flush().unwrap();

        AppState {
            employees: Arc::new(Mutex::new(EmployeeStore::new(&employee_sheet))),
            jobs: Arc::new(JobStore::new(&job_sheet)),
            scorer,
            weights: SkillWeights::default(),
            config: Config {
                employee_sheet: employee_sheet.display().to_string(),
                job_sheet: job_sheet.display().to_string(),
                scorer_url: "http://localhost:9".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        }
    }

    fn make_app(dir: &TempDir) -> Router {
        build_router(make_state(dir, Arc::new(StubScorer { score: 7.5 })))
    }

    async fn send(app: Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn full_employee(id: u32) -> Value {
        json!({
            "id": id,
            "name": format!("Employee {id}"),
            "job_role": "Engineer",
            "job_level": 1 + id % 4,
            "total_experience": 1.5 * id as f64,
            "department": "Engineering",
            "projects_worked_on": id * 3 % 11,
            "certifications": id % 5,
            "trainings_attended": id * 2 % 7,
            "performance_rating": 2.0 + (id % 3) as f64,
            "skill_1": "Rust",
            "skill_1_frequency": (id % 5) as f64,
            "skill_1_importance": (id % 4) as f64 + 1.0,
            "skill_2": "SQL",
            "skill_2_frequency": (id % 3) as f64 + 1.0,
            "skill_2_importance": (id % 5) as f64,
        })
    }

    #[tokio::test]
    async fn test_health_reports_service_name() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "talentgrid-api");
    }

    #[tokio::test]
    async fn test_add_list_group_delete_scenario() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A", "department": "Eng"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, body) = send(app.clone(), "GET", "/getAllData", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["department"], "Eng");

        let (status, body) = send(app.clone(), "GET", "/getByDepartment", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Eng"].as_array().unwrap().len(), 1);
        assert_eq!(body["Eng"][0]["id"], 1);

        let (status, _) = send(app.clone(), "DELETE", "/deleteEmployee/1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app.clone(), "GET", "/getAllData", None).await;
        assert!(body.as_array().unwrap().is_empty());
        let (_, body) = send(app, "GET", "/getByDepartment", None).await;
        assert!(body.as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_without_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, body) = send(app, "POST", "/addEmployee", Some(json!({"id": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_add_with_duplicate_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let payload = json!({"id": 1, "name": "A"});
        let (status, _) = send(app.clone(), "POST", "/addEmployee", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(app, "POST", "/addEmployee", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_add_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, _) = send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A", "nickname": "Ace"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A"})),
        )
        .await;

        let (status, body) = send(
            app,
            "POST",
            "/updateEmployee/1",
            Some(json!({"nickname": "Ace"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_rejects_empty_payload() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A"})),
        )
        .await;

        let (status, body) = send(app, "POST", "/updateEmployee/1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_leaves_unrelated_fields_alone() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(app.clone(), "POST", "/addEmployee", Some(full_employee(1))).await;

        let (status, _) = send(
            app.clone(),
            "POST",
            "/updateEmployee/1",
            Some(json!({"department": "Platform"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app, "GET", "/getAllData", None).await;
        assert_eq!(body[0]["department"], "Platform");
        assert_eq!(body[0]["skill_1"], "Rust");
    }

    #[tokio::test]
    async fn test_update_unknown_employee_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, body) = send(
            app,
            "POST",
            "/updateEmployee/42",
            Some(json!({"department": "Platform"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_unknown_employee_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, body) = send(app, "DELETE", "/deleteEmployee/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_assessment_histories_accumulate_in_order() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A"})),
        )
        .await;

        for quarter in 1..=2 {
            let (status, _) = send(
                app.clone(),
                "POST",
                "/selfAssessment",
                Some(json!({
                    "id": 1,
                    "assessment": format!("Quarter {quarter} summary"),
                    "score": quarter as f64,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = send(
            app.clone(),
            "POST",
            "/hrAssessment",
            Some(json!({"id": 1, "assessment": "Calibration note", "score": 4.5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, "GET", "/getAssessment/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let self_history = body["self_assessment"].as_array().unwrap();
        assert_eq!(self_history.len(), 2);
        assert_eq!(self_history[0], "Quarter 1 summary (Score: 1)");
        assert_eq!(self_history[1], "Quarter 2 summary (Score: 2)");
        let hr_history = body["hr_assessment"].as_array().unwrap();
        assert_eq!(hr_history.len(), 1);
        assert_eq!(hr_history[0], "Calibration note (Score: 4.5)");
    }

    #[tokio::test]
    async fn test_assessment_without_score_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A"})),
        )
        .await;

        let (status, body) = send(
            app,
            "POST",
            "/selfAssessment",
            Some(json!({"id": 1, "assessment": "No score"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_assessment_for_unknown_employee_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, _) = send(
            app,
            "POST",
            "/hrAssessment",
            Some(json!({"id": 42, "assessment": "Ghost", "score": 1.0})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_employee_score_delegates_to_the_scorer() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A"})),
        )
        .await;

        let (status, body) = send(app, "GET", "/getEmployeeScore/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee_id"], 1);
        assert_eq!(body["score"], 7.5);
    }

    #[tokio::test]
    async fn test_employee_score_surfaces_scorer_failure() {
        let dir = TempDir::new().unwrap();
        let app = build_router(make_state(&dir, Arc::new(FailingScorer)));
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({"id": 1, "name": "A"})),
        )
        .await;

        let (status, body) = send(app, "GET", "/getEmployeeScore/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    }

    #[tokio::test]
    async fn test_employee_score_checks_existence_before_delegating() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, _) = send(app, "GET", "/getEmployeeScore/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_final_score_hand_checked_ratio() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(
            app.clone(),
            "POST",
            "/addEmployee",
            Some(json!({
                "id": 1,
                "name": "Asha Rao",
                "total_experience": 6.0,
                "projects_worked_on": 4,
                "certifications": 2,
                "trainings_attended": 3,
                "performance_rating": 4.0,
                "skill_1": "Rust",
                "skill_1_frequency": 5.0,
                "skill_1_importance": 4.0,
            })),
        )
        .await;

        let (status, body) = send(app, "GET", "/finalScore?employee_id=1&job_id=1", None).await;
        assert_eq!(status, StatusCode::OK);
        // Employee 1.35 + 3.05 = 4.4 against job 1.6.
        let ratio = body["ratio"].as_f64().unwrap();
        assert!((ratio - 2.75).abs() < 1e-9, "ratio was {ratio}");
    }

    #[tokio::test]
    async fn test_final_score_zero_job_yields_zero_ratio() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(app.clone(), "POST", "/addEmployee", Some(full_employee(1))).await;

        let (status, body) = send(app, "GET", "/finalScore?employee_id=1&job_id=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ratio"], 0.0);
    }

    #[tokio::test]
    async fn test_final_score_unknown_job_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        send(app.clone(), "POST", "/addEmployee", Some(full_employee(1))).await;

        let (status, _) = send(app, "GET", "/finalScore?employee_id=1&job_id=99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_predict_returns_three_rounded_slots_with_diagnostics() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        for id in 1..=8 {
            send(app.clone(), "POST", "/addEmployee", Some(full_employee(id))).await;
        }

        let (status, body) = send(app, "GET", "/predictSkillProficiency/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee_id"], 3);

        let predictions = body["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[0]["skill"], "Rust");
        assert_eq!(predictions[1]["skill"], "SQL");
        for prediction in predictions {
            let value = prediction["predicted_proficiency"].as_f64().unwrap();
            assert_eq!(value.fract(), 0.0, "prediction {value} is not rounded");
            assert!(prediction["diagnostics"]["rmse"].is_number());
            assert!(prediction["diagnostics"]["r_squared"].is_number());
        }
    }

    #[tokio::test]
    async fn test_predict_for_unknown_employee_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        let (status, _) = send(app, "GET", "/predictSkillProficiency/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_predict_fails_closed_on_holdout_only_role() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir);
        for id in 1..=10 {
            let mut employee = full_employee(id);
            employee["job_role"] = json!(format!("Role {id}"));
            send(app.clone(), "POST", "/addEmployee", Some(employee)).await;
        }

        let (status, body) = send(app, "GET", "/predictSkillProficiency/1", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNKNOWN_CATEGORY");
    }
}

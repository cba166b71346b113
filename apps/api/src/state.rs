use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::scorer_client::EmployeeScorer;
use crate::scoring::weights::SkillWeights;
use crate::store::employees::EmployeeStore;
use crate::store::jobs::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Employee sheet access. Every operation is a full read-modify-write of
    /// the backing file, so a single mutex serializes them against lost
    /// updates. Never held across an outbound await.
    pub employees: Arc<Mutex<EmployeeStore>>,
    /// Job description sheet; read-only, so unguarded.
    pub jobs: Arc<JobStore>,
    /// Pluggable external scorer. Swapped for a stub in tests.
    pub scorer: Arc<dyn EmployeeScorer>,
    pub weights: SkillWeights,
    /// Retained startup configuration (sheet paths, scorer endpoint).
    #[allow(dead_code)]
    pub config: Config,
}

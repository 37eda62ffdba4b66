use axum::{extract::State, Json};

use crate::health::{ProbeStatus, StatusStore};

/// `GET /api/status`: the current probe status as JSON.
pub async fn get_status(State(store): State<StatusStore>) -> Json<ProbeStatus> {
    Json(ProbeStatus::clone(&store.snapshot()))
}

//! Work Schedule API Handlers

use axum::Json;

use shared::models::{WorkSchedule, WorkScheduleType};

pub async fn list() -> Json<Vec<WorkSchedule>> {
    Json(WorkScheduleType::ALL.iter().map(|ty| ty.info()).collect())
}

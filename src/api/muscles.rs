use axum::{extract::State, response::Json, routing::get, Router};
use sqlx::PgPool;

use crate::api::error::ApiError;
use crate::models::{Muscle, MuscleGroup};
use crate::services::MuscleService;

pub fn muscle_routes(db: PgPool) -> Router {
    let service = MuscleService::new(db);

    Router::new()
        .route("/muscle-groups", get(list_muscle_groups))
        .route("/muscles", get(list_muscles))
        .with_state(service)
}

/// GET /muscle-groups - every muscle group, alphabetical
async fn list_muscle_groups(
    State(service): State<MuscleService>,
) -> Result<Json<Vec<MuscleGroup>>, ApiError> {
    Ok(Json(service.list_muscle_groups().await?))
}

/// GET /muscles - every muscle, alphabetical
async fn list_muscles(State(service): State<MuscleService>) -> Result<Json<Vec<Muscle>>, ApiError> {
    Ok(Json(service.list_muscles().await?))
}

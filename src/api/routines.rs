use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::api::error::ApiError;
use crate::models::{
    CreatedRoutine, Difficulty, ReactionCreated, RoutineAdminDetail, RoutineDetail,
    RoutinePayload, RoutineReactionRequest, UpdateExerciseOrderRequest, UpdatedRoutine,
};
use crate::services::RoutineService;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

pub fn routine_routes(db: PgPool) -> Router {
    let service = RoutineService::new(db);

    Router::new()
        .route("/", get(list_routines).post(create_routine))
        .route("/search", get(search_routines))
        .route("/difficulty/:difficulty", get(list_by_difficulty))
        .route("/reaction", post(add_reaction))
        .route("/admin/all", get(list_routines_admin))
        .route("/admin/:id", get(get_routine_admin))
        .route("/:id/approve", put(approve_routine))
        .route("/:id/exercise-order", put(update_exercise_order))
        .route(
            "/:id",
            get(get_routine).put(update_routine).delete(delete_routine),
        )
        .with_state(service)
}

/// GET /routines - approved routines with their ordered exercise lists
async fn list_routines(
    State(service): State<RoutineService>,
) -> Result<Json<Vec<RoutineDetail>>, ApiError> {
    Ok(Json(service.list_approved().await?))
}

/// GET /routines/search?name= - substring search over approved routines
async fn search_routines(
    State(service): State<RoutineService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<RoutineDetail>>, ApiError> {
    let name = query
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Name parameter is required".to_string()))?;

    Ok(Json(service.search_by_name(&name).await?))
}

/// GET /routines/difficulty/:difficulty - approved routines at one level
async fn list_by_difficulty(
    State(service): State<RoutineService>,
    Path(difficulty): Path<String>,
) -> Result<Json<Vec<RoutineDetail>>, ApiError> {
    let difficulty: Difficulty = difficulty
        .parse()
        .map_err(|message: &str| ApiError::InvalidArgument(message.to_string()))?;

    Ok(Json(service.list_by_difficulty(difficulty).await?))
}

/// GET /routines/admin/all - every routine regardless of approval
async fn list_routines_admin(
    State(service): State<RoutineService>,
) -> Result<Json<Vec<RoutineAdminDetail>>, ApiError> {
    Ok(Json(service.list_all_admin().await?))
}

/// GET /routines/admin/:id - one routine for moderation, any approval state
async fn get_routine_admin(
    State(service): State<RoutineService>,
    Path(id): Path<i32>,
) -> Result<Json<RoutineAdminDetail>, ApiError> {
    let routine = service
        .get_admin(id)
        .await?
        .ok_or(ApiError::NotFound("Routine not found"))?;

    Ok(Json(routine))
}

/// GET /routines/:id - one approved routine
async fn get_routine(
    State(service): State<RoutineService>,
    Path(id): Path<i32>,
) -> Result<Json<RoutineDetail>, ApiError> {
    let routine = service
        .get_approved(id)
        .await?
        .ok_or(ApiError::NotFound("Routine not found"))?;

    Ok(Json(routine))
}

/// POST /routines - submit a new routine; it enters the moderation queue
async fn create_routine(
    State(service): State<RoutineService>,
    Json(request): Json<RoutinePayload>,
) -> Result<(StatusCode, Json<CreatedRoutine>), ApiError> {
    let new = request
        .validate()
        .map_err(|message| ApiError::InvalidArgument(message.to_string()))?;

    let id = service.create(&new).await?;

    let body = CreatedRoutine {
        id,
        name: new.name,
        difficulty: new.difficulty,
        estimated_time_minutes: new.estimated_time_minutes,
        approved: false,
        exercises: new.exercises.unwrap_or_default(),
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /routines/:id - overwrite the routine fields and, when present,
/// replace the exercise list
async fn update_routine(
    State(service): State<RoutineService>,
    Path(id): Path<i32>,
    Json(request): Json<RoutinePayload>,
) -> Result<Json<UpdatedRoutine>, ApiError> {
    let new = request
        .validate()
        .map_err(|message| ApiError::InvalidArgument(message.to_string()))?;

    if !service.update(id, &new).await? {
        return Err(ApiError::NotFound("Routine not found"));
    }

    let body = UpdatedRoutine {
        id,
        name: new.name,
        difficulty: new.difficulty,
        estimated_time_minutes: new.estimated_time_minutes,
        exercises: new.exercises.unwrap_or_default(),
    };

    Ok(Json(body))
}

/// PUT /routines/:id/exercise-order - rewrite stored exercise positions
async fn update_exercise_order(
    State(service): State<RoutineService>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateExerciseOrderRequest>,
) -> Result<Json<Value>, ApiError> {
    let orders = request
        .validate()
        .map_err(|message| ApiError::InvalidArgument(message.to_string()))?;

    if !service.update_exercise_order(id, &orders).await? {
        return Err(ApiError::NotFound("Routine not found"));
    }

    Ok(Json(json!({ "message": "Exercise order updated successfully" })))
}

/// DELETE /routines/:id - remove a routine and its reactions and entries
async fn delete_routine(
    State(service): State<RoutineService>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if !service.delete(id).await? {
        return Err(ApiError::NotFound("Routine not found"));
    }

    Ok(Json(json!({ "message": "Routine deleted successfully" })))
}

/// PUT /routines/:id/approve - flip a routine to approved
async fn approve_routine(
    State(service): State<RoutineService>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if !service.approve(id).await? {
        return Err(ApiError::NotFound("Routine not found"));
    }

    Ok(Json(json!({ "message": "Routine approved successfully" })))
}

/// POST /routines/reaction - append a like or dislike to the ledger
async fn add_reaction(
    State(service): State<RoutineService>,
    Json(request): Json<RoutineReactionRequest>,
) -> Result<(StatusCode, Json<ReactionCreated>), ApiError> {
    let id = service
        .add_reaction(request.routine_id, request.is_like)
        .await?
        .ok_or(ApiError::NotFound("Routine not found or not approved"))?;

    Ok((StatusCode::CREATED, Json(ReactionCreated::new(request.is_like, id))))
}

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
    CreateExerciseRequest, CreatedExercise, ExerciseReactionRequest, ExerciseWithDetails,
    ReactionCounts, ReactionCreated, UpdateExerciseRequest, UpdatedExercise,
};
use crate::services::ExerciseService;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

pub fn exercise_routes(db: PgPool) -> Router {
    let service = ExerciseService::new(db);

    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/admin", get(list_exercises_admin))
        .route("/search", get(search_exercises))
        .route("/muscle-group/:id", get(list_by_muscle_group))
        .route("/reaction", post(add_reaction))
        .route("/:id/stats", get(exercise_stats))
        .route("/:id/approve", put(approve_exercise))
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
        .with_state(service)
}

/// GET /exercises - approved exercises with muscle tags and reaction counts
async fn list_exercises(
    State(service): State<ExerciseService>,
) -> Result<Json<Vec<ExerciseWithDetails>>, ApiError> {
    Ok(Json(service.list_approved().await?))
}

/// GET /exercises/admin - every exercise regardless of approval
async fn list_exercises_admin(
    State(service): State<ExerciseService>,
) -> Result<Json<Vec<ExerciseWithDetails>>, ApiError> {
    Ok(Json(service.list_all_admin().await?))
}

/// GET /exercises/search?name= - substring search over approved exercises
async fn search_exercises(
    State(service): State<ExerciseService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ExerciseWithDetails>>, ApiError> {
    let name = query
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Name parameter is required".to_string()))?;

    Ok(Json(service.search_by_name(&name).await?))
}

/// GET /exercises/muscle-group/:id - approved exercises in one muscle group
async fn list_by_muscle_group(
    State(service): State<ExerciseService>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ExerciseWithDetails>>, ApiError> {
    Ok(Json(service.list_by_muscle_group(id).await?))
}

/// GET /exercises/:id - one approved exercise
async fn get_exercise(
    State(service): State<ExerciseService>,
    Path(id): Path<i32>,
) -> Result<Json<ExerciseWithDetails>, ApiError> {
    let exercise = service
        .get_approved(id)
        .await?
        .ok_or(ApiError::NotFound("Exercise not found"))?;

    Ok(Json(exercise))
}

/// GET /exercises/:id/stats - reaction counts for one approved exercise
async fn exercise_stats(
    State(service): State<ExerciseService>,
    Path(id): Path<i32>,
) -> Result<Json<ReactionCounts>, ApiError> {
    Ok(Json(service.get_stats(id).await?))
}

/// POST /exercises - submit a new exercise; it enters the moderation queue
async fn create_exercise(
    State(service): State<ExerciseService>,
    Json(request): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<CreatedExercise>), ApiError> {
    let new = request
        .validate()
        .map_err(|message| ApiError::InvalidArgument(message.to_string()))?;

    let id = service.create(&new).await?;

    let body = CreatedExercise {
        id,
        name: new.name,
        description: new.description,
        video_link: new.video_link,
        difficulty: new.difficulty,
        muscle_group_id: new.muscle_group_id,
        muscle_ids: new.muscle_ids,
        approved: false,
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /exercises/:id - overwrite the writable columns
async fn update_exercise(
    State(service): State<ExerciseService>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateExerciseRequest>,
) -> Result<Json<UpdatedExercise>, ApiError> {
    if !service.update(id, &request).await? {
        return Err(ApiError::NotFound("Exercise not found"));
    }

    let body = UpdatedExercise {
        id,
        name: request.name,
        description: request.description,
        muscle_group_id: request.muscle_group_id,
        rank: request.rank,
    };

    Ok(Json(body))
}

/// DELETE /exercises/:id - remove an exercise and its reactions and tags
async fn delete_exercise(
    State(service): State<ExerciseService>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if !service.delete(id).await? {
        return Err(ApiError::NotFound("Exercise not found"));
    }

    Ok(Json(json!({ "message": "Exercise deleted successfully" })))
}

/// PUT /exercises/:id/approve - flip an exercise to approved
async fn approve_exercise(
    State(service): State<ExerciseService>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if !service.approve(id).await? {
        return Err(ApiError::NotFound("Exercise not found"));
    }

    Ok(Json(json!({ "message": "Exercise approved successfully" })))
}

/// POST /exercises/reaction - append a like or dislike to the ledger
async fn add_reaction(
    State(service): State<ExerciseService>,
    Json(request): Json<ExerciseReactionRequest>,
) -> Result<(StatusCode, Json<ReactionCreated>), ApiError> {
    let id = service
        .add_reaction(request.exercise_id, request.is_like)
        .await?
        .ok_or(ApiError::NotFound("Exercise not found or not approved"))?;

    Ok((StatusCode::CREATED, Json(ReactionCreated::new(request.is_like, id))))
}

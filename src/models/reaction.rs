use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Aggregated like/dislike counts for one catalog entry.
#[derive(Debug, Clone, Copy, Serialize, FromRow)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// Body of POST /exercises/reaction.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseReactionRequest {
    pub exercise_id: i32,
    pub is_like: bool,
}

/// Body of POST /routines/reaction.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutineReactionRequest {
    pub routine_id: i32,
    pub is_like: bool,
}

/// 201 body for a recorded reaction.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionCreated {
    pub message: String,
    pub id: i32,
}

impl ReactionCreated {
    pub fn new(is_like: bool, id: i32) -> Self {
        let message = if is_like {
            "Like added successfully"
        } else {
            "Dislike added successfully"
        };

        Self { message: message.to_string(), id }
    }
}

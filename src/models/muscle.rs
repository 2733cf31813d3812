use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A coarse body region such as Chest or Legs. Reference data, read-only
/// through the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MuscleGroup {
    pub id: i32,
    pub name: String,
}

/// An individual muscle such as Quadriceps. Exercises tag any number of
/// these through the exercise_muscle association table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Muscle {
    pub id: i32,
    pub name: String,
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use crate::models::validation::text_present;

/// Routine difficulty levels, stored as text in the routines table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Beginner" => Ok(Difficulty::Beginner),
            "Intermediate" => Ok(Difficulty::Intermediate),
            "Advanced" => Ok(Difficulty::Advanced),
            _ => Err("Difficulty must be Beginner, Intermediate, or Advanced"),
        }
    }
}

/// Routine row as the public read queries return it.
#[derive(Debug, Clone, FromRow)]
pub struct RoutineRow {
    pub id: i32,
    pub name: String,
    pub difficulty: String,
    pub estimated_time_minutes: i32,
    pub likes: i64,
    pub dislikes: i64,
}

impl RoutineRow {
    pub fn with_exercises(self, exercises: Vec<RoutineExerciseEntry>) -> RoutineDetail {
        RoutineDetail {
            id: self.id,
            name: self.name,
            difficulty: self.difficulty,
            estimated_time_minutes: self.estimated_time_minutes,
            likes: self.likes,
            dislikes: self.dislikes,
            exercises,
        }
    }
}

/// Routine row for the moderation views, which also carry the approval flag.
#[derive(Debug, Clone, FromRow)]
pub struct RoutineAdminRow {
    pub id: i32,
    pub name: String,
    pub difficulty: String,
    pub estimated_time_minutes: i32,
    pub approved: bool,
    pub likes: i64,
    pub dislikes: i64,
}

impl RoutineAdminRow {
    pub fn with_exercises(self, exercises: Vec<RoutineExerciseEntry>) -> RoutineAdminDetail {
        RoutineAdminDetail {
            id: self.id,
            name: self.name,
            difficulty: self.difficulty,
            estimated_time_minutes: self.estimated_time_minutes,
            approved: self.approved,
            likes: self.likes,
            dislikes: self.dislikes,
            exercises,
        }
    }
}

/// One exercise inside a routine: catalog fields plus the per-routine sets
/// and position.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoutineExerciseEntry {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub difficulty: String,
    pub sets: Option<i32>,
    pub exercise_order: i32,
    pub muscle_group_name: Option<String>,
}

/// Full routine representation served by the public read endpoints. Exercises
/// are sorted by their stored position.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineDetail {
    pub id: i32,
    pub name: String,
    pub difficulty: String,
    pub estimated_time_minutes: i32,
    pub likes: i64,
    pub dislikes: i64,
    pub exercises: Vec<RoutineExerciseEntry>,
}

/// Full routine representation for the moderation endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineAdminDetail {
    pub id: i32,
    pub name: String,
    pub difficulty: String,
    pub estimated_time_minutes: i32,
    pub approved: bool,
    pub likes: i64,
    pub dislikes: i64,
    pub exercises: Vec<RoutineExerciseEntry>,
}

/// Body of POST /routines and PUT /routines/:id.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutinePayload {
    pub name: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_time_minutes: Option<i32>,
    pub exercises: Option<Vec<RoutineExerciseInput>>,
}

impl RoutinePayload {
    pub fn validate(&self) -> Result<NewRoutine, &'static str> {
        if !text_present(&self.name)
            || !text_present(&self.difficulty)
            || self.estimated_time_minutes.is_none()
        {
            return Err("Name, difficulty, and estimated time are required");
        }

        let difficulty = self.difficulty.as_deref().unwrap_or_default().parse()?;

        Ok(NewRoutine {
            name: self.name.clone().unwrap_or_default(),
            difficulty,
            estimated_time_minutes: self.estimated_time_minutes.unwrap_or_default(),
            exercises: self.exercises.clone(),
        })
    }
}

/// One exercise reference in a routine payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineExerciseInput {
    pub exercise_id: i32,
    pub sets: Option<i32>,
}

/// Validated form of a routine payload. `exercises: None` means the request
/// did not mention exercises at all; an update then leaves the stored list
/// untouched.
#[derive(Debug, Clone)]
pub struct NewRoutine {
    pub name: String,
    pub difficulty: Difficulty,
    pub estimated_time_minutes: i32,
    pub exercises: Option<Vec<RoutineExerciseInput>>,
}

/// Body of PUT /routines/:id/exercise-order.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExerciseOrderRequest {
    #[serde(rename = "exerciseOrders")]
    pub exercise_orders: Option<Vec<ExerciseOrderInput>>,
}

/// One (exercise, position) pair in a reorder request.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseOrderInput {
    pub exercise_id: Option<i32>,
    pub exercise_order: Option<i32>,
}

impl UpdateExerciseOrderRequest {
    /// Flatten the request into (exercise_id, exercise_order) pairs. The
    /// array itself and both fields of every item are required; the values
    /// are not cross-checked against the routine contents.
    pub fn validate(&self) -> Result<Vec<(i32, i32)>, &'static str> {
        let items = match &self.exercise_orders {
            Some(items) if !items.is_empty() => items,
            _ => return Err("Exercise orders array is required"),
        };

        let mut orders = Vec::with_capacity(items.len());
        for item in items {
            match (item.exercise_id, item.exercise_order) {
                (Some(exercise_id), Some(exercise_order)) => {
                    orders.push((exercise_id, exercise_order))
                }
                _ => return Err("Each item must have exercise_id and exercise_order"),
            }
        }

        Ok(orders)
    }
}

/// 201 body for a created routine: the submitted fields echoed back with the
/// assigned id. New routines always start unapproved.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRoutine {
    pub id: i32,
    pub name: String,
    pub difficulty: Difficulty,
    pub estimated_time_minutes: i32,
    pub approved: bool,
    pub exercises: Vec<RoutineExerciseInput>,
}

/// 200 body for an updated routine: the submitted fields echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedRoutine {
    pub id: i32,
    pub name: String,
    pub difficulty: Difficulty,
    pub estimated_time_minutes: i32,
    pub exercises: Vec<RoutineExerciseInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RoutinePayload {
        RoutinePayload {
            name: Some("Leg Day".to_string()),
            difficulty: Some("Intermediate".to_string()),
            estimated_time_minutes: Some(45),
            exercises: Some(vec![
                RoutineExerciseInput { exercise_id: 5, sets: Some(4) },
                RoutineExerciseInput { exercise_id: 7, sets: Some(3) },
            ]),
        }
    }

    #[test]
    fn difficulty_parses_exact_labels_only() {
        assert_eq!("Beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("beginner".parse::<Difficulty>().is_err());
        assert!("Expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn validate_accepts_complete_payload() {
        let new = payload().validate().unwrap();
        assert_eq!(new.name, "Leg Day");
        assert_eq!(new.difficulty, Difficulty::Intermediate);
        assert_eq!(new.exercises.unwrap().len(), 2);
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let mut missing_name = payload();
        missing_name.name = None;
        assert_eq!(
            missing_name.validate().unwrap_err(),
            "Name, difficulty, and estimated time are required"
        );

        let mut missing_time = payload();
        missing_time.estimated_time_minutes = None;
        assert!(missing_time.validate().is_err());
    }

    #[test]
    fn validate_allows_zero_estimated_time() {
        let mut zero_time = payload();
        zero_time.estimated_time_minutes = Some(0);
        assert_eq!(zero_time.validate().unwrap().estimated_time_minutes, 0);
    }

    #[test]
    fn validate_rejects_unknown_difficulty() {
        let mut bad = payload();
        bad.difficulty = Some("Extreme".to_string());
        assert_eq!(
            bad.validate().unwrap_err(),
            "Difficulty must be Beginner, Intermediate, or Advanced"
        );
    }

    #[test]
    fn reorder_requires_a_non_empty_array() {
        let missing = UpdateExerciseOrderRequest { exercise_orders: None };
        assert_eq!(missing.validate().unwrap_err(), "Exercise orders array is required");

        let empty = UpdateExerciseOrderRequest { exercise_orders: Some(Vec::new()) };
        assert_eq!(empty.validate().unwrap_err(), "Exercise orders array is required");
    }

    #[test]
    fn reorder_requires_both_fields_on_every_item() {
        let request = UpdateExerciseOrderRequest {
            exercise_orders: Some(vec![
                ExerciseOrderInput { exercise_id: Some(5), exercise_order: Some(2) },
                ExerciseOrderInput { exercise_id: Some(7), exercise_order: None },
            ]),
        };
        assert_eq!(
            request.validate().unwrap_err(),
            "Each item must have exercise_id and exercise_order"
        );
    }

    #[test]
    fn reorder_flattens_into_pairs() {
        let request = UpdateExerciseOrderRequest {
            exercise_orders: Some(vec![
                ExerciseOrderInput { exercise_id: Some(5), exercise_order: Some(2) },
                ExerciseOrderInput { exercise_id: Some(7), exercise_order: Some(1) },
            ]),
        };
        assert_eq!(request.validate().unwrap(), vec![(5, 2), (7, 1)]);
    }
}

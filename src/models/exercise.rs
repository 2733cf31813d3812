use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::validation::text_present;

/// Exercise row as the catalog read queries return it: the core columns plus
/// the joined muscle group name and the reaction counts.
#[derive(Debug, Clone, FromRow)]
pub struct ExerciseRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub difficulty: String,
    pub muscle_group_id: Option<i32>,
    pub approved: bool,
    pub rank: Option<i32>,
    pub muscle_group_name: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
}

impl ExerciseRow {
    /// Attach the tagged muscle names fetched separately from the
    /// association table.
    pub fn with_muscles(self, muscles: Vec<String>) -> ExerciseWithDetails {
        ExerciseWithDetails {
            id: self.id,
            name: self.name,
            description: self.description,
            video_link: self.video_link,
            difficulty: self.difficulty,
            muscle_group_id: self.muscle_group_id,
            approved: self.approved,
            rank: self.rank,
            muscle_group_name: self.muscle_group_name,
            muscles,
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }
}

/// Full exercise representation served by every exercise read endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseWithDetails {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub difficulty: String,
    pub muscle_group_id: Option<i32>,
    pub approved: bool,
    pub rank: Option<i32>,
    pub muscle_group_name: Option<String>,
    pub muscles: Vec<String>,
    pub likes: i64,
    pub dislikes: i64,
}

/// Body of POST /exercises. Fields are optional so presence can be checked
/// explicitly instead of failing at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub difficulty: Option<String>,
    pub muscle_group_id: Option<i32>,
    pub muscle_ids: Option<Vec<i32>>,
}

impl CreateExerciseRequest {
    pub fn validate(&self) -> Result<NewExercise, &'static str> {
        if !text_present(&self.name) || !text_present(&self.difficulty) {
            return Err("Name and difficulty are required");
        }

        Ok(NewExercise {
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone(),
            video_link: self.video_link.clone(),
            difficulty: self.difficulty.clone().unwrap_or_default(),
            muscle_group_id: self.muscle_group_id,
            muscle_ids: self.muscle_ids.clone().unwrap_or_default(),
        })
    }
}

/// Validated form of a create request, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub difficulty: String,
    pub muscle_group_id: Option<i32>,
    pub muscle_ids: Vec<i32>,
}

/// Body of PUT /exercises/:id. Only these four columns are writable after
/// creation; approval flips through its own endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub muscle_group_id: Option<i32>,
    pub rank: Option<i32>,
}

/// 201 body for a created exercise: the submitted fields echoed back with the
/// assigned id. New exercises always start unapproved.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedExercise {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub difficulty: String,
    pub muscle_group_id: Option<i32>,
    pub muscle_ids: Vec<i32>,
    pub approved: bool,
}

/// 200 body for an updated exercise: the submitted fields echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedExercise {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub muscle_group_id: Option<i32>,
    pub rank: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateExerciseRequest {
        CreateExerciseRequest {
            name: Some("Bench Press".to_string()),
            description: Some("Barbell press on a flat bench".to_string()),
            video_link: None,
            difficulty: Some("Intermediate".to_string()),
            muscle_group_id: Some(1),
            muscle_ids: Some(vec![3, 7]),
        }
    }

    #[test]
    fn validate_accepts_complete_request() {
        let new = full_request().validate().unwrap();
        assert_eq!(new.name, "Bench Press");
        assert_eq!(new.difficulty, "Intermediate");
        assert_eq!(new.muscle_ids, vec![3, 7]);
    }

    #[test]
    fn validate_defaults_missing_muscle_ids_to_empty() {
        let mut request = full_request();
        request.muscle_ids = None;
        let new = request.validate().unwrap();
        assert!(new.muscle_ids.is_empty());
    }

    #[test]
    fn validate_rejects_missing_name() {
        let mut request = full_request();
        request.name = None;
        assert_eq!(request.validate().unwrap_err(), "Name and difficulty are required");
    }

    #[test]
    fn validate_rejects_blank_difficulty() {
        let mut request = full_request();
        request.difficulty = Some(String::new());
        assert!(request.validate().is_err());
    }
}

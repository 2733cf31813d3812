//! Wire-level shapes: request bodies as clients send them and response
//! bodies as the catalog serves them.

use pretty_assertions::assert_eq;
use serde_json::json;

use gym_catalog::models::{
    CreateExerciseRequest, CreatedRoutine, Difficulty, ExerciseRow, ReactionCounts,
    RoutineExerciseInput, RoutinePayload, UpdateExerciseOrderRequest,
};

#[test]
fn routine_payload_deserializes_snake_case_body() {
    let body = json!({
        "name": "Leg Day",
        "difficulty": "Intermediate",
        "estimated_time_minutes": 45,
        "exercises": [
            { "exercise_id": 5, "sets": 4 },
            { "exercise_id": 7, "sets": 3 }
        ]
    });

    let payload: RoutinePayload = serde_json::from_value(body).unwrap();
    let new = payload.validate().unwrap();

    assert_eq!(new.name, "Leg Day");
    assert_eq!(new.difficulty, Difficulty::Intermediate);
    assert_eq!(new.estimated_time_minutes, 45);
    assert_eq!(
        new.exercises.unwrap(),
        vec![
            RoutineExerciseInput { exercise_id: 5, sets: Some(4) },
            RoutineExerciseInput { exercise_id: 7, sets: Some(3) },
        ]
    );
}

#[test]
fn routine_payload_tolerates_missing_sets() {
    let body = json!({
        "name": "Quick Core",
        "difficulty": "Beginner",
        "estimated_time_minutes": 15,
        "exercises": [{ "exercise_id": 9 }]
    });

    let payload: RoutinePayload = serde_json::from_value(body).unwrap();
    let new = payload.validate().unwrap();

    assert_eq!(new.exercises.unwrap()[0].sets, None);
}

#[test]
fn reorder_body_uses_camel_case_array_key() {
    let body = json!({
        "exerciseOrders": [
            { "exercise_id": 5, "exercise_order": 2 },
            { "exercise_id": 7, "exercise_order": 1 }
        ]
    });

    let request: UpdateExerciseOrderRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.validate().unwrap(), vec![(5, 2), (7, 1)]);

    let snake: UpdateExerciseOrderRequest =
        serde_json::from_value(json!({ "exercise_orders": [] })).unwrap();
    assert!(snake.exercise_orders.is_none());
}

#[test]
fn created_routine_serializes_submission_with_moderation_flag() {
    let created = CreatedRoutine {
        id: 12,
        name: "Leg Day".to_string(),
        difficulty: Difficulty::Intermediate,
        estimated_time_minutes: 45,
        approved: false,
        exercises: vec![
            RoutineExerciseInput { exercise_id: 5, sets: Some(4) },
            RoutineExerciseInput { exercise_id: 7, sets: Some(3) },
        ],
    };

    assert_eq!(
        serde_json::to_value(&created).unwrap(),
        json!({
            "id": 12,
            "name": "Leg Day",
            "difficulty": "Intermediate",
            "estimated_time_minutes": 45,
            "approved": false,
            "exercises": [
                { "exercise_id": 5, "sets": 4 },
                { "exercise_id": 7, "sets": 3 }
            ]
        })
    );
}

#[test]
fn exercise_details_serialize_with_muscles_and_counts() {
    let row = ExerciseRow {
        id: 3,
        name: "Squat".to_string(),
        description: Some("Barbell back squat".to_string()),
        video_link: None,
        difficulty: "Intermediate".to_string(),
        muscle_group_id: Some(2),
        approved: true,
        rank: Some(1),
        muscle_group_name: Some("Legs".to_string()),
        likes: 4,
        dislikes: 1,
    };

    let details = row.with_muscles(vec!["Quadriceps".to_string(), "Glutes".to_string()]);

    assert_eq!(
        serde_json::to_value(&details).unwrap(),
        json!({
            "id": 3,
            "name": "Squat",
            "description": "Barbell back squat",
            "video_link": null,
            "difficulty": "Intermediate",
            "muscle_group_id": 2,
            "approved": true,
            "rank": 1,
            "muscle_group_name": "Legs",
            "muscles": ["Quadriceps", "Glutes"],
            "likes": 4,
            "dislikes": 1
        })
    );
}

#[test]
fn reaction_counts_serialize_as_likes_and_dislikes() {
    let counts = ReactionCounts { likes: 7, dislikes: 2 };

    assert_eq!(
        serde_json::to_value(counts).unwrap(),
        json!({ "likes": 7, "dislikes": 2 })
    );
}

#[test]
fn exercise_create_body_accepts_partial_optional_fields() {
    let body = json!({
        "name": "Dead Bug",
        "difficulty": "Beginner"
    });

    let request: CreateExerciseRequest = serde_json::from_value(body).unwrap();
    let new = request.validate().unwrap();

    assert_eq!(new.name, "Dead Bug");
    assert_eq!(new.description, None);
    assert!(new.muscle_ids.is_empty());
}

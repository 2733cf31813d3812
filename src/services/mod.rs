// Business logic services

pub mod exercise_service;
pub mod muscle_service;
pub mod routine_service;

pub use exercise_service::ExerciseService;
pub use muscle_service::MuscleService;
pub use routine_service::RoutineService;

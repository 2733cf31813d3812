// API routes and handlers

pub mod error;
pub mod exercises;
pub mod health;
pub mod muscles;
pub mod routes;
pub mod routines;

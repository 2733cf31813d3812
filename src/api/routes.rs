use axum::{routing::get, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::exercises::exercise_routes;
use super::health::health_check;
use super::muscles::muscle_routes;
use super::routines::routine_routes;

/// Permissive CORS: the catalog is a public JSON API consumed from browser
/// frontends on other origins.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_routes(db: PgPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(muscle_routes(db.clone()))
        .nest("/exercises", exercise_routes(db.clone()))
        .nest("/routines", routine_routes(db))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}

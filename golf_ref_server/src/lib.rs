use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod state;
pub mod response;
pub mod auth;
pub mod tournament;
pub mod assignment;
pub mod availability;
pub mod users;
pub mod notify;

use state::AppState;

pub async fn app() -> Router {
    app_with_state(AppState::new().await).await
}

pub async fn app_with_state(state: AppState) -> Router {
    let api_router = Router::new()
        .merge(auth::router())
        .merge(tournament::router())
        .merge(assignment::router())
        .merge(availability::router())
        .merge(users::router())
        .merge(notify::router());

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

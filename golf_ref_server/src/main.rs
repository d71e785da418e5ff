use std::net::SocketAddr;

use golf_ref_server::{app_with_state, config::read_config, state::AppState};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() {
    let config = read_config();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging_config))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new_with_config(&config).await;
    let app = app_with_state(state).await;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid host/port in config");

    tracing::info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

//! Chorechart Web Server
//!
//! Axum server rendering the chore catalog, the claim forms and the weekly
//! leaderboard as HTML.

pub mod error;
pub mod routes;
pub mod state;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use chorechart_core::tally::TallyWindow;
use chorechart_db::DbPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/week", get(routes::home::week))
        // Chores
        .route("/chores", get(routes::chores::list))
        .route(
            "/chore/create",
            get(routes::chores::new_form).post(routes::chores::create),
        )
        .route(
            "/chore/edit/{id}",
            get(routes::chores::edit_form).post(routes::chores::edit),
        )
        // Claims
        .route("/claim/create", post(routes::claims::create))
        .route(
            "/claim/edit/{id}",
            get(routes::claims::edit_form).post(routes::claims::edit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server until Ctrl+C.
pub async fn run_server(
    db: Arc<DbPool>,
    window: TallyWindow,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::new(db, window);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(
        days = window.days,
        boundary = window.boundary.as_str(),
        "Web server listening on http://{}:{}",
        host,
        port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
    }
}

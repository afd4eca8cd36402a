use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod html;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/quotes", get(handlers::get_quotes))
        .route("/api/summarize", post(handlers::summarize))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> nq_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

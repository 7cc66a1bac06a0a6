use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::error::AppError;
use crate::routes;
use crate::state::SharedState;

/// Assemble the API router
pub fn router(state: SharedState) -> Router {
    // The site's pages are served separately, so the API stays open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/messages",
            get(routes::list_messages).post(routes::create_message),
        )
        .route("/api/chat", post(routes::chat))
        .route(
            "/api/photos",
            get(routes::list_photos).post(routes::upload_photos),
        )
        .route("/api/photos/progress", get(routes::upload_progress))
        .route("/api/photos/{index}", delete(routes::delete_photo))
        .route(
            "/api/guestbook",
            get(routes::list_guestbook).post(routes::create_guestbook),
        )
        .route("/api/guestbook/{id}", delete(routes::delete_guestbook))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives
pub async fn serve(state: SharedState) -> Result<(), AppError> {
    let address = format!("0.0.0.0:{}", state.config.port);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Storage(format!("cannot bind {}: {}", address, e)))?;
    log::info!("server running on {}", address);
    log::info!("API available at http://localhost:{}/api", state.config.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Storage(format!("server error: {}", e)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        log::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        log::info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

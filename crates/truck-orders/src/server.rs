use crate::config::Config;
use crate::lifecycle::OrderSystem;
use crate::routes::{
    clear_orders_handler, create_order_handler, delete_order_handler, get_order_handler,
    health_handler, list_orders_handler, route_not_found_handler, update_order_handler,
};
use crate::state::AppState;
use axum::{
    http::Method,
    routing::get,
    Router,
};
use std::io;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tokio::task::JoinError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] io::Error),

    #[error("Order actor failed: {0}")]
    Actor(#[from] JoinError),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_handler))
        .route("/api", get(health_handler))
        .route("/api/health", get(health_handler))
        .route(
            "/api/orders",
            get(list_orders_handler)
                .post(create_order_handler)
                .delete(clear_orders_handler),
        )
        .route(
            "/api/orders/{id}",
            get(get_order_handler)
                .patch(update_order_handler)
                .delete(delete_order_handler),
        )
        .fallback(route_not_found_handler)
        .method_not_allowed_fallback(route_not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the API until Ctrl+C or SIGTERM, then stops the order actor.
pub async fn start_server(config: Config) -> Result<(), ServerError> {
    info!("Initializing order system...");
    let system = OrderSystem::from_config(&config);
    info!(backend = system.storage.backend, "Order store selected");

    let address = SocketAddr::new(config.host, config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;
    info!("Server running on {address}");

    let app = router(system.app_state(config.production));
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("Server shutting down...");
    system.shutdown().await?;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

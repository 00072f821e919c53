use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;

    tracing::info!("connecting to database");
    let pool =
        serein_store::pool::connect(&config.database_url, config.max_db_connections).await?;
    serein_store::seed::ensure_seed(&pool, &config.bootstrap_admin_email).await?;

    let port = config.port;
    let state = AppState { pool, config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Admin surface: user accounts and role assignment.
    let admin = Router::new()
        .route("/users", get(routes::users::list_users))
        .route("/users", post(routes::users::create_user))
        .route("/users/{id}", get(routes::users::get_user))
        .route("/users/{id}", put(routes::users::update_user))
        .route("/users/{id}", delete(routes::users::delete_user))
        .route("/users/{id}/promote", post(routes::users::promote_user))
        .route("/users/{id}/demote", post(routes::users::demote_user))
        .route_layer(axum_mw::from_fn(middleware::auth::require_admin));

    // Everything behind a bearer token.
    let protected = Router::new()
        .route("/responses", get(routes::responses::list_responses))
        .route("/responses", post(routes::responses::submit))
        .route("/responses/{id}", get(routes::responses::get_response))
        .route("/responses/{id}", delete(routes::responses::delete_response))
        .merge(admin)
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Inventory (no auth — public reference data)
        .route("/events", get(routes::events::list_events))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        tracing::info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use axum::{routing::get, Router};
use configuration::ServerSettings;
use service::Services;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

/// Builds the full route table over `services`.
pub fn router(services: Services, request_timeout: Duration) -> Router {
    let app_state = Arc::new(AppState { services });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/sheets", get(handlers::sheets::list).post(handlers::sheets::create))
        .route(
            "/api/sheets/:id",
            get(handlers::sheets::get)
                .put(handlers::sheets::update)
                .delete(handlers::sheets::delete),
        )
        .route("/api/sheets/:id/shots", get(handlers::shots::list_by_sheet))
        .route("/api/roasters", get(handlers::roasters::list).post(handlers::roasters::create))
        .route(
            "/api/roasters/:id",
            get(handlers::roasters::get)
                .put(handlers::roasters::update)
                .delete(handlers::roasters::delete),
        )
        .route("/api/beans", get(handlers::beans::list).post(handlers::beans::create))
        .route(
            "/api/beans/:id",
            get(handlers::beans::get)
                .put(handlers::beans::update)
                .delete(handlers::beans::delete),
        )
        .route("/api/shots", get(handlers::shots::list).post(handlers::shots::create))
        .route(
            "/api/shots/:id",
            get(handlers::shots::get)
                .put(handlers::shots::update)
                .delete(handlers::shots::delete),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        // Logs every incoming request and its outcome.
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until the process is stopped.
pub async fn run_server(settings: &ServerSettings, services: Services) -> anyhow::Result<()> {
    let addr = settings.address()?;
    let app = router(services, settings.request_timeout());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router, ServiceExt,
};
use database::{connect, run_migrations, ParticipantStore, PgParticipantStore};
use roster::RosterService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};
use validator::UniqueSource;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub roster: RosterService,
    pub unique: Arc<dyn UniqueSource>,
}

impl AppState {
    /// Builds the state from a single store handle serving both seams: the
    /// roster service and the validator's uniqueness lookups.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: ParticipantStore + UniqueSource + 'static,
    {
        Self {
            roster: RosterService::new(store.clone()),
            unique: store,
        }
    }
}

/// Builds the application router with all middleware attached.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    // A wrong method on a known path is still "route not found" to the
    // client, hence the per-route method fallbacks.
    Router::new()
        .route("/", get(handlers::index).fallback(handlers::not_found))
        .route(
            "/assets/app.js",
            get(handlers::client_script).fallback(handlers::not_found),
        )
        .route(
            "/api/users",
            post(handlers::store_user).fallback(handlers::not_found),
        )
        .route(
            "/api/reset",
            post(handlers::reset).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        // A panicking handler becomes a 500 with a plain-text body instead of
        // a dropped connection.
        .layer(CatchPanicLayer::new())
        .layer(DefaultBodyLimit::max(16 * 1024)) // Roster payloads are tiny.
}

/// Wraps the router so trailing slashes are trimmed before routing
/// (`/api/users/` routes like `/api/users`; the root path is left alone).
pub fn service(state: Arc<AppState>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app(state))
}

/// Binds the listener and serves the application until shutdown.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(service(state)),
    )
    .await?;

    Ok(())
}

/// The main function to configure and run the web server: connect, migrate,
/// and serve. A store failure here is fatal; the process must not start
/// serving requests without a working store.
pub async fn run(settings: &configuration::Settings) -> anyhow::Result<()> {
    let db_pool = connect(&settings.database).await?;
    run_migrations(&db_pool).await?;
    let store = Arc::new(PgParticipantStore::new(db_pool));

    let state = Arc::new(AppState::new(store));
    run_server(settings.server.socket_addr()?, state).await
}

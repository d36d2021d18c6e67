//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, JwtService, PasswordEncoder, UserDetailsService};
use crate::config::Config;
use crate::error::Result;
use crate::services::{SessionService, TeacherService, UserService};
use crate::store::Store;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub jwt: JwtService,
    pub passwords: PasswordEncoder,
    pub user_details: UserDetailsService,
    pub sessions: SessionService,
    pub teachers: TeacherService,
    pub users: UserService,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        Self {
            jwt: JwtService::from_config(&config.security),
            passwords: PasswordEncoder::new(config.security.bcrypt_cost),
            user_details: UserDetailsService::new(store.users.clone()),
            sessions: SessionService::new(store.sessions, store.users.clone()),
            teachers: TeacherService::new(store.teachers),
            users: UserService::new(store.users),
            config,
        }
    }
}

/// Open the configured store and wire up the services
pub async fn build_state(config: Config) -> Result<SharedState> {
    if config.security.uses_default_secret() {
        tracing::warn!("Using the default JWT secret; set security.jwt_secret in yoga.toml");
    }

    let passwords = PasswordEncoder::new(config.security.bcrypt_cost);
    let store = Store::open(&config.database, &passwords).await?;

    Ok(Arc::new(AppState::new(config, store)))
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = build_state(config).await?;

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, state).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        // Session routes
        .route(
            "/api/session",
            get(routes::list_sessions).post(routes::create_session),
        )
        .route(
            "/api/session/{id}",
            get(routes::get_session)
                .put(routes::update_session)
                .delete(routes::delete_session),
        )
        .route(
            "/api/session/{id}/participate/{user_id}",
            post(routes::participate).delete(routes::no_longer_participate),
        )
        // Teacher routes
        .route("/api/teacher", get(routes::list_teachers))
        .route("/api/teacher/{id}", get(routes::get_teacher))
        // User routes
        .route(
            "/api/user/{id}",
            get(routes::get_user).delete(routes::delete_user),
        )
        .route_layer(middleware::from_fn(auth::require_auth));

    Router::new()
        // Public routes
        .route("/api/health", get(routes::health))
        .route("/api/auth/login", post(routes::login))
        .route("/api/auth/register", post(routes::register))
        .merge(protected)
        // Middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

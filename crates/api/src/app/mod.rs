//! HTTP API application wiring (Axum router + shared context).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use usergate_auth::Authenticator;
use usergate_infra::UserStore;

use crate::config::ServerConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Immutable per-process context handed to every handler.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppContext {
    auth: Arc<Authenticator>,
    users: Arc<dyn UserStore>,
}

impl AppContext {
    pub fn new(auth: Authenticator, users: Arc<dyn UserStore>) -> Self {
        Self {
            auth: Arc::new(auth),
            users,
        }
    }

    /// Context for the single configured credential pair.
    pub fn from_config(config: &ServerConfig, users: Arc<dyn UserStore>) -> Self {
        let auth = Authenticator::with_static_credentials(
            config.username.clone(),
            config.password.clone(),
            config.jwt_secret.as_bytes(),
        );
        Self::new(auth, users)
    }

    pub fn auth(&self) -> &Authenticator {
        &self.auth
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(ctx: AppContext) -> Router {
    // Protected routes: every request passes the bearer-token stage first.
    let protected = routes::router().route_layer(axum::middleware::from_fn_with_state(
        ctx.clone(),
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/login", post(routes::auth::login))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(ctx)
}

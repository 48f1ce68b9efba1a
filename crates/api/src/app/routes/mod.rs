use axum::{Router, routing::get};

use crate::app::AppContext;

pub mod auth;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router<AppContext> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

pub mod auth;
pub mod health;

use axum::{routing::get, Router};

use crate::jobs::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/auth/providers", get(auth::handle_providers))
        // Jobs is the default controller, Index its default action
        .route("/", get(handlers::handle_index))
        .route("/Jobs", get(handlers::handle_index))
        .route("/Jobs/Index", get(handlers::handle_index))
        .route("/Jobs/Details/:id", get(handlers::handle_details))
        .route(
            "/Jobs/Create",
            get(handlers::handle_create_form).post(handlers::handle_create),
        )
        .route(
            "/Jobs/Edit/:id",
            get(handlers::handle_edit_form).post(handlers::handle_edit),
        )
        .route(
            "/Jobs/Delete/:id",
            get(handlers::handle_delete_form).post(handlers::handle_delete),
        )
        .with_state(state)
}

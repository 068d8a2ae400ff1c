// crates/clipforge-server/src/routes.rs
//
// The dispatch table: every method + path pattern maps to exactly one
// handler, all in one place. No handler registers itself anywhere else.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, SharedState};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/projects", post(handlers::create_projects))
        .route(
            "/projects/:id",
            get(handlers::get_project)
                .put(handlers::edit_project)
                .delete(handlers::delete_project),
        )
        .with_state(state)
}

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::container::Container;
use super::controller::{show_form, submit_listing};

/// The single-page form surface: the form itself and its submission target.
pub fn build_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/", get(show_form))
        .route("/generate", post(submit_listing))
        .with_state(container)
}

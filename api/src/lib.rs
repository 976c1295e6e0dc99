pub mod hackrx;
pub mod handlers;
pub mod reply;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use vertex_client::TextModel;

pub fn app(model: Arc<dyn TextModel>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/hackrx/run", post(handlers::run_submission))
        .with_state(model)
}

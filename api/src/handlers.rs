use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use vertex_client::TextModel;

use crate::hackrx;
use crate::reply;

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn run_submission(
    State(model): State<Arc<dyn TextModel>>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !hackrx::has_required_fields(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": hackrx::MISSING_FIELDS_ERROR})),
        );
    }

    let prompt = hackrx::build_prompt(&payload);

    let raw = match model.query(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("model query failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": e.to_string()})),
            );
        }
    };

    log::info!("raw model reply:\n{}", raw);

    match reply::parse_reply(&raw) {
        Ok(answers) => (StatusCode::OK, Json(answers)),
        Err(e) => {
            log::error!("model reply was not parseable: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
    }
}

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/messages", get(list_messages))
}

pub async fn send_message(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SendMessageRequest>,
) -> axum::response::Response {
    let reply = services.chat(&body.text);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "reply": dto::message_to_json(&reply) })),
    )
        .into_response()
}

pub async fn list_messages(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .chat_log()
        .iter()
        .map(dto::message_to_json)
        .collect::<Vec<_>>();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "messages": items })),
    )
        .into_response()
}

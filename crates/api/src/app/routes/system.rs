use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "API de Qhatu Marca - Backend activo" }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

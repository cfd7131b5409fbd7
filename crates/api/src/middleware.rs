//! Request-level middleware.

use axum::{extract::Request, middleware::Next, response::Response};

/// Log every request with its method, path and response status.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    tracing::info!(%method, %uri, status = %response.status().as_u16(), "request");
    response
}

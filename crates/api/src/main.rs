use std::sync::Arc;

#[tokio::main]
async fn main() {
    qhatu_observability::init();

    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
            tracing::warn!("PORT is not a valid port number; using 3000");
            3000
        }),
        Err(_) => 3000,
    };

    let services = Arc::new(qhatu_api::app::services::AppServices::new());
    let app = qhatu_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{port}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

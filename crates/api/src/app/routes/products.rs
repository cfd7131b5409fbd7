use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use qhatu_catalog::{CatalogQuery, CategoryFilter, SortOption};
use qhatu_core::ProductCode;
use qhatu_infra::CatalogStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/codeqr/:code", get(get_by_code))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    match services.store().insert(body.into()) {
        Ok(product) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "product created",
                "product": dto::product_to_json(&product),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListProductsParams>,
) -> axum::response::Response {
    let sort = match params.sort.as_deref() {
        None => SortOption::default(),
        Some(raw) => match raw.parse::<SortOption>() {
            Ok(sort) => sort,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };

    let query = CatalogQuery {
        search: params.q.unwrap_or_default(),
        category: CategoryFilter::parse(params.category.as_deref()),
        sort,
    };

    let items = services
        .catalog_view(&query)
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_by_code(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    let code = match ProductCode::new(code) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().find_by_code(&code) {
        Some(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

use serde::Deserialize;

use qhatu_catalog::{NewProduct, Product};
use qhatu_chat::ChatMessage;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price_cents: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            code: req.code,
            name: req.name,
            description: req.description,
            price_cents: req.price_cents,
            image_url: req.image_url,
            stock: req.stock,
            category: req.category,
        }
    }
}

/// Query parameters of the catalog listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    /// Free-text search; absent means no narrowing.
    pub q: Option<String>,
    /// Category tag; absent or `all` means no narrowing.
    pub category: Option<String>,
    /// One of `name`, `price-low`, `price-high`, `newest`; defaults to `name`.
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "code": p.code.as_str(),
        "name": p.name,
        "description": p.description,
        "price_cents": p.price_cents,
        "image_url": p.image_url,
        "stock": p.stock,
        "category": p.category,
        "created_at": p.created_at.to_rfc3339(),
    })
}

pub fn message_to_json(m: &ChatMessage) -> serde_json::Value {
    serde_json::json!({
        "id": m.id.to_string(),
        "text": m.text,
        "from_bot": m.from_bot,
        "sent_at": m.sent_at.to_rfc3339(),
    })
}

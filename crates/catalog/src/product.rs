use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qhatu_core::{DomainError, DomainResult, Entity, ProductCode};

/// Catalog entry as stored and served.
///
/// Read-only once inserted: the catalog never mutates or deletes records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: ProductCode,
    pub name: String,
    pub description: String,
    /// Price in the smallest currency unit (e.g. cents).
    pub price_cents: u64,
    pub image_url: Option<String>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

/// Insert payload before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
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

impl NewProduct {
    /// Validate the payload and stamp the creation time.
    ///
    /// Code, name and description must be non-blank; the price must be
    /// greater than zero. The caller supplies `created_at` so this stays
    /// clock-free.
    pub fn validate(self, created_at: DateTime<Utc>) -> DomainResult<Product> {
        let NewProduct {
            code,
            name,
            description,
            price_cents,
            image_url,
            stock,
            category,
        } = self;

        let code = ProductCode::new(code)?;

        if name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        if description.trim().is_empty() {
            return Err(DomainError::validation("description is required"));
        }

        if price_cents == 0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }

        Ok(Product {
            code,
            name,
            description,
            price_cents,
            image_url,
            stock,
            category,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewProduct {
        NewProduct {
            code: "QR-001".to_string(),
            name: "Soda".to_string(),
            description: "Gaseosa de 500ml".to_string(),
            price_cents: 500,
            image_url: None,
            stock: Some(12),
            category: Some("agua".to_string()),
        }
    }

    #[test]
    fn valid_payload_becomes_product() {
        let now = Utc::now();
        let product = payload().validate(now).unwrap();
        assert_eq!(product.code.as_str(), "QR-001");
        assert_eq!(product.name, "Soda");
        assert_eq!(product.price_cents, 500);
        assert_eq!(product.created_at, now);
    }

    #[test]
    fn blank_code_is_rejected() {
        let mut p = payload();
        p.code = "   ".to_string();
        let err = p.validate(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCode(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut p = payload();
        p.name = "".to_string();
        let err = p.validate(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut p = payload();
        p.description = " ".to_string();
        let err = p.validate(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut p = payload();
        p.price_cents = 0;
        let err = p.validate(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn optional_fields_pass_through() {
        let mut p = payload();
        p.image_url = Some("https://example.com/soda.png".to_string());
        let product = p.validate(Utc::now()).unwrap();
        assert_eq!(product.image_url.as_deref(), Some("https://example.com/soda.png"));
        assert_eq!(product.stock, Some(12));
        assert_eq!(product.category.as_deref(), Some("agua"));
    }
}

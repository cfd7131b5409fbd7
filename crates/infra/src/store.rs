use std::sync::{Arc, RwLock};

use chrono::Utc;

use qhatu_catalog::{NewProduct, Product};
use qhatu_core::{DomainError, DomainResult, ProductCode};

/// Catalog storage abstraction.
///
/// Insertion validates the payload (blank required fields, zero price) and
/// rejects duplicate codes; stored products are never mutated or deleted.
pub trait CatalogStore: Send + Sync {
    /// All products, in insertion order.
    fn list(&self) -> Vec<Product>;

    fn find_by_code(&self, code: &ProductCode) -> Option<Product>;

    fn insert(&self, new: NewProduct) -> DomainResult<Product>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn list(&self) -> Vec<Product> {
        (**self).list()
    }

    fn find_by_code(&self, code: &ProductCode) -> Option<Product> {
        (**self).find_by_code(code)
    }

    fn insert(&self, new: NewProduct) -> DomainResult<Product> {
        (**self).insert(new)
    }
}

/// In-memory catalog store.
///
/// Stands in for the document collection of the hosted deployment; the trait
/// seam keeps a durable store pluggable.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of products (tests, demo data).
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            inner: RwLock::new(products.into_iter().collect()),
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn list(&self) -> Vec<Product> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn find_by_code(&self, code: &ProductCode) -> Option<Product> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|p| &p.code == code)
            .cloned()
    }

    fn insert(&self, new: NewProduct) -> DomainResult<Product> {
        let product = new.validate(Utc::now())?;

        let mut items = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if items.iter().any(|p| p.code == product.code) {
            return Err(DomainError::conflict(format!(
                "product code already exists: {}",
                product.code
            )));
        }

        items.push(product.clone());
        tracing::info!(code = %product.code, "product inserted");
        Ok(product)
    }
}

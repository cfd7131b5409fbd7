use std::sync::Mutex;

use qhatu_catalog::Product;
use qhatu_core::{DomainResult, ProductCode};

use crate::store::CatalogStore;

/// Suppresses repeat deliveries of the same decoded code.
///
/// A camera keeps emitting the code while pointed at one QR; one physical
/// scan should trigger one lookup. The gate remembers the last accepted code
/// and drops repeats until re-armed.
#[derive(Debug, Default)]
pub struct ScanGate {
    last: Mutex<Option<ProductCode>>,
}

impl ScanGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a decoded payload. `Ok(None)` means a repeat of the previously
    /// accepted code; a blank payload is an error.
    pub fn accept(&self, raw: &str) -> DomainResult<Option<ProductCode>> {
        let code = ProductCode::new(raw)?;

        let mut last = self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if last.as_ref() == Some(&code) {
            return Ok(None);
        }

        *last = Some(code.clone());
        Ok(Some(code))
    }

    /// Forget the last code so the same QR can be scanned again.
    pub fn rearm(&self) {
        *self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Result of one scan delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Repeat of the previous code; nothing to do.
    Repeat,
    /// Code parsed but no catalog entry matches it.
    Unknown(ProductCode),
    Found(Product),
}

/// One scanning session: de-duplication gate in front of a catalog lookup.
pub struct ScanSession<S> {
    gate: ScanGate,
    store: S,
}

impl<S: CatalogStore> ScanSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            gate: ScanGate::new(),
            store,
        }
    }

    pub fn scan(&self, raw: &str) -> DomainResult<ScanOutcome> {
        match self.gate.accept(raw)? {
            None => Ok(ScanOutcome::Repeat),
            Some(code) => match self.store.find_by_code(&code) {
                Some(product) => Ok(ScanOutcome::Found(product)),
                None => {
                    tracing::debug!(code = %code, "scanned code not in catalog");
                    Ok(ScanOutcome::Unknown(code))
                }
            },
        }
    }

    /// Allow the next delivery of the current code through again.
    pub fn rearm(&self) {
        self.gate.rearm();
    }
}

#[cfg(test)]
mod tests {
    use qhatu_catalog::NewProduct;

    use super::*;
    use crate::store::InMemoryCatalogStore;

    fn store_with_soda() -> InMemoryCatalogStore {
        let store = InMemoryCatalogStore::new();
        store
            .insert(NewProduct {
                code: "QR-001".to_string(),
                name: "Soda".to_string(),
                description: "Gaseosa".to_string(),
                price_cents: 500,
                image_url: None,
                stock: None,
                category: None,
            })
            .unwrap();
        store
    }

    #[test]
    fn first_delivery_looks_up_the_product() {
        let session = ScanSession::new(store_with_soda());
        match session.scan("QR-001").unwrap() {
            ScanOutcome::Found(p) => assert_eq!(p.name, "Soda"),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn repeats_are_suppressed_until_rearmed() {
        let session = ScanSession::new(store_with_soda());
        assert!(matches!(session.scan("QR-001").unwrap(), ScanOutcome::Found(_)));
        assert_eq!(session.scan("QR-001").unwrap(), ScanOutcome::Repeat);
        assert_eq!(session.scan("QR-001").unwrap(), ScanOutcome::Repeat);

        session.rearm();
        assert!(matches!(session.scan("QR-001").unwrap(), ScanOutcome::Found(_)));
    }

    #[test]
    fn a_different_code_passes_the_gate() {
        let session = ScanSession::new(store_with_soda());
        assert!(matches!(session.scan("QR-001").unwrap(), ScanOutcome::Found(_)));
        assert!(matches!(
            session.scan("QR-999").unwrap(),
            ScanOutcome::Unknown(_)
        ));
        // The gate now remembers QR-999, so the soda code is fresh again.
        assert!(matches!(session.scan("QR-001").unwrap(), ScanOutcome::Found(_)));
    }

    #[test]
    fn unknown_code_is_not_an_error() {
        let session = ScanSession::new(store_with_soda());
        let code = ProductCode::new("QR-404").unwrap();
        assert_eq!(session.scan("QR-404").unwrap(), ScanOutcome::Unknown(code));
    }

    #[test]
    fn blank_payload_is_rejected() {
        let session = ScanSession::new(store_with_soda());
        assert!(session.scan("   ").is_err());
    }
}

//! `qhatu-infra` — infrastructure collaborators of the catalog core.
//!
//! The catalog store behind a trait (in-memory implementation here; a durable
//! one plugs into the same seam) and the scan de-duplication gate.

pub mod scan;
pub mod store;

pub use scan::{ScanGate, ScanOutcome, ScanSession};
pub use store::{CatalogStore, InMemoryCatalogStore};

//! redezeit-store – Versionierter Dokument-Store mit Aenderungs-Feed
//!
//! Dieses Crate implementiert:
//! - RecordStore-Trait: versionierte Lese-/Schreibzugriffe auf JSON-Dokumente
//! - MemoryStore: In-Memory-Implementierung (DashMap + Broadcast-Events)
//! - Optimistische Nebenlaeufigkeitskontrolle ueber Dokumentversionen
//!
//! Dokumente sind unter String-Schluesseln wie `rooms/<id>` abgelegt;
//! Feld-Schreibvorgaenge adressieren ein Feld per JSON-Zeiger innerhalb
//! des Dokuments und aktualisieren das Dokument in einem Schritt.

pub mod dokument;
pub mod error;
pub mod store;

// Bequeme Re-Exporte
pub use dokument::{feld_setzen, Dokument, StoreEvent, Version};
pub use error::{StoreError, StoreResult};
pub use store::{MemoryStore, RecordStore};

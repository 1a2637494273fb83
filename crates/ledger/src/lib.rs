//! redezeit-ledger – Redezeit-Budgets fuer Sprecher
//!
//! Dieses Crate implementiert:
//! - SprecherGrant: Rede-Erlaubnis mit absolutem Ablaufzeitpunkt
//! - Abklingregel: pauschale Verlaengerung bei Daumen hoch, gekappter
//!   Abzug bei Daumen runter
//! - LedgerService: Anfangsbudget vergeben und Feedback anwenden, als
//!   versionierte Schreibvorgaenge gegen das Raum-Dokument im Store
//!
//! # Beispiel
//!
//! ```no_run
//! use std::sync::Arc;
//! use redezeit_ledger::LedgerService;
//! use redezeit_store::MemoryStore;
//! use redezeit_core::{jetzt_ms, RoomId, UserId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(MemoryStore::neu());
//!     let ledger = LedgerService::neu(store);
//!
//!     let room_id = RoomId::new();
//!     let sprecher = UserId::new();
//!
//!     // Anfangsbudget beim Raumbeitritt
//!     let grant = ledger
//!         .initialbudget_gewaehren(&room_id, sprecher, jetzt_ms(), 10)
//!         .await;
//!
//!     // Peer-Feedback verschiebt den Ablaufzeitpunkt
//!     let grant = ledger
//!         .feedback_anwenden(&room_id, &sprecher, "thumbsUp", jetzt_ms())
//!         .await;
//! }
//! ```

pub mod error;
pub mod grant;
pub mod regel;
pub mod service;

// Bequeme Re-Exporte
pub use error::{LedgerError, LedgerResult};
pub use grant::{FeedbackAktion, SprecherGrant};
pub use service::{raum_schluessel, LedgerService};

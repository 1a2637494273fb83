//! redezeit-core – Gemeinsame Typen, Konfiguration und Logging
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von allen
//! anderen Redezeit-Crates gemeinsam genutzt werden.

pub mod config;
pub mod logging;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use config::AppConfig;
pub use types::{jetzt_ms, RoomId, UserId, ZeitstempelMs};

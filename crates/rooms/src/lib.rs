//! redezeit-rooms – Raumverwaltung und Benachrichtigungen
//!
//! Dieses Crate implementiert:
//! - RaumService: Raeume erstellen, bearbeiten, auflisten, beitreten,
//!   verlassen (mit Anfangsbudget-Vergabe ueber den Ledger)
//! - BenachrichtigungsService: Postfach-Eintraege pro Benutzer
//!
//! Mitgliedschaft, Presence und die eigentliche Audio-Verbindung liegen
//! beim externen Chat-SDK und sind hier bewusst nicht abgebildet.

pub mod benachrichtigung;
pub mod error;
pub mod service;
pub mod types;

// Bequeme Re-Exporte
pub use benachrichtigung::BenachrichtigungsService;
pub use error::{RaumError, RaumResult};
pub use service::RaumService;
pub use types::{Benachrichtigung, BenutzerProfil, Raum};

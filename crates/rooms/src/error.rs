//! Fehlertypen fuer das Rooms-Crate

use thiserror::Error;

/// Raum-Fehlertypen
#[derive(Debug, Error)]
pub enum RaumError {
    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    #[error("Raum nicht gefunden: {0}")]
    RaumNichtGefunden(String),

    #[error("Keine Berechtigung: {0}")]
    KeineBerechtigung(String),

    #[error("Ledger-Fehler: {0}")]
    Ledger(#[from] redezeit_ledger::LedgerError),

    #[error("Store-Fehler: {0}")]
    Store(#[from] redezeit_store::StoreError),

    #[error("JSON-Fehler: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RaumResult<T> = Result<T, RaumError>;

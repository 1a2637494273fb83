//! Fehlertypen fuer das Store-Crate

use thiserror::Error;

/// Store-Fehlertypen
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dokument nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Versionskonflikt bei '{schluessel}': erwartet={erwartet}, aktuell={aktuell}")]
    VersionsKonflikt {
        schluessel: String,
        erwartet: u64,
        aktuell: u64,
    },

    #[error("Ungueltiger Feldzeiger '{zeiger}': {grund}")]
    UngueltigerZeiger { zeiger: String, grund: String },

    #[error("JSON-Fehler: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persistenz-Fehler: {0}")]
    Persistenz(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Gibt true zurueck wenn es sich um einen Versionskonflikt handelt
    pub fn ist_konflikt(&self) -> bool {
        matches!(self, Self::VersionsKonflikt { .. })
    }
}

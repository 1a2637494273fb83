//! Fehlertypen fuer das Ledger-Crate

use redezeit_store::StoreError;
use thiserror::Error;

/// Ledger-Fehlertypen
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ungueltige Feedback-Aktion: '{0}'")]
    UngueltigeAktion(String),

    #[error("Kein aktiver Grant fuer Sprecher {speaker_id} in Raum {room_id}")]
    GrantNichtGefunden { room_id: String, speaker_id: String },

    #[error("Sprecher {speaker_id} hat bereits einen Grant in Raum {room_id}")]
    GrantBereitsVorhanden { room_id: String, speaker_id: String },

    #[error("Raum nicht gefunden: {0}")]
    RaumNichtGefunden(String),

    #[error("Schreibkonflikt, Berechnung muss vollstaendig wiederholt werden: {0}")]
    SchreibKonflikt(StoreError),

    #[error("Persistenz-Fehler: {0}")]
    Persistenz(StoreError),

    #[error("JSON-Fehler: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        if e.ist_konflikt() {
            Self::SchreibKonflikt(e)
        } else {
            Self::Persistenz(e)
        }
    }
}

impl LedgerError {
    /// Gibt true zurueck wenn der Aufrufer die gesamte Berechnung mit
    /// frischem Zeitstempel wiederholen sollte
    pub fn ist_wiederholbar(&self) -> bool {
        matches!(self, Self::SchreibKonflikt(_))
    }
}

//! Gemeinsame Identifikations- und Zeittypen fuer Redezeit
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! verschiedenen ID-Arten zur Compilezeit auszuschliessen. Zeitstempel
//! sind Millisekunden seit der Unix-Epoche, wie sie auch im Dokument-
//! Store persistiert werden.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Zeitstempel in Millisekunden seit der Unix-Epoche
///
/// Vorzeichenbehaftet, damit Differenzen (Restzeit) direkt darstellbar
/// sind. Eine abgelaufene Redezeit ergibt eine negative Restzeit.
pub type ZeitstempelMs = i64;

/// Gibt den aktuellen Zeitpunkt als Millisekunden seit der Epoche zurueck
pub fn jetzt_ms() -> ZeitstempelMs {
    chrono::Utc::now().timestamp_millis()
}

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Erstellt eine neue zufaellige UserId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Eindeutige Raum-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub Uuid);

impl RoomId {
    /// Erstellt eine neue zufaellige RoomId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room:{}", self.0)
    }
}

//! Domain-Typen fuer Raeume und Benachrichtigungen
//!
//! Die Serde-Feldnamen entsprechen den Dokumenten im Store
//! (`roomTitle`, `createdBy`, `notificationTitle`, ...), damit bestehende
//! Datensaetze ohne Migration lesbar bleiben.

use std::collections::HashMap;

use redezeit_core::{RoomId, UserId};
use redezeit_ledger::SprecherGrant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Oeffentliches Profil eines Benutzers, wie es in Raum-Dokumenten
/// eingebettet wird (die Raumliste zeigt Avatar und Namen des Erstellers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenutzerProfil {
    pub id: UserId,
    pub fullname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl BenutzerProfil {
    /// Erstellt ein Profil ohne Avatar
    pub fn neu(id: UserId, fullname: impl Into<String>) -> Self {
        Self {
            id,
            fullname: fullname.into(),
            avatar: None,
        }
    }
}

/// Ein Gespraechsraum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raum {
    /// Eindeutige ID, bei Erstellung vergeben, unveraenderlich
    pub id: RoomId,
    /// Anzeigetitel, nur durch den Ersteller aenderbar
    #[serde(rename = "roomTitle")]
    pub title: String,
    /// Profil des Erstellers, unveraenderlich
    #[serde(rename = "createdBy")]
    pub created_by: BenutzerProfil,
    /// Sprecher-Grants, indiziert nach Benutzer-UUID
    #[serde(default)]
    pub speakers: HashMap<String, SprecherGrant>,
}

impl Raum {
    /// Prueft ob der angegebene Benutzer der Ersteller ist
    pub fn ist_ersteller(&self, user_id: &UserId) -> bool {
        self.created_by.id == *user_id
    }
}

/// Eine Benachrichtigung im Postfach eines Benutzers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benachrichtigung {
    #[serde(rename = "notificationId")]
    pub id: Uuid,
    #[serde(rename = "notificationImage", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "notificationTitle")]
    pub title: String,
}

impl Benachrichtigung {
    /// Erstellt eine neue Benachrichtigung mit zufaelliger ID
    pub fn neu(image: Option<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            image,
            title: title.into(),
        }
    }
}

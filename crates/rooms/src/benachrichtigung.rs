//! BenachrichtigungsService – Postfach-Eintraege pro Benutzer
//!
//! Benachrichtigungen liegen als Liste unter `notifications/<user_id>`.
//! Es wird nur angehaengt, nie geloescht; die Liste ist das Postfach.

use std::sync::Arc;

use redezeit_core::UserId;
use redezeit_store::RecordStore;

use crate::{
    error::RaumResult,
    types::Benachrichtigung,
};

/// Store-Schluessel des Postfachs eines Benutzers
fn postfach_schluessel(user_id: &UserId) -> String {
    format!("notifications/{}", user_id.inner())
}

/// Verwaltet die Benachrichtigungs-Postfaecher
pub struct BenachrichtigungsService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> BenachrichtigungsService<S> {
    /// Erstellt einen neuen BenachrichtigungsService
    pub fn neu(store: Arc<S>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Haengt eine Benachrichtigung an das Postfach des Empfaengers an
    pub async fn hinzufuegen(
        &self,
        empfaenger: &UserId,
        image: Option<String>,
        nachricht: impl Into<String>,
    ) -> RaumResult<Benachrichtigung> {
        let schluessel = postfach_schluessel(empfaenger);
        let bestehend = self.store.lesen(&schluessel).await?;

        let (mut liste, version) = match bestehend {
            Some(dokument) => {
                let liste: Vec<Benachrichtigung> = serde_json::from_value(dokument.wert)?;
                (liste, dokument.version)
            }
            None => (Vec::new(), 0),
        };

        let neu = Benachrichtigung::neu(image, nachricht);
        liste.push(neu.clone());

        self.store
            .schreiben_versioniert(&schluessel, serde_json::to_value(&liste)?, version)
            .await?;

        tracing::debug!(
            empfaenger = %empfaenger,
            anzahl = liste.len(),
            "Benachrichtigung zugestellt"
        );
        Ok(neu)
    }

    /// Laedt das Postfach eines Benutzers (leer wenn noch nichts zugestellt)
    pub async fn liste(&self, empfaenger: &UserId) -> RaumResult<Vec<Benachrichtigung>> {
        match self.store.lesen(&postfach_schluessel(empfaenger)).await? {
            Some(dokument) => Ok(serde_json::from_value::<Vec<Benachrichtigung>>(
                dokument.wert,
            )?),
            None => Ok(Vec::new()),
        }
    }

    /// Anzahl der Eintraege im Postfach
    pub async fn anzahl(&self, empfaenger: &UserId) -> RaumResult<usize> {
        Ok(self.liste(empfaenger).await?.len())
    }
}

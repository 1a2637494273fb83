//! RaumService – Raeume erstellen, bearbeiten, beitreten, verlassen
//!
//! Der handelnde Benutzer wird jeder Operation explizit uebergeben;
//! es gibt keinen prozessweiten "aktueller Benutzer"-Zustand.

use std::sync::Arc;

use redezeit_core::{RoomId, UserId, ZeitstempelMs};
use redezeit_ledger::{raum_schluessel, LedgerService, SprecherGrant};
use redezeit_store::{RecordStore, StoreEvent};
use tokio::sync::broadcast;

use crate::{
    benachrichtigung::BenachrichtigungsService,
    error::{RaumError, RaumResult},
    types::{BenutzerProfil, Raum},
};

/// Maximale Titellaenge in Zeichen
const MAX_TITEL_LAENGE: usize = 128;

/// RaumService verwaltet die Gespraechsraeume
pub struct RaumService<S: RecordStore> {
    store: Arc<S>,
    ledger: Arc<LedgerService<S>>,
    benachrichtigungen: Arc<BenachrichtigungsService<S>>,
    /// Anfangsbudget in Minuten fuer neue Sprecher
    standard_budget_minuten: u32,
}

impl<S: RecordStore> RaumService<S> {
    /// Erstellt einen neuen RaumService
    pub fn neu(store: Arc<S>, standard_budget_minuten: u32) -> Arc<Self> {
        Arc::new(Self {
            ledger: LedgerService::neu(store.clone()),
            benachrichtigungen: BenachrichtigungsService::neu(store.clone()),
            store,
            standard_budget_minuten,
        })
    }

    /// Erstellt einen RaumService mit dem Anfangsbudget aus der
    /// Anwendungs-Konfiguration
    pub fn aus_config(store: Arc<S>, config: &redezeit_core::AppConfig) -> Arc<Self> {
        Self::neu(store, config.ledger.standard_budget_minuten)
    }

    /// Gibt den zugrundeliegenden LedgerService zurueck
    pub fn ledger(&self) -> &Arc<LedgerService<S>> {
        &self.ledger
    }

    /// Gibt den BenachrichtigungsService zurueck
    pub fn benachrichtigungen(&self) -> &Arc<BenachrichtigungsService<S>> {
        &self.benachrichtigungen
    }

    /// Erstellt einen neuen Raum
    pub async fn raum_erstellen(
        &self,
        titel: &str,
        ersteller: BenutzerProfil,
    ) -> RaumResult<Raum> {
        titel_pruefen(titel)?;

        let raum = Raum {
            id: RoomId::new(),
            title: titel.trim().to_string(),
            created_by: ersteller,
            speakers: Default::default(),
        };

        self.store
            .schreiben_versioniert(
                &raum_schluessel(&raum.id),
                serde_json::to_value(&raum)?,
                0,
            )
            .await?;

        tracing::info!(room_id = %raum.id, titel = %raum.title, "Raum erstellt");
        Ok(raum)
    }

    /// Aendert den Titel eines Raums (nur der Ersteller darf das)
    pub async fn raum_bearbeiten(
        &self,
        room_id: &RoomId,
        absender: &UserId,
        neuer_titel: &str,
    ) -> RaumResult<Raum> {
        titel_pruefen(neuer_titel)?;

        let (raum, version) = self.raum_mit_version_laden(room_id).await?;
        if !raum.ist_ersteller(absender) {
            return Err(RaumError::KeineBerechtigung(
                "Nur der Ersteller kann den Raum bearbeiten".into(),
            ));
        }

        self.store
            .feld_schreiben_versioniert(
                &raum_schluessel(room_id),
                "/roomTitle",
                serde_json::Value::String(neuer_titel.trim().to_string()),
                version,
            )
            .await?;

        tracing::info!(room_id = %room_id, titel = neuer_titel.trim(), "Raum umbenannt");
        Ok(Raum {
            title: neuer_titel.trim().to_string(),
            ..raum
        })
    }

    /// Laedt einen Raum
    pub async fn raum_laden(&self, room_id: &RoomId) -> RaumResult<Raum> {
        Ok(self.raum_mit_version_laden(room_id).await?.0)
    }

    /// Laedt alle Raeume (Reihenfolge unbestimmt)
    pub async fn raeume_auflisten(&self) -> RaumResult<Vec<Raum>> {
        let dokumente = self.store.lesen_praefix("rooms/").await?;
        let mut raeume = Vec::with_capacity(dokumente.len());
        for (_, dokument) in dokumente {
            raeume.push(serde_json::from_value(dokument.wert)?);
        }
        Ok(raeume)
    }

    /// Tritt einem Raum bei.
    ///
    /// Beitretende ohne aktiven Grant erhalten das Anfangsbudget aus der
    /// Konfiguration. Tritt jemand anderes als der Ersteller bei, bekommt
    /// der Ersteller eine Benachrichtigung ins Postfach.
    pub async fn raum_beitreten(
        &self,
        room_id: &RoomId,
        beitretender: &BenutzerProfil,
        now: ZeitstempelMs,
    ) -> RaumResult<SprecherGrant> {
        let raum = self.raum_laden(room_id).await?;

        if !raum.ist_ersteller(&beitretender.id) {
            self.benachrichtigungen
                .hinzufuegen(
                    &raum.created_by.id,
                    beitretender.avatar.clone(),
                    format!("{} has joined {}", beitretender.fullname, raum.title),
                )
                .await?;
        }

        let grant = if self.ledger.hat_grant(room_id, &beitretender.id).await? {
            // Rueckkehrer behalten ihren bestehenden Grant
            self.ledger.grant_laden(room_id, &beitretender.id).await?
        } else {
            self.ledger
                .initialbudget_gewaehren(
                    room_id,
                    beitretender.id,
                    now,
                    self.standard_budget_minuten,
                )
                .await?
        };

        tracing::debug!(room_id = %room_id, user_id = %beitretender.id, "Raum beigetreten");
        Ok(grant)
    }

    /// Verlaesst einen Raum.
    ///
    /// Der Ersteller kann seinen eigenen Raum nicht verlassen. Fuer alle
    /// anderen liegt die Mitgliedschaft beim externen Chat-SDK; der Grant
    /// bleibt bestehen, sein Ablauf ist rein beratend.
    pub async fn raum_verlassen(&self, room_id: &RoomId, user_id: &UserId) -> RaumResult<()> {
        let raum = self.raum_laden(room_id).await?;
        if raum.ist_ersteller(user_id) {
            return Err(RaumError::KeineBerechtigung(
                "Der Ersteller kann seinen Raum nicht verlassen".into(),
            ));
        }

        tracing::debug!(room_id = %room_id, user_id = %user_id, "Raum verlassen");
        Ok(())
    }

    /// Abonniert Store-Events, z.B. fuer eine live aktualisierte Raumliste.
    /// Raum-Dokumente tragen Schluessel mit dem Praefix `rooms/`.
    pub fn aenderungen_abonnieren(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.aenderungen_abonnieren()
    }

    async fn raum_mit_version_laden(
        &self,
        room_id: &RoomId,
    ) -> RaumResult<(Raum, redezeit_store::Version)> {
        let dokument = self
            .store
            .lesen(&raum_schluessel(room_id))
            .await?
            .ok_or_else(|| RaumError::RaumNichtGefunden(room_id.to_string()))?;
        Ok((serde_json::from_value(dokument.wert)?, dokument.version))
    }
}

/// Validiert einen Raumtitel
fn titel_pruefen(titel: &str) -> RaumResult<()> {
    if titel.trim().is_empty() {
        return Err(RaumError::UngueltigeEingabe(
            "Raumtitel darf nicht leer sein".into(),
        ));
    }
    if titel.len() > MAX_TITEL_LAENGE {
        return Err(RaumError::UngueltigeEingabe(format!(
            "Raumtitel zu lang: {} Zeichen (Maximum: {})",
            titel.len(),
            MAX_TITEL_LAENGE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use redezeit_store::MemoryStore;

    fn service() -> Arc<RaumService<MemoryStore>> {
        RaumService::neu(Arc::new(MemoryStore::neu()), 10)
    }

    #[tokio::test]
    async fn budget_kommt_aus_der_config() {
        let mut config = redezeit_core::AppConfig::default();
        config.ledger.standard_budget_minuten = 3;
        let service = RaumService::aus_config(Arc::new(MemoryStore::neu()), &config);

        let raum = service
            .raum_erstellen("Lounge", BenutzerProfil::neu(UserId::new(), "Alice"))
            .await
            .unwrap();
        let grant = service
            .raum_beitreten(&raum.id, &BenutzerProfil::neu(UserId::new(), "Bob"), 0)
            .await
            .unwrap();
        assert_eq!(grant.expiry_ts, 180_000);
        assert_eq!(grant.allotted_minutes, 3);
    }

    #[tokio::test]
    async fn leerer_titel_wird_abgelehnt() {
        let service = service();
        let e = service
            .raum_erstellen("   ", BenutzerProfil::neu(UserId::new(), "Alice"))
            .await
            .unwrap_err();
        assert!(matches!(e, RaumError::UngueltigeEingabe(_)));
    }

    #[tokio::test]
    async fn ueberlanger_titel_wird_abgelehnt() {
        let service = service();
        let titel = "x".repeat(MAX_TITEL_LAENGE + 1);
        let e = service
            .raum_erstellen(&titel, BenutzerProfil::neu(UserId::new(), "Alice"))
            .await
            .unwrap_err();
        assert!(matches!(e, RaumError::UngueltigeEingabe(_)));
    }

    #[tokio::test]
    async fn erstellen_und_laden() {
        let service = service();
        let raum = service
            .raum_erstellen("Rustacean Lounge", BenutzerProfil::neu(UserId::new(), "Alice"))
            .await
            .unwrap();

        let geladen = service.raum_laden(&raum.id).await.unwrap();
        assert_eq!(geladen, raum);
        assert!(geladen.speakers.is_empty());
    }

    #[tokio::test]
    async fn nur_ersteller_darf_bearbeiten() {
        let service = service();
        let ersteller = UserId::new();
        let raum = service
            .raum_erstellen("Alt", BenutzerProfil::neu(ersteller, "Alice"))
            .await
            .unwrap();

        let e = service
            .raum_bearbeiten(&raum.id, &UserId::new(), "Neu")
            .await
            .unwrap_err();
        assert!(matches!(e, RaumError::KeineBerechtigung(_)));

        let umbenannt = service
            .raum_bearbeiten(&raum.id, &ersteller, "Neu")
            .await
            .unwrap();
        assert_eq!(umbenannt.title, "Neu");
        assert_eq!(service.raum_laden(&raum.id).await.unwrap().title, "Neu");
    }

    #[tokio::test]
    async fn ersteller_kann_nicht_verlassen() {
        let service = service();
        let ersteller = UserId::new();
        let raum = service
            .raum_erstellen("Lounge", BenutzerProfil::neu(ersteller, "Alice"))
            .await
            .unwrap();

        let e = service
            .raum_verlassen(&raum.id, &ersteller)
            .await
            .unwrap_err();
        assert!(matches!(e, RaumError::KeineBerechtigung(_)));

        // Andere Teilnehmer koennen gehen; ihr Grant bleibt bestehen
        let gast = BenutzerProfil::neu(UserId::new(), "Bob");
        service.raum_beitreten(&raum.id, &gast, 0).await.unwrap();
        service.raum_verlassen(&raum.id, &gast.id).await.unwrap();
        assert!(service
            .ledger()
            .hat_grant(&raum.id, &gast.id)
            .await
            .unwrap());
    }
}

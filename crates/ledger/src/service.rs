//! LedgerService – Grants vergeben und Feedback anwenden
//!
//! Jede Operation ist ein einzelner Lese-Rechne-Schreib-Durchlauf gegen
//! das Raum-Dokument im Store. Geschrieben wird versioniert: faellt ein
//! anderer Schreiber dazwischen, schlaegt der Aufruf mit `SchreibKonflikt`
//! fehl und der Aufrufer wiederholt die gesamte Berechnung mit frischem
//! `now`. Intern wird nichts wiederholt, da Restzeit und Abzug
//! zeitabhaengig sind.

use std::sync::Arc;

use redezeit_core::{RoomId, UserId, ZeitstempelMs};
use redezeit_store::{Dokument, RecordStore};
use serde_json::Value;

use crate::{
    error::{LedgerError, LedgerResult},
    grant::{FeedbackAktion, SprecherGrant},
    regel,
};

/// Store-Schluessel des Raum-Dokuments
pub fn raum_schluessel(room_id: &RoomId) -> String {
    format!("rooms/{}", room_id.inner())
}

/// JSON-Zeiger auf den Grant eines Sprechers innerhalb des Raum-Dokuments
fn sprecher_zeiger(speaker_id: &UserId) -> String {
    format!("/speakers/{}", speaker_id.inner())
}

/// LedgerService verwaltet die Redezeit-Budgets der Sprecher eines Raums
pub struct LedgerService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> LedgerService<S> {
    /// Erstellt einen neuen LedgerService
    pub fn neu(store: Arc<S>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Vergibt das Anfangsbudget an einen Teilnehmer ohne aktiven Grant.
    ///
    /// Ein bereits vorhandener Grant ist ein Aufrufer-Fehler und bleibt
    /// unveraendert.
    pub async fn initialbudget_gewaehren(
        &self,
        room_id: &RoomId,
        teilnehmer: UserId,
        now: ZeitstempelMs,
        budget_minuten: u32,
    ) -> LedgerResult<SprecherGrant> {
        let dokument = self.raum_dokument_laden(room_id).await?;

        if grant_suchen(&dokument.wert, &teilnehmer).is_some() {
            return Err(LedgerError::GrantBereitsVorhanden {
                room_id: room_id.to_string(),
                speaker_id: teilnehmer.to_string(),
            });
        }

        let grant = SprecherGrant::neu(teilnehmer, now, budget_minuten);
        self.grant_schreiben(room_id, &grant, dokument.version)
            .await?;

        tracing::info!(
            room_id = %room_id,
            speaker_id = %teilnehmer,
            budget_minuten = budget_minuten,
            expiry_ts = grant.expiry_ts,
            "Anfangsbudget vergeben"
        );
        Ok(grant)
    }

    /// Wendet eine Feedback-Aktion auf den Grant eines Sprechers an.
    ///
    /// Die Aktion kommt als Zeichenkette aus der Aussenwelt; alles ausser
    /// `thumbsUp`/`thumbsDown` schlaegt mit `UngueltigeAktion` fehl, bevor
    /// irgendetwas gelesen oder geschrieben wird. Ablaufzeitpunkt und
    /// Zaehler wandern in einem einzigen Dokument-Schreibvorgang.
    pub async fn feedback_anwenden(
        &self,
        room_id: &RoomId,
        speaker_id: &UserId,
        aktion_raw: &str,
        now: ZeitstempelMs,
    ) -> LedgerResult<SprecherGrant> {
        let aktion = FeedbackAktion::parse(aktion_raw)?;

        let dokument = self.raum_dokument_laden(room_id).await?;
        let grant_wert =
            grant_suchen(&dokument.wert, speaker_id).ok_or_else(|| {
                LedgerError::GrantNichtGefunden {
                    room_id: room_id.to_string(),
                    speaker_id: speaker_id.to_string(),
                }
            })?;
        let grant: SprecherGrant = serde_json::from_value(grant_wert.clone())?;

        let neu = regel::feedback_berechnen(&grant, aktion, now);
        self.grant_schreiben(room_id, &neu, dokument.version).await?;

        tracing::info!(
            room_id = %room_id,
            speaker_id = %speaker_id,
            aktion = %aktion,
            alt_expiry_ts = grant.expiry_ts,
            neu_expiry_ts = neu.expiry_ts,
            "Feedback angewendet"
        );
        Ok(neu)
    }

    /// Laedt den aktuellen Grant eines Sprechers
    pub async fn grant_laden(
        &self,
        room_id: &RoomId,
        speaker_id: &UserId,
    ) -> LedgerResult<SprecherGrant> {
        let dokument = self.raum_dokument_laden(room_id).await?;
        let wert = grant_suchen(&dokument.wert, speaker_id).ok_or_else(|| {
            LedgerError::GrantNichtGefunden {
                room_id: room_id.to_string(),
                speaker_id: speaker_id.to_string(),
            }
        })?;
        Ok(serde_json::from_value(wert.clone())?)
    }

    /// Prueft ob ein Teilnehmer bereits einen Grant besitzt
    pub async fn hat_grant(&self, room_id: &RoomId, speaker_id: &UserId) -> LedgerResult<bool> {
        let dokument = self.raum_dokument_laden(room_id).await?;
        Ok(grant_suchen(&dokument.wert, speaker_id).is_some())
    }

    async fn raum_dokument_laden(&self, room_id: &RoomId) -> LedgerResult<Dokument> {
        self.store
            .lesen(&raum_schluessel(room_id))
            .await?
            .ok_or_else(|| LedgerError::RaumNichtGefunden(room_id.to_string()))
    }

    async fn grant_schreiben(
        &self,
        room_id: &RoomId,
        grant: &SprecherGrant,
        gelesene_version: redezeit_store::Version,
    ) -> LedgerResult<()> {
        self.store
            .feld_schreiben_versioniert(
                &raum_schluessel(room_id),
                &sprecher_zeiger(&grant.speaker_id),
                serde_json::to_value(grant)?,
                gelesene_version,
            )
            .await?;
        Ok(())
    }
}

/// Sucht den Grant eines Sprechers im Raum-Dokument
fn grant_suchen<'a>(raum: &'a Value, speaker_id: &UserId) -> Option<&'a Value> {
    raum.get("speakers")?.get(speaker_id.inner().to_string())
}

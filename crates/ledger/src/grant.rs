//! Sprecher-Grants und Feedback-Aktionen
//!
//! Ein `SprecherGrant` ist die Rede-Erlaubnis eines Teilnehmers in einem
//! Raum samt absolutem Ablaufzeitpunkt. Die Serde-Feldnamen entsprechen
//! den Dokumenten im Store (`speakerId`, `expiryTimestamp`, ...).

use redezeit_core::{UserId, ZeitstempelMs};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Rede-Erlaubnis eines Sprechers in einem Raum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprecherGrant {
    /// Der Sprecher dem der Grant gehoert
    pub speaker_id: UserId,
    /// Urspruenglich zugeteiltes Budget in Minuten (rein informativ,
    /// wird nie aus dem Ablaufzeitpunkt zurueckgerechnet)
    pub allotted_minutes: u32,
    /// Absoluter Ablaufzeitpunkt in Millisekunden seit der Epoche.
    /// Das einzige Feld das Feedback-Aktionen veraendern.
    #[serde(rename = "expiryTimestamp")]
    pub expiry_ts: ZeitstempelMs,
    /// Anzahl erhaltener Daumen-hoch (beratender Zaehler)
    pub thumbs_up: u32,
    /// Anzahl erhaltener Daumen-runter (beratender Zaehler)
    pub thumbs_down: u32,
}

impl SprecherGrant {
    /// Erstellt einen frischen Grant mit vollem Budget ab `now`
    pub fn neu(speaker_id: UserId, now: ZeitstempelMs, budget_minuten: u32) -> Self {
        Self {
            speaker_id,
            allotted_minutes: budget_minuten,
            expiry_ts: now + i64::from(budget_minuten) * 60_000,
            thumbs_up: 0,
            thumbs_down: 0,
        }
    }

    /// Verbleibende Redezeit in Millisekunden (negativ wenn abgelaufen)
    pub fn restzeit_ms(&self, now: ZeitstempelMs) -> i64 {
        self.expiry_ts - now
    }

    /// Prueft ob der Grant abgelaufen ist
    ///
    /// Der Ablauf ist rein beratend: niemand wird beim Ueberschreiten
    /// automatisch entfernt oder stummgeschaltet, die Oberflaeche zeigt
    /// lediglich den Countdown an.
    pub fn ist_abgelaufen(&self, now: ZeitstempelMs) -> bool {
        self.restzeit_ms(now) < 0
    }
}

/// Peer-Feedback zu einem Sprecher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAktion {
    /// Verlaengert die Redezeit pauschal
    DaumenHoch,
    /// Verkuerzt die Redezeit nach der Abklingregel
    DaumenRunter,
}

impl FeedbackAktion {
    /// String-Darstellung wie sie im Store und auf der Leitung vorkommt
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::DaumenHoch => "thumbsUp",
            Self::DaumenRunter => "thumbsDown",
        }
    }

    /// Parst eine Aktions-Zeichenkette.
    ///
    /// Alles ausser `thumbsUp` und `thumbsDown` ist eine ungueltige
    /// Aktion und fuehrt zu keinerlei Mutation beim Aufrufer.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        match raw {
            "thumbsUp" => Ok(Self::DaumenHoch),
            "thumbsDown" => Ok(Self::DaumenRunter),
            andere => Err(LedgerError::UngueltigeAktion(andere.to_string())),
        }
    }
}

impl std::fmt::Display for FeedbackAktion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.als_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neuer_grant_hat_volles_budget() {
        let uid = UserId::new();
        let grant = SprecherGrant::neu(uid, 1_000, 10);
        assert_eq!(grant.expiry_ts, 1_000 + 600_000);
        assert_eq!(grant.allotted_minutes, 10);
        assert_eq!(grant.thumbs_up, 0);
        assert_eq!(grant.thumbs_down, 0);
    }

    #[test]
    fn restzeit_und_ablauf() {
        let grant = SprecherGrant::neu(UserId::new(), 0, 1);
        assert_eq!(grant.restzeit_ms(0), 60_000);
        assert!(!grant.ist_abgelaufen(60_000));
        assert!(grant.ist_abgelaufen(60_001));
    }

    #[test]
    fn serde_feldnamen_entsprechen_den_dokumenten() {
        let grant = SprecherGrant::neu(UserId::new(), 0, 5);
        let json = serde_json::to_value(&grant).unwrap();
        assert!(json.get("speakerId").is_some());
        assert!(json.get("allottedMinutes").is_some());
        assert!(json.get("expiryTimestamp").is_some());
        assert!(json.get("thumbsUp").is_some());
        assert!(json.get("thumbsDown").is_some());
    }

    #[test]
    fn aktion_parsen() {
        assert_eq!(
            FeedbackAktion::parse("thumbsUp").unwrap(),
            FeedbackAktion::DaumenHoch
        );
        assert_eq!(
            FeedbackAktion::parse("thumbsDown").unwrap(),
            FeedbackAktion::DaumenRunter
        );
    }

    #[test]
    fn unbekannte_aktion_ist_ungueltig() {
        let e = FeedbackAktion::parse("clap").unwrap_err();
        assert!(matches!(e, LedgerError::UngueltigeAktion(a) if a == "clap"));
    }

    #[test]
    fn aktion_roundtrip_ueber_als_str() {
        for aktion in [FeedbackAktion::DaumenHoch, FeedbackAktion::DaumenRunter] {
            assert_eq!(FeedbackAktion::parse(aktion.als_str()).unwrap(), aktion);
        }
    }
}

//! Abklingregel fuer das Redezeit-Budget
//!
//! Daumen hoch verlaengert pauschal um fuenf Minuten, unabhaengig von der
//! Restzeit: jedes positive Signal zaehlt gleich viel. Daumen runter zieht
//! das Minimum aus einer Minute und 20% der Restzeit ab. Die Kappung
//! verhindert dass ein einzelnes negatives Signal einen fast abgelaufenen
//! Grant schlagartig auf null setzt, laesst bei grossem Restfenster aber
//! spuerbaren Druck zu. 20% rechnen wir als Ganzzahldivision durch 5;
//! der Rest von maximal 4 ms faellt zugunsten des Sprechers weg.

use redezeit_core::ZeitstempelMs;

use crate::grant::{FeedbackAktion, SprecherGrant};

/// Pauschale Verlaengerung bei Daumen hoch: 5 Minuten
pub const VERLAENGERUNG_MS: i64 = 5 * 60_000;

/// Maximaler Abzug bei Daumen runter: 1 Minute
pub const MAX_ABZUG_MS: i64 = 60_000;

/// Berechnet den Abzug fuer einen Daumen runter.
///
/// Negative Restzeit (bereits abgelaufen) wird vor der Skalierung auf 0
/// geklemmt, der Ablaufzeitpunkt wandert also nie weiter in die
/// Vergangenheit.
pub fn abzug_berechnen(expiry_ts: ZeitstempelMs, now: ZeitstempelMs) -> i64 {
    let restzeit = (expiry_ts - now).max(0);
    (restzeit / 5).min(MAX_ABZUG_MS)
}

/// Wendet eine Feedback-Aktion auf einen Grant an und gibt den neuen
/// Grant-Zustand zurueck (Ablaufzeitpunkt und Zaehler).
///
/// Die Funktion ist bewusst nicht idempotent: zwei identische Aktionen
/// wirken doppelt. Doppel-Submits einer einzelnen menschlichen Eingabe
/// muss der Aufrufer verhindern.
pub fn feedback_berechnen(
    grant: &SprecherGrant,
    aktion: FeedbackAktion,
    now: ZeitstempelMs,
) -> SprecherGrant {
    let mut neu = grant.clone();
    match aktion {
        FeedbackAktion::DaumenHoch => {
            neu.expiry_ts = grant.expiry_ts + VERLAENGERUNG_MS;
            neu.thumbs_up = grant.thumbs_up + 1;
        }
        FeedbackAktion::DaumenRunter => {
            neu.expiry_ts = grant.expiry_ts - abzug_berechnen(grant.expiry_ts, now);
            neu.thumbs_down = grant.thumbs_down + 1;
        }
    }
    neu
}

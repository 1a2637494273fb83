//! RecordStore-Trait und In-Memory-Implementierung
//!
//! Das `RecordStore`-Trait abstrahiert den konkreten Dokument-Store
//! (In-Memory, gehosteter Realtime-Store, etc.). Alle Schreibzugriffe sind
//! versioniert: der Aufrufer gibt die zuletzt gelesene Version mit und
//! erhaelt bei einer zwischenzeitlichen Aenderung einen `VersionsKonflikt`
//! statt ein Lost Update.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::dokument::{feld_setzen, Dokument, StoreEvent, Version};
use crate::error::{StoreError, StoreResult};

/// Groesse des Broadcast-Kanals fuer Store-Events
const EVENT_KANAL_GROESSE: usize = 256;

/// Abstrakter versionierter Dokument-Store
///
/// `erwartete_version = 0` bedeutet "Dokument darf noch nicht existieren"
/// (Neuanlage). Jeder erfolgreiche Schreibvorgang erhoeht die Version um 1.
#[allow(async_fn_in_trait)]
pub trait RecordStore: Send + Sync {
    /// Dokument unter dem angegebenen Schluessel laden
    async fn lesen(&self, schluessel: &str) -> StoreResult<Option<Dokument>>;

    /// Alle Dokumente laden deren Schluessel mit dem Praefix beginnt
    async fn lesen_praefix(&self, praefix: &str) -> StoreResult<Vec<(String, Dokument)>>;

    /// Gesamtes Dokument versioniert schreiben
    async fn schreiben_versioniert(
        &self,
        schluessel: &str,
        wert: Value,
        erwartete_version: Version,
    ) -> StoreResult<Version>;

    /// Einzelnes Feld (JSON-Zeiger) eines Dokuments versioniert schreiben
    ///
    /// Der Zeiger adressiert ein Feld innerhalb des Dokuments, z.B.
    /// `/speakers/<uid>`. Das gesamte Dokument wird in einem Schritt
    /// aktualisiert; es gibt keine Teilschreibvorgaenge.
    async fn feld_schreiben_versioniert(
        &self,
        schluessel: &str,
        zeiger: &str,
        wert: Value,
        erwartete_version: Version,
    ) -> StoreResult<Version>;

    /// Abonniert Aenderungs-Events fuer alle Dokumente
    fn aenderungen_abonnieren(&self) -> broadcast::Receiver<StoreEvent>;
}

/// In-Memory-Implementierung des RecordStore
///
/// Thread-safe via Arc + DashMap. Clone des Stores teilt den inneren
/// Zustand. Versionspruefung und Update laufen unter dem Eintrags-Lock,
/// zwei konkurrierende Schreiber koennen sich also nicht gegenseitig
/// ueberschreiben.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Alle Dokumente, indiziert nach Schluessel
    dokumente: DashMap<String, Dokument>,
    /// Broadcast-Sender fuer Store-Events
    event_tx: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    /// Erstellt einen neuen leeren MemoryStore
    pub fn neu() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_KANAL_GROESSE);
        Self {
            inner: Arc::new(MemoryStoreInner {
                dokumente: DashMap::new(),
                event_tx,
            }),
        }
    }

    /// Gibt die Anzahl gespeicherter Dokumente zurueck
    pub fn anzahl(&self) -> usize {
        self.inner.dokumente.len()
    }

    fn event_senden(&self, schluessel: &str, wert: &Value, version: Version) {
        // Keine Subscriber ist kein Fehler
        let _ = self.inner.event_tx.send(StoreEvent {
            schluessel: schluessel.to_string(),
            wert: wert.clone(),
            version,
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::neu()
    }
}

impl RecordStore for MemoryStore {
    async fn lesen(&self, schluessel: &str) -> StoreResult<Option<Dokument>> {
        Ok(self.inner.dokumente.get(schluessel).map(|d| d.clone()))
    }

    async fn lesen_praefix(&self, praefix: &str) -> StoreResult<Vec<(String, Dokument)>> {
        Ok(self
            .inner
            .dokumente
            .iter()
            .filter(|e| e.key().starts_with(praefix))
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect())
    }

    async fn schreiben_versioniert(
        &self,
        schluessel: &str,
        wert: Value,
        erwartete_version: Version,
    ) -> StoreResult<Version> {
        let version = match self.inner.dokumente.entry(schluessel.to_string()) {
            Entry::Occupied(mut eintrag) => {
                let dokument = eintrag.get_mut();
                if dokument.version != erwartete_version {
                    return Err(StoreError::VersionsKonflikt {
                        schluessel: schluessel.into(),
                        erwartet: erwartete_version,
                        aktuell: dokument.version,
                    });
                }
                dokument.wert = wert.clone();
                dokument.version += 1;
                dokument.version
            }
            Entry::Vacant(eintrag) => {
                if erwartete_version != 0 {
                    return Err(StoreError::VersionsKonflikt {
                        schluessel: schluessel.into(),
                        erwartet: erwartete_version,
                        aktuell: 0,
                    });
                }
                eintrag.insert(Dokument {
                    wert: wert.clone(),
                    version: 1,
                });
                1
            }
        };

        tracing::debug!(schluessel = schluessel, version = version, "Dokument geschrieben");
        self.event_senden(schluessel, &wert, version);
        Ok(version)
    }

    async fn feld_schreiben_versioniert(
        &self,
        schluessel: &str,
        zeiger: &str,
        wert: Value,
        erwartete_version: Version,
    ) -> StoreResult<Version> {
        let (neuer_wert, version) = match self.inner.dokumente.entry(schluessel.to_string()) {
            Entry::Occupied(mut eintrag) => {
                let dokument = eintrag.get_mut();
                if dokument.version != erwartete_version {
                    return Err(StoreError::VersionsKonflikt {
                        schluessel: schluessel.into(),
                        erwartet: erwartete_version,
                        aktuell: dokument.version,
                    });
                }
                feld_setzen(&mut dokument.wert, zeiger, wert)?;
                dokument.version += 1;
                (dokument.wert.clone(), dokument.version)
            }
            Entry::Vacant(eintrag) => {
                if erwartete_version != 0 {
                    return Err(StoreError::VersionsKonflikt {
                        schluessel: schluessel.into(),
                        erwartet: erwartete_version,
                        aktuell: 0,
                    });
                }
                let mut neu = Value::Object(serde_json::Map::new());
                feld_setzen(&mut neu, zeiger, wert)?;
                eintrag.insert(Dokument {
                    wert: neu.clone(),
                    version: 1,
                });
                (neu, 1)
            }
        };

        tracing::debug!(
            schluessel = schluessel,
            zeiger = zeiger,
            version = version,
            "Dokumentfeld geschrieben"
        );
        self.event_senden(schluessel, &neuer_wert, version);
        Ok(version)
    }

    fn aenderungen_abonnieren(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.event_tx.subscribe()
    }
}

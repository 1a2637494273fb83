//! Versionierte JSON-Dokumente
//!
//! Jedes Dokument traegt eine monoton steigende Version. Schreibzugriffe
//! koennen die zuletzt gelesene Version mitgeben; stimmt sie nicht mehr,
//! wird der Schreibvorgang abgelehnt statt ein fremdes Update stillschweigend
//! zu ueberschreiben (Read-Modify-Write ohne Lost Update).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Monoton steigende Dokumentversion
///
/// Version 0 bedeutet "Dokument existiert nicht". Der erste erfolgreiche
/// Schreibvorgang erzeugt Version 1.
pub type Version = u64;

/// Ein gespeichertes Dokument samt Version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dokument {
    /// Der JSON-Inhalt
    pub wert: Value,
    /// Aktuelle Version
    pub version: Version,
}

/// Event das der Store nach jedem erfolgreichen Schreibvorgang versendet
#[derive(Debug, Clone)]
pub struct StoreEvent {
    /// Schluessel des geschriebenen Dokuments (z.B. "rooms/<id>")
    pub schluessel: String,
    /// Neuer Inhalt des gesamten Dokuments
    pub wert: Value,
    /// Version nach dem Schreibvorgang
    pub version: Version,
}

/// Setzt einen Wert an einem JSON-Zeiger-Pfad innerhalb eines Dokuments.
///
/// Fehlende Zwischenobjekte werden angelegt, sodass z.B.
/// `/speakers/<uid>` auch in einem Raum ohne bisherige Sprecher funktioniert.
/// Zeiger muessen mit `/` beginnen und nur durch Objekte fuehren.
pub fn feld_setzen(dokument: &mut Value, zeiger: &str, wert: Value) -> StoreResult<()> {
    let rest = zeiger
        .strip_prefix('/')
        .ok_or_else(|| StoreError::UngueltigerZeiger {
            zeiger: zeiger.into(),
            grund: "Zeiger muss mit '/' beginnen".into(),
        })?;

    if rest.is_empty() {
        return Err(StoreError::UngueltigerZeiger {
            zeiger: zeiger.into(),
            grund: "Leerer Zeiger".into(),
        });
    }

    let segmente: Vec<&str> = rest.split('/').collect();
    let letztes = segmente.len() - 1;

    let mut aktuell = dokument;
    for segment in &segmente[..letztes] {
        let objekt = als_objekt(aktuell, zeiger, segment)?;
        aktuell = objekt
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }

    let objekt = als_objekt(aktuell, zeiger, segmente[letztes])?;
    objekt.insert(segmente[letztes].to_string(), wert);
    Ok(())
}

fn als_objekt<'a>(
    wert: &'a mut Value,
    zeiger: &str,
    segment: &str,
) -> StoreResult<&'a mut serde_json::Map<String, Value>> {
    match wert {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::UngueltigerZeiger {
            zeiger: zeiger.into(),
            grund: format!("Segment '{segment}' fuehrt nicht durch ein Objekt"),
        }),
    }
}

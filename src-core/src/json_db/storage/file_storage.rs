// FICHIER : src-core/src/json_db/storage/file_storage.rs

use crate::utils::{fs, json, json::Value, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{error, instrument, warn};

/// Charge une collection complète.
///
/// Fichier absent : collection vide. Fichier illisible ou corrompu : collection
/// vide et erreur journalisée, le démarrage ne doit pas échouer pour autant.
#[instrument(skip(path), fields(path = ?path))]
pub async fn read_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw: Value = match fs::read_json(path).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            error!(error = %e, "Fichier de données illisible, collection vide");
            return Vec::new();
        }
    };

    match json::from_value(unwrap_preserved(raw)) {
        Ok(items) => items,
        Err(e) => {
            error!(error = %e, "Contenu de collection invalide, collection vide");
            Vec::new()
        }
    }
}

/// Réécrit une collection complète (fichier temporaire puis renommage).
#[instrument(skip(path, items), fields(path = ?path, count = items.len()))]
pub async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    fs::write_json_atomic(path, items).await
}

// Les anciens fichiers, écrits avec préservation des références, enveloppent
// la liste : { "$id": "1", "$values": [ ... ] }
fn unwrap_preserved(raw: Value) -> Value {
    match raw {
        Value::Object(mut map) if map.contains_key("$values") => {
            map.remove("$values").unwrap_or(Value::Array(Vec::new()))
        }
        Value::Array(_) => raw,
        other => {
            warn!("Collection attendue sous forme de liste");
            other
        }
    }
}

// FICHIER : src-core/src/utils/json.rs

use crate::utils::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use serde_json::{json, Map, Value};

/// Parse une chaîne JSON en un type T.
pub fn parse<T: DeserializeOwned>(s: &str) -> Result<T> {
    match serde_json::from_str(s) {
        Ok(val) => Ok(val),
        Err(e) => {
            // Un extrait du contenu aide au débogage des fichiers corrompus
            let snippet: String = s.chars().take(100).collect();
            tracing::debug!(snippet = %snippet, "JSON illisible");
            Err(e.into())
        }
    }
}

pub fn stringify_pretty<T: Serialize + ?Sized>(v: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(v)?)
}

pub fn from_value<T: DeserializeOwned>(v: Value) -> Result<T> {
    Ok(serde_json::from_value(v)?)
}

/// Normalise récursivement les clés des objets en PascalCase
/// (`nombrePlaces` -> `NombrePlaces`, `id` -> `Id`).
///
/// Les réponses de l'API distante ne respectent pas toujours la casse des
/// propriétés ; on les ramène à la convention des fichiers locaux avant de
/// désérialiser.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (pascal_case_key(&k), normalize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

fn pascal_case_key(key: &str) -> String {
    // Clés tout en minuscules avec séparateurs (ex: "date_debut", "nombre-places")
    if key.contains('_') || key.contains('-') {
        return key
            .split(['_', '-'])
            .filter(|s| !s.is_empty())
            .map(capitalize)
            .collect();
    }
    capitalize(key)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

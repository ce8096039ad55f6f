// FICHIER : src-core/src/models/datetime.rs

//! Format des dates dans les fichiers JSON.
//!
//! Les dates sont des heures locales « murales » (`NaiveDateTime`), écrites
//! sans fuseau (`2025-03-14T09:30:00`). En lecture on accepte aussi les
//! dates avec décalage (`2025-03-14T09:30:00.1234567+01:00`) présentes dans
//! les anciens fichiers ; elles sont ramenées à l'heure locale.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    // Saisie courte "2025-03-14 09:30"
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").ok()
}

pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.format(FORMAT).to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("date invalide : {}", raw)))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => super::serialize(dt, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("date invalide : {}", raw))),
            _ => Ok(None),
        }
    }
}

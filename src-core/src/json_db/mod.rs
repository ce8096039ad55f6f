// FICHIER : src-core/src/json_db/mod.rs

//! Stockage bas niveau : un fichier JSON par collection, écrit atomiquement.

pub mod collections;
pub mod storage;

pub use collections::collection::Collection;
pub use storage::JsonDbConfig;

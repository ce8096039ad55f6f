// FICHIER : src-core/src/json_db/collections/mod.rs

pub mod collection;

// FICHIER : src-core/src/api/mod.rs

pub mod client;

pub use client::RestApiClient;

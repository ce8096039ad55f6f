// FICHIER : src-core/src/lib.rs

//! Gestion des ateliers d'éveil du RAM : ateliers, participants, inscriptions.
//!
//! - [`models`] : entités et vues jointes ;
//! - [`data`] : sources de données (mémoire, fichiers JSON, API REST) ;
//! - [`controllers`] : règles métier (places, public, doublons, présence) ;
//! - [`sync`] : cache local des ateliers synchronisé avec l'API.

pub mod api;
pub mod controllers;
pub mod data;
pub mod json_db;
pub mod models;
pub mod sync;
pub mod utils;

pub use controllers::Controllers;
pub use data::{DataStore, JsonStore, MemoryStore, RemoteStore, SharedStore};
pub use utils::{AppConfig, AppError, Result};

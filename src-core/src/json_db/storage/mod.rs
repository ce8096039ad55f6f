// FICHIER : src-core/src/json_db/storage/mod.rs

pub mod file_storage;

use crate::utils::AppConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// --- CONFIGURATION ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonDbConfig {
    pub data_root: PathBuf,
}

impl JsonDbConfig {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    pub fn from_app(config: &AppConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// `{data_root}/{collection}.json`
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_root.join(format!("{}.json", collection))
    }

    /// Copie locale des données distantes : `{data_root}/{collection}.cache.json`
    pub fn cache_path(&self, collection: &str) -> PathBuf {
        self.data_root.join(format!("{}.cache.json", collection))
    }

    /// Journal des mutations non synchronisées : `{data_root}/{collection}.pending.json`
    pub fn pending_path(&self, collection: &str) -> PathBuf {
        self.data_root.join(format!("{}.pending.json", collection))
    }
}

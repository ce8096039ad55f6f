// Déclaration des modules disponibles dans le CLI

pub mod atelier;
pub mod inscription;
pub mod participant;
pub mod sync;

use anyhow::Result;
use chrono::NaiveDateTime;
use ram_ateliers::api::RestApiClient;
use ram_ateliers::json_db::JsonDbConfig;
use ram_ateliers::models::datetime;
use ram_ateliers::utils::json;
use ram_ateliers::{AppConfig, Controllers, JsonStore, RemoteStore, SharedStore};
use serde::Serialize;
use std::sync::Arc;

/// Source de données ouverte une fois pour toute la session.
pub struct Context {
    pub config: AppConfig,
    pub controllers: Controllers,
    remote: bool,
}

impl Context {
    pub async fn open(config: AppConfig, remote: bool) -> Result<Self> {
        let store: SharedStore = if remote {
            Arc::new(RemoteStore::new(RestApiClient::new(&config.api)?))
        } else {
            Arc::new(JsonStore::open(JsonDbConfig::from_app(&config)).await?)
        };
        Ok(Self {
            controllers: Controllers::new(store),
            config,
            remote,
        })
    }

    pub fn source_label(&self) -> String {
        if self.remote {
            format!("API {}", self.config.api.base_url)
        } else {
            format!("fichiers {:?}", self.config.data_dir)
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", json::stringify_pretty(value)?);
    Ok(())
}

/// `2030-03-10 09:30` ou `2030-03-10T09:30:00`.
pub fn parse_date(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    datetime::parse(raw).ok_or_else(|| format!("Date invalide : {} (attendu AAAA-MM-JJ HH:MM)", raw))
}

#[cfg(test)]
pub(crate) async fn test_context() -> (Context, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("dossier temporaire");
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let ctx = Context::open(config, false).await.expect("contexte local");
    (ctx, dir)
}

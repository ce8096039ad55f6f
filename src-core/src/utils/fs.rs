// FICHIER : src-core/src/utils/fs.rs

use crate::utils::{json, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

pub use std::path::{Path, PathBuf};

/// Crée le dossier (et ses parents) s'il n'existe pas encore.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !exists(path).await {
        fs::create_dir_all(path).await?;
    }
    Ok(())
}

pub async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

/// Lit un fichier JSON. `Ok(None)` si le fichier n'existe pas.
#[instrument(skip(path), fields(path = ?path))]
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !exists(path).await {
        return Ok(None);
    }
    let content = fs::read_to_string(path).await?;
    json::parse(&content).map(Some)
}

// --- ÉCRITURE ATOMIQUE ---

/// Écriture atomique (write -> sync -> rename). Un crash en cours d'écriture
/// laisse l'ancien fichier intact.
#[instrument(skip(content, path), fields(path = ?path))]
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content).await?;
        file.flush().await?;
        // On force l'écriture physique avant le renommage
        file.sync_all().await?;
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let content = json::stringify_pretty(data)?;
    write_atomic(path, content.as_bytes()).await
}

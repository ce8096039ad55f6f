// FICHIER : src-core/src/sync/status.rs

use crate::models::EntityId;
use serde::Serialize;
use std::fmt;

/// État observable du cache synchronisé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncStatus {
    Initializing,
    Syncing,
    UpToDate,
    Offline { pending: usize },
    Error(String),
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Initializing => write!(f, "Initialisation"),
            SyncStatus::Syncing => write!(f, "Synchronisation en cours"),
            SyncStatus::UpToDate => write!(f, "À jour"),
            SyncStatus::Offline { pending: 0 } => write!(f, "Hors ligne"),
            SyncStatus::Offline { pending } => {
                write!(f, "Hors ligne ({} modification(s) en attente)", pending)
            }
            SyncStatus::Error(msg) => write!(f, "Erreur : {}", msg),
        }
    }
}

/// Mutation refusée par le serveur lors d'un rejeu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rejection {
    pub id: EntityId,
    pub operation: String,
    pub message: String,
}

/// Bilan d'une passe de synchronisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncReport {
    /// Mutations acceptées par le serveur.
    pub pushed: usize,
    pub rejected: Vec<Rejection>,
    /// Taille de l'instantané distant chargé.
    pub pulled: usize,
    /// Identifiants provisoires remplacés : (provisoire, serveur).
    #[serde(skip)]
    pub remapped: Vec<(EntityId, EntityId)>,
}

impl SyncReport {
    pub fn rejection_for(&self, id: EntityId) -> Option<&Rejection> {
        self.rejected.iter().find(|r| r.id == id)
    }

    pub fn resolved_id(&self, id: EntityId) -> EntityId {
        self.remapped
            .iter()
            .find(|(old, _)| *old == id)
            .map_or(id, |(_, new)| *new)
    }
}

/// Sort de la recopie distante d'une écriture locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Mirror {
    /// Acceptée par le serveur.
    Synced,
    /// Conservée dans le journal (hors ligne ou panne réseau).
    Pending,
    /// Refusée par le serveur ; le cache a été réaligné sur le serveur.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteOutcome<T> {
    pub record: T,
    pub mirror: Mirror,
}

// FICHIER : src-core/src/sync/journal.rs

use crate::models::{Atelier, EntityId};
use crate::utils::{fs, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, instrument};

/// Mutation locale en attente d'envoi au serveur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Op")]
pub enum PendingOp {
    Create {
        #[serde(rename = "Atelier")]
        atelier: Atelier,
    },
    Update {
        #[serde(rename = "Atelier")]
        atelier: Atelier,
    },
    Delete {
        #[serde(rename = "Id")]
        id: EntityId,
    },
}

impl PendingOp {
    pub fn target_id(&self) -> EntityId {
        match self {
            PendingOp::Create { atelier } | PendingOp::Update { atelier } => atelier.id,
            PendingOp::Delete { id } => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PendingOp::Create { .. } => "Create",
            PendingOp::Update { .. } => "Update",
            PendingOp::Delete { .. } => "Delete",
        }
    }
}

/// Journal ordonné, au plus une opération par enregistrement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    ops: Vec<PendingOp>,
}

impl Journal {
    pub fn new(ops: Vec<PendingOp>) -> Self {
        Self { ops }
    }

    /// Charge le journal ; absent ou illisible : journal vide.
    #[instrument(skip(path), fields(path = ?path))]
    pub async fn load(path: &Path) -> Self {
        match fs::read_json::<Vec<PendingOp>>(path).await {
            Ok(ops) => Self::new(ops.unwrap_or_default()),
            Err(e) => {
                error!(error = %e, "Journal des modifications illisible, ignoré");
                Self::default()
            }
        }
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        fs::write_json_atomic(path, &self.ops).await
    }

    pub fn ops(&self) -> &[PendingOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn touches(&self, id: EntityId) -> bool {
        self.ops.iter().any(|op| op.target_id() == id)
    }

    pub fn front(&self) -> Option<&PendingOp> {
        self.ops.first()
    }

    pub fn pop_front(&mut self) -> Option<PendingOp> {
        if self.ops.is_empty() {
            None
        } else {
            Some(self.ops.remove(0))
        }
    }

    /// Ajoute une opération en la fusionnant avec celle déjà en attente
    /// pour le même enregistrement :
    /// - modifier une création en attente reste une création ;
    /// - supprimer une création en attente l'annule ;
    /// - des modifications successives n'en font qu'une ;
    /// - une suppression remplace une modification en attente.
    pub fn record(&mut self, op: PendingOp) {
        let id = op.target_id();
        let existing = self.ops.iter().position(|p| p.target_id() == id);

        match (existing, op) {
            (None, op) => self.ops.push(op),
            (Some(i), PendingOp::Update { atelier }) => {
                let was_create = matches!(self.ops[i], PendingOp::Create { .. });
                self.ops[i] = if was_create {
                    PendingOp::Create { atelier }
                } else {
                    PendingOp::Update { atelier }
                };
            }
            (Some(i), PendingOp::Delete { id }) => {
                let was_create = matches!(self.ops[i], PendingOp::Create { .. });
                self.ops.remove(i);
                if !was_create {
                    self.ops.push(PendingOp::Delete { id });
                }
            }
            (Some(i), PendingOp::Create { atelier }) => {
                self.ops[i] = PendingOp::Create { atelier };
            }
        }
    }
}

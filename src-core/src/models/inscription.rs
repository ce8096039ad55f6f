// FICHIER : src-core/src/models/inscription.rs

use super::{datetime, Atelier, Entity, EntityId, Participant};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inscription d'un participant à un atelier.
///
/// Seules les clés étrangères sont persistées ; l'atelier et le participant
/// sont résolus à la lecture (voir [`InscriptionDetail`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inscription {
    #[serde(default)]
    pub id: EntityId,
    pub atelier_id: EntityId,
    pub participant_id: EntityId,
    #[serde(with = "datetime", default = "maintenant")]
    pub date_inscription: NaiveDateTime,
    #[serde(default)]
    pub commentaires: String,
    #[serde(default)]
    pub presence: bool,
}

fn maintenant() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Inscription {
    pub fn new(atelier_id: EntityId, participant_id: EntityId) -> Self {
        Self {
            id: 0,
            atelier_id,
            participant_id,
            date_inscription: maintenant(),
            commentaires: String::new(),
            presence: false,
        }
    }
}

impl Entity for Inscription {
    const COLLECTION: &'static str = "inscriptions";
    const LABEL: &'static str = "L'inscription";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

/// Vue jointe transitoire. Jamais sérialisée sur disque.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InscriptionDetail {
    #[serde(flatten)]
    pub inscription: Inscription,
    pub atelier: Option<Atelier>,
    pub participant: Option<Participant>,
}

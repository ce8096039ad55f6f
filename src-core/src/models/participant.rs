// FICHIER : src-core/src/models/participant.rs

use super::{normalize_label, Entity, EntityId, Inscription};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parent ou assistante maternelle inscrit(e) aux ateliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Participant {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(rename = "Type", default)]
    pub type_participant: TypeParticipant,
}

impl Participant {
    pub fn new(
        nom: impl Into<String>,
        prenom: impl Into<String>,
        type_participant: TypeParticipant,
    ) -> Self {
        Self {
            id: 0,
            nom: nom.into(),
            prenom: prenom.into(),
            email: String::new(),
            telephone: String::new(),
            type_participant,
        }
    }

    pub fn nom_complet(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

impl Entity for Participant {
    const COLLECTION: &'static str = "participants";
    const LABEL: &'static str = "Le participant";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TypeParticipant {
    #[default]
    Parent,
    AssistanteMaternelle,
}

impl TypeParticipant {
    pub fn description(&self) -> &'static str {
        match self {
            TypeParticipant::Parent => "Parent",
            TypeParticipant::AssistanteMaternelle => "Assistante maternelle",
        }
    }
}

impl fmt::Display for TypeParticipant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for TypeParticipant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "parent" | "parents" => Ok(TypeParticipant::Parent),
            "assistantematernelle" | "assistantesmaternelles" | "am" => {
                Ok(TypeParticipant::AssistanteMaternelle)
            }
            _ => Err(format!("Type de participant inconnu : {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for TypeParticipant {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u64),
            Name(String),
        }

        match Raw::deserialize(d)? {
            Raw::Index(0) => Ok(TypeParticipant::Parent),
            Raw::Index(1) => Ok(TypeParticipant::AssistanteMaternelle),
            Raw::Index(i) => Err(serde::de::Error::custom(format!(
                "Type de participant inconnu : {}",
                i
            ))),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Vue jointe : le participant et ses inscriptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParticipantDetail {
    #[serde(flatten)]
    pub participant: Participant,
    pub nom_complet: String,
    pub inscriptions: Vec<Inscription>,
}

impl ParticipantDetail {
    pub fn new(participant: Participant, inscriptions: Vec<Inscription>) -> Self {
        Self {
            nom_complet: participant.nom_complet(),
            participant,
            inscriptions,
        }
    }
}

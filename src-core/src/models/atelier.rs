// FICHIER : src-core/src/models/atelier.rs

use super::{datetime, normalize_label, Entity, EntityId, Inscription, TypeParticipant};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Atelier d'éveil proposé par le RAM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Atelier {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, alias = "Nom")]
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "datetime", alias = "DateHeureDebut")]
    pub date_debut: NaiveDateTime,
    /// Durée en minutes. Ignorée si `date_heure_fin` est renseignée.
    #[serde(default)]
    pub duree: i64,
    #[serde(
        default,
        with = "datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_heure_fin: Option<NaiveDateTime>,
    #[serde(default)]
    pub nombre_places: i32,
    #[serde(default)]
    pub public_concerne: TypePublic,
}

impl Atelier {
    pub fn new(
        titre: impl Into<String>,
        date_debut: NaiveDateTime,
        duree: i64,
        nombre_places: i32,
        public_concerne: TypePublic,
    ) -> Self {
        Self {
            id: 0,
            titre: titre.into(),
            description: String::new(),
            date_debut,
            duree,
            date_heure_fin: None,
            nombre_places,
            public_concerne,
        }
    }

    /// Durée réelle en minutes : fin explicite si présente, sinon `duree`.
    pub fn duree_effective(&self) -> i64 {
        match self.date_heure_fin {
            Some(fin) => (fin - self.date_debut).num_minutes(),
            None => self.duree,
        }
    }

    /// `None` si la fin calculée sort de l'intervalle des dates représentables.
    pub fn date_fin(&self) -> Option<NaiveDateTime> {
        match self.date_heure_fin {
            Some(fin) => Some(fin),
            None => Duration::try_minutes(self.duree)
                .and_then(|duree| self.date_debut.checked_add_signed(duree)),
        }
    }

    /// L'atelier a commencé (ou est terminé) à l'instant `now`.
    pub fn a_commence(&self, now: NaiveDateTime) -> bool {
        self.date_debut < now
    }

    /// Le public ciblé admet ce type de participant.
    pub fn accepte(&self, type_participant: TypeParticipant) -> bool {
        match self.public_concerne {
            TypePublic::Tous => true,
            TypePublic::Parents => type_participant == TypeParticipant::Parent,
            TypePublic::AssistantesMaternelles => {
                type_participant == TypeParticipant::AssistanteMaternelle
            }
        }
    }
}

impl Entity for Atelier {
    const COLLECTION: &'static str = "ateliers";
    const LABEL: &'static str = "L'atelier";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

/// Public concerné par un atelier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TypePublic {
    #[default]
    Parents,
    AssistantesMaternelles,
    Tous,
}

impl TypePublic {
    pub fn description(&self) -> &'static str {
        match self {
            TypePublic::Parents => "Parents et enfants",
            TypePublic::AssistantesMaternelles => "Assistantes maternelles",
            TypePublic::Tous => "Tous publics",
        }
    }

    fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(TypePublic::Parents),
            1 => Some(TypePublic::AssistantesMaternelles),
            2 => Some(TypePublic::Tous),
            _ => None,
        }
    }
}

impl fmt::Display for TypePublic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for TypePublic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "parents" | "parent" => Ok(TypePublic::Parents),
            "assistantesmaternelles" | "assistantematernelle" | "am" => {
                Ok(TypePublic::AssistantesMaternelles)
            }
            "tous" | "touspublics" => Ok(TypePublic::Tous),
            _ => Err(format!("Public inconnu : {}", s)),
        }
    }
}

// Accepte le nom ("Parents") ou l'indice numérique des anciens fichiers (0, 1, 2).
impl<'de> Deserialize<'de> for TypePublic {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u64),
            Name(String),
        }

        match Raw::deserialize(d)? {
            Raw::Index(i) => TypePublic::from_index(i)
                .ok_or_else(|| serde::de::Error::custom(format!("Public inconnu : {}", i))),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Vue jointe : l'atelier et ses inscriptions, résolues à la lecture.
#[derive(Debug, Clone, PartialEq)]
pub struct AtelierDetail {
    pub atelier: Atelier,
    pub inscriptions: Vec<Inscription>,
}

impl AtelierDetail {
    pub fn new(atelier: Atelier, inscriptions: Vec<Inscription>) -> Self {
        Self {
            atelier,
            inscriptions,
        }
    }

    pub fn nombre_inscrits(&self) -> usize {
        self.inscriptions.len()
    }

    pub fn places_disponibles(&self) -> i64 {
        i64::from(self.atelier.nombre_places) - self.inscriptions.len() as i64
    }

    pub fn est_complet(&self) -> bool {
        self.places_disponibles() <= 0
    }

    pub fn date_fin(&self) -> Option<NaiveDateTime> {
        self.atelier.date_fin()
    }
}

impl Serialize for AtelierDetail {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Vue<'a> {
            #[serde(flatten)]
            atelier: &'a Atelier,
            places_disponibles: i64,
            est_complet: bool,
            #[serde(with = "datetime::option", skip_serializing_if = "Option::is_none")]
            date_fin: Option<NaiveDateTime>,
            inscriptions: &'a [Inscription],
        }

        Vue {
            atelier: &self.atelier,
            places_disponibles: self.places_disponibles(),
            est_complet: self.est_complet(),
            date_fin: self.date_fin(),
            inscriptions: &self.inscriptions,
        }
        .serialize(s)
    }
}

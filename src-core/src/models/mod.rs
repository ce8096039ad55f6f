// FICHIER : src-core/src/models/mod.rs

pub mod atelier;
pub mod datetime;
pub mod inscription;
pub mod participant;

pub use atelier::{Atelier, AtelierDetail, TypePublic};
pub use inscription::{Inscription, InscriptionDetail};
pub use participant::{Participant, ParticipantDetail, TypeParticipant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Identifiant d'une entité. Négatif pour un enregistrement créé hors ligne
/// et pas encore confirmé par le serveur.
pub type EntityId = i64;

/// Contrat commun des trois entités persistées.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Nom de la collection (fichier `<COLLECTION>.json`, route REST `/<COLLECTION>`).
    const COLLECTION: &'static str;
    /// Libellé utilisé dans les messages d'erreur.
    const LABEL: &'static str;

    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);
}

/// Regroupe des inscriptions par clé étrangère, en un seul passage.
pub fn group_inscriptions<F>(inscriptions: &[Inscription], key: F) -> HashMap<EntityId, Vec<Inscription>>
where
    F: Fn(&Inscription) -> EntityId,
{
    let mut groups: HashMap<EntityId, Vec<Inscription>> = HashMap::new();
    for inscription in inscriptions {
        groups
            .entry(key(inscription))
            .or_default()
            .push(inscription.clone());
    }
    groups
}

/// Normalise un libellé d'énumération saisi librement
/// ("Assistantes Maternelles", "assistantes_maternelles" -> "assistantesmaternelles").
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

// FICHIER : src-core/src/data/local.rs

//! Tables en mémoire partagées par les stores locaux (mémoire et fichiers JSON).

use crate::json_db::{Collection, JsonDbConfig};
use crate::models::{Atelier, Entity, EntityId, Inscription, Participant};
use crate::utils::AppError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub ateliers: Collection<Atelier>,
    pub participants: Collection<Participant>,
    pub inscriptions: Collection<Inscription>,
}

impl Tables {
    pub async fn load(config: &JsonDbConfig) -> Self {
        Self {
            ateliers: Collection::load(&config.collection_path(Atelier::COLLECTION)).await,
            participants: Collection::load(&config.collection_path(Participant::COLLECTION))
                .await,
            inscriptions: Collection::load(&config.collection_path(Inscription::COLLECTION))
                .await,
        }
    }
}

/// Sélectionne la collection d'un type d'entité dans [`Tables`].
pub trait Table: Entity + PartialEq + std::fmt::Debug {
    fn of(tables: &Tables) -> &Collection<Self>;
    fn of_mut(tables: &mut Tables) -> &mut Collection<Self>;
}

impl Table for Atelier {
    fn of(tables: &Tables) -> &Collection<Self> {
        &tables.ateliers
    }
    fn of_mut(tables: &mut Tables) -> &mut Collection<Self> {
        &mut tables.ateliers
    }
}

impl Table for Participant {
    fn of(tables: &Tables) -> &Collection<Self> {
        &tables.participants
    }
    fn of_mut(tables: &mut Tables) -> &mut Collection<Self> {
        &mut tables.participants
    }
}

impl Table for Inscription {
    fn of(tables: &Tables) -> &Collection<Self> {
        &tables.inscriptions
    }
    fn of_mut(tables: &mut Tables) -> &mut Collection<Self> {
        &mut tables.inscriptions
    }
}

pub fn not_found<T: Entity>(id: EntityId) -> AppError {
    AppError::not_found(format!("{} {} n'existe pas", T::LABEL, id))
}

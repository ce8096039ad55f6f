// FICHIER : src-core/src/data/mod.rs

//! Couche de persistance : un contrat unique, trois stratégies.

pub mod json_store;
pub mod local;
pub mod memory;
pub mod remote;

pub use json_store::JsonStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::models::{Atelier, EntityId, Inscription, Participant};
use crate::utils::{async_trait, Arc, Result};

/// Contrat commun des sources de données.
///
/// `insert_*` attribue l'identifiant et retourne l'enregistrement stocké.
/// `update_*` remplace l'enregistrement complet (`NotFound` s'il n'existe pas).
/// `delete_*` ne vérifie aucune règle métier : c'est le rôle des contrôleurs.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_ateliers(&self) -> Result<Vec<Atelier>>;
    async fn get_atelier(&self, id: EntityId) -> Result<Option<Atelier>>;
    async fn insert_atelier(&self, atelier: Atelier) -> Result<Atelier>;
    async fn update_atelier(&self, atelier: Atelier) -> Result<Atelier>;
    async fn delete_atelier(&self, id: EntityId) -> Result<()>;

    async fn list_participants(&self) -> Result<Vec<Participant>>;
    async fn get_participant(&self, id: EntityId) -> Result<Option<Participant>>;
    async fn insert_participant(&self, participant: Participant) -> Result<Participant>;
    async fn update_participant(&self, participant: Participant) -> Result<Participant>;
    async fn delete_participant(&self, id: EntityId) -> Result<()>;

    async fn list_inscriptions(&self) -> Result<Vec<Inscription>>;
    async fn get_inscription(&self, id: EntityId) -> Result<Option<Inscription>>;
    async fn insert_inscription(&self, inscription: Inscription) -> Result<Inscription>;
    async fn update_inscription(&self, inscription: Inscription) -> Result<Inscription>;
    async fn delete_inscription(&self, id: EntityId) -> Result<()>;

    async fn inscriptions_for_atelier(&self, atelier_id: EntityId) -> Result<Vec<Inscription>> {
        let all = self.list_inscriptions().await?;
        Ok(all.into_iter().filter(|i| i.atelier_id == atelier_id).collect())
    }

    async fn inscriptions_for_participant(
        &self,
        participant_id: EntityId,
    ) -> Result<Vec<Inscription>> {
        let all = self.list_inscriptions().await?;
        Ok(all
            .into_iter()
            .filter(|i| i.participant_id == participant_id)
            .collect())
    }
}

pub type SharedStore = Arc<dyn DataStore>;

/// Implémente [`DataStore`] en déléguant aux méthodes génériques
/// `list`, `get`, `insert`, `update` et `delete` du type.
macro_rules! delegate_data_store {
    ($store:ty) => {
        #[$crate::utils::async_trait]
        impl $crate::data::DataStore for $store {
            async fn list_ateliers(&self) -> $crate::utils::Result<Vec<$crate::models::Atelier>> {
                self.list::<$crate::models::Atelier>().await
            }
            async fn get_atelier(
                &self,
                id: $crate::models::EntityId,
            ) -> $crate::utils::Result<Option<$crate::models::Atelier>> {
                self.get::<$crate::models::Atelier>(id).await
            }
            async fn insert_atelier(
                &self,
                atelier: $crate::models::Atelier,
            ) -> $crate::utils::Result<$crate::models::Atelier> {
                self.insert(atelier).await
            }
            async fn update_atelier(
                &self,
                atelier: $crate::models::Atelier,
            ) -> $crate::utils::Result<$crate::models::Atelier> {
                self.update(atelier).await
            }
            async fn delete_atelier(&self, id: $crate::models::EntityId) -> $crate::utils::Result<()> {
                self.delete::<$crate::models::Atelier>(id).await
            }

            async fn list_participants(
                &self,
            ) -> $crate::utils::Result<Vec<$crate::models::Participant>> {
                self.list::<$crate::models::Participant>().await
            }
            async fn get_participant(
                &self,
                id: $crate::models::EntityId,
            ) -> $crate::utils::Result<Option<$crate::models::Participant>> {
                self.get::<$crate::models::Participant>(id).await
            }
            async fn insert_participant(
                &self,
                participant: $crate::models::Participant,
            ) -> $crate::utils::Result<$crate::models::Participant> {
                self.insert(participant).await
            }
            async fn update_participant(
                &self,
                participant: $crate::models::Participant,
            ) -> $crate::utils::Result<$crate::models::Participant> {
                self.update(participant).await
            }
            async fn delete_participant(
                &self,
                id: $crate::models::EntityId,
            ) -> $crate::utils::Result<()> {
                self.delete::<$crate::models::Participant>(id).await
            }

            async fn list_inscriptions(
                &self,
            ) -> $crate::utils::Result<Vec<$crate::models::Inscription>> {
                self.list::<$crate::models::Inscription>().await
            }
            async fn get_inscription(
                &self,
                id: $crate::models::EntityId,
            ) -> $crate::utils::Result<Option<$crate::models::Inscription>> {
                self.get::<$crate::models::Inscription>(id).await
            }
            async fn insert_inscription(
                &self,
                inscription: $crate::models::Inscription,
            ) -> $crate::utils::Result<$crate::models::Inscription> {
                self.insert(inscription).await
            }
            async fn update_inscription(
                &self,
                inscription: $crate::models::Inscription,
            ) -> $crate::utils::Result<$crate::models::Inscription> {
                self.update(inscription).await
            }
            async fn delete_inscription(
                &self,
                id: $crate::models::EntityId,
            ) -> $crate::utils::Result<()> {
                self.delete::<$crate::models::Inscription>(id).await
            }
        }
    };
}
pub(crate) use delegate_data_store;

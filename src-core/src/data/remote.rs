// FICHIER : src-core/src/data/remote.rs

use super::delegate_data_store;
use crate::api::RestApiClient;
use crate::models::{Entity, EntityId};
use crate::utils::Result;

/// Store adossé à l'API REST : chaque appel part directement au serveur.
///
/// Aucune tolérance hors ligne ; une panne réseau remonte en
/// `AppError::Network` (ou `Remote` pour un 5xx).
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: RestApiClient,
}

impl RemoteStore {
    pub fn new(client: RestApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestApiClient {
        &self.client
    }

    async fn list<T: Entity>(&self) -> Result<Vec<T>> {
        self.client.list().await
    }

    async fn get<T: Entity>(&self, id: EntityId) -> Result<Option<T>> {
        self.client.get(id).await
    }

    async fn insert<T: Entity>(&self, item: T) -> Result<T> {
        self.client.create(&item).await
    }

    async fn update<T: Entity>(&self, item: T) -> Result<T> {
        self.client.update(&item).await
    }

    async fn delete<T: Entity>(&self, id: EntityId) -> Result<()> {
        self.client.delete::<T>(id).await
    }
}

delegate_data_store!(RemoteStore);

// FICHIER : src-core/src/data/memory.rs

use super::delegate_data_store;
use super::local::{not_found, Table, Tables};
use crate::models::{Atelier, EntityId, Inscription, Participant};
use crate::utils::{AsyncRwLock, Result};

/// Store volatil, sans aucune entrée/sortie.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: AsyncRwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pré-rempli (identifiants conservés tels quels).
    pub fn with_data(
        ateliers: Vec<Atelier>,
        participants: Vec<Participant>,
        inscriptions: Vec<Inscription>,
    ) -> Self {
        let tables = Tables {
            ateliers: ateliers.into(),
            participants: participants.into(),
            inscriptions: inscriptions.into(),
        };
        Self {
            tables: AsyncRwLock::new(tables),
        }
    }

    async fn list<T: Table>(&self) -> Result<Vec<T>> {
        Ok(T::of(&*self.tables.read().await).to_vec())
    }

    async fn get<T: Table>(&self, id: EntityId) -> Result<Option<T>> {
        Ok(T::of(&*self.tables.read().await).get(id).cloned())
    }

    async fn insert<T: Table>(&self, item: T) -> Result<T> {
        Ok(T::of_mut(&mut *self.tables.write().await).insert(item))
    }

    async fn update<T: Table>(&self, item: T) -> Result<T> {
        let mut tables = self.tables.write().await;
        if T::of_mut(&mut tables).replace(item.clone()) {
            Ok(item)
        } else {
            Err(not_found::<T>(item.id()))
        }
    }

    async fn delete<T: Table>(&self, id: EntityId) -> Result<()> {
        let mut tables = self.tables.write().await;
        T::of_mut(&mut tables)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found::<T>(id))
    }
}

delegate_data_store!(MemoryStore);

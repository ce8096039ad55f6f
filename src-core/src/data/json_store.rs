// FICHIER : src-core/src/data/json_store.rs

use super::delegate_data_store;
use super::local::{not_found, Table, Tables};
use crate::json_db::{Collection, JsonDbConfig};
use crate::models::EntityId;
use crate::utils::{fs, prelude::*, AsyncRwLock};

/// Store persistant : un fichier JSON par collection dans `data_root`.
///
/// Chaque mutation réécrit uniquement la collection concernée, de façon
/// atomique. Si l'écriture échoue, la collection en mémoire est restaurée.
#[derive(Debug)]
pub struct JsonStore {
    config: JsonDbConfig,
    tables: AsyncRwLock<Tables>,
}

impl JsonStore {
    /// Ouvre (ou crée) le dossier de données et charge les trois collections.
    #[instrument(skip(config), fields(root = ?config.data_root))]
    pub async fn open(config: JsonDbConfig) -> Result<Self> {
        fs::ensure_dir(&config.data_root).await?;
        let tables = Tables::load(&config).await;
        info!(
            ateliers = tables.ateliers.len(),
            participants = tables.participants.len(),
            inscriptions = tables.inscriptions.len(),
            "Données locales chargées"
        );
        Ok(Self {
            config,
            tables: AsyncRwLock::new(tables),
        })
    }

    pub fn config(&self) -> &JsonDbConfig {
        &self.config
    }

    async fn list<T: Table>(&self) -> Result<Vec<T>> {
        Ok(T::of(&*self.tables.read().await).to_vec())
    }

    async fn get<T: Table>(&self, id: EntityId) -> Result<Option<T>> {
        Ok(T::of(&*self.tables.read().await).get(id).cloned())
    }

    async fn insert<T: Table>(&self, item: T) -> Result<T> {
        self.mutate(move |col: &mut Collection<T>| Ok(col.insert(item)))
            .await
    }

    async fn update<T: Table>(&self, item: T) -> Result<T> {
        self.mutate(move |col: &mut Collection<T>| {
            if col.replace(item.clone()) {
                Ok(item)
            } else {
                Err(not_found::<T>(item.id()))
            }
        })
        .await
    }

    async fn delete<T: Table>(&self, id: EntityId) -> Result<()> {
        self.mutate(move |col: &mut Collection<T>| {
            col.remove(id).map(|_| ()).ok_or_else(|| not_found::<T>(id))
        })
        .await
    }

    async fn mutate<T, R, F>(&self, op: F) -> Result<R>
    where
        T: Table,
        R: Send,
        F: FnOnce(&mut Collection<T>) -> Result<R> + Send,
    {
        let mut tables = self.tables.write().await;
        let collection = T::of_mut(&mut tables);
        let snapshot = collection.clone();

        let out = op(collection)?;

        let path = self.config.collection_path(T::COLLECTION);
        if let Err(e) = collection.save(&path).await {
            error!(error = %e, collection = T::COLLECTION, "Écriture impossible, modification annulée");
            *collection = snapshot;
            return Err(e);
        }
        Ok(out)
    }
}

delegate_data_store!(JsonStore);

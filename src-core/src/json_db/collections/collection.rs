// FICHIER : src-core/src/json_db/collections/collection.rs

//! Collection typée en mémoire, chargée depuis et réécrite vers un fichier JSON.
//! Pas de règle métier ici : uniquement identifiants, recherche et persistance.

use crate::json_db::storage::file_storage;
use crate::models::{Entity, EntityId};
use crate::utils::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub async fn load(path: &Path) -> Self {
        Self::new(file_storage::read_collection(path).await)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        file_storage::write_collection(path, &self.items).await
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// `max(id) + 1`, ou 1 pour une collection vide.
    pub fn next_id(&self) -> EntityId {
        self.items.iter().map(Entity::id).max().map_or(1, |max| max + 1)
    }

    /// Identifiant provisoire (négatif) pour un enregistrement créé hors ligne.
    pub fn placeholder_id(&self) -> EntityId {
        match self.items.iter().map(Entity::id).min() {
            Some(min) if min < 0 => min - 1,
            _ => -1,
        }
    }

    /// Ajoute l'élément avec un nouvel identifiant et le retourne.
    pub fn insert(&mut self, mut item: T) -> T {
        item.set_id(self.next_id());
        self.items.push(item.clone());
        item
    }

    /// Ajoute l'élément tel quel (identifiant déjà attribué).
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remplace l'élément de même identifiant. `false` s'il n'existe pas.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remplace l'élément `old_id` (placeholder compris) par `item`.
    pub fn replace_id(&mut self, old_id: EntityId, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == old_id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
    }
}

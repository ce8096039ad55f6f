// FICHIER : src-core/src/controllers/mod.rs

//! Règles métier au-dessus d'un [`DataStore`](crate::data::DataStore).
//!
//! Les trois contrôleurs partagent la même source de données, la même horloge
//! et un verrou d'écriture unique : une vérification suivie d'une écriture
//! (places restantes, doublon...) ne peut pas être entrelacée avec une autre.

pub mod atelier;
pub mod inscription;
pub mod participant;
pub mod validation;

pub use atelier::AtelierController;
pub use inscription::InscriptionController;
pub use participant::ParticipantController;

use crate::data::SharedStore;
use crate::utils::{Arc, AsyncMutex};
use chrono::{Local, NaiveDateTime};
use tokio::sync::MutexGuard;

/// Source de l'heure courante (heure locale « murale »).
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

#[derive(Clone)]
pub struct ControllerContext {
    store: SharedStore,
    write_lock: Arc<AsyncMutex<()>>,
    clock: Clock,
}

impl ControllerContext {
    pub fn new(store: SharedStore, clock: Clock) -> Self {
        Self {
            store,
            write_lock: Arc::new(AsyncMutex::new(())),
            clock,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

/// Point d'entrée : les trois contrôleurs câblés sur la même source.
#[derive(Clone)]
pub struct Controllers {
    pub ateliers: AtelierController,
    pub participants: ParticipantController,
    pub inscriptions: InscriptionController,
}

impl Controllers {
    pub fn new(store: SharedStore) -> Self {
        Self::with_clock(store, system_clock())
    }

    pub fn with_clock(store: SharedStore, clock: Clock) -> Self {
        let ctx = ControllerContext::new(store, clock);
        let ateliers = AtelierController::new(ctx.clone());
        let participants = ParticipantController::new(ctx.clone());
        let inscriptions = InscriptionController::new(ctx, ateliers.clone(), participants.clone());
        Self {
            ateliers,
            participants,
            inscriptions,
        }
    }
}

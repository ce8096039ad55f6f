// FICHIER : src-core/src/sync/mod.rs

//! Cache local des ateliers synchronisé avec l'API distante.
//!
//! Politique : le serveur fait autorité. Les mutations locales non encore
//! envoyées sont journalisées puis rejouées dans l'ordre à la reconnexion ;
//! ensuite l'instantané distant remplace le cache.

pub mod connectivity;
pub mod journal;
pub mod status;
pub mod synced_atelier;

pub use connectivity::{Connectivity, ConnectivityMonitor, ConnectivityState};
pub use journal::{Journal, PendingOp};
pub use status::{Mirror, Rejection, SyncReport, SyncStatus, WriteOutcome};
pub use synced_atelier::{SyncOptions, SyncedAtelierController};

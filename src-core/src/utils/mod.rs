// FICHIER : src-core/src/utils/mod.rs

// =========================================================================
//  Couche fondation : erreurs, configuration, logs, fichiers, réseau
// =========================================================================

pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;
pub mod macros;
pub mod net;

/// **Application Context** : Config, Log.
pub mod context {
    pub use super::config::AppConfig;
    pub use super::logger::init_logging;
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::config::AppConfig;
    pub use super::error::{AppError, ErrorKind, Result};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value};
    pub use tracing::{debug, error, info, instrument, warn};
}

pub use config::AppConfig;
pub use error::{AppError, ErrorKind, Result};
pub use logger::init_logging;

// --- FAÇADE ASYNC ---
pub use async_trait::async_trait;
pub use std::collections::HashMap;
pub use std::sync::Arc;
pub use tokio::sync::{Mutex as AsyncMutex, RwLock as AsyncRwLock};

// FICHIER : src-core/src/utils/config.rs

use crate::utils::{env, AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Singleton réservé au CLI. La bibliothèque reçoit toujours sa configuration explicitement.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Nom du dossier applicatif (données, logs, configuration).
pub const APP_DIR_NAME: &str = "RAM_Ateliers";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Dossier des fichiers `ateliers.json`, `participants.json`, `inscriptions.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub core: CoreConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    pub env_mode: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default = "default_health_interval_secs")]
    pub health_interval_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

// --- HELPERS SERDE ---

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
fn default_timeout_ms() -> u64 {
    2000
}
fn default_health_path() -> String {
    "health".to_string()
}
fn default_health_interval_secs() -> u64 {
    5
}
fn default_max_retries() -> u32 {
    3
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            env_mode: if cfg!(debug_assertions) {
                "development".into()
            } else {
                "production".into()
            },
            log_level: "warn".into(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".into(),
            timeout_ms: default_timeout_ms(),
            health_path: default_health_path(),
            health_interval_secs: default_health_interval_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            core: CoreConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    /// Initialise le singleton du CLI (idempotent).
    pub fn init() -> Result<()> {
        if CONFIG.get().is_some() {
            return Ok(());
        }
        let config = Self::load()?;
        // Une initialisation concurrente a pu gagner la course : même résultat.
        let _ = CONFIG.set(config);
        Ok(())
    }

    pub fn get() -> &'static AppConfig {
        CONFIG.get_or_init(|| Self::load().unwrap_or_default())
    }

    /// Charge la configuration : défauts, puis fichier utilisateur, puis variables d'environnement.
    pub fn load() -> Result<Self> {
        let target_env = if cfg!(test) {
            "test".to_string()
        } else {
            env::get_or("RAM_ENV_MODE", "")
        };

        let mut config = if target_env == "test" {
            Self::test_sandbox()
        } else {
            match Self::user_config_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            }
        };

        if !target_env.is_empty() {
            config.core.env_mode = target_env;
        }
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Lit un fichier de configuration JSON. Les champs absents prennent leur valeur par défaut.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Lecture impossible de {:?} : {}", path, e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Fichier {:?} invalide : {}", path, e)))
    }

    pub fn user_config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(dir) = env::get_optional("RAM_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = env::get_optional("RAM_API_URL") {
            self.api.base_url = url;
        }
        if let Some(level) = env::get_optional("RAM_LOG_LEVEL") {
            self.core.log_level = level;
        }
        if env::get_optional("RAM_API_TIMEOUT_MS").is_some() {
            self.api.timeout_ms = env::get_parsed("RAM_API_TIMEOUT_MS")?;
        }
        Ok(())
    }

    /// Dossier de données unique par processus, sous le répertoire temporaire.
    fn test_sandbox() -> Self {
        let unique_id = format!("{}_{}", std::process::id(), uuid::Uuid::new_v4().simple());
        let data_dir = std::env::temp_dir().join(format!("ram_ateliers_test_{}", unique_id));
        Self {
            data_dir,
            core: CoreConfig {
                env_mode: "test".into(),
                log_level: "debug".into(),
            },
            api: ApiConfig::default(),
        }
    }
}

// --- TESTS UNITAIRES ---

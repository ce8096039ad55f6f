use serde::Serialize;
use std::io;

/// Type de résultat standard de la bibliothèque.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
///
/// Les trois premières variantes sont des erreurs métier, destinées à être
/// affichées telles quelles à l'utilisateur. Les suivantes sont techniques.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Données invalides : {0}")]
    Validation(String),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Opération non permise : {0}")]
    Conflict(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Réseau : {0}")]
    Network(#[from] reqwest::Error),

    #[error("Erreur du serveur distant ({status}) : {message}")]
    Remote { status: u16, message: String },

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

/// Catégorie d'une erreur, indépendante de son origine technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    IoFailure,
    NetworkFailure,
    Internal,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Io(_) => ErrorKind::IoFailure,
            // 4xx hors 408/429 : refus définitif du serveur
            AppError::Remote { status, .. }
                if (400..500).contains(status) && *status != 408 && *status != 429 =>
            {
                ErrorKind::Conflict
            }
            AppError::Network(_) | AppError::Remote { .. } => ErrorKind::NetworkFailure,
            AppError::Serialization(_) | AppError::Config(_) | AppError::System(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Vrai si l'erreur vient du transport (serveur injoignable, 5xx, 408, 429).
    /// Une opération dans ce cas peut être rejouée plus tard.
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::NetworkFailure
    }

    /// Vrai pour un refus explicite d'une règle métier ou d'une validation.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict
        )
    }
}

// Les erreurs remontent à l'interface sous forme de simple chaîne.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}

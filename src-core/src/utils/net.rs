// FICHIER : src-core/src/utils/net.rs

use crate::utils::config::ApiConfig;
use crate::utils::{AppError, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Construit le client HTTP à partir de la configuration de l'API.
/// Le client est réutilisé pour bénéficier du pool de connexions.
pub fn build_client(config: &ApiConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("RAM-Ateliers/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Convertit une réponse non 2xx en erreur typée.
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| status.to_string());
    Err(error_for_status(status, message))
}

/// Associe un statut HTTP à la catégorie d'erreur correspondante.
pub fn error_for_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Remote {
            status: status.as_u16(),
            message,
        },
    }
}

// Le serveur renvoie soit une chaîne brute, soit {"error": "..."} / {"message": "..."}
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => Some(s),
        Ok(v) => v
            .get("error")
            .or_else(|| v.get("message"))
            .and_then(|m| m.as_str())
            .map(String::from)
            .or_else(|| Some(trimmed.to_string())),
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Envoie une requête idempotente avec stratégie de retry et backoff exponentiel.
///
/// Seules les erreurs de transport, les 5xx et les 429 sont rejouées ; les
/// autres statuts remontent immédiatement sous forme d'erreur typée.
#[instrument(skip(make_request), fields(url = %url))]
pub async fn send_with_retry<F>(url: &str, max_retries: u32, make_request: F) -> Result<Response>
where
    F: Fn() -> RequestBuilder,
{
    let max_attempts = max_retries.max(1);
    let mut attempt = 0;
    let mut delay = Duration::from_secs(1);

    loop {
        attempt += 1;
        debug!("Requête {}/{} vers {}", attempt, max_attempts, url);

        let last_error = match make_request().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }
                let retryable =
                    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                let err = check_status(response).await.err().unwrap_or_else(|| {
                    error_for_status(status, status.to_string())
                });
                if !retryable {
                    return Err(err);
                }
                warn!("Erreur HTTP {} sur {} (Tentative {})", status, url, attempt);
                err
            }
            Err(e) => {
                warn!("Échec de connexion (Tentative {}/{}): {}", attempt, max_attempts, e);
                AppError::Network(e)
            }
        };

        if attempt >= max_attempts {
            return Err(last_error);
        }

        tokio::time::sleep(delay).await;
        delay = std::cmp::min(delay * 2, MAX_BACKOFF);
    }
}

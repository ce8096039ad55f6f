// FICHIER : src-core/src/api/client.rs

use crate::models::{Entity, EntityId};
use crate::utils::config::ApiConfig;
use crate::utils::{json, net, prelude::*};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Client de l'API REST du RAM.
///
/// Routes : `{base}/{collection}` (GET, POST), `{base}/{collection}/{id}`
/// (GET, PUT, DELETE), `{base}/health`. Les lectures sont rejouées avec
/// backoff ; les écritures ne le sont jamais.
#[derive(Debug, Clone)]
pub struct RestApiClient {
    http: Client,
    base_url: String,
    health_path: String,
    max_retries: u32,
}

impl RestApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(AppError::Config("URL de l'API non renseignée".into()));
        }
        Ok(Self {
            http: net::build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            health_path: config.health_path.trim_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sonde de disponibilité : une seule tentative, bornée par le timeout du client.
    pub async fn health(&self) -> Result<()> {
        let response = self.http.get(self.url(&self.health_path)).send().await?;
        net::check_status(response).await?;
        Ok(())
    }

    pub async fn is_reachable(&self) -> bool {
        match self.health().await {
            Ok(()) => true,
            Err(e) => {
                debug!("API injoignable : {}", e);
                false
            }
        }
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn list<T: Entity>(&self) -> Result<Vec<T>> {
        let url = self.url(T::COLLECTION);
        let response = net::send_with_retry(&url, self.max_retries, || self.http.get(&url)).await?;
        decode(response).await
    }

    /// `Ok(None)` sur un 404.
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn get<T: Entity>(&self, id: EntityId) -> Result<Option<T>> {
        let url = self.url(&format!("{}/{}", T::COLLECTION, id));
        match net::send_with_retry(&url, self.max_retries, || self.http.get(&url)).await {
            Ok(response) => decode(response).await.map(Some),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST : l'identifiant est attribué par le serveur.
    #[instrument(skip(self, item), fields(collection = T::COLLECTION))]
    pub async fn create<T: Entity>(&self, item: &T) -> Result<T> {
        let mut body = item.clone();
        body.set_id(0);
        let response = self
            .http
            .post(self.url(T::COLLECTION))
            .json(&body)
            .send()
            .await?;
        decode(net::check_status(response).await?).await
    }

    /// PUT : remplacement complet. Un 204 renvoie l'élément envoyé.
    #[instrument(skip(self, item), fields(collection = T::COLLECTION, id = item.id()))]
    pub async fn update<T: Entity>(&self, item: &T) -> Result<T> {
        let response = self
            .http
            .put(self.url(&format!("{}/{}", T::COLLECTION, item.id())))
            .json(item)
            .send()
            .await?;
        let response = net::check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(item.clone());
        }
        decode(response).await
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn delete<T: Entity>(&self, id: EntityId) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("{}/{}", T::COLLECTION, id)))
            .send()
            .await?;
        net::check_status(response).await?;
        Ok(())
    }
}

// La casse des propriétés varie selon le serveur : normalisation avant décodage.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    let raw: Value = json::parse(&body)?;
    json::from_value(json::normalize_keys(raw))
}

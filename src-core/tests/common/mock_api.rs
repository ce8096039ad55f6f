// FICHIER : src-core/tests/common/mock_api.rs

//! Serveur REST simulé (axum) : mêmes routes que l'API du RAM, données en
//! mémoire, et un interrupteur pour simuler une panne réseau (503 partout).
//! Les réponses sont en camelCase, comme le serveur de production.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ram_ateliers::utils::config::ApiConfig;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Un atelier dont le titre contient ce mot est refusé par le serveur (409).
pub const TITRE_REFUSE: &str = "interdit";
/// Un atelier dont le titre contient ce mot est refusé sans droit d'accès (403).
pub const TITRE_CONFIDENTIEL: &str = "confidentiel";

#[derive(Default)]
struct MockState {
    online: AtomicBool,
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

type Shared = Arc<MockState>;

pub struct MockApi {
    pub base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(MockState::default());
        state.online.store(true, Ordering::SeqCst);

        let app = Router::new()
            .route("/health", get(health))
            .route("/{collection}", get(list).post(create))
            .route(
                "/{collection}/{id}",
                get(fetch).put(replace).delete(remove),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind du serveur simulé");
        let addr = listener.local_addr().expect("adresse locale");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Configuration client courte : un seul essai, sonde chaque seconde.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_ms: 1000,
            health_path: "health".into(),
            health_interval_secs: 1,
            max_retries: 1,
        }
    }

    pub fn set_online(&self, online: bool) {
        self.state.online.store(online, Ordering::SeqCst);
    }

    /// Contenu brut d'une collection côté serveur (clés PascalCase).
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .expect("état du serveur simulé")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        self.state
            .collections
            .lock()
            .expect("état du serveur simulé")
            .insert(collection.to_string(), records);
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// --- HANDLERS ---

fn unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
}

fn online(state: &MockState) -> bool {
    state.online.load(Ordering::SeqCst)
}

async fn health(State(state): State<Shared>) -> Response {
    if !online(&state) {
        return unavailable();
    }
    Json(json!({ "status": "ok" })).into_response()
}

async fn list(State(state): State<Shared>, Path(collection): Path<String>) -> Response {
    if !online(&state) {
        return unavailable();
    }
    let collections = state.collections.lock().expect("état");
    let items: Vec<Value> = collections
        .get(&collection)
        .map(|items| items.iter().map(camel_case).collect())
        .unwrap_or_default();
    Json(Value::Array(items)).into_response()
}

async fn fetch(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    if !online(&state) {
        return unavailable();
    }
    let collections = state.collections.lock().expect("état");
    match collections
        .get(&collection)
        .and_then(|items| items.iter().find(|v| id_of(v) == id))
    {
        Some(item) => Json(camel_case(item)).into_response(),
        None => not_found(),
    }
}

async fn create(
    State(state): State<Shared>,
    Path(collection): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if !online(&state) {
        return unavailable();
    }
    if let Some(response) = reject(&collection, &body) {
        return response;
    }

    let mut collections = state.collections.lock().expect("état");
    let items = collections.entry(collection).or_default();
    let id = items.iter().map(id_of).max().unwrap_or(100) + 1;
    body["Id"] = json!(id);
    items.push(body.clone());

    (StatusCode::CREATED, Json(camel_case(&body))).into_response()
}

async fn replace(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    if !online(&state) {
        return unavailable();
    }
    if let Some(response) = reject(&collection, &body) {
        return response;
    }

    let mut collections = state.collections.lock().expect("état");
    let slot = collections
        .get_mut(&collection)
        .and_then(|items| items.iter_mut().find(|v| id_of(v) == id));
    match slot {
        Some(slot) => {
            *slot = body;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(),
    }
}

async fn remove(
    State(state): State<Shared>,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    if !online(&state) {
        return unavailable();
    }
    let mut collections = state.collections.lock().expect("état");
    let Some(items) = collections.get_mut(&collection) else {
        return not_found();
    };
    let before = items.len();
    items.retain(|v| id_of(v) != id);
    if items.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

// --- HELPERS ---

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Ressource introuvable" }))).into_response()
}

fn reject(collection: &str, body: &Value) -> Option<Response> {
    if collection != "ateliers" {
        return None;
    }
    let titre = body["Titre"].as_str().unwrap_or_default();
    if titre.contains(TITRE_CONFIDENTIEL) {
        return Some((StatusCode::FORBIDDEN, "Accès refusé").into_response());
    }
    if titre.contains(TITRE_REFUSE) {
        return Some(
            (
                StatusCode::CONFLICT,
                Json(json!({ "message": "Titre refusé par le serveur" })),
            )
                .into_response(),
        );
    }
    None
}

fn id_of(value: &Value) -> i64 {
    value["Id"].as_i64().unwrap_or_default()
}

fn camel_case(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (lower_first(k), camel_case(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(camel_case).collect()),
        other => other.clone(),
    }
}

fn lower_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

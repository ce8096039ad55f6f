// FICHIER : src-core/tests/sync_suite/cache_reads.rs

use crate::common::init_test_env;
use crate::common::mock_api::MockApi;
use crate::common::sync::{open_synced_with, SONDE_LENTE};
use ram_ateliers::utils::config::ApiConfig;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

const LECTURE_MAX: Duration = Duration::from_millis(500);

#[tokio::test]
async fn test_cache_reads_do_not_wait_for_a_failing_server() {
    let env = init_test_env();
    let api = MockApi::start().await;
    api.seed(
        "ateliers",
        vec![json!({
            "Id": 3, "Titre": "Pâte à sel", "DateDebut": "2030-03-20T09:30:00",
            "Duree": 60, "NombrePlaces": 6, "PublicConcerne": 2
        })],
    );
    // Trois tentatives : environ 3 s de backoff sur une liste en échec
    let config = ApiConfig {
        max_retries: 3,
        ..api.api_config()
    };
    let ctl = Arc::new(open_synced_with(&env, config, SONDE_LENTE).await);
    assert_eq!(ctl.get_all().await.len(), 1);

    api.set_online(false);
    let sync = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.synchronize().await }
    });
    sleep(Duration::from_millis(100)).await;

    let debut = Instant::now();
    let ateliers = ctl.get_all().await;
    let upcoming = ctl.get_upcoming().await;
    let attente = debut.elapsed();

    assert!(attente < LECTURE_MAX, "lecture du cache bloquée {:?}", attente);
    assert_eq!(ateliers.len(), 1);
    assert_eq!(upcoming.len(), 1);
    assert!(ctl.get_by_id(3).await.is_some());
    assert!(!sync.is_finished());

    let result = sync.await.expect("tâche de synchronisation");
    assert!(result.unwrap_err().is_network());
    assert_eq!(ctl.get_all().await.len(), 1);
}

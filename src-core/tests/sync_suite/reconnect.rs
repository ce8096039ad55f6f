// FICHIER : src-core/tests/sync_suite/reconnect.rs

use crate::common::mock_api::MockApi;
use crate::common::sync::{open_synced, SONDE_RAPIDE};
use crate::common::{at, init_test_env};
use ram_ateliers::models::{Atelier, TypePublic};
use ram_ateliers::sync::{Connectivity, SyncStatus};
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

const DELAI_MAX: Duration = Duration::from_secs(10);

#[tokio::test]
async fn test_reconnection_triggers_a_sync_pass() {
    let env = init_test_env();
    let api = MockApi::start().await;
    api.set_online(false);

    let ctl = open_synced(&env, &api, SONDE_RAPIDE).await;
    let mut rx = ctl.subscribe();
    assert_eq!(*rx.borrow(), Connectivity::Disconnected);

    let atelier = Atelier::new("Balade contée", at(2030, 3, 28, 10, 0), 60, 12, TypePublic::Parents);
    let placeholder = ctl.create(atelier).await.unwrap().record.id;
    assert!(placeholder < 0);

    api.set_online(true);
    timeout(DELAI_MAX, rx.wait_for(|c| *c == Connectivity::Connected))
        .await
        .expect("reconnexion non détectée")
        .expect("canal fermé");

    // La passe suit la détection ; on attend qu'elle ait vidé le journal.
    let debut = Instant::now();
    while !(ctl.pending().await.is_empty() && ctl.status().await == SyncStatus::UpToDate) {
        assert!(debut.elapsed() < DELAI_MAX, "synchronisation non déclenchée");
        sleep(Duration::from_millis(50)).await;
    }

    let ateliers = ctl.get_all().await;
    assert_eq!(ateliers.len(), 1);
    assert!(ateliers[0].id > 0);
    assert_eq!(api.records("ateliers").len(), 1);
}

#[tokio::test]
async fn test_probe_notices_server_going_down() {
    let env = init_test_env();
    let api = MockApi::start().await;

    let ctl = open_synced(&env, &api, SONDE_RAPIDE).await;
    assert_eq!(ctl.connectivity(), Connectivity::Connected);
    assert_eq!(ctl.status().await, SyncStatus::UpToDate);

    let mut rx = ctl.subscribe();
    api.set_online(false);
    timeout(DELAI_MAX, rx.wait_for(|c| *c == Connectivity::Disconnected))
        .await
        .expect("coupure non détectée")
        .expect("canal fermé");

    let debut = Instant::now();
    while ctl.status().await != (SyncStatus::Offline { pending: 0 }) {
        assert!(debut.elapsed() < DELAI_MAX, "statut hors ligne attendu");
        sleep(Duration::from_millis(50)).await;
    }
}

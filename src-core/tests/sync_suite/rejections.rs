// FICHIER : src-core/tests/sync_suite/rejections.rs

use crate::common::mock_api::{MockApi, TITRE_CONFIDENTIEL, TITRE_REFUSE};
use crate::common::sync::{open_synced, SONDE_LENTE};
use crate::common::{at, init_test_env};
use ram_ateliers::models::{Atelier, TypePublic};
use ram_ateliers::sync::{Mirror, SyncStatus};
use serde_json::json;

fn atelier(titre: &str) -> Atelier {
    Atelier::new(titre, at(2030, 3, 25, 14, 0), 90, 5, TypePublic::AssistantesMaternelles)
}

#[tokio::test]
async fn test_online_write_refused_by_server_is_reported() {
    let env = init_test_env();
    let api = MockApi::start().await;
    let ctl = open_synced(&env, &api, SONDE_LENTE).await;

    let titre = format!("Atelier {}", TITRE_REFUSE);
    let outcome = ctl.create(atelier(&titre)).await.unwrap();
    match &outcome.mirror {
        Mirror::Rejected(msg) => assert!(msg.contains("refusé")),
        other => panic!("refus attendu, obtenu {:?}", other),
    }

    // Le serveur fait autorité : le cache ne garde pas l'enregistrement refusé.
    assert!(ctl.get_all().await.is_empty());
    assert!(ctl.pending().await.is_empty());
    assert_eq!(ctl.status().await, SyncStatus::UpToDate);
}

#[tokio::test]
async fn test_replay_reports_rejections_and_keeps_going() {
    let env = init_test_env();
    let api = MockApi::start().await;
    api.set_online(false);
    let ctl = open_synced(&env, &api, SONDE_LENTE).await;

    let refuse = ctl
        .create(atelier(&format!("Sortie {}", TITRE_REFUSE)))
        .await
        .unwrap()
        .record;
    ctl.create(atelier("Chansons signées")).await.unwrap();
    assert_eq!(ctl.pending().await.len(), 2);

    api.set_online(true);
    let report = ctl.synchronize().await.unwrap();
    assert_eq!(report.pushed, 1);
    assert_eq!(report.rejected.len(), 1);

    let rejection = report.rejection_for(refuse.id).expect("refus attendu");
    assert_eq!(rejection.operation, "Create");

    let ateliers = ctl.get_all().await;
    assert_eq!(ateliers.len(), 1);
    assert_eq!(ateliers[0].titre, "Chansons signées");
    assert!(ctl.pending().await.is_empty());
}

#[tokio::test]
async fn test_delete_of_already_removed_record_counts_as_done() {
    let env = init_test_env();
    let api = MockApi::start().await;
    api.seed(
        "ateliers",
        vec![json!({
            "Id": 3, "Titre": "Peinture", "DateDebut": "2030-03-22T09:00:00",
            "Duree": 60, "NombrePlaces": 4, "PublicConcerne": 2
        })],
    );
    let ctl = open_synced(&env, &api, SONDE_LENTE).await;
    assert_eq!(ctl.get_all().await.len(), 1);

    api.set_online(false);
    assert_eq!(ctl.delete(3).await.unwrap(), Mirror::Pending);
    assert!(ctl.get_by_id(3).await.is_none());

    // Supprimé entre-temps par un autre poste
    api.seed("ateliers", vec![]);
    api.set_online(true);

    let report = ctl.synchronize().await.unwrap();
    assert_eq!(report.pushed, 1);
    assert!(report.rejected.is_empty());
    assert!(ctl.get_all().await.is_empty());
}

#[tokio::test]
async fn test_forbidden_write_is_dropped_from_journal() {
    let env = init_test_env();
    let api = MockApi::start().await;
    api.set_online(false);
    let ctl = open_synced(&env, &api, SONDE_LENTE).await;

    let bloque = ctl
        .create(atelier(&format!("Réunion {}", TITRE_CONFIDENTIEL)))
        .await
        .unwrap()
        .record;
    ctl.create(atelier("Jeux d'eau")).await.unwrap();

    api.set_online(true);
    let report = ctl.synchronize().await.unwrap();
    assert_eq!(report.pushed, 1);
    let rejection = report.rejection_for(bloque.id).expect("refus attendu");
    assert_eq!(rejection.operation, "Create");
    assert!(rejection.message.contains("Accès refusé"));

    // Le journal s'est vidé : la passe suivante ne bute plus sur le refus
    assert!(ctl.pending().await.is_empty());
    assert_eq!(ctl.status().await, SyncStatus::UpToDate);
    let ateliers = ctl.get_all().await;
    assert_eq!(ateliers.len(), 1);
    assert_eq!(ateliers[0].titre, "Jeux d'eau");

    let second = ctl.synchronize().await.unwrap();
    assert_eq!(second.pushed, 0);
    assert_eq!(second.pulled, 1);
}

#[tokio::test]
async fn test_forbidden_online_write_is_rejected() {
    let env = init_test_env();
    let api = MockApi::start().await;
    let ctl = open_synced(&env, &api, SONDE_LENTE).await;

    let outcome = ctl
        .create(atelier(&format!("Bilan {}", TITRE_CONFIDENTIEL)))
        .await
        .unwrap();
    assert!(matches!(outcome.mirror, Mirror::Rejected(_)));
    assert!(ctl.pending().await.is_empty());
    assert_eq!(ctl.connectivity(), ram_ateliers::sync::Connectivity::Connected);
}

// FICHIER : src-core/tests/controllers_suite/capacity_scenario.rs

use crate::common::{at, fixed_clock, init_test_env};
use ram_ateliers::models::{Atelier, Inscription, Participant, TypeParticipant, TypePublic};
use ram_ateliers::{AppError, Controllers, JsonStore, MemoryStore, SharedStore};
use std::sync::Arc;

/// Une place : P1 s'inscrit, P2 est refusé, P1 se désinscrit, P2 passe.
async fn scenario_une_place(ctl: &Controllers) {
    let atelier = ctl
        .ateliers
        .create(Atelier::new("Jeux d'eau", at(2030, 3, 15, 10, 0), 60, 1, TypePublic::Tous))
        .await
        .unwrap();
    let p1 = ctl
        .participants
        .create(Participant::new("Bernard", "Anna", TypeParticipant::Parent))
        .await
        .unwrap();
    let p2 = ctl
        .participants
        .create(Participant::new("Thomas", "Jade", TypeParticipant::AssistanteMaternelle))
        .await
        .unwrap();

    let i1 = ctl
        .inscriptions
        .create(Inscription::new(atelier.id, p1.id))
        .await
        .unwrap();
    let detail = ctl.ateliers.get_detail(atelier.id).await.unwrap().unwrap();
    assert!(detail.est_complet());
    assert_eq!(detail.places_disponibles(), 0);

    let refus = ctl.inscriptions.create(Inscription::new(atelier.id, p2.id)).await;
    match refus {
        Err(AppError::Conflict(msg)) => assert!(msg.contains("complet")),
        other => panic!("refus attendu, obtenu {:?}", other),
    }
    assert_eq!(ctl.inscriptions.get_by_atelier(atelier.id).await.unwrap().len(), 1);

    ctl.inscriptions.delete(i1.id).await.unwrap();
    let i2 = ctl
        .inscriptions
        .create(Inscription::new(atelier.id, p2.id))
        .await
        .unwrap();
    assert_eq!(i2.participant_id, p2.id);

    let detail = ctl.ateliers.get_detail(atelier.id).await.unwrap().unwrap();
    assert!(detail.est_complet());
    assert_eq!(detail.inscriptions[0].participant_id, p2.id);
}

#[tokio::test]
async fn test_single_place_scenario_in_memory() {
    let _env = init_test_env();
    let store: SharedStore = Arc::new(MemoryStore::new());
    scenario_une_place(&Controllers::with_clock(store, fixed_clock())).await;
}

#[tokio::test]
async fn test_single_place_scenario_on_disk() {
    let env = init_test_env();
    let store: SharedStore = Arc::new(JsonStore::open(env.cfg.clone()).await.unwrap());
    scenario_une_place(&Controllers::with_clock(store, fixed_clock())).await;

    // L'état final est bien celui relu depuis le disque.
    let store: SharedStore = Arc::new(JsonStore::open(env.cfg.clone()).await.unwrap());
    let ctl = Controllers::with_clock(store, fixed_clock());
    let details = ctl.ateliers.get_all_details().await.unwrap();
    assert_eq!(details.len(), 1);
    assert!(details[0].est_complet());
}

#[tokio::test]
async fn test_reducing_places_below_enrollment_is_refused() {
    let _env = init_test_env();
    let store: SharedStore = Arc::new(MemoryStore::new());
    let ctl = Controllers::with_clock(store, fixed_clock());

    let atelier = ctl
        .ateliers
        .create(Atelier::new("Pâte à sel", at(2030, 4, 8, 9, 30), 90, 3, TypePublic::Tous))
        .await
        .unwrap();
    for nom in ["Leroy", "Moreau"] {
        let p = ctl
            .participants
            .create(Participant::new(nom, "Sam", TypeParticipant::Parent))
            .await
            .unwrap();
        ctl.inscriptions
            .create(Inscription::new(atelier.id, p.id))
            .await
            .unwrap();
    }

    let mut reduit = atelier.clone();
    reduit.nombre_places = 1;
    assert!(matches!(
        ctl.ateliers.update(reduit).await,
        Err(AppError::Validation(_))
    ));
    assert_eq!(ctl.ateliers.get_by_id(atelier.id).await.unwrap(), Some(atelier.clone()));

    let mut juste = atelier.clone();
    juste.nombre_places = 2;
    ctl.ateliers.update(juste).await.unwrap();
    let detail = ctl.ateliers.get_detail(atelier.id).await.unwrap().unwrap();
    assert!(detail.est_complet());
}

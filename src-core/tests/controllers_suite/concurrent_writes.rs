// FICHIER : src-core/tests/controllers_suite/concurrent_writes.rs

use crate::common::{at, fixed_clock, init_test_env};
use ram_ateliers::models::{Atelier, Inscription, Participant, TypeParticipant, TypePublic};
use ram_ateliers::{Controllers, JsonStore, SharedStore};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_enrollments_never_overbook() {
    let env = init_test_env();
    let store: SharedStore = Arc::new(JsonStore::open(env.cfg.clone()).await.unwrap());
    let ctl = Controllers::with_clock(store, fixed_clock());

    let atelier = ctl
        .ateliers
        .create(Atelier::new("Musique", at(2030, 3, 12, 10, 0), 45, 3, TypePublic::Tous))
        .await
        .unwrap();
    let atelier_id = atelier.id;

    let mut participants = Vec::new();
    for i in 0..10 {
        let p = ctl
            .participants
            .create(Participant::new(format!("Nom{i}"), "Test", TypeParticipant::Parent))
            .await
            .unwrap();
        participants.push(p.id);
    }

    let mut handles = Vec::new();
    for participant_id in participants {
        let ctl = ctl.clone();
        handles.push(tokio::spawn(async move {
            ctl.inscriptions
                .create(Inscription::new(atelier_id, participant_id))
                .await
        }));
    }

    let mut acceptees = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            acceptees += 1;
        }
    }

    assert_eq!(acceptees, 3);
    let detail = ctl.ateliers.get_detail(atelier_id).await.unwrap().unwrap();
    assert_eq!(detail.nombre_inscrits(), 3);
    assert_eq!(detail.places_disponibles(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_pair_twice_in_parallel_creates_one_record() {
    let env = init_test_env();
    let store: SharedStore = Arc::new(JsonStore::open(env.cfg.clone()).await.unwrap());
    let ctl = Controllers::with_clock(store, fixed_clock());

    let atelier = ctl
        .ateliers
        .create(Atelier::new("Lecture", at(2030, 3, 20, 10, 0), 30, 10, TypePublic::Tous))
        .await
        .unwrap();
    let p = ctl
        .participants
        .create(Participant::new("Vidal", "Nina", TypeParticipant::Parent))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        ctl.inscriptions.create(Inscription::new(atelier.id, p.id)),
        ctl.inscriptions.create(Inscription::new(atelier.id, p.id)),
    );
    assert!(a.is_ok() ^ b.is_ok());
    assert_eq!(ctl.inscriptions.get_all().await.unwrap().len(), 1);
}

// FICHIER : src-core/tests/store_suite/remote_store.rs

use crate::common::mock_api::MockApi;
use crate::common::{at, fixed_clock, init_test_env};
use ram_ateliers::api::RestApiClient;
use ram_ateliers::models::{Atelier, Inscription, Participant, TypeParticipant, TypePublic};
use ram_ateliers::{AppError, Controllers, DataStore, RemoteStore, SharedStore};
use serde_json::json;
use std::sync::Arc;

fn remote(api: &MockApi) -> RemoteStore {
    RemoteStore::new(RestApiClient::new(&api.api_config()).expect("client REST"))
}

#[tokio::test]
async fn test_crud_round_trip_through_api() {
    let _env = init_test_env();
    let api = MockApi::start().await;
    let store = remote(&api);

    let created = store
        .insert_atelier(Atelier::new("Bébés lecteurs", at(2030, 3, 20, 10, 0), 45, 6, TypePublic::Tous))
        .await
        .unwrap();
    assert!(created.id > 0, "l'identifiant vient du serveur");
    assert_eq!(created.titre, "Bébés lecteurs");

    let mut fetched = store.get_atelier(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    fetched.nombre_places = 8;
    store.update_atelier(fetched.clone()).await.unwrap();
    assert_eq!(api.records("ateliers")[0]["NombrePlaces"], 8);

    store.delete_atelier(created.id).await.unwrap();
    assert!(store.get_atelier(created.id).await.unwrap().is_none());
    assert!(matches!(
        store.delete_atelier(created.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_lowercase_server_payloads_are_decoded() {
    let _env = init_test_env();
    let api = MockApi::start().await;
    api.seed(
        "participants",
        vec![json!({ "Id": 12, "Nom": "Garcia", "Prenom": "Inès", "Type": "AssistanteMaternelle" })],
    );

    let store = remote(&api);
    let participants = store.list_participants().await.unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].id, 12);
    assert_eq!(participants[0].type_participant, TypeParticipant::AssistanteMaternelle);
}

#[tokio::test]
async fn test_business_rules_apply_on_remote_data() {
    let _env = init_test_env();
    let api = MockApi::start().await;
    let store: SharedStore = Arc::new(remote(&api));
    let ctl = Controllers::with_clock(store, fixed_clock());

    let atelier = ctl
        .ateliers
        .create(Atelier::new("Relaxation", at(2030, 3, 5, 9, 0), 30, 1, TypePublic::Parents))
        .await
        .unwrap();
    let parent = ctl
        .participants
        .create(Participant::new("Morel", "Hugo", TypeParticipant::Parent))
        .await
        .unwrap();
    let autre = ctl
        .participants
        .create(Participant::new("Fabre", "Léa", TypeParticipant::Parent))
        .await
        .unwrap();

    ctl.inscriptions
        .create(Inscription::new(atelier.id, parent.id))
        .await
        .unwrap();
    let complet = ctl.inscriptions.create(Inscription::new(atelier.id, autre.id)).await;
    assert!(matches!(complet, Err(AppError::Conflict(_))));

    assert_eq!(api.records("inscriptions").len(), 1);
}

#[tokio::test]
async fn test_unreachable_server_is_an_error_not_an_empty_list() {
    let _env = init_test_env();
    let api = MockApi::start().await;
    api.set_online(false);

    let store = remote(&api);
    let err = store.list_ateliers().await.unwrap_err();
    assert!(err.is_network(), "erreur inattendue : {err}");
    assert!(!store.client().is_reachable().await);

    api.set_online(true);
    assert!(store.client().is_reachable().await);
    assert!(store.list_ateliers().await.unwrap().is_empty());
}

// FICHIER : src-core/tests/store_suite/legacy_files.rs

use crate::common::init_test_env;
use ram_ateliers::models::{TypeParticipant, TypePublic};
use ram_ateliers::{DataStore, JsonStore};

// Fichiers tels qu'écrits par l'ancienne application de bureau :
// liste enveloppée, énumérations numériques, champs dérivés et références.
const LEGACY_ATELIERS: &str = r#"{
  "$id": "1",
  "$values": [
    {
      "$id": "2",
      "Id": 1,
      "Titre": "Peinture propre",
      "Description": "Peinture sans pinceau",
      "DateDebut": "2030-06-12T09:30:00",
      "Duree": 90,
      "NombrePlaces": 8,
      "PublicConcerne": 2,
      "Inscriptions": { "$id": "3", "$values": [] },
      "PlacesDisponibles": 8,
      "EstComplet": false
    }
  ]
}"#;

const LEGACY_PARTICIPANTS: &str = r#"[
  { "Id": 5, "Nom": "Lefebvre", "Prenom": "Marie", "Email": "", "Telephone": "0601020304", "Type": 1 }
]"#;

#[tokio::test]
async fn test_legacy_files_are_loaded() {
    let env = init_test_env();
    tokio::fs::write(env.cfg.collection_path("ateliers"), LEGACY_ATELIERS)
        .await
        .unwrap();
    tokio::fs::write(env.cfg.collection_path("participants"), LEGACY_PARTICIPANTS)
        .await
        .unwrap();

    let store = JsonStore::open(env.cfg.clone()).await.unwrap();

    let ateliers = store.list_ateliers().await.unwrap();
    assert_eq!(ateliers.len(), 1);
    assert_eq!(ateliers[0].public_concerne, TypePublic::Tous);
    assert_eq!(ateliers[0].duree, 90);

    let participant = store.get_participant(5).await.unwrap().unwrap();
    assert_eq!(participant.type_participant, TypeParticipant::AssistanteMaternelle);
    assert_eq!(participant.telephone, "0601020304");

    assert!(store.list_inscriptions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupted_collection_starts_empty_without_affecting_others() {
    let env = init_test_env();
    tokio::fs::write(env.cfg.collection_path("ateliers"), "{ pas du json")
        .await
        .unwrap();
    tokio::fs::write(env.cfg.collection_path("participants"), LEGACY_PARTICIPANTS)
        .await
        .unwrap();

    let store = JsonStore::open(env.cfg.clone()).await.unwrap();
    assert!(store.list_ateliers().await.unwrap().is_empty());
    assert_eq!(store.list_participants().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_legacy_file_is_rewritten_in_current_format() {
    let env = init_test_env();
    tokio::fs::write(env.cfg.collection_path("ateliers"), LEGACY_ATELIERS)
        .await
        .unwrap();

    let store = JsonStore::open(env.cfg.clone()).await.unwrap();
    let mut atelier = store.get_atelier(1).await.unwrap().unwrap();
    atelier.nombre_places = 10;
    store.update_atelier(atelier).await.unwrap();

    let raw = tokio::fs::read_to_string(env.cfg.collection_path("ateliers"))
        .await
        .unwrap();
    assert!(raw.trim_start().starts_with('['));
    assert!(!raw.contains("$values"));
    assert!(raw.contains("\"PublicConcerne\": \"Tous\""));
}

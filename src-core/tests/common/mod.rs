// FICHIER : src-core/tests/common/mod.rs

pub mod mock_api;

use chrono::{NaiveDate, NaiveDateTime};
use ram_ateliers::controllers::Clock;
use ram_ateliers::json_db::JsonDbConfig;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

#[allow(dead_code)]
pub struct TestEnv {
    pub cfg: JsonDbConfig,
    pub _tmp_dir: TempDir,
}

/// Logs de test + dossier de données isolé pour chaque test.
pub fn init_test_env() -> TestEnv {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });

    let tmp_dir = tempfile::Builder::new()
        .prefix("ram_it_")
        .tempdir()
        .expect("❌ Impossible de créer le dossier temporaire");

    TestEnv {
        cfg: JsonDbConfig::new(tmp_dir.path().to_path_buf()),
        _tmp_dir: tmp_dir,
    }
}

#[allow(dead_code)]
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("date de test invalide")
}

/// Horloge figée au 1er mars 2030, 12h00.
#[allow(dead_code)]
pub fn fixed_clock() -> Clock {
    let now = at(2030, 3, 1, 12, 0);
    Arc::new(move || now)
}

// FICHIER : src-core/src/sync/synced_atelier.rs

use super::connectivity::{Connectivity, ConnectivityMonitor, ConnectivityState};
use super::journal::{Journal, PendingOp};
use super::status::{Mirror, Rejection, SyncReport, SyncStatus, WriteOutcome};
use crate::api::RestApiClient;
use crate::controllers::{system_clock, validation, Clock};
use crate::json_db::{Collection, JsonDbConfig};
use crate::models::{Atelier, Entity, EntityId};
use crate::utils::config::ApiConfig;
use crate::utils::{fs, prelude::*, Arc, AsyncMutex};
use chrono::NaiveDateTime;
use std::time::Duration;

#[derive(Clone)]
pub struct SyncOptions {
    pub health_interval: Duration,
    pub clock: Clock,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            health_interval: Duration::from_secs(5),
            clock: system_clock(),
        }
    }
}

impl SyncOptions {
    pub fn from_api(api: &ApiConfig) -> Self {
        Self {
            health_interval: api.health_interval(),
            ..Self::default()
        }
    }
}

struct CacheState {
    ateliers: Collection<Atelier>,
    journal: Journal,
    status: SyncStatus,
}

impl CacheState {
    fn offline_status(&self) -> SyncStatus {
        SyncStatus::Offline {
            pending: self.journal.len(),
        }
    }
}

struct Inner {
    config: JsonDbConfig,
    client: RestApiClient,
    connectivity: ConnectivityState,
    clock: Clock,
    /// Sérialise les écritures et les passes de synchronisation.
    writes: AsyncMutex<()>,
    /// Jamais tenu pendant un appel réseau.
    state: AsyncMutex<CacheState>,
}

/// Contrôleur d'ateliers servi depuis un cache local, recopié vers l'API.
///
/// Les lectures ne touchent jamais le réseau. Les écritures sont validées,
/// appliquées au cache, persistées, puis recopiées si la connexion est
/// disponible ; sinon elles restent dans le journal jusqu'à la prochaine
/// synchronisation.
pub struct SyncedAtelierController {
    inner: Arc<Inner>,
    _monitor: ConnectivityMonitor,
}

impl SyncedAtelierController {
    /// Charge le cache et le journal, sonde l'API une fois et, si elle
    /// répond, synchronise avant de rendre la main.
    #[instrument(skip_all, fields(root = ?config.data_root, api = client.base_url()))]
    pub async fn open(
        config: JsonDbConfig,
        client: RestApiClient,
        options: SyncOptions,
    ) -> Result<Self> {
        fs::ensure_dir(&config.data_root).await?;
        let ateliers = Collection::load(&config.cache_path(Atelier::COLLECTION)).await;
        let journal = Journal::load(&config.pending_path(Atelier::COLLECTION)).await;
        info!(
            cache = ateliers.len(),
            pending = journal.len(),
            "Cache des ateliers chargé"
        );

        let reachable = client.is_reachable().await;
        let inner = Arc::new(Inner {
            config,
            client: client.clone(),
            connectivity: ConnectivityState::new(Connectivity::from_reachable(reachable)),
            clock: options.clock,
            writes: AsyncMutex::new(()),
            state: AsyncMutex::new(CacheState {
                ateliers,
                journal,
                status: SyncStatus::Initializing,
            }),
        });

        if reachable {
            let _writes = inner.writes.lock().await;
            let mut report = SyncReport::default();
            if let Err(e) = inner.sync_pass(&mut report).await {
                warn!("Synchronisation initiale impossible : {}", e);
            }
        } else {
            let mut state = inner.state.lock().await;
            state.status = state.offline_status();
        }

        let weak = Arc::downgrade(&inner);
        let monitor = ConnectivityMonitor::spawn(client, options.health_interval, move |up| {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => {
                        inner.on_probe(up).await;
                        true
                    }
                    None => false,
                }
            }
        });

        Ok(Self {
            inner,
            _monitor: monitor,
        })
    }

    pub async fn status(&self) -> SyncStatus {
        self.inner.state.lock().await.status.clone()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.inner.connectivity.current()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Connectivity> {
        self.inner.connectivity.subscribe()
    }

    pub async fn pending(&self) -> Vec<PendingOp> {
        self.inner.state.lock().await.journal.ops().to_vec()
    }

    // --- LECTURES (cache uniquement) ---

    pub async fn get_all(&self) -> Vec<Atelier> {
        self.inner.state.lock().await.ateliers.to_vec()
    }

    pub async fn get_by_id(&self, id: EntityId) -> Option<Atelier> {
        self.inner.state.lock().await.ateliers.get(id).cloned()
    }

    pub async fn get_by_period(&self, debut: NaiveDateTime, fin: NaiveDateTime) -> Vec<Atelier> {
        let mut ateliers: Vec<Atelier> = self
            .get_all()
            .await
            .into_iter()
            .filter(|a| a.date_debut >= debut && a.date_debut < fin)
            .collect();
        ateliers.sort_by_key(|a| a.date_debut);
        ateliers
    }

    pub async fn get_upcoming(&self) -> Vec<Atelier> {
        let now = (self.inner.clock)();
        let mut ateliers: Vec<Atelier> = self
            .get_all()
            .await
            .into_iter()
            .filter(|a| a.date_debut > now)
            .collect();
        ateliers.sort_by_key(|a| a.date_debut);
        ateliers
    }

    // --- ÉCRITURES ---

    #[instrument(skip(self, atelier), fields(titre = %atelier.titre))]
    pub async fn create(&self, atelier: Atelier) -> Result<WriteOutcome<Atelier>> {
        validation::valider_nouvel_atelier(&atelier, (self.inner.clock)().date())?;

        let _writes = self.inner.writes.lock().await;
        let local = {
            let mut state = self.inner.state.lock().await;
            let mut local = atelier;
            local.id = state.ateliers.placeholder_id();
            let record = local.clone();
            self.inner
                .apply_locally(&mut state, PendingOp::Create { atelier: local.clone() }, |ateliers| {
                    ateliers.push(record);
                })
                .await?;
            local
        };

        let (mirror, final_id) = self.inner.mirror(local.id).await;
        let record = self.get_by_id(final_id).await.unwrap_or(local);
        Ok(WriteOutcome { record, mirror })
    }

    #[instrument(skip(self, atelier), fields(id = atelier.id))]
    pub async fn update(&self, atelier: Atelier) -> Result<WriteOutcome<Atelier>> {
        validation::valider_atelier(&atelier)?;

        let _writes = self.inner.writes.lock().await;
        let id = atelier.id;
        {
            let mut state = self.inner.state.lock().await;
            if !state.ateliers.contains(id) {
                return Err(AppError::not_found("L'atelier spécifié n'existe pas."));
            }
            let record = atelier.clone();
            self.inner
                .apply_locally(&mut state, PendingOp::Update { atelier: atelier.clone() }, |ateliers| {
                    ateliers.replace(record);
                })
                .await?;
        }

        let (mirror, _) = self.inner.mirror(id).await;
        let record = self.get_by_id(id).await.unwrap_or(atelier);
        Ok(WriteOutcome { record, mirror })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<Mirror> {
        let _writes = self.inner.writes.lock().await;
        {
            let mut state = self.inner.state.lock().await;
            if !state.ateliers.contains(id) {
                return Err(AppError::not_found("L'atelier spécifié n'existe pas."));
            }
            self.inner
                .apply_locally(&mut state, PendingOp::Delete { id }, |ateliers| {
                    ateliers.remove(id);
                })
                .await?;
        }

        let (mirror, _) = self.inner.mirror(id).await;
        Ok(mirror)
    }

    /// Passe complète : rejeu du journal puis rechargement de l'instantané distant.
    pub async fn synchronize(&self) -> Result<SyncReport> {
        let _writes = self.inner.writes.lock().await;
        let mut report = SyncReport::default();
        self.inner.sync_pass(&mut report).await?;
        Ok(report)
    }
}

impl Inner {
    async fn on_probe(&self, reachable: bool) {
        let reconnected = self.connectivity.update(reachable);
        if reconnected {
            info!("Connexion à l'API rétablie, synchronisation");
            let _writes = self.writes.lock().await;
            let mut report = SyncReport::default();
            if let Err(e) = self.sync_pass(&mut report).await {
                warn!("Synchronisation après reconnexion impossible : {}", e);
            }
        } else if reachable {
            // Des modifications ont pu rester en attente après une erreur
            let _writes = self.writes.lock().await;
            let pending = !self.state.lock().await.journal.is_empty();
            if pending {
                let mut report = SyncReport::default();
                if let Err(e) = self.sync_pass(&mut report).await {
                    debug!("Nouvelle tentative de synchronisation échouée : {}", e);
                }
            }
        } else {
            let mut state = self.state.lock().await;
            state.status = state.offline_status();
        }
    }

    /// Applique la mutation au cache, la journalise et persiste les deux.
    /// En cas d'échec d'écriture, le cache et le journal sont restaurés.
    async fn apply_locally<F>(&self, state: &mut CacheState, op: PendingOp, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Collection<Atelier>) + Send,
    {
        let snapshot = (state.ateliers.clone(), state.journal.clone());
        mutate(&mut state.ateliers);
        state.journal.record(op);

        if let Err(e) = self.persist(state).await {
            error!("Écriture du cache impossible : {}", e);
            state.ateliers = snapshot.0;
            state.journal = snapshot.1;
            return Err(e);
        }
        Ok(())
    }

    /// Recopie vers le serveur si connecté, et qualifie le sort de la
    /// mutation portant sur `id`. Renvoie aussi l'identifiant définitif.
    /// L'appelant tient le verrou d'écriture.
    async fn mirror(&self, id: EntityId) -> (Mirror, EntityId) {
        if !self.connectivity.is_connected() {
            let mut state = self.state.lock().await;
            state.status = state.offline_status();
            return (Mirror::Pending, id);
        }

        let mut report = SyncReport::default();
        if let Err(e) = self.sync_pass(&mut report).await {
            debug!("Recopie différée : {}", e);
        }

        if let Some(rejection) = report.rejection_for(id) {
            return (Mirror::Rejected(rejection.message.clone()), id);
        }
        if self.state.lock().await.journal.touches(id) {
            return (Mirror::Pending, id);
        }
        (Mirror::Synced, report.resolved_id(id))
    }

    /// L'appelant tient le verrou d'écriture : le journal ne change pas
    /// pendant la passe, seul `state` est repris entre deux requêtes.
    #[instrument(skip_all)]
    async fn sync_pass(&self, report: &mut SyncReport) -> Result<()> {
        self.state.lock().await.status = SyncStatus::Syncing;

        let result = self.replay_and_pull(report).await;

        let mut state = self.state.lock().await;
        match &result {
            Ok(()) => {
                self.connectivity.update(true);
                state.status = SyncStatus::UpToDate;
                info!(
                    pushed = report.pushed,
                    rejected = report.rejected.len(),
                    pulled = report.pulled,
                    "Synchronisation terminée"
                );
            }
            Err(e) if e.is_network() => {
                self.connectivity.update(false);
                state.status = state.offline_status();
            }
            Err(e) => {
                state.status = SyncStatus::Error(e.to_string());
            }
        }
        result
    }

    async fn replay_and_pull(&self, report: &mut SyncReport) -> Result<()> {
        self.replay(report).await?;

        let remote: Vec<Atelier> = self.client.list().await?;
        report.pulled = remote.len();

        let mut state = self.state.lock().await;
        state.ateliers.set_all(remote);
        self.persist(&state).await
    }

    async fn replay(&self, report: &mut SyncReport) -> Result<()> {
        loop {
            let front = self.state.lock().await.journal.front().cloned();
            let Some(op) = front else {
                return Ok(());
            };

            let outcome = self.push(&op).await;

            let mut state = self.state.lock().await;
            match outcome {
                Ok(Some(created)) => {
                    let placeholder = op.target_id();
                    debug!(placeholder, id = created.id, "Création confirmée par le serveur");
                    report.remapped.push((placeholder, created.id));
                    state.ateliers.replace_id(placeholder, created);
                    report.pushed += 1;
                }
                Ok(None) => report.pushed += 1,
                Err(AppError::NotFound(_)) if matches!(op, PendingOp::Delete { .. }) => {
                    debug!(id = op.target_id(), "Déjà supprimé côté serveur");
                    report.pushed += 1;
                }
                Err(e) if e.is_rejection() => {
                    warn!(id = op.target_id(), op = op.name(), "Modification refusée : {}", e);
                    report.rejected.push(Rejection {
                        id: op.target_id(),
                        operation: op.name().to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
            state.journal.pop_front();
            // La progression du rejeu est conservée même si la passe s'interrompt.
            self.persist(&state).await?;
        }
    }

    /// Envoie une opération. Une création renvoie l'enregistrement du serveur.
    async fn push(&self, op: &PendingOp) -> Result<Option<Atelier>> {
        match op {
            PendingOp::Create { atelier } => self.client.create(atelier).await.map(Some),
            PendingOp::Update { atelier } => self.client.update(atelier).await.map(|_| None),
            PendingOp::Delete { id } => self.client.delete::<Atelier>(*id).await.map(|_| None),
        }
    }

    async fn persist(&self, state: &CacheState) -> Result<()> {
        state
            .ateliers
            .save(&self.config.cache_path(Atelier::COLLECTION))
            .await?;
        state
            .journal
            .save(&self.config.pending_path(Atelier::COLLECTION))
            .await
    }
}

// FICHIER : src-core/src/sync/connectivity.rs

use crate::api::RestApiClient;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Disconnected,
    Connected,
}

impl Connectivity {
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            Connectivity::Connected
        } else {
            Connectivity::Disconnected
        }
    }
}

/// État de connexion partagé, observable via `subscribe`.
#[derive(Debug)]
pub struct ConnectivityState {
    tx: watch::Sender<Connectivity>,
}

impl ConnectivityState {
    pub fn new(initial: Connectivity) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Connectivity {
        *self.tx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.current() == Connectivity::Connected
    }

    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.tx.subscribe()
    }

    /// Enregistre le résultat d'une sonde. `true` uniquement sur la
    /// transition Déconnecté -> Connecté.
    pub fn update(&self, reachable: bool) -> bool {
        let next = Connectivity::from_reachable(reachable);
        let previous = self.tx.send_replace(next);
        if previous != next {
            info!(?previous, ?next, "Changement d'état de la connexion");
        }
        previous == Connectivity::Disconnected && next == Connectivity::Connected
    }
}

/// Tâche de fond qui sonde `GET {base}/health` à intervalle régulier.
///
/// La tâche s'arrête quand le moniteur est détruit, ou quand `on_probe`
/// renvoie `false`.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    handle: JoinHandle<()>,
}

impl ConnectivityMonitor {
    pub fn spawn<F, Fut>(client: RestApiClient, period: Duration, on_probe: F) -> Self
    where
        F: Fn(bool) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Le premier tick est immédiat : l'état initial est déjà connu.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let reachable = client.is_reachable().await;
                debug!(reachable, "Sonde de connectivité");
                if !on_probe(reachable).await {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

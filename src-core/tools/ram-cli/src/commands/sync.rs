use super::atelier::AtelierFields;
use super::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use ram_ateliers::api::RestApiClient;
use ram_ateliers::json_db::JsonDbConfig;
use ram_ateliers::sync::{Mirror, SyncOptions, SyncedAtelierController};
use ram_ateliers::{user_error, user_info, user_success};

#[derive(Args, Clone, Debug)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub command: SyncCommands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum SyncCommands {
    /// État de la connexion et du journal local
    Status,
    /// Rejoue les modifications en attente puis recharge les ateliers du serveur
    Run,
    /// Modifications locales pas encore envoyées
    Pending,
    /// Ateliers du cache local (disponible hors ligne)
    List,
    /// Crée un atelier dans le cache (envoyé dès que possible)
    Create(AtelierFields),
}

pub async fn handle(args: SyncArgs, ctx: &Context) -> Result<()> {
    let client = RestApiClient::new(&ctx.config.api)?;
    let cache = SyncedAtelierController::open(
        JsonDbConfig::from_app(&ctx.config),
        client,
        SyncOptions::from_api(&ctx.config.api),
    )
    .await?;

    match args.command {
        SyncCommands::Status => {
            user_info!("Connexion : {:?}", cache.connectivity());
            user_info!("État : {}", cache.status().await);
        }

        SyncCommands::Run => {
            let report = cache.synchronize().await?;
            for rejection in &report.rejected {
                user_error!(
                    "{} de l'atelier {} refusée : {}",
                    rejection.operation,
                    rejection.id,
                    rejection.message
                );
            }
            user_success!(
                "{} modification(s) envoyée(s), {} atelier(s) reçus",
                report.pushed,
                report.pulled
            );
        }

        SyncCommands::Pending => {
            let pending = cache.pending().await;
            user_info!("{} modification(s) en attente", pending.len());
            print_json(&pending)?;
        }

        SyncCommands::List => print_json(&cache.get_all().await)?,

        SyncCommands::Create(fields) => {
            let outcome = cache.create(fields.into_new()?).await?;
            match outcome.mirror {
                Mirror::Synced => user_success!("Atelier créé (id {})", outcome.record.id),
                Mirror::Pending => user_info!(
                    "Hors ligne : atelier gardé localement (id provisoire {})",
                    outcome.record.id
                ),
                Mirror::Rejected(message) => user_error!("Refusé par le serveur : {}", message),
            }
        }
    }
    Ok(())
}

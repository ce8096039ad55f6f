use super::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use ram_ateliers::models::{EntityId, Inscription};
use ram_ateliers::{user_info, user_success};

#[derive(Args, Clone, Debug)]
pub struct InscriptionArgs {
    #[command(subcommand)]
    pub command: InscriptionCommands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum InscriptionCommands {
    /// Inscriptions avec atelier et participant résolus
    List {
        #[arg(long, conflicts_with = "participant")]
        atelier: Option<EntityId>,
        #[arg(long)]
        participant: Option<EntityId>,
    },
    /// Inscrit un participant à un atelier
    Create {
        #[arg(long)]
        atelier: EntityId,
        #[arg(long)]
        participant: EntityId,
        #[arg(long)]
        commentaires: Option<String>,
    },
    Delete { id: EntityId },
    /// Note la présence (ou l'absence avec --absent)
    Presence {
        id: EntityId,
        #[arg(long)]
        absent: bool,
    },
    /// Liste d'émargement d'un atelier
    Emargement { atelier: EntityId },
}

pub async fn handle(args: InscriptionArgs, ctx: &Context) -> Result<()> {
    let inscriptions = &ctx.controllers.inscriptions;

    match args.command {
        InscriptionCommands::List {
            atelier,
            participant,
        } => match (atelier, participant) {
            (Some(atelier_id), _) => print_json(&inscriptions.get_presences(atelier_id).await?)?,
            (None, Some(participant_id)) => {
                print_json(&inscriptions.get_by_participant(participant_id).await?)?
            }
            (None, None) => print_json(&inscriptions.get_all_details().await?)?,
        },

        InscriptionCommands::Create {
            atelier,
            participant,
            commentaires,
        } => {
            let mut inscription = Inscription::new(atelier, participant);
            inscription.commentaires = commentaires.unwrap_or_default();
            let created = inscriptions.create(inscription).await?;
            user_success!("Inscription enregistrée (id {})", created.id);
        }

        InscriptionCommands::Delete { id } => {
            inscriptions.delete(id).await?;
            user_success!("Inscription {} supprimée", id);
        }

        InscriptionCommands::Presence { id, absent } => {
            let updated = inscriptions.marquer_presence(id, !absent).await?;
            if updated.presence {
                user_success!("Présence notée pour l'inscription {}", id);
            } else {
                user_success!("Absence notée pour l'inscription {}", id);
            }
        }

        InscriptionCommands::Emargement { atelier } => {
            let lignes = inscriptions.liste_emargement(atelier).await?;
            user_info!("{} inscrit(s)", lignes.len());
            for ligne in lignes {
                println!("  [ ] {}", ligne);
            }
        }
    }
    Ok(())
}

use super::{print_json, Context};
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use ram_ateliers::models::{EntityId, Participant, TypeParticipant};
use ram_ateliers::{user_info, user_success};

#[derive(Args, Clone, Debug)]
pub struct ParticipantArgs {
    #[command(subcommand)]
    pub command: ParticipantCommands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ParticipantFields {
    #[arg(long)]
    pub nom: Option<String>,
    #[arg(long)]
    pub prenom: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telephone: Option<String>,
    /// parent | assistante-maternelle
    #[arg(long = "type")]
    pub type_participant: Option<TypeParticipant>,
}

impl ParticipantFields {
    fn into_new(self) -> Result<Participant> {
        let mut participant = Participant::new(
            self.nom.ok_or_else(|| anyhow!("--nom est obligatoire"))?,
            self.prenom.ok_or_else(|| anyhow!("--prenom est obligatoire"))?,
            self.type_participant.unwrap_or_default(),
        );
        participant.email = self.email.unwrap_or_default();
        participant.telephone = self.telephone.unwrap_or_default();
        Ok(participant)
    }

    fn apply(self, participant: &mut Participant) {
        if let Some(nom) = self.nom {
            participant.nom = nom;
        }
        if let Some(prenom) = self.prenom {
            participant.prenom = prenom;
        }
        if let Some(email) = self.email {
            participant.email = email;
        }
        if let Some(telephone) = self.telephone {
            participant.telephone = telephone;
        }
        if let Some(t) = self.type_participant {
            participant.type_participant = t;
        }
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum ParticipantCommands {
    /// Liste les participants (filtre par type ou recherche sur le nom)
    List {
        #[arg(long = "type", conflicts_with = "recherche")]
        type_participant: Option<TypeParticipant>,
        #[arg(long)]
        recherche: Option<String>,
    },
    /// Participant et ses inscriptions
    Show { id: EntityId },
    Create(ParticipantFields),
    Update {
        id: EntityId,
        #[command(flatten)]
        fields: ParticipantFields,
    },
    Delete { id: EntityId },
}

pub async fn handle(args: ParticipantArgs, ctx: &Context) -> Result<()> {
    let participants = &ctx.controllers.participants;

    match args.command {
        ParticipantCommands::List {
            type_participant,
            recherche,
        } => {
            let liste = match (type_participant, recherche) {
                (Some(t), _) => participants.get_by_type(t).await?,
                (None, Some(terme)) => participants.search(&terme).await?,
                (None, None) => participants.get_all().await?,
            };
            user_info!("{} participant(s)", liste.len());
            print_json(&liste)?;
        }

        ParticipantCommands::Show { id } => {
            let detail = participants
                .get_detail(id)
                .await?
                .ok_or_else(|| anyhow!("Participant {} introuvable", id))?;
            print_json(&detail)?;
        }

        ParticipantCommands::Create(fields) => {
            let created = participants.create(fields.into_new()?).await?;
            user_success!("{} enregistré(e) (id {})", created.nom_complet(), created.id);
        }

        ParticipantCommands::Update { id, fields } => {
            let mut participant = participants
                .get_by_id(id)
                .await?
                .ok_or_else(|| anyhow!("Participant {} introuvable", id))?;
            fields.apply(&mut participant);
            let updated = participants.update(participant).await?;
            user_success!("{} mis(e) à jour", updated.nom_complet());
        }

        ParticipantCommands::Delete { id } => {
            participants.delete(id).await?;
            user_success!("Participant {} supprimé", id);
        }
    }
    Ok(())
}

use super::{parse_date, print_json, Context};
use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use ram_ateliers::models::{Atelier, EntityId, TypePublic};
use ram_ateliers::{user_info, user_success};

#[derive(Args, Clone, Debug)]
pub struct AtelierArgs {
    #[command(subcommand)]
    pub command: AtelierCommands,
}

/// Champs saisissables d'un atelier. Tous optionnels pour une modification.
#[derive(Args, Clone, Debug, Default)]
pub struct AtelierFields {
    #[arg(long)]
    pub titre: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Début : "AAAA-MM-JJ HH:MM"
    #[arg(long, value_parser = parse_date)]
    pub debut: Option<NaiveDateTime>,
    /// Durée en minutes
    #[arg(long)]
    pub duree: Option<i64>,
    #[arg(long)]
    pub places: Option<i32>,
    /// parents | assistantes-maternelles | tous
    #[arg(long)]
    pub public: Option<TypePublic>,
}

impl AtelierFields {
    pub fn into_new(self) -> Result<Atelier> {
        let titre = self.titre.ok_or_else(|| anyhow!("--titre est obligatoire"))?;
        let debut = self.debut.ok_or_else(|| anyhow!("--debut est obligatoire"))?;
        let mut atelier = Atelier::new(
            titre,
            debut,
            self.duree.unwrap_or(60),
            self.places.unwrap_or(10),
            self.public.unwrap_or(TypePublic::Tous),
        );
        atelier.description = self.description.unwrap_or_default();
        Ok(atelier)
    }

    pub fn apply(self, atelier: &mut Atelier) {
        if let Some(titre) = self.titre {
            atelier.titre = titre;
        }
        if let Some(description) = self.description {
            atelier.description = description;
        }
        if let Some(debut) = self.debut {
            atelier.date_debut = debut;
        }
        if let Some(duree) = self.duree {
            atelier.duree = duree;
            atelier.date_heure_fin = None;
        }
        if let Some(places) = self.places {
            atelier.nombre_places = places;
        }
        if let Some(public) = self.public {
            atelier.public_concerne = public;
        }
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum AtelierCommands {
    /// Liste les ateliers avec places restantes
    List {
        #[arg(long, conflicts_with = "passes")]
        a_venir: bool,
        #[arg(long)]
        passes: bool,
        #[arg(long)]
        public: Option<TypePublic>,
        /// Début de période (inclus)
        #[arg(long, value_parser = parse_date, requires = "au")]
        du: Option<NaiveDateTime>,
        /// Fin de période (exclue)
        #[arg(long, value_parser = parse_date, requires = "du")]
        au: Option<NaiveDateTime>,
    },
    /// Détail d'un atelier et de ses inscriptions
    Show { id: EntityId },
    Create(AtelierFields),
    Update {
        id: EntityId,
        #[command(flatten)]
        fields: AtelierFields,
    },
    Delete { id: EntityId },
}

pub async fn handle(args: AtelierArgs, ctx: &Context) -> Result<()> {
    let ateliers = &ctx.controllers.ateliers;

    match args.command {
        AtelierCommands::List {
            a_venir,
            passes,
            public,
            du,
            au,
        } => {
            let liste = match (du.zip(au), public) {
                (Some((du, au)), _) => Some(ateliers.get_by_period(du, au).await?),
                (None, Some(public)) => Some(ateliers.get_by_public(public).await?),
                _ if a_venir => Some(ateliers.get_upcoming().await?),
                _ if passes => Some(ateliers.get_past().await?),
                _ => None,
            };
            match liste {
                Some(liste) => {
                    user_info!("{} atelier(s)", liste.len());
                    print_json(&liste)?;
                }
                None => {
                    let details = ateliers.get_all_details().await?;
                    user_info!("{} atelier(s)", details.len());
                    print_json(&details)?;
                }
            }
        }

        AtelierCommands::Show { id } => {
            let detail = ateliers
                .get_detail(id)
                .await?
                .ok_or_else(|| anyhow!("Atelier {} introuvable", id))?;
            print_json(&detail)?;
        }

        AtelierCommands::Create(fields) => {
            let created = ateliers.create(fields.into_new()?).await?;
            user_success!("Atelier créé (id {})", created.id);
            print_json(&created)?;
        }

        AtelierCommands::Update { id, fields } => {
            let mut atelier = ateliers
                .get_by_id(id)
                .await?
                .ok_or_else(|| anyhow!("Atelier {} introuvable", id))?;
            fields.apply(&mut atelier);
            let updated = ateliers.update(atelier).await?;
            user_success!("Atelier {} mis à jour", id);
            print_json(&updated)?;
        }

        AtelierCommands::Delete { id } => {
            ateliers.delete(id).await?;
            user_success!("Atelier {} supprimé", id);
        }
    }
    Ok(())
}

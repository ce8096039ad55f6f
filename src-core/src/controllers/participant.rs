// FICHIER : src-core/src/controllers/participant.rs

use super::validation;
use super::ControllerContext;
use crate::models::{group_inscriptions, EntityId, Participant, ParticipantDetail, TypeParticipant};
use crate::utils::prelude::*;

#[derive(Clone)]
pub struct ParticipantController {
    ctx: ControllerContext,
}

impl ParticipantController {
    pub fn new(ctx: ControllerContext) -> Self {
        Self { ctx }
    }

    pub async fn get_all(&self) -> Result<Vec<Participant>> {
        self.ctx.store().list_participants().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<Option<Participant>> {
        self.ctx.store().get_participant(id).await
    }

    pub async fn get_detail(&self, id: EntityId) -> Result<Option<ParticipantDetail>> {
        let Some(participant) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let inscriptions = self.ctx.store().inscriptions_for_participant(id).await?;
        Ok(Some(ParticipantDetail::new(participant, inscriptions)))
    }

    pub async fn get_all_details(&self) -> Result<Vec<ParticipantDetail>> {
        let participants = self.get_all().await?;
        let inscriptions = self.ctx.store().list_inscriptions().await?;
        let mut par_participant = group_inscriptions(&inscriptions, |i| i.participant_id);

        Ok(participants
            .into_iter()
            .map(|p| {
                let liees = par_participant.remove(&p.id).unwrap_or_default();
                ParticipantDetail::new(p, liees)
            })
            .collect())
    }

    pub async fn get_by_type(&self, type_participant: TypeParticipant) -> Result<Vec<Participant>> {
        let mut participants: Vec<Participant> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|p| p.type_participant == type_participant)
            .collect();
        trier_par_nom(&mut participants);
        Ok(participants)
    }

    /// Recherche insensible à la casse dans le nom ou le prénom.
    /// Un terme vide renvoie tous les participants.
    pub async fn search(&self, terme: &str) -> Result<Vec<Participant>> {
        let terme = terme.trim().to_lowercase();
        let mut participants = self.get_all().await?;
        if terme.is_empty() {
            return Ok(participants);
        }

        participants.retain(|p| {
            p.nom.to_lowercase().contains(&terme) || p.prenom.to_lowercase().contains(&terme)
        });
        trier_par_nom(&mut participants);
        Ok(participants)
    }

    #[instrument(skip(self, participant), fields(nom = %participant.nom))]
    pub async fn create(&self, participant: Participant) -> Result<Participant> {
        validation::valider_participant(&participant)?;

        let _guard = self.ctx.lock_writes().await;
        let created = self.ctx.store().insert_participant(participant).await?;
        info!(id = created.id, "Participant créé");
        Ok(created)
    }

    #[instrument(skip(self, participant), fields(id = participant.id))]
    pub async fn update(&self, participant: Participant) -> Result<Participant> {
        if participant.id <= 0 {
            return Err(AppError::validation("L'ID du participant est invalide."));
        }
        validation::valider_participant(&participant)?;

        let _guard = self.ctx.lock_writes().await;
        if self.get_by_id(participant.id).await?.is_none() {
            return Err(AppError::not_found("Le participant spécifié n'existe pas."));
        }
        let updated = self.ctx.store().update_participant(participant).await?;
        info!("Participant mis à jour");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _guard = self.ctx.lock_writes().await;
        if self.get_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Le participant spécifié n'existe pas."));
        }
        if !self
            .ctx
            .store()
            .inscriptions_for_participant(id)
            .await?
            .is_empty()
        {
            return Err(AppError::conflict(
                "Impossible de supprimer un participant qui a des inscriptions.",
            ));
        }

        self.ctx.store().delete_participant(id).await?;
        info!("Participant supprimé");
        Ok(())
    }
}

fn trier_par_nom(participants: &mut [Participant]) {
    participants.sort_by(|a, b| a.nom.cmp(&b.nom).then_with(|| a.prenom.cmp(&b.prenom)));
}

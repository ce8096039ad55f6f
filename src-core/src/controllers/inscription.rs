// FICHIER : src-core/src/controllers/inscription.rs

use super::validation;
use super::{AtelierController, ControllerContext, ParticipantController};
use crate::models::{Atelier, EntityId, Inscription, InscriptionDetail, Participant};
use crate::utils::{prelude::*, HashMap};

#[derive(Clone)]
pub struct InscriptionController {
    ctx: ControllerContext,
    ateliers: AtelierController,
    participants: ParticipantController,
}

impl InscriptionController {
    pub fn new(
        ctx: ControllerContext,
        ateliers: AtelierController,
        participants: ParticipantController,
    ) -> Self {
        Self {
            ctx,
            ateliers,
            participants,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Inscription>> {
        self.ctx.store().list_inscriptions().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<Option<Inscription>> {
        self.ctx.store().get_inscription(id).await
    }

    pub async fn get_by_atelier(&self, atelier_id: EntityId) -> Result<Vec<Inscription>> {
        self.ctx.store().inscriptions_for_atelier(atelier_id).await
    }

    pub async fn get_by_participant(&self, participant_id: EntityId) -> Result<Vec<Inscription>> {
        self.ctx
            .store()
            .inscriptions_for_participant(participant_id)
            .await
    }

    /// Toutes les inscriptions avec atelier et participant résolus.
    pub async fn get_all_details(&self) -> Result<Vec<InscriptionDetail>> {
        let inscriptions = self.get_all().await?;
        self.resolve(inscriptions).await
    }

    /// Feuille de présence d'un atelier : inscriptions résolues, triées par nom.
    pub async fn get_presences(&self, atelier_id: EntityId) -> Result<Vec<InscriptionDetail>> {
        let inscriptions = self.get_by_atelier(atelier_id).await?;
        let mut details = self.resolve(inscriptions).await?;
        details.sort_by(|a, b| cle_tri(a.participant.as_ref()).cmp(&cle_tri(b.participant.as_ref())));
        Ok(details)
    }

    /// Lignes « Nom Prénom » de la liste d'émargement, triées par nom puis prénom.
    pub async fn liste_emargement(&self, atelier_id: EntityId) -> Result<Vec<String>> {
        if self.ateliers.get_by_id(atelier_id).await?.is_none() {
            return Err(AppError::not_found("L'atelier spécifié n'existe pas."));
        }

        let mut lignes = Vec::new();
        for detail in self.get_presences(atelier_id).await? {
            match detail.participant {
                Some(p) => lignes.push(format!("{} {}", p.nom, p.prenom)),
                None => warn!(
                    inscription = detail.inscription.id,
                    "Inscription orpheline ignorée dans la liste d'émargement"
                ),
            }
        }
        Ok(lignes)
    }

    /// Inscrit un participant. Vérifie, dans l'ordre : existence de l'atelier
    /// et du participant, public, places restantes, date, doublon.
    #[instrument(skip(self, inscription), fields(atelier = inscription.atelier_id, participant = inscription.participant_id))]
    pub async fn create(&self, inscription: Inscription) -> Result<Inscription> {
        let _guard = self.ctx.lock_writes().await;

        let atelier = self
            .ateliers
            .get_by_id(inscription.atelier_id)
            .await?
            .ok_or_else(|| AppError::not_found("L'atelier spécifié n'existe pas."))?;
        let participant = self
            .participants
            .get_by_id(inscription.participant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Le participant spécifié n'existe pas."))?;

        validation::verifier_public(&atelier, &participant)?;

        let existantes = self.get_by_atelier(atelier.id).await?;
        if existantes.len() as i64 >= i64::from(atelier.nombre_places) {
            return Err(AppError::conflict("Cet atelier est complet."));
        }
        if atelier.a_commence(self.ctx.now()) {
            return Err(AppError::conflict(
                "Impossible de s'inscrire à un atelier passé.",
            ));
        }
        if existantes
            .iter()
            .any(|i| i.participant_id == participant.id)
        {
            return Err(AppError::conflict(
                "Ce participant est déjà inscrit à cet atelier.",
            ));
        }

        let created = self.ctx.store().insert_inscription(inscription).await?;
        info!(id = created.id, "Inscription enregistrée");
        Ok(created)
    }

    /// Mise à jour des champs libres (commentaires, présence).
    /// L'atelier et le participant d'une inscription ne changent pas.
    #[instrument(skip(self, inscription), fields(id = inscription.id))]
    pub async fn update(&self, inscription: Inscription) -> Result<Inscription> {
        let _guard = self.ctx.lock_writes().await;

        let existante = self
            .get_by_id(inscription.id)
            .await?
            .ok_or_else(|| AppError::not_found("L'inscription spécifiée n'existe pas."))?;

        if existante.atelier_id != inscription.atelier_id
            || existante.participant_id != inscription.participant_id
        {
            return Err(AppError::validation(
                "L'atelier et le participant d'une inscription ne peuvent pas être modifiés.",
            ));
        }
        if inscription.presence && !existante.presence {
            self.verifier_debut(inscription.atelier_id).await?;
        }

        let updated = self.ctx.store().update_inscription(inscription).await?;
        info!("Inscription mise à jour");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _guard = self.ctx.lock_writes().await;
        if self.get_by_id(id).await?.is_none() {
            return Err(AppError::not_found("L'inscription spécifiée n'existe pas."));
        }
        self.ctx.store().delete_inscription(id).await?;
        info!("Inscription supprimée");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn marquer_presence(&self, id: EntityId, present: bool) -> Result<Inscription> {
        let _guard = self.ctx.lock_writes().await;

        let mut inscription = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("L'inscription spécifiée n'existe pas."))?;
        if present {
            self.verifier_debut(inscription.atelier_id).await?;
        }

        inscription.presence = present;
        self.ctx.store().update_inscription(inscription).await
    }

    async fn verifier_debut(&self, atelier_id: EntityId) -> Result<()> {
        match self.ateliers.get_by_id(atelier_id).await? {
            Some(atelier) if !atelier.a_commence(self.ctx.now()) => Err(AppError::conflict(
                "Impossible de noter la présence avant le début de l'atelier.",
            )),
            _ => Ok(()),
        }
    }

    // Résolution en un passage : deux tables de correspondance par identifiant.
    async fn resolve(&self, inscriptions: Vec<Inscription>) -> Result<Vec<InscriptionDetail>> {
        let ateliers: HashMap<EntityId, Atelier> = self
            .ateliers
            .get_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        let participants: HashMap<EntityId, Participant> = self
            .participants
            .get_all()
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(inscriptions
            .into_iter()
            .map(|inscription| InscriptionDetail {
                atelier: ateliers.get(&inscription.atelier_id).cloned(),
                participant: participants.get(&inscription.participant_id).cloned(),
                inscription,
            })
            .collect())
    }
}

fn cle_tri(participant: Option<&Participant>) -> (String, String) {
    participant
        .map(|p| (p.nom.clone(), p.prenom.clone()))
        .unwrap_or_default()
}

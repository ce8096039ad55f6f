// FICHIER : src-core/src/controllers/atelier.rs

use super::validation;
use super::ControllerContext;
use crate::models::{group_inscriptions, Atelier, AtelierDetail, EntityId, TypePublic};
use crate::utils::prelude::*;
use chrono::NaiveDateTime;

#[derive(Clone)]
pub struct AtelierController {
    ctx: ControllerContext,
}

impl AtelierController {
    pub fn new(ctx: ControllerContext) -> Self {
        Self { ctx }
    }

    pub async fn get_all(&self) -> Result<Vec<Atelier>> {
        self.ctx.store().list_ateliers().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> Result<Option<Atelier>> {
        self.ctx.store().get_atelier(id).await
    }

    /// Atelier avec ses inscriptions (places restantes, complet, date de fin).
    pub async fn get_detail(&self, id: EntityId) -> Result<Option<AtelierDetail>> {
        let Some(atelier) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let inscriptions = self.ctx.store().inscriptions_for_atelier(id).await?;
        Ok(Some(AtelierDetail::new(atelier, inscriptions)))
    }

    pub async fn get_all_details(&self) -> Result<Vec<AtelierDetail>> {
        let ateliers = self.get_all().await?;
        let inscriptions = self.ctx.store().list_inscriptions().await?;
        let mut par_atelier = group_inscriptions(&inscriptions, |i| i.atelier_id);

        Ok(ateliers
            .into_iter()
            .map(|a| {
                let liees = par_atelier.remove(&a.id).unwrap_or_default();
                AtelierDetail::new(a, liees)
            })
            .collect())
    }

    /// Ateliers dont le début est postérieur à maintenant, du plus proche au plus lointain.
    pub async fn get_upcoming(&self) -> Result<Vec<Atelier>> {
        let now = self.ctx.now();
        let mut ateliers: Vec<Atelier> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.date_debut > now)
            .collect();
        ateliers.sort_by_key(|a| a.date_debut);
        Ok(ateliers)
    }

    /// Ateliers commencés, du plus récent au plus ancien.
    pub async fn get_past(&self) -> Result<Vec<Atelier>> {
        let now = self.ctx.now();
        let mut ateliers: Vec<Atelier> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.date_debut < now)
            .collect();
        ateliers.sort_by(|a, b| b.date_debut.cmp(&a.date_debut));
        Ok(ateliers)
    }

    /// Ateliers ouverts à ce public (les ateliers « tous publics » inclus).
    pub async fn get_by_public(&self, public: TypePublic) -> Result<Vec<Atelier>> {
        let mut ateliers: Vec<Atelier> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.public_concerne == public || a.public_concerne == TypePublic::Tous)
            .collect();
        ateliers.sort_by_key(|a| a.date_debut);
        Ok(ateliers)
    }

    /// Ateliers commençant dans `[debut, fin)`.
    pub async fn get_by_period(
        &self,
        debut: NaiveDateTime,
        fin: NaiveDateTime,
    ) -> Result<Vec<Atelier>> {
        let mut ateliers: Vec<Atelier> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.date_debut >= debut && a.date_debut < fin)
            .collect();
        ateliers.sort_by_key(|a| a.date_debut);
        Ok(ateliers)
    }

    #[instrument(skip(self, atelier), fields(titre = %atelier.titre))]
    pub async fn create(&self, atelier: Atelier) -> Result<Atelier> {
        validation::valider_nouvel_atelier(&atelier, self.ctx.now().date())?;

        let _guard = self.ctx.lock_writes().await;
        let created = self.ctx.store().insert_atelier(atelier).await?;
        info!(id = created.id, "Atelier créé");
        Ok(created)
    }

    #[instrument(skip(self, atelier), fields(id = atelier.id))]
    pub async fn update(&self, atelier: Atelier) -> Result<Atelier> {
        validation::valider_atelier(&atelier)?;

        let _guard = self.ctx.lock_writes().await;
        if self.get_by_id(atelier.id).await?.is_none() {
            return Err(AppError::not_found("L'atelier spécifié n'existe pas."));
        }
        let inscrits = self.ctx.store().inscriptions_for_atelier(atelier.id).await?;
        validation::verifier_places(atelier.nombre_places, inscrits.len())?;

        let updated = self.ctx.store().update_atelier(atelier).await?;
        info!("Atelier mis à jour");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let _guard = self.ctx.lock_writes().await;
        if self.get_by_id(id).await?.is_none() {
            return Err(AppError::not_found("L'atelier spécifié n'existe pas."));
        }
        if !self.ctx.store().inscriptions_for_atelier(id).await?.is_empty() {
            return Err(AppError::conflict(
                "Impossible de supprimer un atelier qui a des inscriptions.",
            ));
        }

        self.ctx.store().delete_atelier(id).await?;
        info!("Atelier supprimé");
        Ok(())
    }
}

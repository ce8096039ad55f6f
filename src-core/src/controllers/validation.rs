// FICHIER : src-core/src/controllers/validation.rs

//! Règles de saisie communes aux contrôleurs (local, distant, cache hors ligne).

use crate::models::{Atelier, Participant, TypePublic};
use crate::utils::{AppError, Result};
use chrono::NaiveDate;

/// Champs obligatoires et bornes d'un atelier.
pub fn valider_atelier(atelier: &Atelier) -> Result<()> {
    if atelier.titre.trim().is_empty() {
        return Err(AppError::validation("Le titre de l'atelier est obligatoire."));
    }
    if atelier.duree_effective() <= 0 {
        return Err(AppError::validation(
            "La durée de l'atelier doit être positive.",
        ));
    }
    if atelier.date_fin().is_none() {
        return Err(AppError::validation(
            "La durée de l'atelier dépasse le calendrier.",
        ));
    }
    if atelier.nombre_places <= 0 {
        return Err(AppError::validation(
            "Le nombre de places doit être positif.",
        ));
    }
    Ok(())
}

/// Un nouvel atelier ne peut pas commencer avant aujourd'hui (granularité jour).
pub fn verifier_date_future(atelier: &Atelier, aujourd_hui: NaiveDate) -> Result<()> {
    if atelier.date_debut.date() < aujourd_hui {
        return Err(AppError::validation(
            "La date de l'atelier doit être dans le futur.",
        ));
    }
    Ok(())
}

/// Validation complète d'une création d'atelier.
pub fn valider_nouvel_atelier(atelier: &Atelier, aujourd_hui: NaiveDate) -> Result<()> {
    valider_atelier(atelier)?;
    verifier_date_future(atelier, aujourd_hui)
}

pub fn verifier_places(nombre_places: i32, inscrits: usize) -> Result<()> {
    if (nombre_places as i64) < inscrits as i64 {
        return Err(AppError::validation(
            "Impossible de réduire le nombre de places en dessous du nombre d'inscrits.",
        ));
    }
    Ok(())
}

pub fn valider_participant(participant: &Participant) -> Result<()> {
    if participant.nom.trim().is_empty() {
        return Err(AppError::validation("Le nom du participant est obligatoire."));
    }
    if participant.prenom.trim().is_empty() {
        return Err(AppError::validation(
            "Le prénom du participant est obligatoire.",
        ));
    }
    Ok(())
}

/// Le type du participant doit correspondre au public de l'atelier.
pub fn verifier_public(atelier: &Atelier, participant: &Participant) -> Result<()> {
    if atelier.accepte(participant.type_participant) {
        return Ok(());
    }
    let message = match atelier.public_concerne {
        TypePublic::AssistantesMaternelles => {
            "Cet atelier est réservé aux assistantes maternelles."
        }
        _ => "Cet atelier est réservé aux parents.",
    };
    Err(AppError::conflict(message))
}

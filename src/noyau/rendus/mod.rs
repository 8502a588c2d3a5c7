// src/noyau/rendus/mod.rs
//
// Aiguillage : ClassificationResult -> Graphique (ou rien).
// - Un moteur par VizType (trait Rendu).
// - Tout échec d’un moteur (Err ou panique) devient None à la frontière :
//   la visualisation est un supplément, jamais une cause d’échec.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{error, warn};

use super::classement::{ClassificationResult, VizType};
use super::erreur::ErreurExpr;
use super::graphique::Graphique;
use super::motifs;

pub mod donnees;
pub mod fonction;
pub mod geometrie;
pub mod vecteur;

pub use donnees::{RenduDonnees, RenduStatistique};
pub use fonction::RenduFonction;
pub use geometrie::RenduGeometrie;
pub use vecteur::RenduVecteur;

/// Nombre minimal de valeurs pour données / statistiques / vecteur.
pub const MIN_VALEURS: usize = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurRendu {
    #[error("Expression vide")]
    ExpressionVide,
    #[error("Expression illisible : {0}")]
    Expression(#[from] ErreurExpr),
    #[error("Aucun point traçable sur [{min}, {max}]")]
    AucunEchantillon { min: f64, max: f64 },
    #[error("Aucune forme reconnue")]
    FormeInconnue,
    #[error("Valeurs insuffisantes : {trouve} trouvée(s), {requis} requises")]
    ValeursInsuffisantes { trouve: usize, requis: usize },
    #[error("Aucun moteur de rendu pour le type {0}")]
    TypeSansRendu(VizType),
}

/// Un moteur de rendu : résultat de classement -> graphique.
pub trait Rendu {
    fn rendre(&self, r: &ClassificationResult) -> Result<Graphique, ErreurRendu>;
}

/// Moteur associé à un type (le vecteur reste adressable).
pub fn rendu_pour(viz_type: VizType) -> Option<&'static dyn Rendu> {
    match viz_type {
        VizType::Function => Some(&RenduFonction),
        VizType::Geometric => Some(&RenduGeometrie),
        VizType::Data => Some(&RenduDonnees),
        VizType::Statistical => Some(&RenduStatistique),
        VizType::Vector => Some(&RenduVecteur),
        VizType::None => None,
    }
}

/// API publique : graphique ou None. Ne panique pas, ne propage rien.
pub fn render(r: &ClassificationResult) -> Option<Graphique> {
    if !r.can_visualize() {
        return None;
    }
    match rendu_pour(r.viz_type()) {
        Some(moteur) => rendre_sans_echec(moteur, r),
        None => {
            warn!(erreur = %ErreurRendu::TypeSansRendu(r.viz_type()), "rendu ignoré");
            None
        }
    }
}

/// Frontière : Err et panique -> None (journalisés).
pub fn rendre_sans_echec(moteur: &dyn Rendu, r: &ClassificationResult) -> Option<Graphique> {
    match catch_unwind(AssertUnwindSafe(|| moteur.rendre(r))) {
        Ok(Ok(g)) => Some(g),
        Ok(Err(e)) => {
            warn!(viz_type = %r.viz_type(), erreur = %e, "rendu impossible");
            None
        }
        Err(panique) => {
            let message = panique
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panique.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panique sans message".to_string());
            error!(viz_type = %r.viz_type(), %message, "moteur de rendu en panique");
            None
        }
    }
}

/// Nombres (signés, décimaux) de `data` puis de `expression`.
pub(crate) fn valeurs(r: &ClassificationResult) -> Vec<f64> {
    motifs::nombres_signes(&format!("{} {}", r.data_jointes(), r.expression()))
}

pub(crate) fn exiger_valeurs(v: &[f64]) -> Result<(), ErreurRendu> {
    if v.len() < MIN_VALEURS {
        return Err(ErreurRendu::ValeursInsuffisantes {
            trouve: v.len(),
            requis: MIN_VALEURS,
        });
    }
    Ok(())
}

// src/noyau/rendus/fonction.rs
//
// Courbe y = f(x) sur [-10, 10], trous aux échecs et aux pôles.

use tracing::debug;

use super::{ErreurRendu, Rendu};
use crate::noyau::classement::ClassificationResult;
use crate::noyau::eval::{analyser_expression, echantillonner, nb_trous};
use crate::noyau::graphique::{Couleur, Graphique, Orientation, Repere, Trace};

pub const NB_ECHANTILLONS: usize = 400;
pub const DOMAINE: (f64, f64) = (-10.0, 10.0);

const COULEUR: Couleur = Couleur::rgb(0x2E, 0x86, 0xAB);

pub struct RenduFonction;

impl Rendu for RenduFonction {
    fn rendre(&self, r: &ClassificationResult) -> Result<Graphique, ErreurRendu> {
        let brute = r.expression().trim();
        if brute.is_empty() {
            return Err(ErreurRendu::ExpressionVide);
        }

        let expr = analyser_expression(brute)?;
        let (min, max) = DOMAINE;
        let points = echantillonner(&expr, min, max, NB_ECHANTILLONS);

        let trous = nb_trous(&points);
        debug!(expression = %expr, points = points.len(), trous, "échantillonnage");
        if trous == points.len() {
            return Err(ErreurRendu::AucunEchantillon { min, max });
        }

        Ok(Graphique::new(format!("Graph of {brute}"), "x", "f(x)")
            .trace(Trace::Courbe {
                nom: format!("f(x) = {expr}"),
                points,
                couleur: COULEUR,
                epaisseur: 3.0,
            })
            .repere(Repere::axe(Orientation::Horizontale))
            .repere(Repere::axe(Orientation::Verticale)))
    }
}

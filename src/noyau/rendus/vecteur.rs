// src/noyau/rendus/vecteur.rs
//
// Vecteur (x, y) depuis l’origine, norme dans le titre, échelle 1:1.
// Jamais choisi par le classement : accessible via rendu_pour(Vector)
// ou une réponse de modèle.

use super::{exiger_valeurs, ErreurRendu, Rendu};
use crate::noyau::classement::ClassificationResult;
use crate::noyau::graphique::{nombre_court, Couleur, Graphique, Orientation, Repere, Trace};
use crate::noyau::motifs;

const ROUGE_VECTEUR: Couleur = Couleur::rgb(0xE6, 0x39, 0x46);

pub struct RenduVecteur;

impl Rendu for RenduVecteur {
    fn rendre(&self, r: &ClassificationResult) -> Result<Graphique, ErreurRendu> {
        // ici l’expression passe avant les données
        let v = motifs::nombres_signes(&format!("{} {}", r.expression(), r.data_jointes()));
        exiger_valeurs(&v)?;

        let (x, y) = (v[0], v[1]);
        let norme = x.hypot(y);

        Ok(Graphique::new(
            format!(
                "Vector ({}, {}) | Magnitude: {norme:.2}",
                nombre_court(x),
                nombre_court(y)
            ),
            "x",
            "y",
        )
        .trace(Trace::Fleche {
            nom: "Vector".into(),
            depart: (0.0, 0.0),
            arrivee: (x, y),
            couleur: ROUGE_VECTEUR,
            epaisseur: 4.0,
        })
        .trace(Trace::Marqueurs {
            nom: String::new(),
            points: vec![(0.0, 0.0)],
            couleur: ROUGE_VECTEUR,
            taille: 10.0,
        })
        .trace(Trace::Marqueurs {
            nom: String::new(),
            points: vec![(x, y)],
            couleur: ROUGE_VECTEUR,
            taille: 15.0,
        })
        .repere(Repere::axe(Orientation::Horizontale))
        .repere(Repere::axe(Orientation::Verticale))
        .echelle_egale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::classement::VizType;

    fn vecteur(expression: &str, data: &[&str]) -> ClassificationResult {
        ClassificationResult::new(
            VizType::Vector,
            expression,
            data.iter().map(|s| s.to_string()).collect(),
            "",
        )
    }

    #[test]
    fn norme_dans_le_titre() {
        let g = RenduVecteur.rendre(&vecteur("", &["3", "4"])).unwrap();
        assert_eq!(g.titre, "Vector (3, 4) | Magnitude: 5.00");
        assert!(g.echelle_egale);
        assert!(matches!(
            g.traces[0],
            Trace::Fleche { arrivee: (x, y), .. } if x == 3.0 && y == 4.0
        ));
    }

    #[test]
    fn expression_avant_donnees() {
        let g = RenduVecteur
            .rendre(&vecteur("v = (-1.5, 2)", &["9"]))
            .unwrap();
        assert_eq!(g.titre, "Vector (-1.5, 2) | Magnitude: 2.50");
    }

    #[test]
    fn une_composante() {
        assert_eq!(
            RenduVecteur.rendre(&vecteur("7", &[])),
            Err(ErreurRendu::ValeursInsuffisantes { trouve: 1, requis: 2 })
        );
    }
}

// src/noyau/rendus/donnees.rs
//
// Séries de nombres :
// - données      : barres indexées 1..N, couleur Viridis selon la valeur
// - statistiques : histogramme (règle de Sturges) + moyenne en pointillés

use super::{exiger_valeurs, valeurs, ErreurRendu, Rendu};
use crate::noyau::classement::ClassificationResult;
use crate::noyau::graphique::{
    viridis, Classe, Couleur, Graphique, Orientation, Repere, Style, Trace,
};

const BLEU: Couleur = Couleur::rgb(0x43, 0x61, 0xEE);

pub struct RenduDonnees;

impl Rendu for RenduDonnees {
    fn rendre(&self, r: &ClassificationResult) -> Result<Graphique, ErreurRendu> {
        let v = valeurs(r);
        exiger_valeurs(&v)?;

        let (min, max) = etendue(&v);
        let couleurs = v
            .iter()
            .map(|x| {
                if max > min {
                    viridis((x - min) / (max - min))
                } else {
                    viridis(0.5)
                }
            })
            .collect();
        let etiquettes = v.iter().map(|x| format!("{x:.1}")).collect();

        Ok(Graphique::new("Data Visualization", "Index", "Value")
            .trace(Trace::Barres {
                nom: "Values".into(),
                valeurs: v,
                couleurs,
                etiquettes,
                contour: Couleur::BLANC,
            })
            .sans_legende())
    }
}

pub struct RenduStatistique;

impl Rendu for RenduStatistique {
    fn rendre(&self, r: &ClassificationResult) -> Result<Graphique, ErreurRendu> {
        let v = valeurs(r);
        exiger_valeurs(&v)?;

        let m = moyenne(&v);
        Ok(Graphique::new("Statistical Distribution", "Value", "Frequency")
            .trace(Trace::Histogramme {
                nom: "Distribution".into(),
                classes: sturges(&v),
                couleur: BLEU.avec_alpha(0.75),
            })
            .repere(Repere {
                orientation: Orientation::Verticale,
                valeur: m,
                couleur: Couleur::ROUGE,
                epaisseur: 3.0,
                style: Style::Tirets,
                annotation: Some(format!("Mean: {m:.2}")),
            }))
    }
}

pub fn moyenne(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

fn etendue(v: &[f64]) -> (f64, f64) {
    v.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(*x), hi.max(*x))
    })
}

/// Classes de même largeur sur [min, max], ceil(log2 n) + 1 classes.
/// Données toutes égales : une seule classe de largeur 1 centrée.
pub fn sturges(v: &[f64]) -> Vec<Classe> {
    if v.is_empty() {
        return Vec::new();
    }
    let (min, max) = etendue(v);
    if max <= min {
        return vec![Classe {
            debut: min - 0.5,
            fin: min + 0.5,
            effectif: v.len(),
        }];
    }

    let k = (v.len() as f64).log2().ceil() as usize + 1;
    let largeur = (max - min) / k as f64;

    let mut classes: Vec<Classe> = (0..k)
        .map(|i| Classe {
            debut: min + largeur * i as f64,
            fin: if i == k - 1 { max } else { min + largeur * (i + 1) as f64 },
            effectif: 0,
        })
        .collect();

    for x in v {
        // dernière classe fermée à droite
        let i = (((x - min) / largeur).floor() as usize).min(k - 1);
        classes[i].effectif += 1;
    }
    classes
}

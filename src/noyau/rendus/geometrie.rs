// src/noyau/rendus/geometrie.rs
//
// Formes planes remplies, échelle 1:1.
// Choix par mot-clé, dans cet ordre : circle, square, triangle, rectangle.
// Dimensions : premiers nombres du texte, sinon valeurs par défaut.

use std::f64::consts::PI;

use super::{ErreurRendu, Rendu};
use crate::noyau::classement::ClassificationResult;
use crate::noyau::eval::linspace;
use crate::noyau::graphique::{nombre_court, Couleur, Graphique, Trace};
use crate::noyau::motifs;

pub const RAYON_DEFAUT: f64 = 5.0;
pub const COTE_CARRE_DEFAUT: f64 = 4.0;
pub const COTE_TRIANGLE_DEFAUT: f64 = 2.0;
pub const RECTANGLE_DEFAUT: (f64, f64) = (6.0, 4.0);

const POINTS_CERCLE: usize = 100;

const VIOLET: Couleur = Couleur::rgb(0xA2, 0x3B, 0x72);
const VERT: Couleur = Couleur::rgb(0x6A, 0x99, 0x4E);
const ORANGE: Couleur = Couleur::rgb(0xF1, 0x8F, 0x01);
const OPACITE: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Forme {
    Cercle { rayon: f64 },
    Carre { cote: f64 },
    Triangle { cote: f64 },
    Rectangle { largeur: f64, hauteur: f64 },
}

impl Forme {
    /// Reconnaît la forme et ses dimensions dans le texte combiné.
    pub fn depuis(r: &ClassificationResult) -> Option<Forme> {
        let (details, expression) = (r.details(), r.expression());
        let texte = format!("{details} {expression}").to_lowercase();

        // texte combiné : une question recopiée dans les deux champs donne
        // ses nombres deux fois (rectangle à un seul nombre => carré)
        let nombres = motifs::nombres_non_signes(&format!("{expression} {details}"));
        let n = |i: usize, defaut: f64| nombres.get(i).copied().unwrap_or(defaut);

        if texte.contains("circle") {
            Some(Forme::Cercle {
                rayon: n(0, RAYON_DEFAUT),
            })
        } else if texte.contains("square") {
            Some(Forme::Carre {
                cote: n(0, COTE_CARRE_DEFAUT),
            })
        } else if texte.contains("triangle") {
            Some(Forme::Triangle {
                cote: n(0, COTE_TRIANGLE_DEFAUT),
            })
        } else if texte.contains("rectangle") {
            Some(Forme::Rectangle {
                largeur: n(0, RECTANGLE_DEFAUT.0),
                hauteur: n(1, RECTANGLE_DEFAUT.1),
            })
        } else {
            None
        }
    }

    fn trace(self) -> Trace {
        let (nom, sommets, couleur) = match self {
            Forme::Cercle { rayon } => {
                let sommets = linspace(0.0, 2.0 * PI, POINTS_CERCLE)
                    .into_iter()
                    .map(|t| (rayon * t.cos(), rayon * t.sin()))
                    .collect();
                (format!("Circle (r={})", nombre_court(rayon)), sommets, VIOLET)
            }
            Forme::Carre { cote } => {
                let h = cote / 2.0;
                (
                    format!("Square (side={})", nombre_court(cote)),
                    vec![(-h, -h), (h, -h), (h, h), (-h, h)],
                    VERT,
                )
            }
            Forme::Triangle { cote } => {
                let h = cote / 2.0;
                (
                    format!("Triangle (side={})", nombre_court(cote)),
                    vec![(-h, 0.0), (h, 0.0), (0.0, cote * 3f64.sqrt() / 2.0)],
                    ORANGE,
                )
            }
            Forme::Rectangle { largeur, hauteur } => (
                format!(
                    "Rectangle ({}×{})",
                    nombre_court(largeur),
                    nombre_court(hauteur)
                ),
                vec![(0.0, 0.0), (largeur, 0.0), (largeur, hauteur), (0.0, hauteur)],
                VERT,
            ),
        };

        Trace::Polygone {
            nom,
            sommets,
            couleur,
            remplissage: couleur.avec_alpha(OPACITE),
            epaisseur: 3.0,
        }
    }
}

pub struct RenduGeometrie;

impl Rendu for RenduGeometrie {
    fn rendre(&self, r: &ClassificationResult) -> Result<Graphique, ErreurRendu> {
        let forme = Forme::depuis(r).ok_or(ErreurRendu::FormeInconnue)?;

        let mut g = Graphique::new("Geometric Visualization", "x", "y")
            .trace(forme.trace())
            .echelle_egale();

        if let Forme::Cercle { .. } = forme {
            g = g.trace(Trace::Marqueurs {
                nom: "Center".into(),
                points: vec![(0.0, 0.0)],
                couleur: VIOLET,
                taille: 10.0,
            });
        }
        Ok(g)
    }
}

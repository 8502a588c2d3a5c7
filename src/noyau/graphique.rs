// src/noyau/graphique.rs
//
// Description structurée d’un graphique (sortie des moteurs de rendu).
// - Aucune dépendance d’affichage : le SVG (svg.rs) et la vue egui
//   lisent la même description.
// - Projection partagée (données -> pixels), échelle 1:1 si demandée.

use super::eval::Echantillon;

/// Couleur RGBA (alpha dans [0, 1]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Couleur {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Couleur {
    pub const BLANC: Couleur = Couleur::rgb(255, 255, 255);
    pub const GRIS: Couleur = Couleur::rgb(128, 128, 128);
    pub const ROUGE: Couleur = Couleur::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn avec_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// "#RRGGBB" (sans alpha).
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Échelle continue Viridis, t dans [0, 1].
pub fn viridis(t: f64) -> Couleur {
    const ANCRES: [(u8, u8, u8); 9] = [
        (68, 1, 84),
        (71, 44, 122),
        (59, 81, 139),
        (44, 113, 142),
        (33, 144, 141),
        (39, 173, 129),
        (92, 200, 99),
        (170, 220, 50),
        (253, 231, 37),
    ];

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (ANCRES.len() - 1) as f64;
    let i = (pos.floor() as usize).min(ANCRES.len() - 2);
    let f = pos - i as f64;

    let (r0, g0, b0) = ANCRES[i];
    let (r1, g1, b1) = ANCRES[i + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    Couleur::rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Style {
    Plein,
    Tirets,
}

/// Classe d’histogramme [debut, fin) (la dernière est fermée).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classe {
    pub debut: f64,
    pub fin: f64,
    pub effectif: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Trace {
    /// Courbe avec trous (aucun segment à travers un None).
    Courbe {
        nom: String,
        points: Vec<Echantillon>,
        couleur: Couleur,
        epaisseur: f32,
    },
    /// Polygone fermé rempli.
    Polygone {
        nom: String,
        sommets: Vec<(f64, f64)>,
        couleur: Couleur,
        remplissage: Couleur,
        epaisseur: f32,
    },
    Marqueurs {
        nom: String,
        points: Vec<(f64, f64)>,
        couleur: Couleur,
        taille: f32,
    },
    /// Barres indexées 1..N.
    Barres {
        nom: String,
        valeurs: Vec<f64>,
        couleurs: Vec<Couleur>,
        etiquettes: Vec<String>,
        contour: Couleur,
    },
    Histogramme {
        nom: String,
        classes: Vec<Classe>,
        couleur: Couleur,
    },
    /// Segment + pointe de flèche, de `depart` vers `arrivee`.
    Fleche {
        nom: String,
        depart: (f64, f64),
        arrivee: (f64, f64),
        couleur: Couleur,
        epaisseur: f32,
    },
}

impl Trace {
    pub fn nom(&self) -> &str {
        match self {
            Trace::Courbe { nom, .. }
            | Trace::Polygone { nom, .. }
            | Trace::Marqueurs { nom, .. }
            | Trace::Barres { nom, .. }
            | Trace::Histogramme { nom, .. }
            | Trace::Fleche { nom, .. } => nom,
        }
    }

    /// Couleur de légende.
    pub fn couleur(&self) -> Couleur {
        match self {
            Trace::Courbe { couleur, .. }
            | Trace::Polygone { couleur, .. }
            | Trace::Marqueurs { couleur, .. }
            | Trace::Histogramme { couleur, .. }
            | Trace::Fleche { couleur, .. } => *couleur,
            Trace::Barres { couleurs, .. } => couleurs.first().copied().unwrap_or(Couleur::GRIS),
        }
    }

    /// Points (x, y) qui doivent être visibles.
    fn etendue(&self, bornes: &mut Bornes) {
        match self {
            Trace::Courbe { points, .. } => {
                for (x, y) in points {
                    match y {
                        Some(y) => bornes.inclure(*x, *y),
                        None => bornes.inclure_x(*x),
                    }
                }
            }
            Trace::Polygone { sommets: pts, .. } | Trace::Marqueurs { points: pts, .. } => {
                for (x, y) in pts {
                    bornes.inclure(*x, *y);
                }
            }
            Trace::Barres { valeurs, .. } => {
                bornes.inclure(0.5, 0.0);
                bornes.inclure(valeurs.len() as f64 + 0.5, 0.0);
                for v in valeurs {
                    bornes.inclure_y(*v);
                }
            }
            Trace::Histogramme { classes, .. } => {
                for c in classes {
                    bornes.inclure(c.debut, 0.0);
                    bornes.inclure(c.fin, c.effectif as f64);
                }
            }
            Trace::Fleche { depart, arrivee, .. } => {
                bornes.inclure(depart.0, depart.1);
                bornes.inclure(arrivee.0, arrivee.1);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    /// y = valeur
    Horizontale,
    /// x = valeur
    Verticale,
}

/// Ligne de référence (axe, moyenne…), avec annotation optionnelle.
#[derive(Clone, Debug, PartialEq)]
pub struct Repere {
    pub orientation: Orientation,
    pub valeur: f64,
    pub couleur: Couleur,
    pub epaisseur: f32,
    pub style: Style,
    pub annotation: Option<String>,
}

impl Repere {
    /// Axe pointillé gris (x=0 ou y=0).
    pub fn axe(orientation: Orientation) -> Self {
        Self {
            orientation,
            valeur: 0.0,
            couleur: Couleur::GRIS.avec_alpha(0.5),
            epaisseur: 1.0,
            style: Style::Tirets,
            annotation: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Graphique {
    pub titre: String,
    pub titre_x: String,
    pub titre_y: String,
    pub traces: Vec<Trace>,
    pub reperes: Vec<Repere>,
    /// Proportions fidèles : une unité en x = une unité en y.
    pub echelle_egale: bool,
    pub legende: bool,
}

impl Graphique {
    pub fn new(titre: impl Into<String>, titre_x: &str, titre_y: &str) -> Self {
        Self {
            titre: titre.into(),
            titre_x: titre_x.to_string(),
            titre_y: titre_y.to_string(),
            traces: Vec::new(),
            reperes: Vec::new(),
            echelle_egale: false,
            legende: true,
        }
    }

    pub fn trace(mut self, t: Trace) -> Self {
        self.traces.push(t);
        self
    }

    pub fn repere(mut self, r: Repere) -> Self {
        self.reperes.push(r);
        self
    }

    pub fn echelle_egale(mut self) -> Self {
        self.echelle_egale = true;
        self
    }

    pub fn sans_legende(mut self) -> Self {
        self.legende = false;
        self
    }

    /// Domaine visible (avec marge), élargi si vide ou plat.
    pub fn bornes(&self) -> Bornes {
        let mut b = Bornes::vide();
        for t in &self.traces {
            t.etendue(&mut b);
        }
        for r in &self.reperes {
            match r.orientation {
                Orientation::Horizontale => b.inclure_y(r.valeur),
                Orientation::Verticale => b.inclure_x(r.valeur),
            }
        }
        b.finaliser()
    }
}

/* ------------------------ Bornes + projection ------------------------ */

/// Marge relative autour des données.
const MARGE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bornes {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bornes {
    fn vide() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    fn inclure_x(&mut self, x: f64) {
        if x.is_finite() {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
        }
    }

    fn inclure_y(&mut self, y: f64) {
        if y.is_finite() {
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
    }

    fn inclure(&mut self, x: f64, y: f64) {
        self.inclure_x(x);
        self.inclure_y(y);
    }

    fn finaliser(self) -> Self {
        let (x_min, x_max) = intervalle_avec_marge(self.x_min, self.x_max);
        let (y_min, y_max) = intervalle_avec_marge(self.y_min, self.y_max);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn largeur(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn hauteur(&self) -> f64 {
        self.y_max - self.y_min
    }
}

fn intervalle_avec_marge(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if max - min <= f64::EPSILON * min.abs().max(1.0) {
        return (min - 1.0, max + 1.0);
    }
    let m = (max - min) * MARGE;
    (min - m, max + m)
}

/// Données -> pixels dans un cadre (gauche, haut, largeur, hauteur).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub bornes: Bornes,
    gauche: f64,
    haut: f64,
    echelle_x: f64,
    echelle_y: f64,
    decalage_x: f64,
    decalage_y: f64,
}

impl Projection {
    pub fn new(g: &Graphique, gauche: f64, haut: f64, largeur: f64, hauteur: f64) -> Self {
        let bornes = g.bornes();
        let mut echelle_x = largeur / bornes.largeur();
        let mut echelle_y = hauteur / bornes.hauteur();
        let mut decalage_x = 0.0;
        let mut decalage_y = 0.0;

        if g.echelle_egale {
            // même échelle sur les deux axes, données centrées dans le cadre
            let e = echelle_x.min(echelle_y);
            decalage_x = (largeur - bornes.largeur() * e) / 2.0;
            decalage_y = (hauteur - bornes.hauteur() * e) / 2.0;
            echelle_x = e;
            echelle_y = e;
        }

        Self {
            bornes,
            gauche,
            haut,
            echelle_x,
            echelle_y,
            decalage_x,
            decalage_y,
        }
    }

    /// (x, y) données -> (px, py) écran (y vers le bas).
    pub fn vers_ecran(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.gauche + self.decalage_x + (x - self.bornes.x_min) * self.echelle_x;
        let py = self.haut + self.decalage_y + (self.bornes.y_max - y) * self.echelle_y;
        (px, py)
    }

    /// Longueur en x (données) -> pixels.
    pub fn largeur_px(&self, dx: f64) -> f64 {
        dx * self.echelle_x
    }

    /// Domaine réellement visible (plus large que les bornes si échelle égale).
    pub fn visible(&self) -> Bornes {
        let x_min = self.bornes.x_min - self.decalage_x / self.echelle_x;
        let y_max = self.bornes.y_max + self.decalage_y / self.echelle_y;
        Bornes {
            x_min,
            x_max: x_min + (self.bornes.largeur() * self.echelle_x + 2.0 * self.decalage_x)
                / self.echelle_x,
            y_min: y_max
                - (self.bornes.hauteur() * self.echelle_y + 2.0 * self.decalage_y) / self.echelle_y,
            y_max,
        }
    }
}

/// Graduations "rondes" (1, 2, 5 × 10^k) couvrant [min, max].
pub fn graduations(min: f64, max: f64, cible: usize) -> Vec<f64> {
    if !(max > min) || cible == 0 {
        return Vec::new();
    }
    let brut = (max - min) / cible as f64;
    let puissance = 10f64.powf(brut.log10().floor());
    let pas = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * puissance)
        .find(|p| *p >= brut)
        .unwrap_or(10.0 * puissance);

    // multiples entiers du pas : pas d’accumulation d’erreur
    let premier = (min / pas).ceil() as i64;
    let mut out = Vec::new();
    for k in premier.. {
        let v = k as f64 * pas;
        if v > max + pas * 1e-9 {
            break;
        }
        // évite "-0"
        out.push(if k == 0 { 0.0 } else { v });
    }
    out
}

/// Nombre lisible : 5.0 -> "5", 2.5 -> "2.5".
pub fn nombre_court(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

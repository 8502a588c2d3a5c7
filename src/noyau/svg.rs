// src/noyau/svg.rs
//
// Graphique -> fragment SVG autonome (intégrable tel quel dans une page).
// - Taille fixe, fond blanc, graduations, zone de tracé découpée (clipPath).
// - Identifiants internes (clip, pointe de flèche) dérivés du contenu :
//   plusieurs graphiques dans une même page ne se télescopent pas,
//   et la sortie reste déterministe.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use super::graphique::{
    graduations, nombre_court, Couleur, Graphique, Orientation, Projection, Repere, Style, Trace,
};

pub const LARGEUR: f64 = 700.0;
pub const HAUTEUR: f64 = 500.0;

const MARGE_GAUCHE: f64 = 70.0;
const MARGE_DROITE: f64 = 30.0;
const MARGE_HAUT: f64 = 50.0;
const MARGE_BAS: f64 = 60.0;

const NB_GRADUATIONS: usize = 8;

const ENCRE: &str = "#374151";
const ENCRE_CLAIRE: &str = "#6b7280";
const GRILLE: &str = "#e5e7eb";

impl Graphique {
    /// Rendu SVG complet.
    pub fn to_svg(&self) -> String {
        let zone_l = LARGEUR - MARGE_GAUCHE - MARGE_DROITE;
        let zone_h = HAUTEUR - MARGE_HAUT - MARGE_BAS;
        let p = Projection::new(self, MARGE_GAUCHE, MARGE_HAUT, zone_l, zone_h);
        let id = identifiant(self);

        let mut s = String::with_capacity(8 * 1024);
        let _ = write!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="visumath" width="{LARGEUR}" height="{HAUTEUR}" viewBox="0 0 {LARGEUR} {HAUTEUR}" role="img">"#
        );
        let _ = write!(s, "<title>{}</title>", echapper(&self.titre));

        // defs : découpe + pointe de flèche
        let _ = write!(
            s,
            r#"<defs><clipPath id="zone-{id}"><rect x="{MARGE_GAUCHE}" y="{MARGE_HAUT}" width="{zone_l}" height="{zone_h}"/></clipPath></defs>"#
        );
        s.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

        grille(&mut s, &p, zone_l, zone_h);

        let _ = write!(s, r#"<g clip-path="url(#zone-{id})">"#);
        for (i, t) in self.traces.iter().enumerate() {
            trace(&mut s, &p, t, &format!("{id}-{i}"));
        }
        for r in &self.reperes {
            repere(&mut s, &p, r, zone_l, zone_h);
        }
        s.push_str("</g>");

        // cadre
        let _ = write!(
            s,
            r#"<rect x="{MARGE_GAUCHE}" y="{MARGE_HAUT}" width="{zone_l}" height="{zone_h}" fill="none" stroke="{ENCRE_CLAIRE}" stroke-width="1"/>"#
        );

        titres(&mut s, self, zone_l, zone_h);
        if self.legende {
            legende(&mut s, self, zone_l);
        }

        s.push_str("</svg>");
        s
    }
}

/* ------------------------ Morceaux ------------------------ */

fn grille(s: &mut String, p: &Projection, zone_l: f64, zone_h: f64) {
    let v = p.visible();
    let bas = MARGE_HAUT + zone_h;
    let droite = MARGE_GAUCHE + zone_l;

    for gx in graduations(v.x_min, v.x_max, NB_GRADUATIONS) {
        let (px, _) = p.vers_ecran(gx, 0.0);
        let _ = write!(
            s,
            r#"<line x1="{px:.2}" y1="{MARGE_HAUT}" x2="{px:.2}" y2="{bas}" stroke="{GRILLE}" stroke-width="1"/><text x="{px:.2}" y="{:.2}" text-anchor="middle" font-size="11" fill="{ENCRE_CLAIRE}">{}</text>"#,
            bas + 16.0,
            etiquette(gx)
        );
    }
    for gy in graduations(v.y_min, v.y_max, NB_GRADUATIONS) {
        let (_, py) = p.vers_ecran(0.0, gy);
        let _ = write!(
            s,
            r#"<line x1="{MARGE_GAUCHE}" y1="{py:.2}" x2="{droite}" y2="{py:.2}" stroke="{GRILLE}" stroke-width="1"/><text x="{:.2}" y="{:.2}" text-anchor="end" font-size="11" fill="{ENCRE_CLAIRE}">{}</text>"#,
            MARGE_GAUCHE - 6.0,
            py + 4.0,
            etiquette(gy)
        );
    }
}

fn trace(s: &mut String, p: &Projection, t: &Trace, id: &str) {
    match t {
        Trace::Courbe {
            points,
            couleur,
            epaisseur,
            ..
        } => {
            for segment in segments(points) {
                if segment.len() < 2 {
                    continue;
                }
                let _ = write!(
                    s,
                    r#"<polyline points="{}" fill="none" {} stroke-width="{epaisseur}" stroke-linejoin="round"/>"#,
                    liste_points(p, &segment),
                    trait_couleur(*couleur)
                );
            }
        }

        Trace::Polygone {
            sommets,
            couleur,
            remplissage,
            epaisseur,
            ..
        } => {
            let _ = write!(
                s,
                r#"<polygon points="{}" {} {} stroke-width="{epaisseur}"/>"#,
                liste_points(p, sommets),
                fond_couleur(*remplissage),
                trait_couleur(*couleur)
            );
        }

        Trace::Marqueurs {
            points,
            couleur,
            taille,
            ..
        } => {
            for (x, y) in points {
                let (px, py) = p.vers_ecran(*x, *y);
                let _ = write!(
                    s,
                    r#"<circle cx="{px:.2}" cy="{py:.2}" r="{:.2}" {}/>"#,
                    taille / 2.0,
                    fond_couleur(*couleur)
                );
            }
        }

        Trace::Barres {
            valeurs,
            couleurs,
            etiquettes,
            contour,
            ..
        } => {
            let largeur = p.largeur_px(0.8);
            for (i, v) in valeurs.iter().enumerate() {
                let centre = (i + 1) as f64;
                let (px, py_v) = p.vers_ecran(centre, *v);
                let (_, py_0) = p.vers_ecran(centre, 0.0);
                let haut = py_v.min(py_0);
                let hauteur = (py_v - py_0).abs();
                let couleur = couleurs.get(i).copied().unwrap_or(Couleur::GRIS);
                let _ = write!(
                    s,
                    r#"<rect x="{:.2}" y="{haut:.2}" width="{largeur:.2}" height="{hauteur:.2}" {} stroke="{}" stroke-width="2"/>"#,
                    px - largeur / 2.0,
                    fond_couleur(couleur),
                    contour.hex()
                );
                if let Some(texte) = etiquettes.get(i) {
                    // au-dessus d’une barre positive, en dessous d’une négative
                    let ty = if *v >= 0.0 { haut - 4.0 } else { haut + hauteur + 12.0 };
                    let _ = write!(
                        s,
                        r#"<text x="{px:.2}" y="{ty:.2}" text-anchor="middle" font-size="11" fill="{ENCRE}">{}</text>"#,
                        echapper(texte)
                    );
                }
            }
        }

        Trace::Histogramme {
            classes, couleur, ..
        } => {
            for c in classes {
                let (x0, y0) = p.vers_ecran(c.debut, c.effectif as f64);
                let (x1, y1) = p.vers_ecran(c.fin, 0.0);
                let _ = write!(
                    s,
                    r#"<rect x="{x0:.2}" y="{y0:.2}" width="{:.2}" height="{:.2}" {} stroke="white" stroke-width="1"/>"#,
                    x1 - x0,
                    y1 - y0,
                    fond_couleur(*couleur)
                );
            }
        }

        Trace::Fleche {
            depart,
            arrivee,
            couleur,
            epaisseur,
            ..
        } => {
            let (x0, y0) = p.vers_ecran(depart.0, depart.1);
            let (x1, y1) = p.vers_ecran(arrivee.0, arrivee.1);
            let _ = write!(
                s,
                r#"<defs><marker id="pointe-{id}" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="5" markerHeight="5" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{}"/></marker></defs>"#,
                couleur.hex()
            );
            let _ = write!(
                s,
                r#"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}" {} stroke-width="{epaisseur}" marker-end="url(#pointe-{id})"/>"#,
                trait_couleur(*couleur)
            );
        }
    }
}

fn repere(s: &mut String, p: &Projection, r: &Repere, zone_l: f64, zone_h: f64) {
    let pointilles = match r.style {
        Style::Plein => "",
        Style::Tirets => r#" stroke-dasharray="6 4""#,
    };

    let (x1, y1, x2, y2) = match r.orientation {
        Orientation::Horizontale => {
            let (_, py) = p.vers_ecran(0.0, r.valeur);
            (MARGE_GAUCHE, py, MARGE_GAUCHE + zone_l, py)
        }
        Orientation::Verticale => {
            let (px, _) = p.vers_ecran(r.valeur, 0.0);
            (px, MARGE_HAUT, px, MARGE_HAUT + zone_h)
        }
    };

    let _ = write!(
        s,
        r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" {} stroke-width="{}"{pointilles}/>"#,
        trait_couleur(r.couleur),
        r.epaisseur
    );

    if let Some(texte) = &r.annotation {
        let (tx, ty, ancre) = match r.orientation {
            Orientation::Verticale => (x1, MARGE_HAUT + 14.0, "middle"),
            Orientation::Horizontale => (MARGE_GAUCHE + zone_l - 4.0, y1 - 4.0, "end"),
        };
        let _ = write!(
            s,
            r#"<text x="{tx:.2}" y="{ty:.2}" text-anchor="{ancre}" font-size="12" font-weight="600" fill="{}">{}</text>"#,
            r.couleur.hex(),
            echapper(texte)
        );
    }
}

fn titres(s: &mut String, g: &Graphique, zone_l: f64, zone_h: f64) {
    let cx = MARGE_GAUCHE + zone_l / 2.0;
    let cy = MARGE_HAUT + zone_h / 2.0;
    let _ = write!(
        s,
        r#"<text x="{cx}" y="28" text-anchor="middle" font-size="16" font-weight="600" fill="{ENCRE}">{}</text>"#,
        echapper(&g.titre)
    );
    let _ = write!(
        s,
        r#"<text x="{cx}" y="{}" text-anchor="middle" font-size="12" fill="{ENCRE_CLAIRE}">{}</text>"#,
        HAUTEUR - 14.0,
        echapper(&g.titre_x)
    );
    let _ = write!(
        s,
        r#"<text x="18" y="{cy}" text-anchor="middle" font-size="12" fill="{ENCRE_CLAIRE}" transform="rotate(-90, 18, {cy})">{}</text>"#,
        echapper(&g.titre_y)
    );
}

fn legende(s: &mut String, g: &Graphique, zone_l: f64) {
    let noms: Vec<&Trace> = g.traces.iter().filter(|t| !t.nom().is_empty()).collect();
    if noms.is_empty() {
        return;
    }

    let x = MARGE_GAUCHE + zone_l - 190.0;
    let hauteur = 8.0 + 18.0 * noms.len() as f64;
    let _ = write!(
        s,
        r#"<rect x="{x}" y="{}" width="182" height="{hauteur}" fill="white" fill-opacity="0.85" stroke="{GRILLE}"/>"#,
        MARGE_HAUT + 8.0
    );
    for (i, t) in noms.iter().enumerate() {
        let y = MARGE_HAUT + 16.0 + 18.0 * i as f64;
        let _ = write!(
            s,
            r#"<rect x="{}" y="{y}" width="12" height="12" {}/><text x="{}" y="{}" font-size="11" fill="{ENCRE}">{}</text>"#,
            x + 8.0,
            fond_couleur(t.couleur()),
            x + 26.0,
            y + 10.0,
            echapper(t.nom())
        );
    }
}

/* ------------------------ Utilitaires ------------------------ */

/// Découpe une courbe à chaque trou.
fn segments(points: &[(f64, Option<f64>)]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut courant = Vec::new();
    for (x, y) in points {
        match y {
            Some(y) => courant.push((*x, *y)),
            None => {
                if !courant.is_empty() {
                    out.push(std::mem::take(&mut courant));
                }
            }
        }
    }
    if !courant.is_empty() {
        out.push(courant);
    }
    out
}

fn liste_points(p: &Projection, pts: &[(f64, f64)]) -> String {
    let mut out = String::with_capacity(pts.len() * 16);
    for (i, (x, y)) in pts.iter().enumerate() {
        let (px, py) = p.vers_ecran(*x, *y);
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{px:.2},{py:.2}");
    }
    out
}

fn trait_couleur(c: Couleur) -> String {
    if c.a < 1.0 {
        format!(r#"stroke="{}" stroke-opacity="{}""#, c.hex(), c.a)
    } else {
        format!(r#"stroke="{}""#, c.hex())
    }
}

fn fond_couleur(c: Couleur) -> String {
    if c.a < 1.0 {
        format!(r#"fill="{}" fill-opacity="{}""#, c.hex(), c.a)
    } else {
        format!(r#"fill="{}""#, c.hex())
    }
}

fn etiquette(v: f64) -> String {
    nombre_court((v * 1e6).round() / 1e6)
}

/// Échappement XML minimal (texte et attributs).
pub fn echapper(texte: &str) -> String {
    let mut out = String::with_capacity(texte.len());
    for c in texte.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn identifiant(g: &Graphique) -> String {
    let mut h = DefaultHasher::new();
    g.titre.hash(&mut h);
    g.traces.len().hash(&mut h);
    for t in &g.traces {
        t.nom().hash(&mut h);
    }
    format!("{:08x}", h.finish() as u32)
}

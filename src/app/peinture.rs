// src/app/peinture.rs
//
// Peint un Graphique avec le Painter egui.
// Même projection que le SVG (visumath::noyau::graphique::Projection),
// tracés découpés à la zone utile.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Shape, Stroke};

use visumath::noyau::graphique::{
    graduations, nombre_court, Couleur, Graphique, Orientation, Projection, Repere, Style, Trace,
};

const MARGE_GAUCHE: f32 = 60.0;
const MARGE_DROITE: f32 = 16.0;
const MARGE_HAUT: f32 = 34.0;
const MARGE_BAS: f32 = 44.0;

const TIRET: f32 = 6.0;
const ESPACE: f32 = 4.0;

fn couleur32(c: Couleur) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

pub fn peindre(painter: egui::Painter, cadre: Rect, g: &Graphique) {
    let encre = Color32::from_gray(60);
    let grille = Color32::from_gray(225);

    painter.rect_filled(cadre, 4.0, Color32::WHITE);

    let zone = Rect::from_min_max(
        Pos2::new(cadre.left() + MARGE_GAUCHE, cadre.top() + MARGE_HAUT),
        Pos2::new(cadre.right() - MARGE_DROITE, cadre.bottom() - MARGE_BAS),
    );
    if zone.width() <= 1.0 || zone.height() <= 1.0 {
        return;
    }

    let p = Projection::new(
        g,
        zone.left() as f64,
        zone.top() as f64,
        zone.width() as f64,
        zone.height() as f64,
    );
    let ecran = |x: f64, y: f64| {
        let (px, py) = p.vers_ecran(x, y);
        Pos2::new(px as f32, py as f32)
    };

    // graduations + grille
    let v = p.visible();
    let police = FontId::proportional(11.0);
    for gx in graduations(v.x_min, v.x_max, 8) {
        let x = ecran(gx, 0.0).x;
        painter.line_segment(
            [Pos2::new(x, zone.top()), Pos2::new(x, zone.bottom())],
            Stroke::new(1.0, grille),
        );
        painter.text(
            Pos2::new(x, zone.bottom() + 4.0),
            Align2::CENTER_TOP,
            etiquette(gx),
            police.clone(),
            encre,
        );
    }
    for gy in graduations(v.y_min, v.y_max, 8) {
        let y = ecran(0.0, gy).y;
        painter.line_segment(
            [Pos2::new(zone.left(), y), Pos2::new(zone.right(), y)],
            Stroke::new(1.0, grille),
        );
        painter.text(
            Pos2::new(zone.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            etiquette(gy),
            police.clone(),
            encre,
        );
    }

    // tracés (découpés)
    let dedans = painter.with_clip_rect(zone);
    for t in &g.traces {
        peindre_trace(&dedans, &p, t);
    }
    for r in &g.reperes {
        peindre_repere(&dedans, zone, &ecran, r);
    }

    painter.rect_stroke(zone, 0.0, Stroke::new(1.0, encre), egui::StrokeKind::Inside);

    // titres
    painter.text(
        Pos2::new(zone.center().x, cadre.top() + 8.0),
        Align2::CENTER_TOP,
        &g.titre,
        FontId::proportional(15.0),
        encre,
    );
    painter.text(
        Pos2::new(zone.center().x, cadre.bottom() - 6.0),
        Align2::CENTER_BOTTOM,
        &g.titre_x,
        FontId::proportional(12.0),
        encre,
    );
    painter.text(
        Pos2::new(cadre.left() + 6.0, zone.top() - 14.0),
        Align2::LEFT_CENTER,
        &g.titre_y,
        FontId::proportional(12.0),
        encre,
    );

    if g.legende {
        peindre_legende(&painter, zone, g);
    }
}

fn peindre_trace(painter: &egui::Painter, p: &Projection, t: &Trace) {
    let ecran = |x: f64, y: f64| {
        let (px, py) = p.vers_ecran(x, y);
        Pos2::new(px as f32, py as f32)
    };

    match t {
        Trace::Courbe {
            points,
            couleur,
            epaisseur,
            ..
        } => {
            let trait_ = Stroke::new(*epaisseur, couleur32(*couleur));
            // un trou ferme le morceau en cours
            let mut morceaux: Vec<Vec<Pos2>> = vec![Vec::new()];
            for (x, y) in points {
                match y {
                    Some(y) => {
                        if let Some(m) = morceaux.last_mut() {
                            m.push(ecran(*x, *y));
                        }
                    }
                    None => morceaux.push(Vec::new()),
                }
            }
            for m in morceaux.into_iter().filter(|m| m.len() >= 2) {
                painter.add(Shape::line(m, trait_));
            }
        }

        Trace::Polygone {
            sommets,
            couleur,
            remplissage,
            epaisseur,
            ..
        } => {
            let pts: Vec<Pos2> = sommets.iter().map(|(x, y)| ecran(*x, *y)).collect();
            painter.add(Shape::convex_polygon(
                pts,
                couleur32(*remplissage),
                Stroke::new(*epaisseur, couleur32(*couleur)),
            ));
        }

        Trace::Marqueurs {
            points,
            couleur,
            taille,
            ..
        } => {
            for (x, y) in points {
                painter.circle_filled(ecran(*x, *y), taille / 2.0, couleur32(*couleur));
            }
        }

        Trace::Barres {
            valeurs,
            couleurs,
            etiquettes,
            contour,
            ..
        } => {
            for (i, v) in valeurs.iter().enumerate() {
                let centre = (i + 1) as f64;
                let a = ecran(centre - 0.4, *v);
                let b = ecran(centre + 0.4, 0.0);
                let barre = Rect::from_two_pos(a, b);
                let c = couleurs.get(i).copied().unwrap_or(Couleur::GRIS);
                painter.rect_filled(barre, 0.0, couleur32(c));
                painter.rect_stroke(
                    barre,
                    0.0,
                    Stroke::new(2.0, couleur32(*contour)),
                    egui::StrokeKind::Inside,
                );
                if let Some(texte) = etiquettes.get(i) {
                    let (pos, ancre) = if *v >= 0.0 {
                        (Pos2::new(barre.center().x, barre.top() - 2.0), Align2::CENTER_BOTTOM)
                    } else {
                        (Pos2::new(barre.center().x, barre.bottom() + 2.0), Align2::CENTER_TOP)
                    };
                    painter.text(
                        pos,
                        ancre,
                        texte,
                        FontId::proportional(11.0),
                        Color32::from_gray(60),
                    );
                }
            }
        }

        Trace::Histogramme {
            classes, couleur, ..
        } => {
            for c in classes {
                let barre = Rect::from_two_pos(
                    ecran(c.debut, c.effectif as f64),
                    ecran(c.fin, 0.0),
                );
                painter.rect_filled(barre, 0.0, couleur32(*couleur));
                painter.rect_stroke(
                    barre,
                    0.0,
                    Stroke::new(1.0, Color32::WHITE),
                    egui::StrokeKind::Inside,
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
            let a = ecran(depart.0, depart.1);
            let b = ecran(arrivee.0, arrivee.1);
            painter.arrow(a, b - a, Stroke::new(*epaisseur, couleur32(*couleur)));
        }
    }
}

fn peindre_repere(
    painter: &egui::Painter,
    zone: Rect,
    ecran: &impl Fn(f64, f64) -> Pos2,
    r: &Repere,
) {
    let (a, b) = match r.orientation {
        Orientation::Horizontale => {
            let y = ecran(0.0, r.valeur).y;
            (Pos2::new(zone.left(), y), Pos2::new(zone.right(), y))
        }
        Orientation::Verticale => {
            let x = ecran(r.valeur, 0.0).x;
            (Pos2::new(x, zone.top()), Pos2::new(x, zone.bottom()))
        }
    };

    let trait_ = Stroke::new(r.epaisseur, couleur32(r.couleur));
    match r.style {
        Style::Plein => {
            painter.line_segment([a, b], trait_);
        }
        Style::Tirets => {
            painter.extend(Shape::dashed_line(&[a, b], trait_, TIRET, ESPACE));
        }
    }

    if let Some(texte) = &r.annotation {
        let (pos, ancre) = match r.orientation {
            Orientation::Verticale => (Pos2::new(a.x, zone.top() + 4.0), Align2::CENTER_TOP),
            Orientation::Horizontale => (Pos2::new(zone.right() - 4.0, a.y - 2.0), Align2::RIGHT_BOTTOM),
        };
        painter.text(
            pos,
            ancre,
            texte,
            FontId::proportional(12.0),
            couleur32(r.couleur),
        );
    }
}

fn peindre_legende(painter: &egui::Painter, zone: Rect, g: &Graphique) {
    let police = FontId::proportional(11.0);
    let mut y = zone.top() + 10.0;
    for t in g.traces.iter().filter(|t| !t.nom().is_empty()) {
        let x = zone.right() - 180.0;
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, y - 5.0), egui::vec2(10.0, 10.0)),
            0.0,
            couleur32(t.couleur()),
        );
        painter.text(
            Pos2::new(x + 16.0, y),
            Align2::LEFT_CENTER,
            t.nom(),
            police.clone(),
            Color32::from_gray(60),
        );
        y += 16.0;
    }
}

fn etiquette(v: f64) -> String {
    nombre_court((v * 1e6).round() / 1e6)
}

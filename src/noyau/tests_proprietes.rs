// src/noyau/tests_proprietes.rs
//
// Propriétés de bout en bout : classement -> rendu -> graphique.

use super::classement::{classify, ClassificationResult, VizType};
use super::erreur::ErreurExpr;
use super::eval::analyser_expression;
use super::graphique::{Graphique, Orientation, Trace};
use super::normalise::normalise;
use super::rendus::{render, rendre_sans_echec, ErreurRendu, Rendu};

fn courbe(g: &Graphique) -> &[(f64, Option<f64>)] {
    match &g.traces[0] {
        Trace::Courbe { points, .. } => points,
        autre => panic!("trace inattendue : {autre:?}"),
    }
}

fn rendu(viz: VizType, expression: &str, data: &str, details: &str) -> Option<Graphique> {
    let data = data
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    render(&ClassificationResult::new(viz, expression, data, details))
}

/* ------------------------ Classement ------------------------ */

#[test]
fn affectation_y_jusqu_a_la_virgule() {
    let cas = [
        ("Plot y = 3x + 1, for x from 0 to 5", "3x + 1"),
        ("what does y=sin(x) look like", "sin(x) look like"),
        ("Graph y = x² - 2\nthen shade it", "x² - 2"),
        ("If y = 1/x, where is it undefined?", "1/x"),
    ];
    for (q, attendu) in cas {
        let r = classify(q, "");
        assert_eq!(r.viz_type(), VizType::Function, "q={q:?}");
        assert_eq!(r.expression(), attendu, "q={q:?}");
    }
}

#[test]
fn cercle_sans_fonction_est_geometrique() {
    for q in [
        "What is the area of a circle?",
        "circle with radius 3",
        "A CIRCLE has 360 degrees, 2 radii and 1 center",
    ] {
        let r = classify(q, "");
        assert_eq!(r.viz_type(), VizType::Geometric, "q={q:?}");
        assert!(r.can_visualize());
    }
}

#[test]
fn moins_de_trois_nombres_rien() {
    for (q, a) in [
        ("What is 12 times 4?", ""),
        ("Explain integrals", "They measure 1 area"),
        ("", ""),
    ] {
        let r = classify(q, a);
        assert!(!r.can_visualize(), "q={q:?}");
        assert_eq!(r.viz_type(), VizType::None);
    }
}

/* ------------------------ Normalisation ------------------------ */

#[test]
fn normalisation_idempotente() {
    for s in ["2x²+3x", "x^3 - 4x", "√(x)+3(x-1)", "x × 2 ÷ 4", "sin(2x)⁴"] {
        let une = normalise(s);
        assert_eq!(normalise(&une), une, "s={s:?}");
    }
}

#[test]
fn normalisation_evaluable() {
    assert_eq!(normalise("2x²+3x"), "2*x**2+3*x");
    let e = analyser_expression(&normalise("2x²+3x")).unwrap();
    for x in [-3.0, 0.0, 1.5, 10.0] {
        assert_eq!(e.eval(x), Ok(2.0 * x * x + 3.0 * x));
    }
}

/* ------------------------ Rendus ------------------------ */

#[test]
fn parabole_continue_et_symetrique() {
    let g = rendu(VizType::Function, "x**2", "", "function plot").unwrap();
    let pts = courbe(&g);
    assert_eq!(pts.len(), 400);
    assert!(pts.iter().all(|(_, y)| y.is_some()));
    assert_eq!(pts[0].0, -10.0);
    assert_eq!(pts[399].0, 10.0);
    for i in 0..pts.len() {
        let (xa, ya) = pts[i];
        let (xb, yb) = pts[pts.len() - 1 - i];
        assert!((xa + xb).abs() < 1e-9);
        assert!((ya.unwrap() - yb.unwrap()).abs() < 1e-9);
    }
}

#[test]
fn inverse_trou_en_zero() {
    let g = rendu(VizType::Function, "1/x", "", "function plot").unwrap();
    assert!(courbe(&g)
        .iter()
        .any(|(x, y)| y.is_none() && x.abs() < 0.1));
}

#[test]
fn barres_de_donnees() {
    let g = rendu(VizType::Data, "", "3,1,4,1,5", "data visualization").unwrap();
    match &g.traces[0] {
        Trace::Barres { valeurs, .. } => assert_eq!(valeurs, &vec![3.0, 1.0, 4.0, 1.0, 5.0]),
        autre => panic!("trace inattendue : {autre:?}"),
    }
}

#[test]
fn moyenne_statistique() {
    let g = rendu(VizType::Statistical, "", "3,1,4,1,5", "statistical analysis").unwrap();
    let moyenne = g
        .reperes
        .iter()
        .find(|r| r.orientation == Orientation::Verticale)
        .unwrap();
    assert!((moyenne.valeur - 2.8).abs() < 1e-12);
    assert!(matches!(g.traces[0], Trace::Histogramme { .. }));
}

#[test]
fn cercle_rayon_sept() {
    let g = rendu(VizType::Geometric, "", "", "circle radius 7").unwrap();
    match &g.traces[0] {
        Trace::Polygone { sommets, .. } => {
            let r = sommets
                .iter()
                .map(|(x, y)| x.hypot(*y))
                .fold(0.0_f64, f64::max);
            assert!((r - 7.0).abs() < 1e-9);
        }
        autre => panic!("trace inattendue : {autre:?}"),
    }
}

#[test]
fn aiguillage_avale_les_echecs() {
    struct Toujours(bool);
    impl Rendu for Toujours {
        fn rendre(&self, _: &ClassificationResult) -> Result<Graphique, ErreurRendu> {
            if self.0 {
                panic!("moteur cassé");
            }
            Err(ErreurRendu::FormeInconnue)
        }
    }

    let r = classify("circle", "");
    assert!(rendre_sans_echec(&Toujours(true), &r).is_none());
    assert!(rendre_sans_echec(&Toujours(false), &r).is_none());

    // et via l’API publique : entrées invalides -> None
    assert!(rendu(VizType::Function, "", "", "").is_none());
    assert!(rendu(VizType::Function, "x +* 2", "", "").is_none());
    assert!(rendu(VizType::Geometric, "", "", "hexagon").is_none());
    assert!(rendu(VizType::Data, "", "1", "").is_none());
    assert!(rendu(VizType::Vector, "", "", "").is_none());
}

#[test]
fn classement_puis_rendu() {
    let cas = [
        ("Plot y = sin(x)", VizType::Function),
        ("area of a square with side 3", VizType::Geometric),
        ("sales were 10, 20, 15, 30", VizType::Data),
        ("average of 4, 8, 15, 16, 23, 42", VizType::Statistical),
    ];
    for (q, attendu) in cas {
        let r = classify(q, "");
        assert_eq!(r.viz_type(), attendu, "q={q:?}");
        let g = render(&r).unwrap_or_else(|| panic!("pas de graphique pour {q:?}"));
        assert!(g.to_svg().contains("</svg>"));
    }
}

#[test]
fn expression_tres_longue_sans_graphique() {
    // 100 000 termes en chaîne : refusée avant toute récursion, pas de débordement de pile
    let q = format!("plot y = {}x", "x+".repeat(100_000));
    let r = classify(&q, "");
    assert_eq!(r.viz_type(), VizType::Function);
    assert!(render(&r).is_none());
    assert!(super::sortie::visualiser(&q, "").chart.is_none());

    match analyser_expression(&format!("{}x", "x+".repeat(100_000))) {
        Err(ErreurExpr::TropProfond(_)) => {}
        autre => panic!("attendu TropProfond, obtenu {autre:?}"),
    }
}

#[test]
fn rectangle_un_seul_nombre_carre() {
    let r = classify("rectangle with width 10", "");
    assert_eq!(r.viz_type(), VizType::Geometric);
    let g = render(&r).unwrap_or_else(|| panic!("pas de graphique"));
    assert_eq!(g.traces[0].nom(), "Rectangle (10×10)");
}

#[test]
fn chiffres_non_ascii_ignores() {
    // "٣ ٤ ٥" ne compte pas : deux nombres seulement, rien à visualiser
    let r = classify("values ٣, ٤, ٥ then 1, 2", "");
    assert!(!r.can_visualize());

    // trois nombres ASCII : autant de barres que de nombres comptés
    let r = classify("values ٣, 1, 2, 3", "");
    assert_eq!(r.viz_type(), VizType::Data);
    let g = render(&r).unwrap_or_else(|| panic!("pas de graphique"));
    match &g.traces[0] {
        Trace::Barres { valeurs, .. } => assert_eq!(valeurs, &vec![1.0, 2.0, 3.0]),
        autre => panic!("trace inattendue : {autre:?}"),
    }
}

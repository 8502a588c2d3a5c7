//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler classement et rendus sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs attendues (expression illisible, trop peu de valeurs…)
//! - invariants clés : can_visualize <=> viz_type != none, jamais de panique,
//!   aucun point tracé au-delà du seuil d’explosion

use std::time::{Duration, Instant};

use super::classement::{classify, VizType};
use super::erreur::ErreurExpr;
use super::eval::{analyser_expression, echantillonner, SEUIL_EXPLOSION};
use super::rendus::{rendu_pour, ErreurRendu};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurRendu) -> bool {
    // Liste blanche : échecs *normaux* d’un moteur sur une entrée quelconque.
    matches!(
        e,
        ErreurRendu::ExpressionVide
            | ErreurRendu::Expression(_)
            | ErreurRendu::AucunEchantillon { .. }
            | ErreurRendu::FormeInconnue
            | ErreurRendu::ValeursInsuffisantes { .. }
    )
}

/* ------------------------ Génération (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = rng.pick(100) as i64 - 20;
    match rng.pick(3) {
        0 => format!("{n}"),
        1 => format!("{n}.{}", rng.pick(10)),
        _ => format!("{}", n.abs()),
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => "x".to_string(),
        2 => gen_nombre(rng),
        3 => rng.choisir(&["pi", "e", "π", "k"]).to_string(),
        4 => format!("{}x", rng.pick(9) + 1),
        _ => format!("x{}", rng.choisir(&["²", "³", "^2", "**3"])),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(8) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({})/({})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => {
            let f = rng.choisir(&["sin", "cos", "tan", "sqrt", "ln", "exp", "abs", "asin"]);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        _ => {
            // bruit : opérateur orphelin, parenthèse en trop, caractère étranger
            let bruit = rng.choisir(&["+", ")", "(", "=", "×", "÷", "√", "$", ""]);
            if rng.coin() {
                format!("{bruit}{}", gen_expr(rng, depth - 1))
            } else {
                format!("{}{bruit}", gen_expr(rng, depth - 1))
            }
        }
    }
}

fn gen_question(rng: &mut Rng) -> String {
    let mut morceaux: Vec<String> = Vec::new();
    for _ in 0..(rng.pick(6) + 1) {
        let m = match rng.pick(7) {
            0 => rng
                .choisir(&["plot", "Graph", "solve for x:", "y =", "f(x) =", "x ="])
                .to_string(),
            1 => rng
                .choisir(&["circle", "Square", "triangle", "rectangle", "area", "perimeter"])
                .to_string(),
            2 => rng
                .choisir(&["mean", "average", "distribution", "vector", "sum"])
                .to_string(),
            3 => gen_nombre(rng),
            4 => gen_expr(rng, 2),
            5 => rng.choisir(&[",", "\n", "?", "of", "with radius", "by"]).to_string(),
            _ => rng
                .choisir(&["what is", "the", "numbers", "Ünïcødé", "²³⁴", "{\"a\": 1}"])
                .to_string(),
        };
        morceaux.push(m);
    }
    morceaux.join(" ")
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_classement_et_rendu() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus_ok = 0usize;
    let mut vus_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let question = gen_question(&mut rng);
        let reponse = if rng.coin() { gen_question(&mut rng) } else { String::new() };

        let r = classify(&question, &reponse);

        // invariant du résultat
        assert_eq!(r.can_visualize(), r.viz_type() != VizType::None, "q={question:?}");
        assert_ne!(r.viz_type(), VizType::Vector, "q={question:?}");
        // déterminisme
        assert_eq!(r, classify(&question, &reponse));

        let Some(moteur) = rendu_pour(r.viz_type()) else {
            continue;
        };

        // appel direct (sans filet) : une panique ferait échouer le test
        match moteur.rendre(&r) {
            Ok(g) => {
                let svg = g.to_svg();
                assert!(svg.starts_with("<svg") && svg.ends_with("</svg>"));
                vus_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: q={question:?} err={e}"
                );
                vus_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(vus_ok > 10, "trop peu de succès: {vus_ok}");
    assert!(vus_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_echantillons_bornes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut analysees = 0usize;

    for _ in 0..120 {
        budget(t0, max);

        let texte = gen_expr(&mut rng, 4);
        let expr = match analyser_expression(&texte) {
            Ok(e) => e,
            Err(e) => {
                assert_ne!(e, ErreurExpr::NonFini, "texte={texte:?}");
                continue;
            }
        };
        analysees += 1;

        let pts = echantillonner(&expr, -10.0, 10.0, 200);
        assert!(pts.len() >= 200);
        assert!(pts.windows(2).all(|w| w[0].0 <= w[1].0), "abscisses non triées");
        for (x, y) in &pts {
            assert!(x.is_finite());
            if let Some(y) = y {
                assert!(y.is_finite() && y.abs() < SEUIL_EXPLOSION, "texte={texte:?}");
            }
        }
    }

    assert!(analysees > 10, "trop peu d’expressions lisibles: {analysees}");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let texte = somme_balancee("x/2", 800);
    let expr = analyser_expression(&texte).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800 * (x/2) en x = 2 => 800
    let y = expr.eval(2.0).unwrap_or_else(|e| panic!("err: {e}"));
    assert!((y - 800.0).abs() < 1e-9);
}

//! Noyau : évaluation (pipeline réel)
//!
//! texte -> normalise -> jetons -> RPN -> Expr -> simplify
//!       -> échantillonnage sur [min, max] avec trous
//!
//! Un échantillon devient un trou (None) si l’évaluation échoue
//! (domaine, division par zéro, non réel) ou si |y| >= SEUIL_EXPLOSION.
//! Entre deux échantillons finis de signes opposés, une dichotomie bornée
//! cherche un pôle ; s’il y en a un, un trou est inséré entre les deux.

use tracing::debug;

use super::erreur::ErreurExpr;
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normalise;
use super::rpn::{from_rpn, to_rpn};

/// Au-delà : explosion numérique (asymptote), pas de segment.
pub const SEUIL_EXPLOSION: f64 = 1e6;

/// Profondeur de la recherche de pôle (intervalle / 2^n).
const PROFONDEUR_POLE: usize = 48;

/// Point échantillonné : (x, Some(y)) ou (x, None) pour un trou.
pub type Echantillon = (f64, Option<f64>);

/// API publique : texte informel -> Expr simplifiée (en x).
pub fn analyser_expression(texte: &str) -> Result<Expr, ErreurExpr> {
    let s = normalise(texte.trim());
    if s.trim().is_empty() {
        return Err(ErreurExpr::Vide);
    }

    let jetons = tokenize(&s)?;
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn), "notation polonaise inversée");
    let expr = from_rpn(&rpn)?.simplify();

    let libres = expr.variables_libres();
    if !libres.is_empty() {
        debug!(expression = %expr, variables = ?libres, "variables libres : échantillons en trou");
    }

    Ok(expr)
}

/// `n` abscisses régulièrement espacées sur [min, max], bornes incluses.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let pas = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + pas * i as f64 })
                .collect()
        }
    }
}

/// Valeur traçable en x, ou None.
fn valeur_tracable(expr: &Expr, x: f64) -> Option<f64> {
    match expr.eval(x) {
        Ok(y) if y.abs() < SEUIL_EXPLOSION => Some(y),
        _ => None,
    }
}

/// Échantillonne `expr` sur [min, max] (n points) ; trous aux échecs et aux pôles.
pub fn echantillonner(expr: &Expr, min: f64, max: f64, n: usize) -> Vec<Echantillon> {
    let mut out: Vec<Echantillon> = Vec::with_capacity(n + 8);
    let mut precedent: Option<(f64, f64)> = None;

    for x in linspace(min, max, n) {
        let y = valeur_tracable(expr, x);

        if let (Some((x0, y0)), Some(y1)) = (precedent, y) {
            if let Some(pole) = pole_entre(expr, (x0, y0), (x, y1)) {
                out.push((pole, None));
            }
        }

        out.push((x, y));
        precedent = y.map(|v| (x, v));
    }

    out
}

/// Cherche un pôle entre deux points finis de signes opposés (dichotomie).
/// Un zéro ordinaire fait converger |y| vers 0 ; un pôle fait échouer
/// l’évaluation ou dépasser le seuil.
fn pole_entre(expr: &Expr, a: (f64, f64), b: (f64, f64)) -> Option<f64> {
    let (mut xa, ya) = a;
    let (mut xb, yb) = b;

    if ya == 0.0 || yb == 0.0 || ya.signum() == yb.signum() {
        return None;
    }
    let signe_a = ya.signum();

    for _ in 0..PROFONDEUR_POLE {
        let xm = 0.5 * (xa + xb);
        let ym = match expr.eval(xm) {
            Ok(v) if v.abs() < SEUIL_EXPLOSION => v,
            _ => return Some(xm),
        };
        if ym == 0.0 {
            return None;
        }
        if ym.signum() == signe_a {
            xa = xm;
        } else {
            xb = xm;
        }
    }

    None
}

/// Nombre de trous d’une série.
pub fn nb_trous(points: &[Echantillon]) -> usize {
    points.iter().filter(|(_, y)| y.is_none()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courbe(s: &str) -> Vec<Echantillon> {
        let e = analyser_expression(s).unwrap_or_else(|err| panic!("{s:?}: {err}"));
        echantillonner(&e, -10.0, 10.0, 400)
    }

    #[test]
    fn linspace_bornes() {
        let xs = linspace(-10.0, 10.0, 400);
        assert_eq!(xs.len(), 400);
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[399], 10.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn pipeline_normalise() {
        let e = analyser_expression("2x²+3x").unwrap();
        assert_eq!(e.eval(2.0), Ok(14.0));
        assert_eq!(e.to_string(), "2*x^2 + 3*x");
    }

    #[test]
    fn pipeline_erreurs() {
        assert_eq!(analyser_expression("   "), Err(ErreurExpr::Vide));
        assert!(analyser_expression("x + 1 = 7").is_err());
        assert!(analyser_expression("2 *").is_err());
    }

    #[test]
    fn parabole_sans_trou() {
        let pts = courbe("x**2");
        assert_eq!(pts.len(), 400);
        assert_eq!(nb_trous(&pts), 0);
    }

    #[test]
    fn inverse_trou_pres_de_zero() {
        let pts = courbe("1/x");
        assert!(nb_trous(&pts) >= 1);
        assert!(pts
            .iter()
            .any(|(x, y)| y.is_none() && x.abs() < 0.05));
    }

    #[test]
    fn cube_passe_par_zero_sans_trou() {
        assert_eq!(nb_trous(&courbe("x^3 - x")), 0);
    }

    #[test]
    fn tangente_trous_aux_asymptotes() {
        // pôles en ±π/2, ±3π/2, ±5π/2
        let pts = courbe("tan(x)");
        assert!(nb_trous(&pts) >= 6, "trous={}", nb_trous(&pts));
    }

    #[test]
    fn racine_trous_a_gauche() {
        let pts = courbe("sqrt(x)");
        assert!(pts.iter().filter(|(x, _)| *x < 0.0).all(|(_, y)| y.is_none()));
        assert!(pts.iter().filter(|(x, _)| *x >= 0.0).all(|(_, y)| y.is_some()));
    }

    #[test]
    fn explosion_exponentielle() {
        // e^x dépasse 1e6 vers x ≈ 13.8 : rien ici, mais e^(2x) explose après x ≈ 6.9
        let pts = courbe("exp(2x)");
        assert!(pts.iter().any(|(x, y)| *x > 7.0 && y.is_none()));
        assert!(pts.iter().all(|(x, y)| *x > 6.9 || y.is_some()));
    }
}

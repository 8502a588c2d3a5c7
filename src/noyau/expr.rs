// src/noyau/expr.rs
//
// AST à une variable (x).
// - Rat : rationnel exact (littéraux, repliement de constantes)
// - Pi, E : constantes nommées
// - Var : variable symbolique (seule "x" est évaluable)
//
// IMPORTANT :
// - simplify() ne replie que ce qui est exact (Rat op Rat) ; jamais de flottant.
// - eval() travaille en f64 : toute valeur non réelle ou non finie est une erreur,
//   l’appelant décide quoi en faire (trou dans la courbe).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::erreur::ErreurExpr;

/// Au-delà, on ne replie pas une puissance exacte (taille des entiers).
const EXPOSANT_EXACT_MAX: i64 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Exp,
    Ln,
    Abs,
}

impl Fonction {
    /// Nom reconnu -> fonction unaire ("log" = logarithme naturel).
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "sqrt" => Sqrt,
            "exp" => Exp,
            "ln" | "log" => Ln,
            "abs" => Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Sqrt => "sqrt",
            Exp => "exp",
            Ln => "ln",
            Abs => "abs",
        }
    }

    fn appliquer(self, v: f64) -> Result<f64, ErreurExpr> {
        use Fonction::*;
        match self {
            Sqrt if v < 0.0 => return Err(ErreurExpr::HorsDomaine("sqrt d’un négatif")),
            Ln if v <= 0.0 => return Err(ErreurExpr::HorsDomaine("ln d’un non positif")),
            Asin | Acos if !(-1.0..=1.0).contains(&v) => {
                return Err(ErreurExpr::HorsDomaine("arc hors de [-1, 1]"))
            }
            _ => {}
        }

        let r = match self {
            Sin => v.sin(),
            Cos => v.cos(),
            Tan => v.tan(),
            Asin => v.asin(),
            Acos => v.acos(),
            Atan => v.atan(),
            Sinh => v.sinh(),
            Cosh => v.cosh(),
            Tanh => v.tanh(),
            Sqrt => v.sqrt(),
            Exp => v.exp(),
            Ln => v.ln(),
            Abs => v.abs(),
        };
        Ok(r)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,

    Var(String),

    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    /// Repliement exact des sous-arbres constants rationnels.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            Rat(_) | Pi | E | Var(_) => self,

            Neg(a) => match a.simplify() {
                Rat(x) => Rat(-x),
                Neg(inner) => *inner,
                a => Neg(Box::new(a)),
            },

            Add(a, b) => match (a.simplify(), b.simplify()) {
                (Rat(x), Rat(y)) => Rat(x + y),
                (Rat(x), b) if x.is_zero() => b,
                (a, Rat(y)) if y.is_zero() => a,
                (a, b) => Add(Box::new(a), Box::new(b)),
            },

            Sub(a, b) => match (a.simplify(), b.simplify()) {
                (Rat(x), Rat(y)) => Rat(x - y),
                (a, Rat(y)) if y.is_zero() => a,
                (a, b) => Sub(Box::new(a), Box::new(b)),
            },

            Mul(a, b) => match (a.simplify(), b.simplify()) {
                (Rat(x), Rat(y)) => Rat(x * y),
                (Rat(x), b) if x.is_one() => b,
                (a, Rat(y)) if y.is_one() => a,
                (a, b) => Mul(Box::new(a), Box::new(b)),
            },

            Div(a, b) => match (a.simplify(), b.simplify()) {
                // division par zéro : on garde le noeud, eval() la refusera
                (Rat(x), Rat(y)) if !y.is_zero() => Rat(x / y),
                (a, Rat(y)) if y.is_one() => a,
                (a, b) => Div(Box::new(a), Box::new(b)),
            },

            Pow(a, b) => match (a.simplify(), b.simplify()) {
                (Rat(base), Rat(exp)) => match puissance_exacte(&base, &exp) {
                    Some(r) => Rat(r),
                    None => Pow(Box::new(Rat(base)), Box::new(Rat(exp))),
                },
                (a, Rat(exp)) if exp.is_one() => a,
                (a, b) => Pow(Box::new(a), Box::new(b)),
            },

            Appel(f, a) => Appel(f, Box::new(a.simplify())),
        }
    }

    /// Évalue en x (réel). Erreur si non réel, non fini, ou variable libre.
    pub fn eval(&self, x: f64) -> Result<f64, ErreurExpr> {
        use Expr::*;

        let v = match self {
            Rat(r) => r.to_f64().ok_or(ErreurExpr::NonFini)?,
            Pi => std::f64::consts::PI,
            E => std::f64::consts::E,

            Var(nom) if nom == "x" => x,
            Var(nom) => return Err(ErreurExpr::VariableLibre(nom.clone())),

            Neg(a) => -a.eval(x)?,
            Add(a, b) => a.eval(x)? + b.eval(x)?,
            Sub(a, b) => a.eval(x)? - b.eval(x)?,
            Mul(a, b) => a.eval(x)? * b.eval(x)?,

            Div(a, b) => {
                let num = a.eval(x)?;
                let den = b.eval(x)?;
                if den == 0.0 {
                    return Err(ErreurExpr::DivisionParZero);
                }
                num / den
            }

            Pow(a, b) => {
                let base = a.eval(x)?;
                let exp = b.eval(x)?;
                if base == 0.0 && exp < 0.0 {
                    return Err(ErreurExpr::DivisionParZero);
                }
                if base < 0.0 && exp.fract() != 0.0 {
                    return Err(ErreurExpr::HorsDomaine("puissance non entière d’un négatif"));
                }
                base.powf(exp)
            }

            Appel(f, a) => f.appliquer(a.eval(x)?)?,
        };

        if v.is_finite() {
            Ok(v)
        } else {
            Err(ErreurExpr::NonFini)
        }
    }

    /// Noms des variables libres (hors "x"), sans doublon.
    pub fn variables_libres(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collecte_variables(&mut out);
        out
    }

    fn collecte_variables(&self, out: &mut Vec<String>) {
        use Expr::*;
        match self {
            Var(nom) if nom != "x" && !out.contains(nom) => out.push(nom.clone()),
            Rat(_) | Pi | E | Var(_) => {}
            Neg(a) | Appel(_, a) => a.collecte_variables(out),
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                a.collecte_variables(out);
                b.collecte_variables(out);
            }
        }
    }
}

/// base^exp exact si exp entier et raisonnable (0^négatif => None).
fn puissance_exacte(base: &BigRational, exp: &BigRational) -> Option<BigRational> {
    if !exp.denom().is_one() {
        return None;
    }
    let n = exp.numer().to_i64()?;
    if n.abs() > EXPOSANT_EXACT_MAX {
        return None;
    }
    if n < 0 && base.is_zero() {
        return None;
    }

    let mut acc = BigRational::one();
    for _ in 0..n.abs() {
        acc *= base.clone();
    }
    if n < 0 {
        acc = acc.recip();
    }
    Some(acc)
}

/* ------------------------ Affichage ------------------------ */

fn format_rat(r: &BigRational) -> String {
    let n: &BigInt = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

impl Expr {
    /// Priorité d’affichage (parenthèses minimales).
    fn priorite(&self) -> u8 {
        use Expr::*;
        match self {
            Add(..) | Sub(..) => 1,
            Mul(..) | Div(..) => 2,
            Neg(_) => 3,
            Pow(..) => 4,
            Rat(r) if r.is_negative() || !r.denom().is_one() => 2,
            _ => 5,
        }
    }

    fn ecrire_operande(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.priorite() < min {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => f.write_str(&format_rat(r)),
            Pi => f.write_str("π"),
            E => f.write_str("e"),
            Var(nom) => f.write_str(nom),

            Neg(a) => {
                f.write_str("-")?;
                a.ecrire_operande(f, 4)
            }
            Add(a, b) => {
                a.ecrire_operande(f, 1)?;
                f.write_str(" + ")?;
                b.ecrire_operande(f, 2)
            }
            Sub(a, b) => {
                a.ecrire_operande(f, 1)?;
                f.write_str(" - ")?;
                b.ecrire_operande(f, 2)
            }
            Mul(a, b) => {
                a.ecrire_operande(f, 2)?;
                f.write_str("*")?;
                b.ecrire_operande(f, 3)
            }
            Div(a, b) => {
                a.ecrire_operande(f, 2)?;
                f.write_str("/")?;
                b.ecrire_operande(f, 3)
            }
            Pow(a, b) => {
                a.ecrire_operande(f, 5)?;
                f.write_str("^")?;
                b.ecrire_operande(f, 4)
            }
            Appel(fonction, a) => write!(f, "{}({a})", fonction.nom()),
        }
    }
}

// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction connue (sin, sqrt, ln, …) => fonction unaire (postfixée en RPN)
//    - si name == "e" => constante d’Euler
//    - sinon => variable/atome (Expr::Var)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//    - Neg lie moins fort que la puissance : "-x**2" => -(x**2), "2**-1" => 2**(-1)
// - Plus unaire : ignoré.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::ErreurExpr;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Pow => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Pow)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Sommet de pile qui bloque le dépilement : '(' ou fonction en attente d’argument.
fn bloque(top: &Tok) -> bool {
    match top {
        Tok::LPar => true,
        Tok::Ident(name) => is_fonction_ident(name),
        _ => false,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("x"), Pow, Num(2), RPar]
///   rpn:    [Ident("x"), Num(2), Pow, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurExpr> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins (et le plus) unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurExpr::ParentheseOrpheline);
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Ident(name)) if is_fonction_ident(name)) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus if !prev_was_value => {}

            Tok::Minus if !prev_was_value => {
                // préfixe : rien à dépiler
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                // dépile tant que:
                // - on n'est pas bloqué par '(' ou par une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if bloque(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurExpr::ExpressionInvalide),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurExpr::ParenthesesNonFermees);
        }
        out.push(op);
    }

    Ok(out)
}

/// Profondeur maximale de l’arbre construit : simplify, eval, Display et
/// Drop sont récursifs, la pile d’appel doit rester bornée.
pub const PROFONDEUR_MAX: usize = 200;

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de la pile garde la profondeur de son sous-arbre ;
/// au-delà de PROFONDEUR_MAX : ErreurExpr::TropProfond, avant toute récursion.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurExpr> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    fn noeud(e: Expr, profondeur: usize) -> Result<(Expr, usize), ErreurExpr> {
        if profondeur > PROFONDEUR_MAX {
            return Err(ErreurExpr::TropProfond(PROFONDEUR_MAX));
        }
        Ok((e, profondeur))
    }

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push((Expr::Rat(r), 1)),
            Tok::Pi => st.push((Expr::Pi, 1)),

            Tok::Neg => {
                let (a, p) = st.pop().ok_or(ErreurExpr::ExpressionInvalide)?;
                st.push(noeud(Expr::Neg(Box::new(a)), p + 1)?);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                let (b, pb) = st.pop().ok_or(ErreurExpr::ExpressionInvalide)?;
                let (a, pa) = st.pop().ok_or(ErreurExpr::ExpressionInvalide)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(noeud(e, pa.max(pb) + 1)?);
            }

            Tok::Ident(name) => match Fonction::depuis_nom(&name) {
                Some(f) => {
                    let (x, p) = st
                        .pop()
                        .ok_or_else(|| ErreurExpr::FonctionSansArgument(name.clone()))?;
                    st.push(noeud(Expr::Appel(f, Box::new(x)), p + 1)?);
                }
                None if name == "e" => st.push((Expr::E, 1)),
                None => st.push((Expr::Var(name), 1)),
            },

            Tok::LPar | Tok::RPar => return Err(ErreurExpr::ExpressionInvalide),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurExpr::ExpressionInvalide),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::{format_tokens, tokenize};

    fn rpn(s: &str) -> String {
        format_tokens(&to_rpn(&tokenize(s).unwrap()).unwrap())
    }

    fn expr(s: &str) -> Result<Expr, ErreurExpr> {
        from_rpn(&to_rpn(&tokenize(s)?)?)
    }

    #[test]
    fn priorites() {
        assert_eq!(rpn("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(rpn("2 ** 3 ** 2"), "2 3 2 ** **");
        assert_eq!(rpn("(1 + 2) * 3"), "1 2 + 3 *");
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(rpn("-x**2"), "x 2 ** neg");
        assert_eq!(rpn("2**-1"), "2 1 neg **");
        assert_eq!(rpn("-2*3"), "2 neg 3 *");
        assert_eq!(rpn("x - -1"), "x 1 neg -");
        assert_eq!(rpn("+x"), "x");
    }

    #[test]
    fn fonctions() {
        assert_eq!(rpn("sin(x**2)"), "x 2 ** sin");
        assert_eq!(rpn("2*sqrt(x+1)"), "2 x 1 + sqrt *");
    }

    #[test]
    fn constantes() {
        assert_eq!(expr("e").unwrap(), Expr::E);
        assert_eq!(expr("pi").unwrap(), Expr::Pi);
        assert_eq!(expr("k").unwrap(), Expr::Var("k".into()));
    }

    #[test]
    fn erreurs() {
        assert_eq!(expr("(x + 1"), Err(ErreurExpr::ParenthesesNonFermees));
        assert_eq!(expr("x + 1)"), Err(ErreurExpr::ParentheseOrpheline));
        assert_eq!(expr("x +"), Err(ErreurExpr::ExpressionInvalide));
        assert_eq!(expr("x(x+1)"), Err(ErreurExpr::ExpressionInvalide));
        assert_eq!(expr(""), Err(ErreurExpr::ExpressionInvalide));
        assert_eq!(
            expr("sqrt()"),
            Err(ErreurExpr::FonctionSansArgument("sqrt".into()))
        );
    }

    #[test]
    fn profondeur_bornee() {
        // chaîne gauche : x + x + ... + x, profondeur = nombre de '+' + 1
        let limite = format!("{}x", "x+".repeat(PROFONDEUR_MAX - 1));
        assert!(expr(&limite).is_ok());

        let trop = format!("{}x", "x+".repeat(PROFONDEUR_MAX));
        assert_eq!(expr(&trop), Err(ErreurExpr::TropProfond(PROFONDEUR_MAX)));

        // imbrication de fonctions et de moins unaires : même borne
        let appels = format!("{}x{}", "sin(".repeat(PROFONDEUR_MAX), ")".repeat(PROFONDEUR_MAX));
        assert_eq!(expr(&appels), Err(ErreurExpr::TropProfond(PROFONDEUR_MAX)));
        let moins = format!("{}x", "-".repeat(PROFONDEUR_MAX + 5));
        assert_eq!(expr(&moins), Err(ErreurExpr::TropProfond(PROFONDEUR_MAX)));
    }
}

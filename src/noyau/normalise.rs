// src/noyau/normalise.rs
//
// Notation informelle -> syntaxe infixe évaluable.
// - Réécriture de texte seulement : aucune évaluation, jamais d’échec.
// - L’ordre compte : les règles suivantes voient le texte déjà réécrit.
// - L’insertion du '*' implicite passe en dernier, pour ne pas
//   redécouper les chiffres produits par "**2".

/// Substitutions littérales, appliquées dans cet ordre.
const SUBSTITUTIONS: [(&str, &str); 8] = [
    ("²", "**2"),
    ("³", "**3"),
    ("⁴", "**4"),
    ("⁵", "**5"),
    ("^", "**"),
    ("×", "*"),
    ("÷", "/"),
    ("√", "sqrt"),
];

/// Normalise une expression : `2x²+3x` -> `2*x**2+3*x`.
///
/// Idempotente : `normalise(normalise(s)) == normalise(s)`.
pub fn normalise(expr: &str) -> String {
    let mut s = expr.to_string();
    for (motif, remplacement) in SUBSTITUTIONS {
        if s.contains(motif) {
            s = s.replace(motif, remplacement);
        }
    }
    inserer_produits_implicites(&s)
}

/// Un seul balayage gauche -> droite :
/// - chiffre suivi d’une lettre ASCII : `2x` -> `2*x`
/// - chiffre suivi de '(' : `3(x+1)` -> `3*(x+1)`
fn inserer_produits_implicites(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if c.is_ascii_digit() {
            if let Some(&suivant) = chars.peek() {
                if suivant.is_ascii_alphabetic() || suivant == '(' {
                    out.push('*');
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::normalise;

    #[test]
    fn exposants_unicode() {
        assert_eq!(normalise("x²"), "x**2");
        assert_eq!(normalise("x³ - x⁴ + x⁵"), "x**3 - x**4 + x**5");
    }

    #[test]
    fn caret_et_operateurs() {
        assert_eq!(normalise("x^2 × 3 ÷ 4"), "x**2 * 3 / 4");
    }

    #[test]
    fn racine() {
        assert_eq!(normalise("√(x+1)"), "sqrt(x+1)");
    }

    #[test]
    fn produits_implicites() {
        assert_eq!(normalise("2x²+3x"), "2*x**2+3*x");
        assert_eq!(normalise("3(x+1)"), "3*(x+1)");
        assert_eq!(normalise("2x3y"), "2*x3*y");
    }

    #[test]
    fn rien_a_faire() {
        assert_eq!(normalise("x + 1"), "x + 1");
        assert_eq!(normalise(""), "");
    }

    #[test]
    fn idempotente() {
        for s in ["2x²+3x", "3(x+1)^2", "√(4x) ÷ 2", "x**2", "sin(2x)"] {
            let une = normalise(s);
            assert_eq!(normalise(&une), une, "s={s:?}");
        }
    }
}

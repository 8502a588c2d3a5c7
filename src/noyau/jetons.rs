// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreur::ErreurExpr;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),
    Pi,

    // Fonctions + variables + constantes nommées
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction (sin/sqrt/...) ou une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Pow, // ** ou ^

    // Moins unaire : produit par to_rpn, jamais par tokenize
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - entiers et décimaux (ex: 12, 2.5, .5) -> Num exact
/// - opérateurs + - * / ** ^
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurExpr> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Pow);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Tok::Pi);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre : entier, décimal "2.5", "2." ou ".5"
        let debut_decimal =
            c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || debut_decimal {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let entier: String = chars[start..i].iter().collect();

            let mut fraction = String::new();
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                let start_f = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                fraction = chars[start_f..i].iter().collect();
            }

            out.push(Tok::Num(rationnel_decimal(&entier, &fraction)?));
            continue;
        }

        return Err(ErreurExpr::CaractereInattendu(c));
    }

    Ok(out)
}

/// "12" + "34" -> 1234/100 (exact).
fn rationnel_decimal(entier: &str, fraction: &str) -> Result<BigRational, ErreurExpr> {
    let chiffres = format!("{entier}{fraction}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurExpr::NombreInvalide(format!("{entier}.{fraction}")))?;

    let mut d = BigInt::one();
    for _ in 0..fraction.len() {
        d *= 10u32;
    }
    Ok(BigRational::new(n, d))
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => {
                if r.denom().is_one() {
                    format!("{}", r.numer())
                } else {
                    format!("{}/{}", r.numer(), r.denom())
                }
            }
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Pow => "**".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

// src/noyau/motifs.rs
//
// Motifs nommés du classement : un motif = une règle d’extraction,
// testable isolément. Les regex sont compilées au premier usage (Lazy).
//
// Nombres : chiffres ASCII seulement ([0-9]), ce que f64::from_str sait lire ;
// le classement et les rendus comptent ainsi les mêmes nombres.

use once_cell::sync::Lazy;
use regex::Regex;

static INTENTION_FONCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"x[\^²³⁴*]|[xy]\s*=|f\(x\)|plot|graph|solve.*x").expect("motif intention")
});

static AFFECTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[xy]\s*=\s*([^,\n]+)").expect("motif affectation"));

static SEGMENT_XY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\d\w+\-*/\^²³⁴()\s]+[xy][\d\w+\-*/\^²³⁴()\s]*").expect("motif segment")
});

static ENTIERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("motif entiers"));

static NON_SIGNES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("motif non signés"));

static SIGNES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+\.?[0-9]*").expect("motif signés"));

static OBJET_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("motif json")
});

/* ------------------------ Intention "fonction" ------------------------ */

/// x suivi d’une puissance, affectation `x =`/`y =`, `f(x)`, "plot", "graph",
/// ou "solve" suivi plus loin d’un x. À appliquer sur la question en minuscules.
pub fn intention_fonction(question_minuscule: &str) -> bool {
    INTENTION_FONCTION.is_match(question_minuscule)
}

/// Affectation `y = <expr>` ou `x = <expr>` : texte après '=' jusqu’à ',' ou fin de ligne.
pub fn affectation(question: &str) -> Option<&str> {
    AFFECTATION
        .captures(question)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Plus longue suite chiffres/lettres/opérateurs/parenthèses contenant un x ou un y.
pub fn segment_en_xy(question: &str) -> Option<&str> {
    SEGMENT_XY.find(question).map(|m| m.as_str().trim())
}

/// Dernier recours : la question sans le verbe "solve"/"Solve".
pub fn sans_solve(question: &str) -> String {
    question.replace("solve", "").replace("Solve", "").trim().to_string()
}

/* ------------------------ Géométrie ------------------------ */

/// Mots-clés géométriques (sous-chaînes, question en minuscules).
pub const MOTS_GEOMETRIQUES: [&str; 6] =
    ["circle", "square", "triangle", "rectangle", "area", "perimeter"];

pub fn mot_geometrique(question_minuscule: &str) -> bool {
    MOTS_GEOMETRIQUES
        .iter()
        .any(|mot| question_minuscule.contains(mot))
}

/* ------------------------ Statistiques ------------------------ */

pub const MOTS_STATISTIQUES: [&str; 3] = ["mean", "average", "distribution"];

pub fn mot_statistique(question_minuscule: &str) -> bool {
    MOTS_STATISTIQUES
        .iter()
        .any(|mot| question_minuscule.contains(mot))
}

/* ------------------------ Nombres ------------------------ */

/// Suites de chiffres (entiers non signés), dans l’ordre d’apparition.
pub fn entiers(texte: &str) -> Vec<&str> {
    ENTIERS.find_iter(texte).map(|m| m.as_str()).collect()
}

/// Nombres non signés, décimaux compris (`7`, `2.5`, `3.`).
pub fn nombres_non_signes(texte: &str) -> Vec<f64> {
    NON_SIGNES
        .find_iter(texte)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Nombres signés, décimaux compris (`-3`, `4.5`).
pub fn nombres_signes(texte: &str) -> Vec<f64> {
    SIGNES
        .find_iter(texte)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/* ------------------------ Réponse d’un modèle ------------------------ */

/// Premier objet JSON (au plus un niveau d’imbrication) noyé dans du texte libre.
pub fn objet_json(texte: &str) -> Option<&str> {
    OBJET_JSON.find(texte).map(|m| m.as_str())
}

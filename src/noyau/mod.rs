//! Noyau visualisation
//!
//! Organisation interne :
//! - normalise.rs  : notation informelle -> syntaxe évaluable (², ^, ×, 2x…)
//! - motifs.rs     : motifs nommés (regex) utilisés par le classement
//! - classement.rs : cascade de règles -> ClassificationResult
//! - erreur.rs     : erreurs typées (expression)
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST (rationnels exacts) + simplify + évaluation réelle
//! - eval.rs       : pipeline texte -> Expr + échantillonnage avec trous
//! - graphique.rs  : description structurée d’un graphique + projection
//! - svg.rs        : Graphique -> balisage SVG
//! - rendus/       : les cinq moteurs de rendu + dispatch
//! - sortie.rs     : sortie étiquetée {chart, viz_type}

pub mod classement;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod graphique;
pub mod jetons;
pub mod motifs;
pub mod normalise;
pub mod rendus;
pub mod rpn;
pub mod sortie;
pub mod svg;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

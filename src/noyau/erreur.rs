// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs du pipeline expression (jetons -> RPN -> Expr -> évaluation).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurExpr {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseOrpheline,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("expression trop profonde (plus de {0} niveaux)")]
    TropProfond(usize),

    #[error("fonction sans argument: {0}")]
    FonctionSansArgument(String),

    #[error("variable non évaluable: {0}")]
    VariableLibre(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("hors domaine: {0}")]
    HorsDomaine(&'static str),

    #[error("résultat non fini")]
    NonFini,
}

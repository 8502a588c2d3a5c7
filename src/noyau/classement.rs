// src/noyau/classement.rs
//
// Classement : question (+ réponse optionnelle) -> ClassificationResult.
//
// Cascade ordonnée, la PREMIÈRE règle qui répond gagne :
//   1) fonction      (intention symbolique : x², y =, f(x), plot, graph, solve…x)
//   2) géométrie     (circle, square, triangle, rectangle, area, perimeter)
//   3) liste numérique (>= 3 nombres dans question + début de réponse)
//   sinon : rien à visualiser.
//
// Fonction pure : aucune E/S, aucun état.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

use super::motifs;

/// Longueur (en caractères) du début de réponse pris en compte.
const PREFIXE_REPONSE: usize = 200;

/// Nombre minimal de nombres pour une visualisation de données.
const MIN_NOMBRES: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VizType {
    Function,
    Geometric,
    Data,
    Statistical,
    /// Rendu disponible, jamais choisi par la cascade.
    Vector,
    #[default]
    None,
}

impl VizType {
    pub fn as_str(self) -> &'static str {
        match self {
            VizType::Function => "function",
            VizType::Geometric => "geometric",
            VizType::Data => "data",
            VizType::Statistical => "statistical",
            VizType::Vector => "vector",
            VizType::None => "none",
        }
    }
}

impl fmt::Display for VizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Décision de visualisation (valeur immuable, une par requête).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    can_visualize: bool,
    #[serde(default)]
    viz_type: VizType,
    #[serde(default)]
    expression: String,
    #[serde(default, deserialize_with = "donnees_souples")]
    data: Vec<String>,
    #[serde(default)]
    details: String,
}

impl ClassificationResult {
    /// Rien à visualiser.
    pub fn aucune() -> Self {
        Self::default()
    }

    /// Construit un résultat visualisable (`VizType::None` => `aucune()`).
    pub fn new(
        viz_type: VizType,
        expression: impl Into<String>,
        data: Vec<String>,
        details: impl Into<String>,
    ) -> Self {
        if viz_type == VizType::None {
            return Self::aucune();
        }
        Self {
            can_visualize: true,
            viz_type,
            expression: expression.into(),
            data,
            details: details.into(),
        }
    }

    pub fn can_visualize(&self) -> bool {
        self.can_visualize
    }

    pub fn viz_type(&self) -> VizType {
        self.viz_type
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// Forme d’origine : jetons joints par des virgules ("3,1,4").
    pub fn data_jointes(&self) -> String {
        self.data.join(",")
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    /// Lit le premier objet JSON noyé dans une réponse de modèle.
    /// Toute anomalie (pas d’objet, JSON invalide, type inconnu) => `aucune()`.
    pub fn depuis_reponse_modele(texte: &str) -> Self {
        let Some(objet) = motifs::objet_json(texte) else {
            return Self::aucune();
        };
        match serde_json::from_str::<ClassificationResult>(objet) {
            Ok(r) => r.avec_invariant(),
            Err(e) => {
                debug!(erreur = %e, "réponse de modèle illisible");
                Self::aucune()
            }
        }
    }

    /// can_visualize faux <=> viz_type none.
    fn avec_invariant(self) -> Self {
        if !self.can_visualize || self.viz_type == VizType::None {
            return Self::aucune();
        }
        self
    }
}

/// `data` accepte "1,2,3", ["1","2"] ou [1, 2.5].
fn donnees_souples<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Element {
        Texte(String),
        Nombre(serde_json::Number),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Donnees {
        Jointes(String),
        Liste(Vec<Element>),
    }

    let jetons = match Option::<Donnees>::deserialize(d)? {
        None => Vec::new(),
        Some(Donnees::Jointes(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Donnees::Liste(v)) => v
            .into_iter()
            .map(|e| match e {
                Element::Texte(s) => s,
                Element::Nombre(n) => n.to_string(),
            })
            .collect(),
    };
    Ok(jetons)
}

/* ------------------------ Cascade ------------------------ */

/// Surface de recherche partagée par les règles.
struct Entree<'a> {
    question: &'a str,
    question_minuscule: String,
    reponse: &'a str,
}

type Regle = fn(&Entree<'_>) -> Option<ClassificationResult>;

/// Ordre = priorité : fonction > géométrie > liste numérique.
const REGLES: [(&str, Regle); 3] = [
    ("fonction", regle_fonction),
    ("geometrie", regle_geometrie),
    ("liste_numerique", regle_liste_numerique),
];

/// API publique : décide si/quoi visualiser.
pub fn classify(question: &str, answer: &str) -> ClassificationResult {
    let entree = Entree {
        question,
        question_minuscule: question.to_lowercase(),
        reponse: answer,
    };

    for (nom, regle) in REGLES {
        if let Some(r) = regle(&entree) {
            debug!(regle = nom, viz_type = %r.viz_type, "classement");
            return r;
        }
    }

    debug!("classement : rien à visualiser");
    ClassificationResult::aucune()
}

fn regle_fonction(e: &Entree<'_>) -> Option<ClassificationResult> {
    if !motifs::intention_fonction(&e.question_minuscule) {
        return None;
    }

    let expression = motifs::affectation(e.question)
        .or_else(|| motifs::segment_en_xy(e.question))
        .map(str::to_string)
        .unwrap_or_else(|| motifs::sans_solve(e.question));

    Some(ClassificationResult::new(
        VizType::Function,
        expression,
        Vec::new(),
        "function plot",
    ))
}

fn regle_geometrie(e: &Entree<'_>) -> Option<ClassificationResult> {
    if !motifs::mot_geometrique(&e.question_minuscule) {
        return None;
    }
    Some(ClassificationResult::new(
        VizType::Geometric,
        e.question,
        Vec::new(),
        e.question,
    ))
}

fn regle_liste_numerique(e: &Entree<'_>) -> Option<ClassificationResult> {
    let debut_reponse: String = e.reponse.chars().take(PREFIXE_REPONSE).collect();
    let surface = format!("{}{}", e.question, debut_reponse);

    let jetons: Vec<String> = motifs::entiers(&surface)
        .into_iter()
        .map(str::to_string)
        .collect();
    if jetons.len() < MIN_NOMBRES {
        return None;
    }

    let r = if motifs::mot_statistique(&e.question_minuscule) {
        ClassificationResult::new(VizType::Statistical, "", jetons, "statistical analysis")
    } else {
        ClassificationResult::new(VizType::Data, "", jetons, "data visualization")
    };
    Some(r)
}

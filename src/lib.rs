//! visumath : classement et visualisation de contenu mathématique
//!
//! Texte libre (question + réponse optionnelle) -> `ClassificationResult`
//! -> rendu (courbe, forme, données, distribution, vecteur) -> `Graphique` (SVG).
//!
//! Deux points d’entrée pour l’application hôte :
//! - [`classify`] : décide si/quoi visualiser (pur, sans effet de bord)
//! - [`render`]   : produit le graphique, ou `None` (jamais d’erreur propagée)

pub mod noyau;

pub use noyau::classement::{classify, ClassificationResult, VizType};
pub use noyau::graphique::Graphique;
pub use noyau::rendus::render;
pub use noyau::sortie::{visualiser, Visualisation};

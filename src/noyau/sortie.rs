// src/noyau/sortie.rs
//
// Sortie étiquetée pour l’application hôte :
//   { "chart": "<svg…>", "viz_type": "function" }   ou   { "chart": null }

use serde::Serialize;

use super::classement::{classify, VizType};
use super::rendus::render;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Visualisation {
    pub chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viz_type: Option<VizType>,
}

impl Visualisation {
    pub fn absente() -> Self {
        Self::default()
    }
}

/// Classement + rendu + SVG en un appel.
pub fn visualiser(question: &str, answer: &str) -> Visualisation {
    let r = classify(question, answer);
    match render(&r) {
        Some(g) => Visualisation {
            chart: Some(g.to_svg()),
            viz_type: Some(r.viz_type()),
        },
        None => Visualisation::absente(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avec_graphique() {
        let v = visualiser("Plot y = x^2", "");
        assert_eq!(v.viz_type, Some(VizType::Function));
        assert!(v.chart.as_deref().is_some_and(|s| s.contains("Graph of x^2")));
    }

    #[test]
    fn sans_graphique() {
        assert_eq!(visualiser("Who was Euler?", ""), Visualisation::absente());
        // classé "fonction" mais illisible : pas de graphique, pas d’erreur
        assert_eq!(visualiser("plot y = x +* 2", ""), Visualisation::absente());
    }

    #[test]
    fn json_etiquete() {
        let v = visualiser("mean of 1, 2, 3, 10", "");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["viz_type"], "statistical");
        assert!(json["chart"].as_str().is_some_and(|s| s.starts_with("<svg")));

        let json = serde_json::to_string(&Visualisation::absente()).unwrap();
        assert_eq!(json, r#"{"chart":null}"#);
    }
}

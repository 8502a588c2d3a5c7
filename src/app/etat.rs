//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de l’écran (question, réponse, classement, graphique,
//! SVG, erreur) et offrir des opérations simples (C/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucun classement ni rendu ici : la vue appelle le moteur puis dépose.
//! - Actions déterministes, sans effet de bord caché.

use visumath::{ClassificationResult, Graphique};

#[derive(Clone, Debug)]
pub struct AppViz {
    // --- entrées utilisateur ---
    pub question: String,
    pub reponse: String,

    // --- sorties ---
    pub resultat: Option<ClassificationResult>,
    pub graphique: Option<Graphique>,
    pub svg: String,
    pub erreur: String,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à la question après un clic sur un bouton.
    pub focus_question: bool,
}

impl Default for AppViz {
    fn default() -> Self {
        Self {
            question: String::new(),
            reponse: String::new(),
            resultat: None,
            graphique: None,
            svg: String::new(),
            erreur: String::new(),
            focus_question: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppViz {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + sorties).
    pub fn reset_total(&mut self) {
        self.question.clear();
        self.reponse.clear();
        self.clear_resultats();
    }

    /// C : effacer seulement la question (sans toucher au graphique affiché).
    pub fn clear_question(&mut self) {
        self.question.clear();
        self.focus_question = true;
    }

    pub fn clear_resultats(&mut self) {
        self.resultat = None;
        self.graphique = None;
        self.svg.clear();
        self.erreur.clear();
        self.focus_question = true;
    }

    /// Erreur de saisie : le dernier classement reste affiché, le graphique tombe.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.graphique = None;
        self.svg.clear();
        self.focus_question = true;
    }

    /// Dépose classement + graphique éventuel (SVG calculé ici, une fois).
    pub fn set_resultats(&mut self, resultat: ClassificationResult, graphique: Option<Graphique>) {
        self.erreur.clear();
        self.svg = graphique.as_ref().map(Graphique::to_svg).unwrap_or_default();
        self.graphique = graphique;
        self.resultat = Some(resultat);
        self.focus_question = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visumath::{classify, render};

    #[test]
    fn c_garde_les_resultats() {
        let mut app = AppViz {
            question: "Plot y = x".into(),
            ..AppViz::default()
        };
        let r = classify(&app.question, "");
        let g = render(&r);
        app.set_resultats(r, g);
        app.clear_question();
        assert!(app.question.is_empty());
        assert!(app.graphique.is_some());
        assert!(app.svg.starts_with("<svg"));
    }

    #[test]
    fn ac_efface_tout() {
        let mut app = AppViz {
            question: "mean of 1 2 3".into(),
            reponse: "2".into(),
            ..AppViz::default()
        };
        let r = classify(&app.question, &app.reponse);
        let g = render(&r);
        app.set_resultats(r, g);
        app.reset_total();
        assert!(app.question.is_empty() && app.reponse.is_empty());
        assert!(app.resultat.is_none() && app.graphique.is_none() && app.svg.is_empty());
    }

    #[test]
    fn erreur_coupe_le_graphique() {
        let mut app = AppViz::default();
        let r = classify("circle", "");
        let g = render(&r);
        app.set_resultats(r, g);
        app.set_erreur("Question vide");
        assert_eq!(app.erreur, "Question vide");
        assert!(app.graphique.is_none());
        assert!(app.resultat.is_some());
    }
}

// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppViz (etat.rs) pour natif + wasm
// - Clavier : Enter visualise (quand la question a le focus)
// - Focus redonné à la question après clic (focus_question)
// - Graphique peint par egui (peinture.rs), SVG consultable et copiable

use eframe::egui;

use super::etat::AppViz;
use super::peinture;

/// Hauteur de la zone de tracé.
const HAUTEUR_GRAPHIQUE: f32 = 420.0;

impl AppViz {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Visumath");
                ui.add_space(6.0);

                self.ui_entrees(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_classement(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_graphique(ui);
            });
    }

    fn ui_entrees(&mut self, ui: &mut egui::Ui) {
        ui.label("Question :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.question)
                .desired_width(ui.available_width())
                .hint_text("Ex: Plot y = x^2 - 4, area of a circle of radius 3, mean of 2, 4, 9")
                .id_source("question_edit"),
        );

        if self.focus_question {
            resp.request_focus();
            self.focus_question = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.visualiser_via_moteur();
        }

        ui.add_space(4.0);
        ui.label("Réponse (optionnelle) :");
        ui.add(
            egui::TextEdit::multiline(&mut self.reponse)
                .desired_width(ui.available_width())
                .desired_rows(3)
                .hint_text("Texte de réponse : ses 200 premiers caractères comptent")
                .id_source("reponse_edit"),
        );

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let resp = ui
                .add_sized([110.0, 30.0], egui::Button::new("Visualiser"))
                .on_hover_text("Classer puis tracer (Enter)");
            if resp.clicked() {
                self.visualiser_via_moteur();
            }

            ui.separator();

            // Contrat: C = question seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement la question", Action::ClearQuestion);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_classement(&mut self, ui: &mut egui::Ui) {
        ui.label("Classement :");

        let Some(r) = &self.resultat else {
            ui.monospace("—");
            return;
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::Grid::new("classement_grille")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Type");
                        ui.monospace(r.viz_type().as_str());
                        ui.end_row();

                        ui.label("Expression");
                        ui.monospace(r.expression());
                        ui.end_row();

                        ui.label("Données");
                        ui.monospace(r.data_jointes());
                        ui.end_row();

                        ui.label("Détails");
                        ui.monospace(r.details());
                        ui.end_row();
                    });
            });
    }

    fn ui_graphique(&mut self, ui: &mut egui::Ui) {
        match &self.graphique {
            Some(g) => {
                let largeur = ui.available_width();
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(largeur, HAUTEUR_GRAPHIQUE),
                    egui::Sense::hover(),
                );
                peinture::peindre(ui.painter_at(rect), rect, g);
            }
            None => {
                let msg = match &self.resultat {
                    Some(r) if r.can_visualize() => "Rendu impossible : aucun graphique",
                    Some(_) => "Rien à visualiser",
                    None => "",
                };
                if !msg.is_empty() {
                    ui.monospace(msg);
                }
                return;
            }
        }

        ui.add_space(6.0);

        egui::CollapsingHeader::new("SVG")
            .default_open(false)
            .show(ui, |ui| {
                if ui.button("Copier").on_hover_text("Copier le SVG").clicked() {
                    ui.ctx().copy_text(self.svg.clone());
                }
                egui::ScrollArea::vertical()
                    .id_salt("svg_defilement")
                    .max_height(200.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::Label::new(egui::RichText::new(&self.svg).monospace().small())
                                .wrap(),
                        );
                    });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearQuestion => self.clear_question(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_question = true;
        }
    }

    /// Classe la question via le moteur, rend, puis dépose dans l’état UI.
    fn visualiser_via_moteur(&mut self) {
        let q = self.question.trim();
        if q.is_empty() {
            self.set_erreur("Question vide");
            return;
        }

        let r = visumath::classify(q, &self.reponse);
        let g = visumath::render(&r);
        self.set_resultats(r, g);
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearQuestion,
    ResetTotal,
}

// src/app.rs
//
// Visumath : module App (racine)
// ------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs, vue.rs, peinture.rs)
// - Ré-exporter AppViz (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Enter est géré dans vue.rs, quand le champ question a le focus.

pub mod etat;
pub mod peinture;
pub mod vue;

pub use etat::AppViz;

use eframe::egui;

impl eframe::App for AppViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement la question (comme le bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_question();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : les 10 lignes de l’Afficheur, en monospace, dans un cadre
// - Tactile : pavé de touches (Grid), une touche = un appel à appuyer()
// - Réglages : notation, décimales, variante réduite
//
// Le clavier physique est géré dans app.rs (une seule source d’événements).

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{Notation, Touche, DECIMALES_MAX};

/// Pavé 5 × 5 : toutes les touches, une fois chacune.
const PAVE: [[Touche; 5]; 5] = [
    [
        Touche::Mode,
        Touche::InsererAngle,
        Touche::Puissance,
        Touche::Divise,
        Touche::Effacer,
    ],
    [
        Touche::Chiffre(7),
        Touche::Chiffre(8),
        Touche::Chiffre(9),
        Touche::Fois,
        Touche::Supprimer,
    ],
    [
        Touche::Chiffre(4),
        Touche::Chiffre(5),
        Touche::Chiffre(6),
        Touche::Moins,
        Touche::Angle,
    ],
    [
        Touche::Chiffre(1),
        Touche::Chiffre(2),
        Touche::Chiffre(3),
        Touche::Plus,
        Touche::Virgule,
    ],
    [
        Touche::Chiffre(0),
        Touche::Point,
        Touche::Negatif,
        Touche::Entree,
        Touche::Quitter,
    ],
];

const CHIFFRES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

fn libelle(t: Touche) -> &'static str {
    match t {
        Touche::Chiffre(d) => CHIFFRES.get(usize::from(d)).copied().unwrap_or("?"),
        Touche::Point => ".",
        Touche::Virgule => ",",
        Touche::Negatif => "(-)",
        Touche::Angle => "∠",
        Touche::Entree => "ENTER",
        Touche::Effacer => "CLEAR",
        Touche::Supprimer => "DEL",
        Touche::Plus => "+",
        Touche::Moins => "−",
        Touche::Fois => "×",
        Touche::Divise => "÷",
        Touche::Puissance => "^",
        Touche::InsererAngle => "→∠",
        Touche::Mode => "MODE",
        Touche::Quitter => "QUIT",
    }
}

fn aide(t: Touche) -> &'static str {
    match t {
        Touche::Negatif => "Signe moins (clavier : ~)",
        Touche::Angle => "Séparateur polaire m∠a (clavier : <)",
        Touche::Virgule => "Saisie rectangulaire re,im",
        Touche::Entree => "Empile la saisie",
        Touche::Effacer => "Vide la pile et la saisie (Échap)",
        Touche::Supprimer => "Vide la saisie (Retour arrière)",
        Touche::InsererAngle => "Garde la magnitude de l’avant-dernier, angle = magnitude du dernier (a)",
        Touche::Mode => "Affichage polaire / rectangulaire (m)",
        Touche::Quitter => "Quitter (q)",
        _ => "",
    }
}

/// Touches absentes de la variante réduite.
fn est_etendue(t: Touche) -> bool {
    t == Touche::Mode || t.operateur().is_some_and(|op| op.est_etendu())
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    /// Renvoie true si la touche QUIT a été pressée.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> bool {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let mut quitter = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice polaire");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.horizontal(|ui| {
                    ui.monospace(self.ligne_etat());
                    if !self.erreur.is_empty() {
                        ui.separator();
                        ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
                    }
                });

                ui.add_space(8.0);
                quitter = self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_reglages(ui);
            });

        quitter
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                for ligne in self.ecran.lignes() {
                    // ligne vide : garder la hauteur
                    let texte = if ligne.is_empty() { " ".to_string() } else { ligne };
                    ui.monospace(texte);
                }
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) -> bool {
        let mut quitter = false;

        egui::Grid::new("pave_polaire")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for t in rangee {
                        quitter |= self.bouton_touche(ui, t);
                    }
                    ui.end_row();
                }
            });

        quitter
    }

    fn bouton_touche(&mut self, ui: &mut egui::Ui, t: Touche) -> bool {
        let actif = !(self.est_reduite() && est_etendue(t));
        let mut resp = ui.add_enabled(
            actif,
            egui::Button::new(libelle(t)).min_size(egui::vec2(64.0, 32.0)),
        );
        let tip = aide(t);
        if !tip.is_empty() {
            resp = resp.on_hover_text(tip);
        }

        resp.clicked() && self.appuyer(t)
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Notation :");
            let mut n = self.notation;
            egui::ComboBox::from_id_salt("notation")
                .selected_text(nom_notation(n))
                .show_ui(ui, |ui| {
                    for choix in [Notation::Normale, Notation::Scientifique, Notation::Ingenieur] {
                        ui.selectable_value(&mut n, choix, nom_notation(choix));
                    }
                });
            if n != self.notation {
                self.set_notation(n);
            }

            ui.separator();

            let mut fixe = self.decimales.is_some();
            if ui.checkbox(&mut fixe, "Décimales fixes").changed() {
                self.set_decimales(fixe.then_some(2));
            }
            if let Some(d) = self.decimales {
                let mut d = d as u32;
                let resp = ui.add(
                    egui::DragValue::new(&mut d)
                        .speed(1)
                        .range(0..=DECIMALES_MAX as u32)
                        .suffix(" déc."),
                );
                if resp.changed() {
                    self.set_decimales(Some(d as usize));
                }
            }

            ui.separator();

            let mut reduite = self.est_reduite();
            if ui
                .checkbox(&mut reduite, "Variante réduite")
                .on_hover_text("Sans ^, →∠ ni MODE")
                .changed()
            {
                self.set_variante_reduite(reduite);
            }
        });
    }
}

fn nom_notation(n: Notation) -> &'static str {
    match n {
        Notation::Normale => "Normale",
        Notation::Scientifique => "Scientifique",
        Notation::Ingenieur => "Ingénieur",
    }
}

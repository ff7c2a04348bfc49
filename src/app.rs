// src/app.rs
//
// Calculatrice polaire — module App (racine)
// ------------------------------------------
// Rôle:
// - Déclarer les sous-modules (afficheur.rs + etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Clavier physique -> Touche (une seule source d’événements, ici)
//
// Important:
// - Si un widget veut le clavier (DragValue en édition), on ne relaie rien :
//   sinon un chiffre tapé dans le réglage finirait aussi dans la saisie.

pub mod afficheur;
pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Touche;

/// Caractère tapé -> touche (None = ignoré).
/// '-' est la soustraction ; le signe moins de saisie est '~'.
/// Le reste (chiffres, '.', ',', '∠') suit les glyphes du tampon.
pub fn touche_texte(c: char) -> Option<Touche> {
    let t = match c {
        '<' => Touche::Angle,
        '~' => Touche::Negatif,
        '+' => Touche::Plus,
        '-' => Touche::Moins,
        '*' => Touche::Fois,
        '/' => Touche::Divise,
        '^' => Touche::Puissance,
        'a' => Touche::InsererAngle,
        'm' => Touche::Mode,
        'q' => Touche::Quitter,
        _ => return Touche::depuis_glyphe(c),
    };
    Some(t)
}

/// Touche “nommée” -> touche.
pub fn touche_clavier(key: egui::Key) -> Option<Touche> {
    match key {
        egui::Key::Enter => Some(Touche::Entree),
        egui::Key::Backspace | egui::Key::Delete => Some(Touche::Supprimer),
        egui::Key::Escape => Some(Touche::Effacer),
        _ => None,
    }
}

impl AppCalc {
    /// Relaye les événements clavier de la frame. true = quitter.
    fn relayer_clavier(&mut self, ctx: &egui::Context) -> bool {
        if ctx.wants_keyboard_input() {
            return false;
        }

        let events = ctx.input(|i| i.events.clone());
        let mut quitter = false;

        for ev in events {
            let touches: Vec<Touche> = match ev {
                egui::Event::Text(t) => t.chars().filter_map(touche_texte).collect(),
                egui::Event::Key {
                    key, pressed: true, ..
                } => touche_clavier(key).into_iter().collect(),
                _ => Vec::new(),
            };
            for t in touches {
                quitter |= self.appuyer(t);
            }
        }

        quitter
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut quitter = self.relayer_clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            quitter |= self.ui(ui); // méthode publique (dans vue.rs)
        });

        if quitter {
            // natif : ferme la fenêtre ; web : sans effet
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

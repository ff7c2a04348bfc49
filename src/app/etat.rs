//! src/app/etat.rs
//!
//! État UI : la session de calcul + l’écran + les réglages d’affichage.
//!
//! Rôle : relayer les touches vers le noyau et appliquer la politique d’erreur
//! (on journalise, on affiche, la session continue).
//!
//! Contrats :
//! - Aucun calcul ici (tout passe par `Calculatrice::touche`).
//! - L’écran n’est écrit QUE par le noyau (rafraichir / touche).
//! - Défense en profondeur : décimales bornées à DECIMALES_MAX.

use tracing::warn;

use super::afficheur::{Afficheur, LARGEUR_AFFICHEUR};
use crate::noyau::{
    Calculatrice, ErreurCalcul, FormatReel, Issue, ModeAffichage, Notation, Touche, Variante,
    CAPACITE_PILE, CAPACITE_TAMPON, DECIMALES_MAX,
};

/// Une composante (magnitude, angle, re ou im) tient sur une demi-ligne :
/// "re+imi" et "m∠a" restent entiers à l’écran.
const LONGUEUR_COMPOSANTE: usize = (LARGEUR_AFFICHEUR - 2) / 2;

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub calc: Calculatrice<f64>,
    pub ecran: Afficheur,

    // message sous l’écran (vide = pas d’erreur)
    pub erreur: String,

    // --- réglages ---
    pub notation: Notation,
    pub decimales: Option<usize>, // None = flottant
}

impl Default for AppCalc {
    fn default() -> Self {
        let mut app = Self {
            calc: Calculatrice::new(),
            ecran: Afficheur::default(),
            erreur: String::new(),
            notation: Notation::default(),
            decimales: None,
        };
        // premier rendu : pile vide + "0" en saisie
        app.appliquer_format();
        app
    }
}

impl AppCalc {
    /* ------------------------ Touches ------------------------ */

    /// Relaye une touche. Renvoie true si l’utilisateur a demandé à quitter.
    pub fn appuyer(&mut self, touche: Touche) -> bool {
        match self.calc.touche(touche, &mut self.ecran) {
            Ok(Issue::Quitter) => true,
            // touche absente de la variante : rien ne bouge, message compris
            Ok(Issue::Ignoree) => false,
            Ok(Issue::Saisie | Issue::Commande) => {
                self.erreur.clear();
                false
            }
            Err(e) => {
                warn!(?touche, erreur = %e, "touche refusée");
                self.set_erreur(&e);
                false
            }
        }
    }

    /// Utilitaire : placer une erreur (l’écran garde la pile et la saisie).
    pub fn set_erreur(&mut self, e: &ErreurCalcul) {
        self.erreur = e.to_string();
    }

    /// Ligne d’état sous l’écran : mode, remplissage de la pile et de la saisie.
    pub fn ligne_etat(&self) -> String {
        let mode = match self.calc.mode() {
            ModeAffichage::Polaire => "POLAIRE",
            ModeAffichage::Rectangulaire => "RECT",
        };

        let pile = self.calc.pile();
        let pile = if pile.is_empty() {
            "pile vide".to_string()
        } else {
            format!("pile {}/{CAPACITE_PILE}", pile.len())
        };

        let tampon = self.calc.tampon();
        if tampon.est_vide() {
            format!("{mode}  {pile}")
        } else {
            format!("{mode}  {pile}  saisie {}/{CAPACITE_TAMPON}", tampon.len())
        }
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn set_notation(&mut self, notation: Notation) {
        self.notation = notation;
        self.appliquer_format();
    }

    /// Garde-fou : décimales bornées (0..=DECIMALES_MAX).
    pub fn set_decimales(&mut self, decimales: Option<usize>) {
        self.decimales = decimales.map(|d| d.min(DECIMALES_MAX));
        self.appliquer_format();
    }

    pub fn est_reduite(&self) -> bool {
        self.calc.variante() == Variante::Reduite
    }

    pub fn set_variante_reduite(&mut self, reduite: bool) {
        let v = if reduite {
            Variante::Reduite
        } else {
            Variante::Complete
        };
        self.calc.set_variante(v);
    }

    fn appliquer_format(&mut self) {
        let cfg = FormatReel::default()
            .avec_notation(self.notation)
            .avec_decimales(self.decimales)
            .avec_longueur_max(Some(LONGUEUR_COMPOSANTE));
        self.calc.set_format(cfg);
        // le format change l’affichage de toute la pile
        self.calc.rafraichir(&mut self.ecran);
    }
}

//! src/app/afficheur.rs
//!
//! Écran “caractères” de l’app : 9 lignes de pile + 1 ligne de saisie.
//!
//! Contrat (celui de l’écran de la calculatrice de poche) :
//! - écrire = recouvrir à partir de la colonne 0, sans effacer le reste
//! - ce qui dépasse la largeur est tronqué
//! L’effacement est l’affaire du noyau (`rpn::imprimer`).

use crate::noyau::{Ecran, LIGNE_SAISIE};

/// Colonnes visibles : la fenêtre est plus large que l’écran d’origine.
pub const LARGEUR_AFFICHEUR: usize = 38;

/// Lignes 0..=8 (pile) + ligne de saisie.
pub const LIGNES_AFFICHEUR: usize = LIGNE_SAISIE + 1;

#[derive(Clone, Debug)]
pub struct Afficheur {
    lignes: Vec<Vec<char>>,
}

impl Default for Afficheur {
    fn default() -> Self {
        Self {
            lignes: vec![Vec::new(); LIGNES_AFFICHEUR],
        }
    }
}

impl Afficheur {
    /// Lignes telles qu’affichées (blancs de fin retirés).
    pub fn lignes(&self) -> Vec<String> {
        self.lignes
            .iter()
            .map(|l| l.iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

impl Ecran for Afficheur {
    fn largeur(&self) -> usize {
        LARGEUR_AFFICHEUR
    }

    fn ecrire(&mut self, ligne: usize, texte: &str) {
        // ligne hors écran : ignorée
        let Some(l) = self.lignes.get_mut(ligne) else {
            return;
        };
        for (i, c) in texte.chars().take(LARGEUR_AFFICHEUR).enumerate() {
            if i < l.len() {
                l[i] = c;
            } else {
                l.push(c);
            }
        }
    }
}

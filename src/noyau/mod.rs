//! Noyau polaire (RPN complexe)
//!
//! Organisation interne :
//! - erreur.rs     : ErreurCalcul (thiserror) + alias ResultatCalcul
//! - reel.rs       : primitive réelle injectable (trait Reel) + texte <-> réel
//! - polaire.rs    : valeur polaire, normalisation, polaire <-> rectangulaire
//! - operations.rs : + - × ÷ ^ et insertion d’angle
//! - jetons.rs     : lecture d’un jeton saisi (réel, m∠a, re,im)
//! - format.rs     : affichage polaire / rectangulaire
//! - rpn.rs        : pile, tampon, touches, rendu via Ecran

pub mod erreur;
pub mod format;
pub mod jetons;
pub mod operations;
pub mod polaire;
pub mod reel;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale (celle dont l’app a besoin)
pub use erreur::ErreurCalcul;
pub use format::ModeAffichage;
pub use reel::{FormatReel, Notation, DECIMALES_MAX};
pub use rpn::{
    Calculatrice, Ecran, Issue, Touche, Variante, CAPACITE_PILE, CAPACITE_TAMPON, LIGNE_SAISIE,
};

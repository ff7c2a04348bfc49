// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - Erreurs numériques : levées par la primitive réelle (Reel), propagées telles quelles.
// - Erreur de saisie : tampon plein (on refuse le caractère).
// Pile pleine / pile trop courte : PAS des erreurs (no-op silencieux dans rpn.rs).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("nombre invalide: '{0}'")]
    NombreInvalide(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("logarithme de zéro")]
    LogDeZero,

    #[error("hors domaine")]
    Domaine,

    #[error("dépassement de capacité")]
    Depassement,

    #[error("saisie trop longue (max {capacite} caractères)")]
    TamponPlein { capacite: usize },
}

pub type ResultatCalcul<T> = Result<T, ErreurCalcul>;

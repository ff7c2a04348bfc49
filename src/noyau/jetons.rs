// src/noyau/jetons.rs
//
// Lecture d’un jeton saisi -> valeur polaire.
// Trois formes, distinguées par le PREMIER séparateur rencontré (gauche -> droite) :
// - "m"      -> m∠0
// - "m∠a"    -> polaire littérale
// - "re,im"  -> rectangulaire, convertie en polaire
// Tout ce qui suit le premier séparateur est la seconde composante
// (un second séparateur la rend donc invalide).

use super::erreur::ResultatCalcul;
use super::operations::verifier_fini;
use super::polaire::{Complexe, Polaire};
use super::reel::Reel;

/// Séparateur polaire (magnitude∠angle).
pub const SEPARATEUR_ANGLE: char = '∠';

/// Séparateur rectangulaire (re,im).
pub const SEPARATEUR_RECT: char = ',';

/// Ce que montre la ligne de saisie quand le tampon est vide.
pub const SAISIE_VIDE: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Forme {
    Reel,
    Polaire,
    Rectangulaire,
}

/// Découpe au premier séparateur : (forme, première composante, seconde composante).
pub fn decouper(texte: &str) -> (Forme, &str, &str) {
    for (i, c) in texte.char_indices() {
        let forme = match c {
            SEPARATEUR_ANGLE => Forme::Polaire,
            SEPARATEUR_RECT => Forme::Rectangulaire,
            _ => continue,
        };
        return (forme, &texte[..i], &texte[i + c.len_utf8()..]);
    }
    (Forme::Reel, texte, "")
}

/// Jeton -> valeur normalisée.
/// Jeton vide = SAISIE_VIDE (ce qui est affiché), donc 0∠0.
/// re,im dont le module déborde (re² + im² = ∞) : Depassement.
pub fn lire_valeur<R: Reel>(texte: &str) -> ResultatCalcul<Polaire<R>> {
    let texte = if texte.is_empty() { SAISIE_VIDE } else { texte };

    let v = match decouper(texte) {
        (Forme::Reel, m, _) => Polaire::reel(R::depuis_texte(m)?),
        (Forme::Polaire, m, a) => {
            let magnitude = R::depuis_texte(m)?;
            let angle = R::depuis_texte(a)?;
            Polaire::new(magnitude, angle).normaliser()
        }
        (Forme::Rectangulaire, re, im) => {
            let re = R::depuis_texte(re)?;
            let im = R::depuis_texte(im)?;
            Complexe::new(re, im).vers_polaire()
        }
    };
    verifier_fini(v)
}

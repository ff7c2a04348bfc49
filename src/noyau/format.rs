// src/noyau/format.rs
//
// Valeur polaire -> texte, selon le mode d’affichage.
// - Polaire       : "m∠a"
// - Rectangulaire : "re+imi" / "re-|im|i"
// Fonctions pures (valeur + configuration), aucun état caché.

use super::jetons::SEPARATEUR_ANGLE;
use super::polaire::Polaire;
use super::reel::{FormatReel, Reel};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAffichage {
    #[default]
    Polaire,
    Rectangulaire,
}

impl ModeAffichage {
    pub fn bascule(self) -> Self {
        match self {
            ModeAffichage::Polaire => ModeAffichage::Rectangulaire,
            ModeAffichage::Rectangulaire => ModeAffichage::Polaire,
        }
    }
}

pub fn formater_valeur<R: Reel>(v: &Polaire<R>, mode: ModeAffichage, cfg: &FormatReel) -> String {
    match mode {
        ModeAffichage::Polaire => formater_polaire(v, cfg),
        ModeAffichage::Rectangulaire => formater_rect(v, cfg),
    }
}

pub fn formater_polaire<R: Reel>(v: &Polaire<R>, cfg: &FormatReel) -> String {
    let m = v.magnitude.vers_texte(cfg);
    let a = v.angle.vers_texte(cfg);
    format!("{m}{SEPARATEUR_ANGLE}{a}")
}

pub fn formater_rect<R: Reel>(v: &Polaire<R>, cfg: &FormatReel) -> String {
    let c = v.vers_rect();

    // cos(90°) ≠ 0 en binaire : une composante sous la précision du type
    // (relativement à la magnitude) s’affiche 0.
    let seuil = v.magnitude * R::entier(10).powi(-(R::chiffres_significatifs() as i32));
    let net = |x: R| if x.abs() <= seuil { R::zero() } else { x };
    let (re, im) = (net(c.re), net(c.im));

    // signe porté par l’opérateur, pas par la partie imaginaire
    let (signe, im) = if im < R::zero() { ('-', -im) } else { ('+', im) };

    let re = re.vers_texte(cfg);
    let im = im.vers_texte(cfg);
    format!("{re}{signe}{im}i")
}

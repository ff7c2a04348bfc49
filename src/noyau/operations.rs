// src/noyau/operations.rs
//
// Moteur arithmétique (opérandes et résultats polaires, toujours normalisés).
// - × et ÷ directement en polaire (magnitudes × / ÷, angles + / -)
// - + et - via les composantes rectangulaires
// - a^b via exp(b·ln a) décomposé en polaire
// - insertion d’angle : magnitude de a, angle = MAGNITUDE de b
//
// Erreurs : celles de la primitive (DivisionParZero, LogDeZero...) remontent
// telles quelles ; un résultat non fini donne Depassement.

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::polaire::{Complexe, Polaire};
use super::reel::Reel;

/// Opérateurs binaires de la machine RPN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    InsererAngle,
}

impl Operateur {
    /// a = opérande gauche (le plus profond), b = opérande droit.
    pub fn appliquer<R: Reel>(self, a: &Polaire<R>, b: &Polaire<R>) -> ResultatCalcul<Polaire<R>> {
        let r = match self {
            Operateur::Plus => add(a, b),
            Operateur::Moins => sub(a, b),
            Operateur::Fois => mul(a, b),
            Operateur::Divise => div(a, b)?,
            Operateur::Puissance => puissance(a, b)?,
            Operateur::InsererAngle => inserer_angle(a, b),
        };
        verifier_fini(r)
    }

    /// Opérateurs absents de la variante réduite.
    pub fn est_etendu(self) -> bool {
        matches!(self, Operateur::Puissance | Operateur::InsererAngle)
    }
}

/// Magnitude ∞ / NaN, ou angle NaN (issu d’un ∞) : dépassement.
pub(crate) fn verifier_fini<R: Reel>(v: Polaire<R>) -> ResultatCalcul<Polaire<R>> {
    if !v.magnitude.is_finite() || !v.angle.is_finite() {
        return Err(ErreurCalcul::Depassement);
    }
    Ok(v)
}

pub fn mul<R: Reel>(a: &Polaire<R>, b: &Polaire<R>) -> Polaire<R> {
    Polaire::new(a.magnitude * b.magnitude, a.angle + b.angle).normaliser()
}

pub fn div<R: Reel>(a: &Polaire<R>, b: &Polaire<R>) -> ResultatCalcul<Polaire<R>> {
    let magnitude = a.magnitude.diviser(b.magnitude)?;
    Ok(Polaire::new(magnitude, a.angle - b.angle).normaliser())
}

pub fn add<R: Reel>(a: &Polaire<R>, b: &Polaire<R>) -> Polaire<R> {
    let ca = a.vers_rect();
    let cb = b.vers_rect();
    Complexe::new(ca.re + cb.re, ca.im + cb.im).vers_polaire()
}

pub fn sub<R: Reel>(a: &Polaire<R>, b: &Polaire<R>) -> Polaire<R> {
    add(a, &b.oppose())
}

/// a^b = exp(b · ln a)
///   (br, bi) = rect(b)
///   exp1 = br·ln|a| − bi·θa
///   exp2 = bi·ln|a| + br·θa     (θa en radians)
///   résultat = (e^exp1, 0) × (1, deg(exp2))
pub fn puissance<R: Reel>(a: &Polaire<R>, b: &Polaire<R>) -> ResultatCalcul<Polaire<R>> {
    let cb = b.vers_rect();
    let ln_mag = a.magnitude.ln_verifie()?;
    let theta = a.angle.to_radians();

    let exp1 = cb.re * ln_mag - cb.im * theta;
    let exp2 = cb.im * ln_mag + cb.re * theta;

    let module = Polaire::new(exp1.exp_verifie()?, R::zero());
    let rotation = Polaire::new(R::one(), exp2.to_degrees());

    Ok(mul(&module, &rotation))
}

pub fn inserer_angle<R: Reel>(magnitude: &Polaire<R>, angle: &Polaire<R>) -> Polaire<R> {
    Polaire::new(magnitude.magnitude, angle.magnitude).normaliser()
}

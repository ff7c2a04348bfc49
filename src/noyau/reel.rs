// src/noyau/reel.rs
//
// Primitive réelle injectable
// ---------------------------
// Le noyau ne fait aucun calcul “bit à bit” : il consomme un type réel opaque
// via le trait Reel (comparaison, + - * /, sqrt, trig en radians, ln/exp,
// degrés↔radians, entier→réel, texte↔réel).
//
// - Implémentation générique pour tout num_traits::Float (f64, f32).
// - Les opérations “à risque” (division, ln, exp) sont vérifiées ici :
//   c’est la primitive qui définit DivisionParZero / LogDeZero / Depassement.
// - Texte -> réel : littéral décimal strict (pas de "inf", "NaN", "+5"...).
// - Réel -> texte : arrondi décimal EXACT (valeur binaire -> BigRational),
//   10 chiffres significatifs, notation normale / scientifique / ingénieur.

use std::fmt::Debug;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Float, NumCast, Signed, Zero};

use super::erreur::{ErreurCalcul, ResultatCalcul};

/// Chiffres significatifs en affichage flottant (plafond ; f32 en garde moins,
/// voir `Reel::chiffres_significatifs`).
pub const CHIFFRES_SIGNIFICATIFS: usize = 10;

/// Garde-fou : décimales fixes autorisées (0..=9).
pub const DECIMALES_MAX: usize = 9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Notation {
    #[default]
    Normale,
    Scientifique,
    Ingenieur,
}

/// Configuration de conversion réel -> texte (mode, précision, longueur max).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatReel {
    pub notation: Notation,
    /// None = flottant ; Some(d) = d décimales fixes.
    pub decimales: Option<usize>,
    /// None = pas de limite.
    pub longueur_max: Option<usize>,
}

impl FormatReel {
    pub fn avec_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// Décimales bornées à DECIMALES_MAX.
    pub fn avec_decimales(mut self, decimales: Option<usize>) -> Self {
        self.decimales = decimales.map(|d| d.min(DECIMALES_MAX));
        self
    }

    pub fn avec_longueur_max(mut self, longueur_max: Option<usize>) -> Self {
        self.longueur_max = longueur_max;
        self
    }
}

pub trait Reel: Float + Debug + 'static {
    fn entier(n: i32) -> Self;

    /// Chiffres décimaux fiables du type, plafonnés à CHIFFRES_SIGNIFICATIFS
    /// (f64 : 10, f32 : 7). Au-delà, on afficherait le bruit binaire.
    fn chiffres_significatifs() -> usize;

    fn depuis_texte(texte: &str) -> ResultatCalcul<Self>;

    fn vers_texte(self, cfg: &FormatReel) -> String;

    fn diviser(self, diviseur: Self) -> ResultatCalcul<Self> {
        if diviseur.is_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        Ok(self / diviseur)
    }

    fn ln_verifie(self) -> ResultatCalcul<Self> {
        if self.is_zero() {
            return Err(ErreurCalcul::LogDeZero);
        }
        if self < Self::zero() {
            return Err(ErreurCalcul::Domaine);
        }
        Ok(self.ln())
    }

    fn exp_verifie(self) -> ResultatCalcul<Self> {
        let e = self.exp();
        if e.is_infinite() {
            return Err(ErreurCalcul::Depassement);
        }
        Ok(e)
    }
}

impl<T> Reel for T
where
    T: Float + FromStr + Debug + 'static,
{
    fn entier(n: i32) -> Self {
        <T as NumCast>::from(n).unwrap_or_else(T::nan)
    }

    fn chiffres_significatifs() -> usize {
        // -log10(ε) arrondi : f64 ≈ 15.65 -> 16, f32 ≈ 6.92 -> 7
        let fiables = T::epsilon()
            .to_f64()
            .map_or(CHIFFRES_SIGNIFICATIFS, |eps| (-eps.log10()).round().max(1.0) as usize);
        fiables.min(CHIFFRES_SIGNIFICATIFS)
    }

    fn depuis_texte(texte: &str) -> ResultatCalcul<Self> {
        let t = texte.trim();
        if !est_litteral_decimal(t) {
            return Err(ErreurCalcul::NombreInvalide(texte.to_string()));
        }
        let x = t
            .parse::<T>()
            .map_err(|_| ErreurCalcul::NombreInvalide(texte.to_string()))?;
        if x.is_infinite() {
            return Err(ErreurCalcul::Depassement);
        }
        Ok(x)
    }

    fn vers_texte(self, cfg: &FormatReel) -> String {
        match self.to_f64() {
            Some(x) => formater_f64(x, cfg, T::chiffres_significatifs()),
            None => "indéfini".to_string(),
        }
    }
}

/* ------------------------ Texte -> réel ------------------------ */

/// [-]chiffres[.chiffres][E[±]chiffres], au moins un chiffre dans la mantisse.
fn est_litteral_decimal(t: &str) -> bool {
    let t = t.strip_prefix('-').unwrap_or(t);

    let (mantisse, exposant) = match t.find(['e', 'E']) {
        Some(i) => (&t[..i], Some(&t[i + 1..])),
        None => (t, None),
    };

    let mut chiffres = 0usize;
    let mut points = 0usize;
    for c in mantisse.chars() {
        match c {
            '0'..='9' => chiffres += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    if chiffres == 0 || points > 1 {
        return false;
    }

    match exposant {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(['-', '+']).unwrap_or(e);
            !e.is_empty() && e.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/* ------------------------ Réel -> texte ------------------------ */

fn formater_f64(x: f64, cfg: &FormatReel, chiffres: usize) -> String {
    if x.is_nan() {
        return "indéfini".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Valeur binaire exacte (pas d’arrondi caché avant le nôtre).
    let Some(r) = BigRational::from_float(x) else {
        return "indéfini".to_string();
    };

    let mut sig = chiffres;
    let mut decimales = cfg.decimales.map(|d| d.min(DECIMALES_MAX));

    // Longueur max : on sacrifie des chiffres jusqu’à ce que ça tienne.
    loop {
        let texte = formater_rationnel(&r, cfg.notation, decimales, sig);

        let Some(max) = cfg.longueur_max else {
            return texte;
        };
        if texte.chars().count() <= max {
            return texte;
        }

        match decimales {
            Some(d) if d > 0 => decimales = Some(d - 1),
            None if sig > 1 => sig -= 1,
            _ => return texte,
        }
    }
}

fn formater_rationnel(
    r: &BigRational,
    notation: Notation,
    decimales: Option<usize>,
    sig: usize,
) -> String {
    let a = r.abs();
    if a.is_zero() {
        return arrondi_decimal(&a, decimales.unwrap_or(0));
    }

    let e = exposant_decimal(&a);

    let corps = match notation {
        Notation::Normale if positionnel(e, decimales) => {
            let d = decimales.unwrap_or_else(|| (sig as i32 - 1 - e).max(0) as usize);
            let t = arrondi_decimal(&a, d);
            if decimales.is_none() {
                retirer_zeros(t)
            } else {
                t
            }
        }
        Notation::Normale | Notation::Scientifique => exponentielle(&a, e, 1, decimales, sig),
        Notation::Ingenieur => exponentielle(&a, e.div_euclid(3) * 3, 3, decimales, sig),
    };

    // pas de “-0.00”
    if r.is_negative() && !est_zero_texte(&corps) {
        format!("-{corps}")
    } else {
        corps
    }
}

/// Normale : écriture positionnelle tant que l’exposant reste lisible.
fn positionnel(e: i32, decimales: Option<usize>) -> bool {
    match decimales {
        Some(_) => e < 10,
        None => (-3..10).contains(&e),
    }
}

/// a = m × 10^exposant, m rendue avec les décimales demandées.
/// Si l’arrondi déborde (9.99.. -> 10.0), on remonte l’exposant d’un pas.
fn exponentielle(
    a: &BigRational,
    exposant: i32,
    pas: i32,
    decimales: Option<usize>,
    sig: usize,
) -> String {
    let ed = exposant_decimal(a);
    let mut e = exposant;

    loop {
        let d = decimales.unwrap_or_else(|| (sig as i32 - 1 - (ed - e)).max(0) as usize);
        let m = arrondi_decimal(&(a / puissance_dix(e)), d);

        let entiers = m.split('.').next().map_or(0, str::len);
        if entiers > pas as usize {
            e += pas;
            continue;
        }

        let m = if decimales.is_none() {
            retirer_zeros(m)
        } else {
            m
        };
        return format!("{m}E{e}");
    }
}

/// floor(log10(a)) exact, a > 0.
fn exposant_decimal(a: &BigRational) -> i32 {
    let ln = a.numer().magnitude().to_str_radix(10).len() as i32;
    let ld = a.denom().magnitude().to_str_radix(10).len() as i32;
    let e = ln - ld;
    if *a >= puissance_dix(e) {
        e
    } else {
        e - 1
    }
}

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

fn puissance_dix(k: i32) -> BigRational {
    if k >= 0 {
        BigRational::from_integer(pow10(k as usize))
    } else {
        BigRational::new(BigInt::from(1), pow10(k.unsigned_abs() as usize))
    }
}

/// q ≥ 0 arrondi à `digits` décimales (demi vers le haut), en texte.
fn arrondi_decimal(q: &BigRational, digits: usize) -> String {
    let scaled = q * BigRational::from_integer(pow10(digits));
    let arrondi = (scaled.numer() * 2 + scaled.denom()) / (scaled.denom() * 2);
    scaled_to_decimal(arrondi, digits)
}

/// Convertit un entier “scalé” (×10^digits, ≥ 0) en texte décimal.
fn scaled_to_decimal(scaled: BigInt, digits: usize) -> String {
    if digits == 0 {
        return format!("{scaled}");
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{int_part}.{frac}")
}

fn retirer_zeros(mut t: String) -> String {
    if t.contains('.') {
        while t.ends_with('0') {
            t.pop();
        }
        if t.ends_with('.') {
            t.pop();
        }
    }
    t
}

fn est_zero_texte(t: &str) -> bool {
    t.chars().all(|c| c == '0' || c == '.')
}

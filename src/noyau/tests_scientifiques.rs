//! Tests scientifiques (campagne) : propriétés algébriques du noyau polaire.
//!
//! But : vérifier les invariants sur beaucoup de valeurs sans chauffer la machine.
//! - RNG déterministe (seed fixe)
//! - budget temps global
//! - comparaisons à tolérance relative (la primitive est flottante)
//!
//! Angles comparés “modulo 360” : près de ±180 un arrondi peut faire passer
//! de 180 à -179.9999999…, ce qui est la même direction.

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::format::{formater_valeur, ModeAffichage};
use super::jetons::lire_valeur;
use super::operations::{add, div, mul, sub, Operateur};
use super::polaire::Polaire;
use super::reel::FormatReel;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    /// uniforme dans [lo, hi)
    fn reel(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * (self.next_u32() as f64 / (u32::MAX as f64 + 1.0))
    }
    fn polaire_brute(&mut self) -> Polaire<f64> {
        Polaire::new(self.reel(-100.0, 100.0), self.reel(-2000.0, 2000.0))
    }
    fn polaire(&mut self) -> Polaire<f64> {
        Polaire::new(self.reel(0.001, 1000.0), self.reel(-180.0, 180.0)).normaliser()
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Comparaisons ------------------------ */

fn ecart_angle(a: f64, b: f64) -> f64 {
    ((a - b + 540.0).rem_euclid(360.0) - 180.0).abs()
}

fn assert_meme_valeur(a: Polaire<f64>, b: Polaire<f64>, contexte: &str) {
    let echelle = a.magnitude.abs().max(b.magnitude.abs()).max(1.0);
    assert!(
        (a.magnitude - b.magnitude).abs() <= 1e-9 * echelle,
        "{contexte}: magnitudes {a:?} vs {b:?}"
    );
    assert!(
        ecart_angle(a.angle, b.angle) <= 1e-7,
        "{contexte}: angles {a:?} vs {b:?}"
    );
}

/* ------------------------ Normalisation ------------------------ */

#[test]
fn sci_normalisation_idempotente_et_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let v = rng.polaire_brute();
        let n = v.normaliser();

        assert!(n.magnitude >= 0.0, "magnitude négative: {v:?} -> {n:?}");
        assert!(n.angle > -180.0 && n.angle <= 180.0, "angle hors borne: {v:?} -> {n:?}");
        assert_eq!(n.normaliser(), n, "non idempotent: {v:?}");
    }
}

#[test]
fn sci_normalisation_f32() {
    let mut rng = Rng::new(0xF32_u64);
    for _ in 0..500 {
        let v = Polaire::new(rng.reel(-50.0, 50.0) as f32, rng.reel(-1000.0, 1000.0) as f32);
        let n = v.normaliser();
        assert!(n.est_normalise(), "{v:?} -> {n:?}");
        assert_eq!(n.normaliser(), n);
    }
}

/* ------------------------ Conversions ------------------------ */

#[test]
fn sci_aller_retour_rectangulaire() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..1000 {
        budget(t0, max);

        let p = rng.polaire_brute();
        if p.magnitude == 0.0 {
            continue;
        }
        let retour = p.vers_rect().vers_polaire();
        assert_meme_valeur(retour, p.normaliser(), "toPolar(toRect(p))");
    }
}

/* ------------------------ Identités algébriques ------------------------ */

#[test]
fn sci_identite_multiplicative() {
    let mut rng = Rng::new(1);
    let un = Polaire::new(1.0, 0.0);
    for _ in 0..500 {
        let p = rng.polaire_brute();
        assert_eq!(mul(&p, &un), p.normaliser(), "p × 1 pour {p:?}");
    }
}

#[test]
fn sci_inverse_additif() {
    let mut rng = Rng::new(2);
    let zero = Polaire::new(0.0, 0.0);
    for _ in 0..500 {
        let p = rng.polaire();
        let oppose = sub(&zero, &p);
        let somme = add(&p, &oppose);
        assert!(
            somme.magnitude <= 1e-12 * p.magnitude.max(1.0),
            "p + (0 - p) = {somme:?} pour {p:?}"
        );
    }
}

#[test]
fn sci_division_inverse_de_la_multiplication() {
    let mut rng = Rng::new(3);
    for _ in 0..500 {
        let a = rng.polaire();
        let b = rng.polaire();
        let q = div(&mul(&a, &b), &b).unwrap_or_else(|e| panic!("{a:?} {b:?}: {e}"));
        assert_meme_valeur(q, a, "(a×b)÷b");
    }
}

#[test]
fn sci_addition_commutative() {
    let mut rng = Rng::new(4);
    for _ in 0..500 {
        let a = rng.polaire();
        let b = rng.polaire();
        let ab = add(&a, &b);
        let ba = add(&b, &a);
        assert_eq!(ab, ba, "{a:?} + {b:?}");
    }
}

#[test]
fn sci_puissance_entiere_egale_produit() {
    let mut rng = Rng::new(5);
    let trois = Polaire::new(3.0, 0.0);
    for _ in 0..300 {
        let a = Polaire::new(rng.reel(0.1, 10.0), rng.reel(-180.0, 180.0)).normaliser();
        let cube = Operateur::Puissance.appliquer(&a, &trois).unwrap();
        let produit = mul(&mul(&a, &a), &a);
        let echelle = produit.magnitude.max(1.0);
        assert!((cube.magnitude - produit.magnitude).abs() <= 1e-9 * echelle);
        assert!(ecart_angle(cube.angle, produit.angle) <= 1e-7, "{a:?}");
    }
}

#[test]
fn sci_tous_les_resultats_normalises() {
    let mut rng = Rng::new(6);
    let ops = [
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Divise,
        Operateur::Puissance,
        Operateur::InsererAngle,
    ];
    for i in 0..600 {
        let a = rng.polaire();
        let b = Polaire::new(rng.reel(0.001, 3.0), rng.reel(-180.0, 180.0)).normaliser();
        let op = ops[i % ops.len()];
        match op.appliquer(&a, &b) {
            Ok(r) => assert!(r.est_normalise(), "{op:?}({a:?}, {b:?}) = {r:?}"),
            Err(e) => assert_eq!(e, ErreurCalcul::Depassement, "{op:?}({a:?}, {b:?})"),
        }
    }
}

/* ------------------------ Codec ------------------------ */

#[test]
fn sci_litteraux_aller_retour() {
    let cfg = FormatReel::default();
    let cas = [
        ("5", ModeAffichage::Polaire, "5∠0"),
        ("5∠90", ModeAffichage::Polaire, "5∠90"),
        ("3,4", ModeAffichage::Rectangulaire, "3+4i"),
        ("2∠-90", ModeAffichage::Rectangulaire, "0-2i"),
        ("-1", ModeAffichage::Polaire, "1∠180"),
        ("1∠-180", ModeAffichage::Polaire, "1∠180"),
    ];
    for (texte, mode, attendu) in cas {
        let v: Polaire<f64> = lire_valeur(texte).unwrap_or_else(|e| panic!("{texte:?}: {e}"));
        assert_eq!(formater_valeur(&v, mode, &cfg), attendu, "texte={texte:?}");
    }
}

#[test]
fn sci_format_polaire_relu() {
    // ce que l’écran affiche en polaire se relit comme la même valeur (10 chiffres)
    let mut rng = Rng::new(7);
    let cfg = FormatReel::default();
    for _ in 0..300 {
        let p = rng.polaire();
        let texte = formater_valeur(&p, ModeAffichage::Polaire, &cfg);
        let relu: Polaire<f64> = lire_valeur(&texte).unwrap_or_else(|e| panic!("{texte:?}: {e}"));
        let echelle = p.magnitude.max(1.0);
        assert!((relu.magnitude - p.magnitude).abs() <= 1e-8 * echelle, "{texte}");
        assert!(ecart_angle(relu.angle, p.angle) <= 1e-6, "{texte}");
    }
}

//! Tests fuzz safe : robustesse + déterminisme de la machine RPN.
//!
//! But : marteler la machine avec des suites de touches sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - budget temps global
//! - on accepte les erreurs attendues (division par zéro, ln(0), jeton invalide...)
//! - invariants clés : pile ≤ 9, toute valeur sur la pile est normalisée,
//!   l’écran reflète exactement pile + mode après chaque commande

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::rpn::{Calculatrice, Ecran, Issue, Touche, CAPACITE_PILE, LIGNE_SAISIE};

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
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Écran mémoire ------------------------ */

/// Plus large que l’écran par défaut, comme la fenêtre de l’app.
const LARGEUR_FUZZ: usize = 38;

#[derive(Default)]
struct EcranMemoire {
    lignes: Vec<String>,
}

impl Ecran for EcranMemoire {
    fn largeur(&self) -> usize {
        LARGEUR_FUZZ
    }

    fn ecrire(&mut self, ligne: usize, texte: &str) {
        if self.lignes.len() <= ligne {
            self.lignes.resize(ligne + 1, String::new());
        }
        // recouvrement colonne 0 (pas d’effacement implicite), tronqué à la largeur
        let mut l: Vec<char> = self.lignes[ligne].chars().collect();
        for (i, c) in texte.chars().take(LARGEUR_FUZZ).enumerate() {
            if i < l.len() {
                l[i] = c;
            } else {
                l.push(c);
            }
        }
        self.lignes[ligne] = l.into_iter().collect();
    }
}

impl EcranMemoire {
    fn ligne(&self, i: usize) -> &str {
        self.lignes.get(i).map_or("", |l| l.trim_end())
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Liste blanche : erreurs *normales* quand on tape n’importe quoi.
    matches!(
        e,
        ErreurCalcul::NombreInvalide(_)
            | ErreurCalcul::DivisionParZero
            | ErreurCalcul::LogDeZero
            | ErreurCalcul::Depassement
            | ErreurCalcul::TamponPlein { .. }
    )
}

/// Touches tirées avec un biais vers les chiffres (sinon les jetons restent vides).
fn gen_touche(rng: &mut Rng) -> Touche {
    match rng.pick(24) {
        0..=9 => Touche::Chiffre(rng.pick(10) as u8),
        10 => Touche::Point,
        11 => Touche::Virgule,
        12 => Touche::Negatif,
        13 => Touche::Angle,
        14 | 15 => Touche::Entree,
        16 => Touche::Plus,
        17 => Touche::Moins,
        18 => Touche::Fois,
        19 => Touche::Divise,
        20 => Touche::Puissance,
        21 => Touche::InsererAngle,
        22 => Touche::Mode,
        _ => {
            // Effacer rare, sinon la pile ne se remplit jamais
            if rng.pick(4) == 0 {
                Touche::Effacer
            } else {
                Touche::Supprimer
            }
        }
    }
}

fn check_invariants(calc: &Calculatrice<f64>) {
    assert!(calc.pile().len() <= CAPACITE_PILE);
    for v in calc.pile().valeurs() {
        assert!(v.est_normalise(), "valeur non normalisée: {v:?}");
    }
}

fn check_ecran(calc: &Calculatrice<f64>, ecran: &EcranMemoire) {
    let lignes = calc.lignes_pile();
    for i in 0..CAPACITE_PILE {
        let attendu: String = lignes
            .get(i)
            .map(|s| s.chars().take(LARGEUR_FUZZ).collect())
            .unwrap_or_default();
        assert_eq!(ecran.ligne(i), attendu.trim_end(), "ligne {i}");
    }
    let saisie: String = calc.ligne_saisie().chars().take(LARGEUR_FUZZ).collect();
    assert_eq!(ecran.ligne(LIGNE_SAISIE), saisie);
}

/// Rejoue une suite de touches ; renvoie l’affichage final de la pile.
fn rejouer(seed: u64, n: usize) -> (Vec<String>, usize, usize) {
    let mut rng = Rng::new(seed);
    let mut calc = Calculatrice::<f64>::new();
    let mut ecran = EcranMemoire::default();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..n {
        let t = gen_touche(&mut rng);
        match calc.touche(t, &mut ecran) {
            Ok(Issue::Commande) => {
                check_ecran(&calc, &ecran);
                seen_ok += 1;
            }
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(is_erreur_attendue(&e), "erreur non attendue: {t:?} -> {e}");
                seen_err += 1;
                // l’embarqueur repart d’une saisie vide
                calc.touche(Touche::Supprimer, &mut ecran)
                    .unwrap_or_else(|e| panic!("Supprimer ne doit pas échouer: {e}"));
            }
        }
        check_invariants(&calc);
    }

    (calc.lignes_pile(), seen_ok, seen_err)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_pile_et_ecran() {
    // large : `cargo test` tourne en debug (BigRational non optimisé)
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    for seed in [0xC0FFEE_u64, 0xBADC0DE, 0x5EED, 42] {
        budget(t0, max);
        let (_lignes, seen_ok, seen_err) = rejouer(seed, 3000);

        // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
        assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
        assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let a = rejouer(0xDEADBEEF, 1500);
    budget(t0, max);
    let b = rejouer(0xDEADBEEF, 1500);
    budget(t0, max);

    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_tampon_long_sans_panique() {
    let mut calc = Calculatrice::<f64>::new();
    let mut rng = Rng::new(7);
    let mut refus = 0usize;

    for _ in 0..500 {
        let t = Touche::Chiffre(rng.pick(10) as u8);
        if let Err(e) = calc.appliquer(t) {
            assert!(matches!(e, ErreurCalcul::TamponPlein { .. }));
            refus += 1;
        }
    }
    assert!(refus > 0);

    // 99 chiffres : nombre énorme mais fini, empilé normalement
    assert_eq!(calc.appliquer(Touche::Entree), Ok(Issue::Commande));
    check_invariants(&calc);
}

// src/noyau/polaire.rs
//
// Valeur polaire (magnitude, angle en degrés) + composantes rectangulaires.
//
// Invariant (après normalisation) :
// - magnitude ≥ 0
// - angle ∈ ]-180, 180]
//
// Complexe (re, im) : intermédiaire seulement (addition, puissance, affichage),
// jamais stocké sur la pile, jamais normalisé.

use super::reel::Reel;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polaire<R> {
    pub magnitude: R,
    pub angle: R,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complexe<R> {
    pub re: R,
    pub im: R,
}

impl<R: Reel> Polaire<R> {
    /// Construction brute (peut violer l’invariant jusqu’à normaliser()).
    pub fn new(magnitude: R, angle: R) -> Self {
        Self { magnitude, angle }
    }

    /// Réel pur (angle 0).
    pub fn reel(magnitude: R) -> Self {
        Self::new(magnitude, R::zero()).normaliser()
    }

    /// Réduction canonique :
    /// 1) magnitude < 0 => magnitude = -magnitude, angle += 180
    /// 2) angle > 180   => angle -= 360 (répété)
    /// 3) angle ≤ -180  => angle += 360 (répété)
    pub fn normaliser(self) -> Self {
        let r180 = R::entier(180);
        let r360 = R::entier(360);

        let Polaire {
            mut magnitude,
            mut angle,
        } = self;

        if magnitude < R::zero() {
            magnitude = -magnitude;
            angle = angle + r180;
        }

        // fmod est exact : même résultat que la soustraction répétée,
        // mais sans boucle infinie quand angle - 360 == angle.
        // (∞ % 360 = NaN : les boucles ci-dessous s’arrêtent.)
        if angle.abs() > r360 + r360 || !angle.is_finite() {
            angle = angle % r360;
        }

        while angle > r180 {
            angle = angle - r360;
        }
        while angle <= -r180 {
            angle = angle + r360;
        }

        Self { magnitude, angle }
    }

    pub fn est_normalise(&self) -> bool {
        self.magnitude >= R::zero() && self.angle > -R::entier(180) && self.angle <= R::entier(180)
    }

    /// Opposé “polaire” : on inverse la magnitude (pas l’angle).
    /// Non normalisé : l’étape 1 de normaliser() s’en charge.
    pub fn oppose(self) -> Self {
        Self::new(-self.magnitude, self.angle)
    }

    pub fn vers_rect(&self) -> Complexe<R> {
        let rad = self.angle.to_radians();
        Complexe {
            re: rad.cos() * self.magnitude,
            im: rad.sin() * self.magnitude,
        }
    }
}

impl<R: Reel> Complexe<R> {
    pub fn new(re: R, im: R) -> Self {
        Self { re, im }
    }

    /// atan à un argument + correction de quadrant manuelle, puis normalisation.
    pub fn vers_polaire(&self) -> Polaire<R> {
        let zero = R::zero();

        let somme = self.re * self.re + self.im * self.im;
        let magnitude = if somme == zero { zero } else { somme.sqrt() };

        let mut angle = if self.re == zero {
            if self.im < zero {
                R::entier(-90)
            } else if self.im > zero {
                R::entier(90)
            } else {
                zero
            }
        } else {
            (self.im / self.re).atan().to_degrees()
        };

        if self.re < zero {
            angle = angle + R::entier(180);
        }

        Polaire::new(magnitude, angle).normaliser()
    }
}

// src/noyau/rpn.rs
//
// Machine RPN à pile fixe (9 valeurs) + tampon de saisie.
// Un seul état (“attente”) : chaque touche est traitée en une transition.
//
// Règles:
// - touche caractère : ajout au tampon (borné, TamponPlein sinon)
// - Entrée           : si pile non pleine, lecture du tampon -> empiler
// - Effacer          : vide la pile PUIS fait Supprimer
// - Supprimer        : vide le tampon
// - opérateur        : 2 valeurs min. ; la plus profonde est l’opérande gauche
// - Mode             : polaire <-> rectangulaire (affichage seulement)
// - Quitter          : rendu à l’appelant
//
// Pile pleine / pile trop courte : no-op silencieux.
// Erreurs numériques : propagées, pile et tampon intacts.
// Toute commande réussie remet le tampon à zéro.

use tracing::{debug, trace};

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::format::{formater_valeur, ModeAffichage};
use super::jetons::{lire_valeur, SAISIE_VIDE, SEPARATEUR_ANGLE, SEPARATEUR_RECT};
use super::operations::Operateur;
use super::polaire::Polaire;
use super::reel::{FormatReel, Reel};

/// Lignes de pile affichées (et capacité de la pile).
pub const CAPACITE_PILE: usize = 9;

/// Caractères max dans le tampon de saisie.
pub const CAPACITE_TAMPON: usize = 99;

/// Largeur d’une ligne d’écran (effacée avant chaque écriture).
pub const LARGEUR_LIGNE: usize = 26;

/// Ligne d’écho de la saisie, sous la pile.
pub const LIGNE_SAISIE: usize = CAPACITE_PILE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Touche {
    Chiffre(u8),
    Point,
    Virgule,
    Negatif,
    Angle,

    Entree,
    Effacer,
    Supprimer,

    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    InsererAngle,

    Mode,
    Quitter,
}

impl Touche {
    /// Glyphe ajouté au tampon (None pour les commandes).
    pub fn glyphe(self) -> Option<char> {
        match self {
            Touche::Chiffre(d) => char::from_digit(u32::from(d), 10),
            Touche::Point => Some('.'),
            Touche::Virgule => Some(SEPARATEUR_RECT),
            Touche::Negatif => Some('-'),
            Touche::Angle => Some(SEPARATEUR_ANGLE),
            _ => None,
        }
    }

    pub fn depuis_glyphe(c: char) -> Option<Touche> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Touche::Chiffre(d as u8)),
            '.' => Some(Touche::Point),
            SEPARATEUR_RECT => Some(Touche::Virgule),
            '-' => Some(Touche::Negatif),
            SEPARATEUR_ANGLE => Some(Touche::Angle),
            _ => None,
        }
    }

    pub fn operateur(self) -> Option<Operateur> {
        match self {
            Touche::Plus => Some(Operateur::Plus),
            Touche::Moins => Some(Operateur::Moins),
            Touche::Fois => Some(Operateur::Fois),
            Touche::Divise => Some(Operateur::Divise),
            Touche::Puissance => Some(Operateur::Puissance),
            Touche::InsererAngle => Some(Operateur::InsererAngle),
            _ => None,
        }
    }
}

/// Complete : tous les opérateurs.
/// Reduite  : sans puissance, insertion d’angle ni bascule de mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variante {
    #[default]
    Complete,
    Reduite,
}

/// Ce que la touche a provoqué (et donc ce qu’il faut redessiner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Issue {
    /// caractère ajouté : seule la ligne de saisie change
    Saisie,
    /// commande traitée (même en no-op) : tout l’écran est redessiné
    Commande,
    /// touche sans effet dans cette variante
    Ignoree,
    Quitter,
}

/// Collaborateur de rendu : écrit `texte` en colonne 0 de `ligne`, sans effacer.
/// Ce qui dépasse `largeur()` est tronqué par l’écran.
pub trait Ecran {
    fn largeur(&self) -> usize {
        LARGEUR_LIGNE
    }

    fn ecrire(&mut self, ligne: usize, texte: &str);
}

/// Efface toute la largeur de la ligne, puis écrit.
pub fn imprimer<E: Ecran + ?Sized>(ecran: &mut E, texte: &str, ligne: usize) {
    let blanc = " ".repeat(ecran.largeur());
    ecran.ecrire(ligne, &blanc);
    ecran.ecrire(ligne, texte);
}

/* ------------------------ Tampon de saisie ------------------------ */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
}

impl Tampon {
    pub fn pousser(&mut self, c: char) -> ResultatCalcul<()> {
        if self.len() >= CAPACITE_TAMPON {
            return Err(ErreurCalcul::TamponPlein {
                capacite: CAPACITE_TAMPON,
            });
        }
        self.texte.push(c);
        Ok(())
    }

    pub fn vider(&mut self) {
        self.texte.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.texte
    }

    pub fn est_vide(&self) -> bool {
        self.texte.is_empty()
    }

    /// Longueur en caractères (∠ compte pour un).
    pub fn len(&self) -> usize {
        self.texte.chars().count()
    }
}

/* ------------------------ Pile ------------------------ */

#[derive(Clone, Debug, PartialEq)]
pub struct Pile<R> {
    valeurs: Vec<Polaire<R>>,
}

impl<R: Reel> Default for Pile<R> {
    fn default() -> Self {
        Self {
            valeurs: Vec::with_capacity(CAPACITE_PILE),
        }
    }
}

impl<R: Reel> Pile<R> {
    pub fn len(&self) -> usize {
        self.valeurs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valeurs.is_empty()
    }

    pub fn est_pleine(&self) -> bool {
        self.valeurs.len() >= CAPACITE_PILE
    }

    /// Index 0 = valeur la plus ancienne (ligne du haut).
    pub fn valeurs(&self) -> &[Polaire<R>] {
        &self.valeurs
    }

    /// false si pleine (rien n’est empilé).
    pub fn empiler(&mut self, v: Polaire<R>) -> bool {
        if self.est_pleine() {
            return false;
        }
        debug_assert!(v.est_normalise(), "valeur non normalisée: {v:?}");
        self.valeurs.push(v);
        true
    }

    pub fn vider(&mut self) {
        self.valeurs.clear();
    }

    /// Remplace les deux valeurs du sommet par `op(avant-dernière, dernière)`.
    /// Ok(false) s’il y a moins de deux valeurs. Le résultat est calculé
    /// AVANT de toucher à la pile : une erreur la laisse intacte.
    pub fn reduire(&mut self, op: Operateur) -> ResultatCalcul<bool> {
        let n = self.valeurs.len();
        if n < 2 {
            return Ok(false);
        }

        let r = op.appliquer(&self.valeurs[n - 2], &self.valeurs[n - 1])?;
        debug_assert!(r.est_normalise(), "{op:?} -> {r:?}");
        self.valeurs.truncate(n - 1);
        self.valeurs[n - 2] = r;
        Ok(true)
    }
}

/* ------------------------ Machine ------------------------ */

/// Session de calcul : pile + tampon + mode, possédée par l’appelant.
#[derive(Clone, Debug)]
pub struct Calculatrice<R = f64> {
    pile: Pile<R>,
    tampon: Tampon,
    mode: ModeAffichage,
    variante: Variante,
    format: FormatReel,
}

impl<R: Reel> Default for Calculatrice<R> {
    fn default() -> Self {
        Self {
            pile: Pile::default(),
            tampon: Tampon::default(),
            mode: ModeAffichage::default(),
            variante: Variante::default(),
            format: FormatReel::default(),
        }
    }
}

impl<R: Reel> Calculatrice<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pile(&self) -> &Pile<R> {
        &self.pile
    }

    pub fn tampon(&self) -> &Tampon {
        &self.tampon
    }

    pub fn mode(&self) -> ModeAffichage {
        self.mode
    }

    pub fn variante(&self) -> Variante {
        self.variante
    }

    pub fn set_format(&mut self, format: FormatReel) {
        self.format = format;
    }

    pub fn set_variante(&mut self, variante: Variante) {
        self.variante = variante;
    }

    /// Transition seule (aucun rendu).
    pub fn appliquer(&mut self, touche: Touche) -> ResultatCalcul<Issue> {
        if let Some(c) = touche.glyphe() {
            self.tampon.pousser(c)?;
            return Ok(Issue::Saisie);
        }

        let issue = match touche {
            Touche::Quitter => Issue::Quitter,
            Touche::Entree => self.entree()?,
            Touche::Effacer => {
                self.effacer();
                Issue::Commande
            }
            Touche::Supprimer => {
                self.supprimer();
                Issue::Commande
            }
            Touche::Mode => self.basculer_mode(),
            _ => match touche.operateur() {
                Some(op) => self.operer(op)?,
                None => Issue::Ignoree,
            },
        };

        if issue == Issue::Commande {
            self.tampon.vider();
        }

        debug!(
            ?touche,
            ?issue,
            taille = self.pile.len(),
            mode = ?self.mode,
            "touche traitée"
        );
        Ok(issue)
    }

    /// Transition + rendu : c’est le seul endroit qui déclenche l’affichage.
    pub fn touche<E: Ecran + ?Sized>(
        &mut self,
        touche: Touche,
        ecran: &mut E,
    ) -> ResultatCalcul<Issue> {
        let issue = self.appliquer(touche)?;
        match issue {
            Issue::Saisie => self.rafraichir_saisie(ecran),
            Issue::Commande => self.rafraichir(ecran),
            Issue::Ignoree | Issue::Quitter => {}
        }
        Ok(issue)
    }

    /// Redessine les 9 lignes de pile (vides au-delà de la taille) + la saisie.
    pub fn rafraichir<E: Ecran + ?Sized>(&self, ecran: &mut E) {
        let lignes = self.lignes_pile();
        for i in 0..CAPACITE_PILE {
            let texte = lignes.get(i).map_or("", String::as_str);
            imprimer(ecran, texte, i);
        }
        self.rafraichir_saisie(ecran);
    }

    pub fn rafraichir_saisie<E: Ecran + ?Sized>(&self, ecran: &mut E) {
        imprimer(ecran, self.ligne_saisie(), LIGNE_SAISIE);
    }

    /// Valeurs de la pile formatées selon le mode courant.
    pub fn lignes_pile(&self) -> Vec<String> {
        self.pile
            .valeurs()
            .iter()
            .map(|v| formater_valeur(v, self.mode, &self.format))
            .collect()
    }

    pub fn ligne_saisie(&self) -> &str {
        if self.tampon.est_vide() {
            SAISIE_VIDE
        } else {
            self.tampon.as_str()
        }
    }

    fn entree(&mut self) -> ResultatCalcul<Issue> {
        if self.pile.est_pleine() {
            trace!("pile pleine : Entrée ignorée");
            return Ok(Issue::Commande);
        }
        let v = lire_valeur::<R>(self.tampon.as_str())?;
        self.pile.empiler(v);
        Ok(Issue::Commande)
    }

    /// Effacer = vider la pile + Supprimer.
    fn effacer(&mut self) {
        self.pile.vider();
        self.supprimer();
    }

    fn supprimer(&mut self) {
        self.tampon.vider();
    }

    fn basculer_mode(&mut self) -> Issue {
        if self.variante == Variante::Reduite {
            return Issue::Ignoree;
        }
        self.mode = self.mode.bascule();
        Issue::Commande
    }

    fn operer(&mut self, op: Operateur) -> ResultatCalcul<Issue> {
        if self.variante == Variante::Reduite && op.est_etendu() {
            return Ok(Issue::Ignoree);
        }
        if !self.pile.reduire(op)? {
            trace!(?op, "moins de deux valeurs : opérateur ignoré");
        }
        Ok(Issue::Commande)
    }
}

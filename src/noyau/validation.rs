// src/noyau/validation.rs
//
// Validation structurelle d’une suite de jetons (infixe)
// -----------------------------------------------------
// Balayage gauche -> droite, une seule passe, première règle violée = erreur.
//
// Règles (prev = jeton i-1, next = jeton i+1, absents hors bornes) :
// - nombre   : interdit après un nombre ou une ')'
// - opérateur: ni en tête, ni en fin, ni après opérateur / '(' , ni avant opérateur / ')'
// - '('      : balance += 1, doit être suivie d’un nombre ou d’une '('
// - ')'      : balance -= 1 (jamais négative), doit suivre un nombre ou une ')'
// - autre    : jeton invalide
// Fin de balayage : balance == 0.

use log::{debug, trace};

use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, Brut, Tok};
use super::nombre::Nombre;
use super::options::{OptionsCalc, MIN_JETONS};

/// Suite certifiée par la validation (infixe, inchangée).
///
/// Seul ce module construit un `Valide` : le convertisseur RPN
/// peut donc supposer parenthèses équilibrées et voisinages légaux.
#[derive(Clone, Debug, PartialEq)]
pub struct Valide<N = f64> {
    jetons: Vec<Tok<N>>,
}

impl<N> Valide<N> {
    pub fn jetons(&self) -> &[Tok<N>] {
        &self.jetons
    }

    pub fn into_jetons(self) -> Vec<Tok<N>> {
        self.jetons
    }

    pub fn len(&self) -> usize {
        self.jetons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jetons.is_empty()
    }
}

/// Genre d’un élément, sans sa valeur : tout ce dont les règles ont besoin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Genre {
    Num,
    Op,
    LPar,
    RPar,
}

fn genre<N>(t: &Tok<N>) -> Genre {
    match t {
        Tok::Num(_) => Genre::Num,
        Tok::Op(_) => Genre::Op,
        Tok::LPar => Genre::LPar,
        Tok::RPar => Genre::RPar,
    }
}

/// Valide une suite de jetons déjà typés.
///
/// Un `Tok::Num` non fini est mal typé, comme par `valider_brut`.
pub fn valider<N: Nombre>(
    jetons: &[Tok<N>],
    options: &OptionsCalc,
) -> Result<Valide<N>, ErreurCalc> {
    controle_taille(jetons.len(), options)?;

    let genres: Vec<Option<Genre>> = jetons
        .iter()
        .map(|t| match t {
            Tok::Num(n) if !n.est_fini() => None,
            t => Some(genre(t)),
        })
        .collect();
    scanner(&genres).inspect_err(|e| debug!("validation: rejet ({e})"))?;

    trace!("validation ok: {}", format_tokens(jetons));
    Ok(Valide {
        jetons: jetons.to_vec(),
    })
}

/// Valide une suite d’éléments bruts (nombres typés + symboles texte).
///
/// Un élément non reconnu n’est signalé (`InvalidToken`) que lorsque le
/// balayage l’atteint ; comme voisin, il ne correspond à aucun genre.
pub fn valider_brut<N: Nombre>(
    bruts: &[Brut<N>],
    options: &OptionsCalc,
) -> Result<Valide<N>, ErreurCalc> {
    controle_taille(bruts.len(), options)?;

    let classes: Vec<Option<Tok<N>>> = bruts.iter().map(Brut::classer).collect();
    let genres: Vec<Option<Genre>> = classes.iter().map(|c| c.as_ref().map(genre)).collect();
    scanner(&genres).inspect_err(|e| debug!("validation: rejet ({e})"))?;

    // scanner() a refusé tout None : flatten ne perd rien.
    let jetons: Vec<Tok<N>> = classes.into_iter().flatten().collect();
    trace!("validation ok: {}", format_tokens(&jetons));
    Ok(Valide { jetons })
}

fn controle_taille(len: usize, options: &OptionsCalc) -> Result<(), ErreurCalc> {
    if len < MIN_JETONS {
        return Err(ErreurCalc::TooFewTokens);
    }
    if len > options.max_jetons {
        return Err(ErreurCalc::TooManyTokens {
            max: options.max_jetons,
        });
    }
    Ok(())
}

fn scanner(genres: &[Option<Genre>]) -> Result<(), ErreurCalc> {
    use Genre::*;

    let n = genres.len();
    let mut balance: usize = 0;

    for (i, g) in genres.iter().enumerate() {
        let prev = i.checked_sub(1).and_then(|j| genres[j]);
        let next = genres.get(i + 1).copied().flatten();

        match g {
            None => return Err(ErreurCalc::InvalidToken { index: i }),

            Some(Num) => {
                if matches!(prev, Some(Num | RPar)) {
                    return Err(ErreurCalc::InvalidNumberAdjacency { index: i });
                }
            }

            Some(Op) => {
                let mal_place = i == 0
                    || i + 1 == n
                    || matches!(prev, Some(Op | LPar))
                    || matches!(next, Some(Op | RPar));
                if mal_place {
                    return Err(ErreurCalc::InvalidOperatorPlacement { index: i });
                }
            }

            Some(LPar) => {
                balance += 1;
                if !matches!(next, Some(Num | LPar)) {
                    return Err(ErreurCalc::ExpectedOperandAfterOpenParen { index: i });
                }
            }

            Some(RPar) => {
                balance = balance
                    .checked_sub(1)
                    .ok_or(ErreurCalc::MismatchedParentheses { index: Some(i) })?;
                if !matches!(prev, Some(Num | RPar)) {
                    return Err(ErreurCalc::ExpectedOperandBeforeCloseParen { index: i });
                }
            }
        }
    }

    if balance != 0 {
        return Err(ErreurCalc::MismatchedParentheses { index: None });
    }
    Ok(())
}

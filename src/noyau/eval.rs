//! Noyau — évaluation (pipeline réel)
//!
//! éléments bruts -> validation -> RPN (shunting-yard + grands nombres) -> pile -> nombre
//!
//! Chaque étage rend une nouvelle suite ; l’entrée de l’appelant n’est jamais modifiée.

use log::trace;

use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, Brut, Operateur, Tok};
use super::nombre::Nombre;
use super::options::OptionsCalc;
use super::rpn::{to_rpn, to_rpn_trace, Normalisation};
use super::validation::{valider, valider_brut, Valide};

/// Démarche : ce que le pipeline a vu, étage par étage.
#[derive(Clone, Debug, PartialEq)]
pub struct Demarche<N = f64> {
    pub jetons: String,
    pub rpn: String,
    pub normalisations: Vec<Normalisation<N>>,
}

/// API publique : évalue une suite d’éléments bruts avec les options par défaut.
///
/// ```
/// use calculatrice_rpn::{evaluate, Brut};
///
/// let expr: Vec<Brut> = vec![
///     "(".into(), 2.into(), "+".into(), 3.into(), ")".into(),
///     "*".into(), 4.into(),
/// ];
/// assert_eq!(evaluate(&expr), Ok(20.0));
/// ```
pub fn evaluate<N: Nombre>(bruts: &[Brut<N>]) -> Result<N, ErreurCalc> {
    evaluate_with(bruts, &OptionsCalc::default())
}

pub fn evaluate_with<N: Nombre>(
    bruts: &[Brut<N>],
    options: &OptionsCalc,
) -> Result<N, ErreurCalc> {
    let valide = valider_brut(bruts, options)?;
    evaluate_valide(&valide, options)
}

/// Même pipeline, sur des jetons déjà typés.
/// Seul `InvalidToken` possible : un `Tok::Num` non fini (NaN, ±inf).
pub fn evaluate_jetons<N: Nombre>(
    jetons: &[Tok<N>],
    options: &OptionsCalc,
) -> Result<N, ErreurCalc> {
    let valide = valider(jetons, options)?;
    evaluate_valide(&valide, options)
}

fn evaluate_valide<N: Nombre>(
    valide: &Valide<N>,
    options: &OptionsCalc,
) -> Result<N, ErreurCalc> {
    let rpn = to_rpn(valide, options);
    eval_postfix(&rpn)
}

/// Évalue et rend aussi la démarche (jetons, RPN, normalisations appliquées).
pub fn evaluate_avec_demarche<N: Nombre>(
    bruts: &[Brut<N>],
    options: &OptionsCalc,
) -> Result<(N, Demarche<N>), ErreurCalc> {
    let valide = valider_brut(bruts, options)?;
    let (rpn, normalisations) = to_rpn_trace(&valide, options);
    let v = eval_postfix(&rpn)?;

    let d = Demarche {
        jetons: format_tokens(valide.jetons()),
        rpn: format_tokens(&rpn),
        normalisations,
    };
    Ok((v, d))
}

/// Machine à pile sur une suite postfixée.
///
/// Opérateur : on dépile la droite PUIS la gauche, on empile `gauche OP droite`.
/// Division par zéro : échec immédiat, rien n’est empilé.
///
/// Une RPN issue de `to_rpn` se réduit à une seule valeur, sauf quand une
/// opérande est suivie directement de `(` (`1 ( 1 )`, `( 2 ) ( 3 )`) :
/// il reste deux valeurs, d’où `MalformedPostfix { index: None }`.
pub fn eval_postfix<N: Nombre>(rpn: &[Tok<N>]) -> Result<N, ErreurCalc> {
    let mut pile: Vec<N> = Vec::with_capacity(rpn.len() / 2 + 1);

    for (i, tok) in rpn.iter().enumerate() {
        match tok {
            Tok::Num(v) => pile.push(v.clone()),

            Tok::Op(op) => {
                let b = pile.pop().ok_or(ErreurCalc::MalformedPostfix { index: Some(i) })?;
                let a = pile.pop().ok_or(ErreurCalc::MalformedPostfix { index: Some(i) })?;
                pile.push(appliquer(*op, a, b)?);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalc::MalformedPostfix { index: Some(i) });
            }
        }
    }

    let v = pile.pop().ok_or(ErreurCalc::MalformedPostfix { index: None })?;
    if !pile.is_empty() {
        return Err(ErreurCalc::MalformedPostfix { index: None });
    }

    trace!("eval: {} = {v}", format_tokens(rpn));
    Ok(v)
}

fn appliquer<N: Nombre>(op: Operateur, a: N, b: N) -> Result<N, ErreurCalc> {
    let r = match op {
        Operateur::Plus => a + b,
        Operateur::Minus => a - b,
        Operateur::Star => a * b,
        Operateur::Slash => {
            if b.est_zero() {
                return Err(ErreurCalc::DivisionByZero);
            }
            a / b
        }
    };
    Ok(r)
}

// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite validée (infixe) en RPN (postfix)
// - Appliquer la normalisation historique des grands nombres (|x| > seuil)
//
// Règles:
// - nombre : sortie directe (après normalisation éventuelle)
// - opérateur : dépile tant que le sommet est un opérateur de précédence >= (associativité gauche)
// - '(' : empile ; ')' : dépile jusqu’à '(' (jamais émise)
//
// NOTE:
// - Pas de cas d’erreur ici : la validation garantit parenthèses équilibrées
//   et voisinages légaux.

use log::{debug, trace};

use super::jetons::{format_tokens, Operateur, Tok};
use super::nombre::Nombre;
use super::options::OptionsCalc;
use super::validation::Valide;

/// Ce qui peut attendre sur la pile des opérateurs.
#[derive(Clone, Copy, Debug)]
enum EnAttente {
    Op(Operateur),
    LPar,
}

/// Une normalisation appliquée par la règle des grands nombres.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalisation<N = f64> {
    /// Position du nombre dans la suite infixe.
    pub index: usize,
    pub avant: N,
    pub apres: N,
}

/// Convertit une suite validée en RPN (notation polonaise inversée).
///
/// Exemple:
///   infixe: ( 2 + 3 ) * 4
///   rpn:    2 3 + 4 *
pub fn to_rpn<N: Nombre>(valide: &Valide<N>, options: &OptionsCalc) -> Vec<Tok<N>> {
    to_rpn_trace(valide, options).0
}

/// Comme `to_rpn`, en rendant aussi la liste des normalisations (ordre de balayage).
pub fn to_rpn_trace<N: Nombre>(
    valide: &Valide<N>,
    options: &OptionsCalc,
) -> (Vec<Tok<N>>, Vec<Normalisation<N>>) {
    let tokens = valide.jetons();

    let mut out: Vec<Tok<N>> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<EnAttente> = Vec::new();
    let mut normalisations = Vec::new();

    let seuil = seuil_actif::<N>(options);

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(v) => {
                // voisins lus dans `tokens` (valeurs d’origine, jamais normalisées)
                let v = match seuil.as_ref().and_then(|s| normaliser(tokens, i, v, s)) {
                    Some(apres) => {
                        debug!("rpn: normalisation jeton {i}: {v} -> {apres}");
                        normalisations.push(Normalisation {
                            index: i,
                            avant: v.clone(),
                            apres: apres.clone(),
                        });
                        apres
                    }
                    None => v.clone(),
                };
                out.push(Tok::Num(v));
            }

            Tok::Op(op) => {
                while let Some(&EnAttente::Op(top)) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    out.push(Tok::Op(top));
                    ops.pop();
                }
                ops.push(EnAttente::Op(*op));
            }

            Tok::LPar => ops.push(EnAttente::LPar),

            Tok::RPar => {
                // dépile jusqu’à '(' (consommée, pas émise)
                while let Some(top) = ops.pop() {
                    match top {
                        EnAttente::LPar => break,
                        EnAttente::Op(o) => out.push(Tok::Op(o)),
                    }
                }
            }
        }
    }

    // vide la pile ops (plus de '(' possible après validation)
    while let Some(top) = ops.pop() {
        if let EnAttente::Op(o) = top {
            out.push(Tok::Op(o));
        }
    }

    trace!("rpn: {}", format_tokens(&out));
    (out, normalisations)
}

fn seuil_actif<N: Nombre>(options: &OptionsCalc) -> Option<N> {
    if !options.normalisation_grands_nombres {
        return None;
    }
    let seuil = N::depuis_f64(options.seuil_grands_nombres);
    if seuil.is_none() {
        debug!(
            "rpn: seuil {} non représentable, normalisation ignorée",
            options.seuil_grands_nombres
        );
    }
    seuil
}

/// Règle des grands nombres : None si |v| <= seuil (nombre inchangé).
///
/// Ordre des cas (premier qui s’applique) :
/// 1. précédé de '/'            -> 1
/// 2. suivi de '/' puis nombre b -> b² (b = valeur d’origine)
/// 3. précédé de '*'            -> 1
/// 4. suivi de '*'              -> 1
/// 5. sinon                     -> 0
fn normaliser<N: Nombre>(tokens: &[Tok<N>], i: usize, v: &N, seuil: &N) -> Option<N> {
    if v.abs() <= *seuil {
        return None;
    }

    let prev = i.checked_sub(1).and_then(|j| tokens.get(j)).and_then(Tok::operateur);
    let next = tokens.get(i + 1).and_then(Tok::operateur);

    if prev == Some(Operateur::Slash) {
        return Some(N::one());
    }
    if next == Some(Operateur::Slash) {
        // "2000 / ( 4 )" : pas de nombre juste après '/', on passe aux cas suivants
        if let Some(Tok::Num(b)) = tokens.get(i + 2) {
            return Some(b.au_carre());
        }
    }
    if prev == Some(Operateur::Star) || next == Some(Operateur::Star) {
        return Some(N::one());
    }
    Some(N::zero())
}

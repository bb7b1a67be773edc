// src/noyau/erreur.rs
//
// Erreurs du noyau : une variante par règle violée.
// Les positions sont des index 0-based dans la suite d’entrée d’origine.

/// Erreur d’évaluation.
///
/// Politique : fail-fast. La validation s’arrête à la première règle violée
/// (balayage gauche -> droite), l’évaluation à la première division par zéro.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalc {
    /// Moins de 3 jetons : impossible d’avoir deux opérandes et un opérateur.
    #[error("expression trop courte : au moins 3 jetons attendus")]
    TooFewTokens,

    /// Garde-fou de taille (voir `OptionsCalc::max_jetons`).
    #[error("expression trop longue : plus de {max} jetons")]
    TooManyTokens { max: usize },

    /// Un nombre suit directement un nombre ou une ')'.
    #[error("nombre mal placé (jeton {index})")]
    InvalidNumberAdjacency { index: usize },

    #[error("opérateur mal placé (jeton {index})")]
    InvalidOperatorPlacement { index: usize },

    #[error("opérande attendue après '(' (jeton {index})")]
    ExpectedOperandAfterOpenParen { index: usize },

    #[error("opérande attendue avant ')' (jeton {index})")]
    ExpectedOperandBeforeCloseParen { index: usize },

    /// `index` = Some(i) : ')' sans '(' en position i ;
    /// `index` = None    : '(' non fermées en fin de balayage.
    #[error("parenthèses non appariées{}", suffixe_index(.index))]
    MismatchedParentheses { index: Option<usize> },

    /// Élément qui n’est ni nombre, ni opérateur, ni parenthèse.
    #[error("jeton invalide (jeton {index})")]
    InvalidToken { index: usize },

    #[error("division par zéro")]
    DivisionByZero,

    /// Suite postfixée qui ne se réduit pas à une seule valeur.
    /// Via `evaluate` : opérande (nombre ou `)`) suivie directement de `(`,
    /// ex. `1 ( 1 )`, que la validation accepte (`index` = None).
    /// Sinon : RPN fabriquée à la main.
    #[error("postfixe mal formée{}", suffixe_index(.index))]
    MalformedPostfix { index: Option<usize> },
}

impl ErreurCalc {
    /// Position du jeton fautif, quand l’erreur en porte une.
    pub fn index(&self) -> Option<usize> {
        use ErreurCalc::*;

        match self {
            InvalidNumberAdjacency { index }
            | InvalidOperatorPlacement { index }
            | ExpectedOperandAfterOpenParen { index }
            | ExpectedOperandBeforeCloseParen { index }
            | InvalidToken { index } => Some(*index),

            MismatchedParentheses { index } | MalformedPostfix { index } => *index,

            TooFewTokens | TooManyTokens { .. } | DivisionByZero => None,
        }
    }
}

fn suffixe_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (jeton {i})"),
        None => String::new(),
    }
}

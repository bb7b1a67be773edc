//! Noyau quatre opérations
//!
//! Organisation interne :
//! - jetons.rs     : Tok / Operateur / éléments bruts + format
//! - nombre.rs     : domaine numérique (f64, BigRational)
//! - erreur.rs     : ErreurCalc (une variante par règle)
//! - options.rs    : OptionsCalc (normalisation, garde-fous)
//! - validation.rs : contrôle structurel -> Valide
//! - rpn.rs        : shunting-yard + normalisation des grands nombres
//! - eval.rs       : machine à pile + pipeline complet

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod nombre;
pub mod options;
pub mod rpn;
pub mod validation;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalc;
pub use eval::{
    eval_postfix, evaluate, evaluate_avec_demarche, evaluate_jetons, evaluate_with, Demarche,
};
pub use jetons::{format_tokens, Brut, Operateur, Tok};
pub use nombre::Nombre;
pub use options::OptionsCalc;
pub use rpn::{to_rpn, Normalisation};
pub use validation::{valider, valider_brut, Valide};

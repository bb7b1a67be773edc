// src/lib.rs
//
// Calculatrice RPN — noyau embarquable
// ------------------------------------
// Évalue une expression quatre opérations (+ - * /, parenthèses) fournie comme
// suite de jetons déjà découpés : validation -> RPN -> machine à pile.
//
// Pas d’entrée/sortie, pas d’état global : une fonction pure par appel.

pub mod noyau;

pub use noyau::*;

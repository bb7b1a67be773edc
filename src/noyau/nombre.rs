// src/noyau/nombre.rs
//
// Domaine numérique du noyau
// --------------------------
// Le pipeline (validation -> RPN -> pile) est générique sur `Nombre` :
// - f64         : mode flottant (par défaut)
// - BigRational : mode exact Q-pur (1/3 + 1/3 + 1/3 = 1, sans arrondi)

use std::fmt;

use num_rational::BigRational;
use num_traits::{Num, Signed};

/// Ce que le noyau exige d’un nombre.
///
/// `Num + Signed` couvrent déjà + - * /, zéro, un et `abs` ;
/// le reste sert à la configuration (seuil en f64) et au tri des entrées.
pub trait Nombre: Num + Signed + Clone + PartialOrd + fmt::Debug + fmt::Display {
    /// Conversion d’un paramètre f64 (ex: seuil de normalisation) vers le domaine.
    /// None si la valeur n’a pas de représentation (NaN, infini).
    fn depuis_f64(x: f64) -> Option<Self>;

    /// Un nombre “utilisable” par le pipeline.
    fn est_fini(&self) -> bool {
        true
    }

    fn est_zero(&self) -> bool {
        self.is_zero()
    }

    fn au_carre(&self) -> Self {
        self.clone() * self.clone()
    }
}

impl Nombre for f64 {
    fn depuis_f64(x: f64) -> Option<Self> {
        x.is_finite().then_some(x)
    }

    fn est_fini(&self) -> bool {
        self.is_finite()
    }
}

impl Nombre for BigRational {
    fn depuis_f64(x: f64) -> Option<Self> {
        BigRational::from_float(x)
    }
}

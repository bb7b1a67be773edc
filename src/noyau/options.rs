// src/noyau/options.rs
//
// Paramètres du pipeline (aucun état global : on passe &OptionsCalc).

/// Seuil strict de la normalisation des grands nombres (|x| > 1000).
pub const SEUIL_DEFAUT: f64 = 1000.0;

/// Garde-fou : taille max d’une expression (anti-abus mémoire).
pub const MAX_JETONS_DEFAUT: usize = 1_000_000;

/// En dessous, l’expression ne peut pas contenir deux opérandes + un opérateur.
pub const MIN_JETONS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct OptionsCalc {
    /// Normalisation des opérandes dont |valeur| > seuil (comportement historique).
    /// false => évaluateur “général” : les nombres passent tels quels.
    pub normalisation_grands_nombres: bool,
    pub seuil_grands_nombres: f64,
    pub max_jetons: usize,
}

impl Default for OptionsCalc {
    fn default() -> Self {
        Self {
            normalisation_grands_nombres: true,
            seuil_grands_nombres: SEUIL_DEFAUT,
            max_jetons: MAX_JETONS_DEFAUT,
        }
    }
}

impl OptionsCalc {
    pub fn with_normalisation(mut self, actif: bool) -> Self {
        self.normalisation_grands_nombres = actif;
        self
    }

    pub fn with_seuil(mut self, seuil: f64) -> Self {
        self.seuil_grands_nombres = seuil;
        self
    }

    /// Borne basse : MIN_JETONS (sinon plus aucune expression ne passerait).
    pub fn with_max_jetons(mut self, max: usize) -> Self {
        self.max_jetons = max.max(MIN_JETONS);
        self
    }
}

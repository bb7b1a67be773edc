// src/noyau/jetons.rs

use std::fmt;

use num_rational::BigRational;

use super::nombre::Nombre;

/// Les quatre opérations. Toutes associatives à gauche.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Operateur {
    /// Table de précédence (constante) : + - => 1, * / => 2.
    pub const fn precedence(self) -> u8 {
        match self {
            Operateur::Plus | Operateur::Minus => 1,
            Operateur::Star | Operateur::Slash => 2,
        }
    }

    pub const fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Minus => '-',
            Operateur::Star => '*',
            Operateur::Slash => '/',
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok<N = f64> {
    Num(N),
    Op(Operateur),
    LPar,
    RPar,
}

impl<N> Tok<N> {
    /// Reconnaît un symbole exact : + - * / ( )
    pub fn depuis_symbole(s: &str) -> Option<Self> {
        let t = match s {
            "+" => Tok::Op(Operateur::Plus),
            "-" => Tok::Op(Operateur::Minus),
            "*" => Tok::Op(Operateur::Star),
            "/" => Tok::Op(Operateur::Slash),
            "(" => Tok::LPar,
            ")" => Tok::RPar,
            _ => return None,
        };
        Some(t)
    }

    pub fn est_nombre(&self) -> bool {
        matches!(self, Tok::Num(_))
    }

    pub fn operateur(&self) -> Option<Operateur> {
        match self {
            Tok::Op(op) => Some(*op),
            _ => None,
        }
    }
}

/// Élément brut tel que fourni par l’appelant (suite déjà découpée).
///
/// Les nombres arrivent typés ; tout le reste arrive en texte et doit être
/// exactement un symbole reconnu. Le tri se fait pendant la validation
/// (`Brut::classer`), pour que l’erreur `InvalidToken` tombe à sa place
/// dans le balayage gauche -> droite.
#[derive(Clone, Debug, PartialEq)]
pub enum Brut<N = f64> {
    Nombre(N),
    Symbole(String),
}

impl<N: Nombre> Brut<N> {
    /// None si l’élément n’est aucun des quatre genres de jeton.
    /// Un f64 non fini (NaN, ±inf) compte comme mal typé.
    pub fn classer(&self) -> Option<Tok<N>> {
        match self {
            Brut::Nombre(n) if n.est_fini() => Some(Tok::Num(n.clone())),
            Brut::Nombre(_) => None,
            Brut::Symbole(s) => Tok::depuis_symbole(s),
        }
    }
}

impl From<f64> for Brut<f64> {
    fn from(x: f64) -> Self {
        Brut::Nombre(x)
    }
}

impl From<i32> for Brut<f64> {
    fn from(x: i32) -> Self {
        Brut::Nombre(f64::from(x))
    }
}

impl From<BigRational> for Brut<BigRational> {
    fn from(x: BigRational) -> Self {
        Brut::Nombre(x)
    }
}

impl From<i32> for Brut<BigRational> {
    fn from(x: i32) -> Self {
        Brut::Nombre(BigRational::from_integer(x.into()))
    }
}

impl<N> From<&str> for Brut<N> {
    fn from(s: &str) -> Self {
        Brut::Symbole(s.to_string())
    }
}

impl<N> From<String> for Brut<N> {
    fn from(s: String) -> Self {
        Brut::Symbole(s)
    }
}

impl<N> From<Tok<N>> for Brut<N> {
    fn from(t: Tok<N>) -> Self {
        match t {
            Tok::Num(n) => Brut::Nombre(n),
            Tok::Op(op) => Brut::Symbole(op.symbole().to_string()),
            Tok::LPar => Brut::Symbole("(".to_string()),
            Tok::RPar => Brut::Symbole(")".to_string()),
        }
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens<N: fmt::Display>(tokens: &[Tok<N>]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.to_string(),
            Tok::Op(op) => op.to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seules erreurs admises = division par zéro
//! - bruit aléatoire : seules erreurs admises = erreurs de validation (ou opérande suivie de `(`),
//!   index dans les bornes
//! - mode f64 et mode exact doivent être d’accord sur les entiers (+ - *)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreur::ErreurCalc;
use super::eval::{evaluate, evaluate_with};
use super::jetons::Brut;
use super::options::OptionsCalc;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

/// Élément d’expression indépendant du domaine numérique.
#[derive(Clone, Debug)]
enum Elem {
    Entier(i32),
    Sym(&'static str),
}

fn vers_f64(e: &[Elem]) -> Vec<Brut> {
    e.iter()
        .map(|x| match x {
            Elem::Entier(n) => Brut::<f64>::from(*n),
            Elem::Sym(s) => Brut::<f64>::from(*s),
        })
        .collect()
}

fn vers_exact(e: &[Elem]) -> Vec<Brut<BigRational>> {
    e.iter()
        .map(|x| match x {
            Elem::Entier(n) => Brut::<BigRational>::from(*n),
            Elem::Sym(s) => Brut::<BigRational>::from(*s),
        })
        .collect()
}

fn gen_nombre(rng: &mut Rng) -> i32 {
    // petits entiers (0 inclus, pour provoquer des divisions par zéro)
    // + quelques grands nombres (toujours > 1000 : normalisés)
    match rng.pick(12) {
        10 => 1001,
        11 => -5000,
        k => k as i32,
    }
}

/// Expression bien formée, profondeur bornée.
fn gen_expr(rng: &mut Rng, depth: usize, ops: &[&'static str], out: &mut Vec<Elem>) {
    if depth == 0 || rng.pick(4) == 0 {
        out.push(Elem::Entier(gen_nombre(rng)));
        return;
    }

    let parenthese = rng.pick(3) == 0;
    if parenthese {
        out.push(Elem::Sym("("));
    }
    gen_expr(rng, depth - 1, ops, out);
    out.push(Elem::Sym(ops[rng.pick(ops.len() as u32) as usize]));
    gen_expr(rng, depth - 1, ops, out);
    if parenthese {
        out.push(Elem::Sym(")"));
    }
}

fn gen_bien_forme(rng: &mut Rng, depth: usize, ops: &[&'static str]) -> Vec<Elem> {
    // au moins un opérateur : >= 3 éléments
    let mut out = Vec::new();
    gen_expr(rng, depth, ops, &mut out);
    while out.len() < 3 {
        out.push(Elem::Sym("+"));
        out.push(Elem::Entier(gen_nombre(rng)));
    }
    out
}

fn gen_bruit(rng: &mut Rng, len: usize) -> Vec<Elem> {
    const SYMS: [&str; 10] = ["+", "-", "*", "/", "(", ")", "^", "x", "", "(("];
    (0..len)
        .map(|_| {
            if rng.pick(3) == 0 {
                Elem::Entier(gen_nombre(rng))
            } else {
                Elem::Sym(SYMS[rng.pick(SYMS.len() as u32) as usize])
            }
        })
        .collect()
}

/// Erreurs admises sur du bruit : la validation, ou l’opérande suivie de `(`
/// que la validation laisse passer (postfixe sans index).
fn is_erreur_admise(e: &ErreurCalc) -> bool {
    match e {
        ErreurCalc::DivisionByZero => false,
        ErreurCalc::MalformedPostfix { index } => index.is_none(),
        _ => true,
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_div0 = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = vers_f64(&gen_bien_forme(&mut rng, 5, &["+", "-", "*", "/"]));
        match evaluate(&expr) {
            Ok(_) => seen_ok += 1,
            Err(ErreurCalc::DivisionByZero) => seen_div0 += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_div0 > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_err = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let len = rng.pick(9) as usize;
        let expr = vers_f64(&gen_bruit(&mut rng, len));

        match evaluate(&expr) {
            Ok(_) | Err(ErreurCalc::DivisionByZero) => {}
            Err(e) => {
                assert!(
                    is_erreur_admise(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                if let Some(i) = e.index() {
                    assert!(i < expr.len(), "index hors bornes: expr={expr:?} err={e}");
                }
                seen_err += 1;
            }
        }
    }

    assert!(seen_err > 1000, "le bruit devrait surtout échouer: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let tirage = |seed: u64| {
        let mut rng = Rng::new(seed);
        (0..50)
            .map(|_| evaluate(&vers_f64(&gen_bien_forme(&mut rng, 4, &["+", "-", "*", "/"]))))
            .collect::<Vec<_>>()
    };
    assert_eq!(tirage(42), tirage(42));
}

#[test]
fn fuzz_safe_f64_et_exact_d_accord() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // Sans '/', sur des entiers bornés : f64 est exact (|résultat| << 2^53).
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..200 {
        budget(t0, max);

        let e = gen_bien_forme(&mut rng, 4, &["+", "-", "*"]);
        let f = evaluate(&vers_f64(&e)).unwrap_or_else(|err| panic!("f64: {e:?} err={err}"));
        let q = evaluate(&vers_exact(&e)).unwrap_or_else(|err| panic!("exact: {e:?} err={err}"));

        assert_eq!(BigRational::from_float(f), Some(q), "expr={e:?}");
    }
}

#[test]
fn fuzz_safe_options_sans_normalisation() {
    // Sans normalisation, 1001 et -5000 passent tels quels : comparaison au calcul direct.
    let opts = OptionsCalc::default().with_normalisation(false);
    let e = vec![
        Elem::Entier(1001),
        Elem::Sym("*"),
        Elem::Sym("("),
        Elem::Entier(-5000),
        Elem::Sym("+"),
        Elem::Entier(3),
        Elem::Sym(")"),
    ];
    assert_eq!(evaluate_with(&vers_f64(&e), &opts), Ok(1001.0 * (-4997.0)));

    let q = evaluate_with(&vers_exact(&e), &opts).unwrap();
    assert_eq!(q, BigRational::from_integer(BigInt::from(1001 * -4997)));
}

/* ------------------------ Anti pile (pas de récursion) ------------------------ */

#[test]
fn fuzz_safe_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // ((((...(1)...)))) + 1, profondeur 50_000
    let n = 50_000;
    let mut e: Vec<Brut> = Vec::with_capacity(2 * n + 3);
    e.extend((0..n).map(|_| Brut::from("(")));
    e.push(1.into());
    e.extend((0..n).map(|_| Brut::from(")")));
    e.push("+".into());
    e.push(1.into());

    assert_eq!(evaluate(&e), Ok(2.0));
    budget(t0, max);
}

#[test]
fn fuzz_safe_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 1 + 1 + ... + 1 (100_000 termes)
    let n = 100_000;
    let mut e: Vec<Brut> = Vec::with_capacity(2 * n);
    e.push(1.into());
    for _ in 1..n {
        e.push("+".into());
        e.push(1.into());
    }

    assert_eq!(evaluate(&e), Ok(n as f64));
    budget(t0, max);
}

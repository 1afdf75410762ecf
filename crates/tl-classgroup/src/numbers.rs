/// Integer helpers for class group arithmetic: extended gcd, linear
/// congruence solving and a deterministic Miller-Rabin primality test.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::{Integer, Roots};
use num_traits::{One, Zero};

/// Fixed Miller-Rabin bases: the first 40 primes. Both sides of the
/// protocol must agree on these or challenge derivation diverges.
const MILLER_RABIN_BASES: [u32; 40] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67,
    71, 73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149,
    151, 157, 163, 167, 173,
];

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)` and `g >= 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut r0, mut r1) = (a.clone(), b.clone());
    let (mut s0, mut s1) = (BigInt::one(), BigInt::zero());
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

    while !r1.is_zero() {
        let q = r0.div_floor(&r1);
        let r2 = &r0 - &q * &r1;
        r0 = std::mem::replace(&mut r1, r2);
        let s2 = &s0 - &q * &s1;
        s0 = std::mem::replace(&mut s1, s2);
        let t2 = &t0 - &q * &t1;
        t0 = std::mem::replace(&mut t1, t2);
    }

    if r0.sign() == Sign::Minus {
        r0 = -r0;
        s0 = -s0;
        t0 = -t0;
    }
    (r0, s0, t0)
}

/// Solve `a*x == b (mod m)` for `m > 0`.
///
/// Returns `(x0, step)` such that the solution set is `x0 + k*step`, or
/// `None` when `gcd(a, m)` does not divide `b`.
pub fn solve_linear_congruence(
    a: &BigInt,
    b: &BigInt,
    m: &BigInt,
) -> Option<(BigInt, BigInt)> {
    let (g, d, _) = extended_gcd(a, m);
    let (q, r) = b.div_mod_floor(&g);
    if !r.is_zero() {
        return None;
    }
    Some(((q * d).mod_floor(m), m.div_floor(&g)))
}

/// Integer part of `n^(1/4)`.
pub fn integer_fourth_root(n: &BigUint) -> BigUint {
    n.nth_root(4)
}

/// Miller-Rabin over the fixed base set.
///
/// Deterministic by construction; a composite sneaking through all 40 bases
/// is negligible and at worst weakens one challenge, never correctness of
/// the group arithmetic.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for &base in &MILLER_RABIN_BASES {
        let p = BigUint::from(base);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut rounds = 0u32;
    while d.is_even() {
        d >>= 1usize;
        rounds += 1;
    }

    'bases: for &base in &MILLER_RABIN_BASES {
        let mut x = BigUint::from(base).modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..rounds {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'bases;
            }
        }
        return false;
    }
    true
}

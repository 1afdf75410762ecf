/// Binary quadratic forms `a*x^2 + b*x*y + c*y^2` over a fixed negative
/// discriminant, with Gauss composition and square-and-multiply
/// exponentiation. Forms are immutable values; every constructor returns the
/// canonical reduced representative, so derived equality is group equality.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::numbers::solve_linear_congruence;
use crate::ClassGroupError;

/// Bytes per encoded form coordinate for a discriminant of the given bit
/// size. A 512-bit discriminant encodes each coordinate in 34 bytes.
pub fn coordinate_width(discriminant_bits: u64) -> usize {
    discriminant_bits as usize / 16 + 2
}

/// Element of the class group of a negative discriminant.
///
/// Only `a` and `b` are free; `c` is pinned by the discriminant. The triple
/// is kept reduced, which makes representatives canonical and comparison by
/// field equality sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadraticForm {
    a: BigInt,
    b: BigInt,
    c: BigInt,
}

impl QuadraticForm {
    /// Construct from `(a, b)` under a discriminant, deriving
    /// `c = (b^2 - D) / 4a`.
    ///
    /// Rejects `D >= 0`, `a <= 0` and coordinate pairs where the division is
    /// not exact (such a triple cannot lie in the group of `D`).
    pub fn from_ab_discriminant(
        a: BigInt,
        b: BigInt,
        discriminant: &BigInt,
    ) -> Result<Self, ClassGroupError> {
        if discriminant.sign() != Sign::Minus {
            return Err(ClassGroupError::NonNegativeDiscriminant);
        }
        if a.sign() != Sign::Plus {
            return Err(ClassGroupError::InvalidForm);
        }
        let numerator = &b * &b - discriminant;
        let denominator = BigInt::from(4) * &a;
        let (c, remainder) = numerator.div_mod_floor(&denominator);
        if !remainder.is_zero() {
            return Err(ClassGroupError::InvalidForm);
        }
        Ok(Self { a, b, c }.reduced())
    }

    /// The identity element `(1, 1)` of the class group of `discriminant`.
    pub fn identity(discriminant: &BigInt) -> Result<Self, ClassGroupError> {
        Self::from_ab_discriminant(BigInt::one(), BigInt::one(), discriminant)
    }

    /// The conventional generator `(2, 1)`; requires `D == 1 (mod 8)`.
    pub fn generator(discriminant: &BigInt) -> Result<Self, ClassGroupError> {
        Self::from_ab_discriminant(BigInt::from(2), BigInt::one(), discriminant)
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }

    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Recompute `b^2 - 4ac`.
    pub fn discriminant(&self) -> BigInt {
        &self.b * &self.b - BigInt::from(4) * &self.a * &self.c
    }

    /// Normal form: `-a < b <= a`.
    fn normalized(&self) -> Self {
        if -&self.a < self.b && self.b <= self.a {
            return self.clone();
        }
        let two_a = &self.a << 1;
        let r = (&self.a - &self.b).div_floor(&two_a);
        let b = &self.b + &r * &two_a;
        let c = &self.a * &r * &r + &self.b * &r + &self.c;
        Self {
            a: self.a.clone(),
            b,
            c,
        }
    }

    /// Canonical reduced representative: normalized with `a <= c`, and
    /// `b >= 0` whenever `a == c`.
    pub fn reduced(&self) -> Self {
        let mut f = self.normalized();
        while f.a > f.c || (f.a == f.c && f.b.sign() == Sign::Minus) {
            let two_c = &f.c << 1;
            let s = (&f.c + &f.b).div_floor(&two_c);
            let a = f.c.clone();
            let b = -&f.b + &s * &two_c;
            let c = &f.c * &s * &s - &f.b * &s + &f.a;
            f = Self { a, b, c };
        }
        f.normalized()
    }

    /// Gauss composition. Both operands must share a discriminant; the
    /// result is reduced.
    pub fn compose(&self, other: &Self) -> Result<Self, ClassGroupError> {
        let f1 = self.reduced();
        let f2 = other.reduced();
        let (a1, b1, c1) = (&f1.a, &f1.b, &f1.c);
        let (a2, b2) = (&f2.a, &f2.b);

        let two = BigInt::from(2);
        let g = (b2 + b1).div_floor(&two);
        let h = (b2 - b1).div_floor(&two);
        let w = a1.gcd(a2).gcd(&g);

        let j = &w;
        let s = a1.div_floor(&w);
        let t = a2.div_floor(&w);
        let u = g.div_floor(&w);

        // Solve for (k, l, m):
        //   k*t - l*s = h
        //   k*u - m*s = c2
        //   l*u - m*t = c1
        let st = &s * &t;
        let (k_temp, constant) =
            solve_linear_congruence(&(&t * &u), &(&h * &u + &s * c1), &st)
                .ok_or(ClassGroupError::Composition("primary congruence"))?;
        let (n, _) =
            solve_linear_congruence(&(&t * &constant), &(&h - &t * &k_temp), &s)
                .ok_or(ClassGroupError::Composition("secondary congruence"))?;

        let k = k_temp + constant * n;
        let l = (&t * &k - &h).div_floor(&s);
        let m = (&t * &u * &k - &h * &u - c1 * &s).div_floor(&st);

        let a3 = st;
        let b3 = j * &u - (&k * &t + &l * &s);
        let c3 = &k * &l - j * &m;
        Ok(Self {
            a: a3,
            b: b3,
            c: c3,
        }
        .reduced())
    }

    /// `self^exponent` by left-to-right square-and-multiply.
    ///
    /// `reduction_bound` caps intermediate coefficient growth: any
    /// intermediate whose leading coefficient exceeds the bound is reduced
    /// before the next composition. The returned representative is always
    /// fully reduced, so the bound never affects the result.
    pub fn pow(
        &self,
        exponent: &BigUint,
        reduction_bound: &BigUint,
    ) -> Result<Self, ClassGroupError> {
        let discriminant = self.discriminant();
        let mut result = Self::identity(&discriminant)?;
        if exponent.is_zero() {
            return Ok(result);
        }
        let base = self.reduced();
        for digit in exponent.to_radix_be(2) {
            result = result.compose(&result)?.bounded(reduction_bound);
            if digit == 1 {
                result = result.compose(&base)?.bounded(reduction_bound);
            }
        }
        Ok(result.reduced())
    }

    fn bounded(self, bound: &BigUint) -> Self {
        if self.a.magnitude() > bound {
            self.reduced()
        } else {
            self
        }
    }

    /// Fixed-width big-endian two's-complement `(a, b)` encoding,
    /// `2 * width` bytes total.
    pub fn serialize(&self, width: usize) -> Result<Vec<u8>, ClassGroupError> {
        let r = self.reduced();
        let mut out = Vec::with_capacity(2 * width);
        encode_signed_into(&mut out, &r.a, width)?;
        encode_signed_into(&mut out, &r.b, width)?;
        Ok(out)
    }
}

fn encode_signed_into(
    out: &mut Vec<u8>,
    value: &BigInt,
    width: usize,
) -> Result<(), ClassGroupError> {
    let bytes = value.to_signed_bytes_be();
    if bytes.len() > width {
        return Err(ClassGroupError::CoordinateOverflow);
    }
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0x00 };
    out.resize(out.len() + width - bytes.len(), fill);
    out.extend_from_slice(&bytes);
    Ok(())
}

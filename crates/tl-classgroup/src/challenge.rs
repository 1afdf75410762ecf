/// Fiat-Shamir challenge derivation: hash the protocol transcript
/// `(D, x, y)` to a 128-bit prime. Prover and verifier must derive the
/// challenge bit-for-bit identically or the scheme is unsound.

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use sha3::{Digest, Sha3_256};
use tracing::trace;

use crate::form::{coordinate_width, QuadraticForm};
use crate::numbers::is_probable_prime;
use crate::ClassGroupError;

const DOMAIN_TAG: &[u8] = b"prime";

/// Derive the prime challenge for the transcript `(discriminant, x, y)`.
///
/// The transcript is the minimal two's-complement encoding of the
/// discriminant followed by the fixed-width encodings of `x` and `y`.
/// Candidates are drawn as `SHA3-256(tag || counter || transcript)`
/// truncated to 16 bytes with the top and low bits forced, and the first
/// candidate passing Miller-Rabin wins.
pub fn challenge(
    discriminant: &BigInt,
    x: &QuadraticForm,
    y: &QuadraticForm,
) -> Result<BigUint, ClassGroupError> {
    let width = coordinate_width(discriminant.bits());
    let mut transcript = discriminant.to_signed_bytes_be();
    transcript.extend_from_slice(&x.serialize(width)?);
    transcript.extend_from_slice(&y.serialize(width)?);

    let mut counter = 0u64;
    loop {
        let mut hasher = Sha3_256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update(counter.to_be_bytes());
        hasher.update(&transcript);
        let digest = hasher.finalize();

        let mut candidate = BigUint::from_bytes_be(&digest[..16]);
        candidate |= BigUint::one() << 127usize;
        candidate |= BigUint::one();
        if is_probable_prime(&candidate) {
            trace!("challenge derived after {} attempts", counter + 1);
            return Ok(candidate);
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_discriminant() -> BigInt {
        "-255211775190703847597530955573826159151".parse().unwrap()
    }

    #[test]
    fn test_challenge_is_deterministic() {
        let d = test_discriminant();
        let x = QuadraticForm::generator(&d).unwrap();
        let y = QuadraticForm::identity(&d).unwrap();
        assert_eq!(challenge(&d, &x, &y).unwrap(), challenge(&d, &x, &y).unwrap());
    }

    #[test]
    fn test_challenge_separates_transcripts() {
        let d = test_discriminant();
        let x = QuadraticForm::generator(&d).unwrap();
        let y = QuadraticForm::identity(&d).unwrap();
        assert_ne!(challenge(&d, &x, &y).unwrap(), challenge(&d, &y, &x).unwrap());
    }

    #[test]
    fn test_challenge_size_and_primality() {
        let d = test_discriminant();
        let x = QuadraticForm::generator(&d).unwrap();
        let y = QuadraticForm::identity(&d).unwrap();
        let b = challenge(&d, &x, &y).unwrap();
        assert_eq!(b.bits(), 128);
        assert!(is_probable_prime(&b));
    }
}

/// Class group of binary quadratic forms of an imaginary quadratic
/// discriminant, as consumed by the Wesolowski VDF verifier.
///
/// Provides the primitive layer of the protocol: arbitrary-precision form
/// arithmetic (composition, reduction, exponentiation), coordinate
/// serialization, and the Fiat-Shamir challenge derivation shared between
/// prover and verifier.

pub mod challenge;
pub mod form;
pub mod numbers;

pub use challenge::challenge;
pub use form::{coordinate_width, QuadraticForm};
pub use numbers::{integer_fourth_root, is_probable_prime};

/// Error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClassGroupError {
    #[error("discriminant must be negative")]
    NonNegativeDiscriminant,

    #[error("invalid quadratic form coordinates")]
    InvalidForm,

    #[error("form coordinate does not fit the requested width")]
    CoordinateOverflow,

    #[error("form composition failed: {0}")]
    Composition(&'static str),
}

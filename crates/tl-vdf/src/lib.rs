/// Wesolowski VDF proof verification over the class group of binary
/// quadratic forms of an imaginary quadratic discriminant.
///
/// Given a discriminant, a starting element, a proof blob and an iteration
/// count, the verifier decides whether the blob attests that the claimed
/// output is the starting element raised to `2^iterations`, without
/// repeating the iterations. Proofs may be single-step or chained through
/// intermediate checkpoints; both entry points are pure functions of their
/// inputs and expose a single boolean, with no distinction between
/// structural and cryptographic rejection.

pub mod chained;
pub mod serialization;
pub mod wesolowski;

pub use chained::verify_chained;
pub use serialization::{decode_signed, deserialize_form};
pub use wesolowski::verify_single_step;

pub use tl_classgroup as classgroup;

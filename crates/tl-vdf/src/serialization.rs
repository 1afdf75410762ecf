/// Untrusted byte decoding for proof blobs: big-endian two's-complement
/// integers and fixed-width form coordinate pairs. All reads are bounds
/// checked by the callers slicing exact ranges; a malformed range is a
/// structural rejection, never a panic.

use num_bigint::BigInt;
use tl_classgroup::QuadraticForm;

/// Big-endian two's-complement bytes to a signed integer.
///
/// The most significant bit of the first byte is the sign bit. An empty
/// range decodes to zero.
pub fn decode_signed(bytes: &[u8]) -> BigInt {
    BigInt::from_signed_bytes_be(bytes)
}

/// Reconstruct a group element from a `2 * width`-byte `(a, b)` pair under
/// the given discriminant.
///
/// Returns `None` when the slice has the wrong length or the coordinates do
/// not describe an element of the group of `discriminant`.
pub fn deserialize_form(
    bytes: &[u8],
    discriminant: &BigInt,
    width: usize,
) -> Option<QuadraticForm> {
    if width == 0 || bytes.len() != 2 * width {
        return None;
    }
    let a = decode_signed(&bytes[..width]);
    let b = decode_signed(&bytes[width..]);
    QuadraticForm::from_ab_discriminant(a, b, discriminant).ok()
}

/// Chained (N-Wesolowski) proof verification: one blob bundling `depth`
/// intermediate checkpoints ahead of a top-level remainder, consumed from
/// the tail of the blob toward the head.

use num_bigint::BigInt;
use tl_classgroup::{coordinate_width, QuadraticForm};
use tracing::{debug, trace};

use crate::serialization::deserialize_form;
use crate::wesolowski::verify_single_step;

/// Verify a proof blob for `y = x^(2^iterations)` where `(a, b)` are the
/// coordinates of the starting element `x` and the blob carries the claimed
/// output, the top-level proof and `depth` intermediate checkpoints.
///
/// Blob layout, with `w = coordinate_width(discriminant_bit_size)`:
///
/// ```text
/// [output: 2w][proof: 2w] ([iterations: 8 BE][form: 2w][proof: 2w]) * depth
/// ```
///
/// Checkpoints are verified back to front, each chaining its form as the
/// next starting element and consuming its share of the claimed iteration
/// count; the head is then checked against the residue. `depth` is
/// authoritative: a blob whose length disagrees with it is rejected before
/// any arithmetic.
pub fn verify_chained(
    discriminant: &BigInt,
    a: &BigInt,
    b: &BigInt,
    proof_blob: &[u8],
    iterations: u64,
    discriminant_bit_size: u64,
    depth: i32,
) -> bool {
    if depth < 0 {
        return false;
    }
    let width = coordinate_width(discriminant_bit_size);
    let segment_size = 8 + 4 * width;
    let expected_len = (depth as u64)
        .checked_mul(segment_size as u64)
        .and_then(|segments| segments.checked_add(4 * width as u64));
    if expected_len != Some(proof_blob.len() as u64) {
        debug!(
            "proof blob length {} does not match depth {}",
            proof_blob.len(),
            depth
        );
        return false;
    }

    let mut current =
        match QuadraticForm::from_ab_discriminant(a.clone(), b.clone(), discriminant) {
            Ok(form) => form,
            Err(_) => return false,
        };
    let mut remaining = iterations;
    let mut offset = proof_blob.len();

    for segment in 0..depth {
        offset -= segment_size;
        let record = &proof_blob[offset..offset + segment_size];

        let mut count = [0u8; 8];
        count.copy_from_slice(&record[..8]);
        let segment_iterations = u64::from_be_bytes(count);

        let next = match deserialize_form(&record[8..8 + 2 * width], discriminant, width) {
            Some(form) => form,
            None => return false,
        };
        let segment_proof = match deserialize_form(&record[8 + 2 * width..], discriminant, width) {
            Some(form) => form,
            None => return false,
        };

        if !verify_single_step(discriminant, &current, &next, &segment_proof, segment_iterations) {
            trace!("checkpoint {} rejected", segment);
            return false;
        }
        remaining = match remaining.checked_sub(segment_iterations) {
            Some(rest) => rest,
            // a checkpoint claiming more work than the overall count
            None => return false,
        };
        current = next;
    }

    let output = match deserialize_form(&proof_blob[..2 * width], discriminant, width) {
        Some(form) => form,
        None => return false,
    };
    let final_proof = match deserialize_form(&proof_blob[2 * width..4 * width], discriminant, width)
    {
        Some(form) => form,
        None => return false,
    };
    verify_single_step(discriminant, &current, &output, &final_proof, remaining)
}

//! The Pedersen hash over Baby Jubjub.
//!
//! The input byte string is expanded LSB-first into bits, split into
//! 200-bit segments, and each segment is re-encoded as a signed windowed
//! scalar that multiplies a per-segment base point. The sum of the segment
//! terms, compressed to 32 bytes, is the hash.
//!
//! Base points are not fixed constants: segment `i` uses the first digest
//! output of a counter-indexed label that decodes to a curve point, lifted
//! into the prime-order subgroup by cofactor multiplication. Any 256-bit
//! digest works as long as hasher and verifier agree on it; the canonical
//! choice is BLAKE-256.

use std::{collections::HashMap, sync::RwLock};

use bitvec::prelude::*;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::{debug, trace};

use crate::{
    babyjub::{CompressedPoint, Point, SUB_ORDER},
    error::PedersenError,
    primitives::{self, DigestFn},
};

#[cfg(test)]
mod tests;

/// Bits consumed per window: three payload bits and one sign bit.
const WINDOW_SIZE: usize = 4;

/// Windows per full segment.
const WINDOWS_PER_SEGMENT: usize = 50;

/// Input bits per full segment.
const BITS_PER_SEGMENT: usize = WINDOW_SIZE * WINDOWS_PER_SEGMENT;

/// Base-point derivation gives up after this many candidate digests per
/// segment. Roughly half of all candidates decode, so in practice the first
/// few tries succeed.
const MAX_BASE_POINT_TRIES: u32 = 1024;

/// A Pedersen hasher with a memoized table of derived base points.
///
/// Base points depend only on the digest choice, so a hasher derives each
/// one the first time a segment index needs it and caches it for later
/// calls. Hashers with the same digest are interchangeable; the cache is an
/// instance detail, not shared process state.
pub struct PedersenHasher {
    digest: DigestFn,
    base_points: RwLock<HashMap<usize, Point>>,
}

impl PedersenHasher {
    /// The canonical hasher, deriving base points with BLAKE-256.
    pub fn new() -> Self {
        Self::with_digest(Box::new(primitives::blake256))
    }

    /// A hasher deriving base points with BLAKE2b-512.
    ///
    /// Only the first 32 digest bytes are consumed. Its base points differ
    /// from the BLAKE-256 ones, so its hashes are incompatible with the
    /// canonical instance.
    pub fn with_blake2b() -> Self {
        Self::with_digest(Box::new(primitives::blake2b512))
    }

    /// A hasher deriving base points with an injected digest.
    ///
    /// The digest must return at least 32 bytes; shorter outputs make every
    /// hash fail with [`PedersenError::InvalidGenerator`].
    pub fn with_digest(digest: DigestFn) -> Self {
        PedersenHasher {
            digest,
            base_points: RwLock::new(HashMap::new()),
        }
    }

    /// Hashes a byte string to a compressed curve point.
    ///
    /// The empty input has zero segments, so its hash is the compressed
    /// neutral element.
    pub fn hash(&self, input: &[u8]) -> Result<CompressedPoint, PedersenError> {
        let bits = input.view_bits::<Lsb0>();
        let n_segments = if bits.is_empty() {
            0
        } else {
            (bits.len() - 1) / BITS_PER_SEGMENT + 1
        };

        let mut accumulator = Point::identity();
        for segment in 0..n_segments {
            let n_windows = if segment == n_segments - 1 {
                let remaining = bits.len() - (n_segments - 1) * BITS_PER_SEGMENT;
                (remaining - 1) / WINDOW_SIZE + 1
            } else {
                WINDOWS_PER_SEGMENT
            };

            let mut scalar = BigInt::zero();
            for window in 0..n_windows {
                let mut cursor = segment * BITS_PER_SEGMENT + window * WINDOW_SIZE;

                // Digit values are 1..=8: a base value of one plus the
                // payload bits. Payload bits past the end of the input are
                // implicit zeros; the sign bit is only consumed while input
                // remains.
                let mut digit: i64 = 1;
                for bit in 0..WINDOW_SIZE - 1 {
                    if cursor >= bits.len() {
                        break;
                    }
                    if bits[cursor] {
                        digit += 1 << bit;
                    }
                    cursor += 1;
                }
                if cursor < bits.len() && bits[cursor] {
                    digit = -digit;
                }

                scalar += BigInt::from(digit) << (5 * window);
            }

            // A full segment's scalar stays well below the subgroup order
            // in magnitude, so one fold suffices to make it non-negative.
            if scalar.is_negative() {
                scalar += BigInt::from(SUB_ORDER.clone());
            }

            let base = self.base_point(segment)?;
            accumulator = accumulator.add(&base.mul_scalar(scalar.magnitude())?)?;
        }

        Ok(accumulator.pack())
    }

    /// The base point for a segment index, deriving and caching it on first
    /// use.
    ///
    /// Candidate labels are `PedersenGenerator_<segment:032>_<try:032>`
    /// (decimal, zero-padded). The first 32 digest bytes, with bit 254
    /// cleared, are decompressed; candidates that do not decode advance the
    /// try counter. A decoded point is multiplied by the cofactor and must
    /// land in the prime-order subgroup.
    fn base_point(&self, index: usize) -> Result<Point, PedersenError> {
        if let Some(point) = self
            .base_points
            .read()
            .expect("base point cache lock poisoned")
            .get(&index)
        {
            return Ok(point.clone());
        }

        for attempt in 0..MAX_BASE_POINT_TRIES {
            let label = format!("PedersenGenerator_{index:032}_{attempt:032}");
            let digest = (self.digest)(label.as_bytes());
            let Some(head) = digest.get(..32) else {
                return Err(PedersenError::InvalidGenerator);
            };

            let mut buffer = [0u8; 32];
            buffer.copy_from_slice(head);
            buffer[31] &= 0xbf;

            let Some(candidate) = Point::unpack(&CompressedPoint::from(buffer)) else {
                debug!(index, attempt, "digest is not a curve point, retrying");
                continue;
            };

            let base = candidate.mul_by_cofactor()?;
            if !base.is_in_subgroup() {
                return Err(PedersenError::InvalidGenerator);
            }

            trace!(index, attempt, "derived base point");
            self.base_points
                .write()
                .expect("base point cache lock poisoned")
                .insert(index, base.clone());
            return Ok(base);
        }

        Err(PedersenError::GeneratorDerivationExhausted(
            MAX_BASE_POINT_TRIES,
        ))
    }
}

impl Default for PedersenHasher {
    fn default() -> Self {
        PedersenHasher::new()
    }
}

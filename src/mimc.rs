//! The MiMC sponge hash.
//!
//! MiMC is a block cipher built from the `x ↦ x⁵` permutation, wrapped here
//! in an unbalanced Feistel network and used in sponge mode. The round
//! constants are derived by iterating Keccak-256 over a seed string, so two
//! sponges built from the same seed and round count agree everywhere.
//!
//! The canonical instance uses the seed `"mimcsponge"` and 220 rounds, which
//! is what circuit-side verifiers of this hash are generated against.

use crate::{fields::FieldElement, primitives};

#[cfg(test)]
mod tests;

/// The seed the canonical round constants are derived from.
pub const DEFAULT_SEED: &str = "mimcsponge";

/// The round count of the canonical instance.
pub const DEFAULT_ROUNDS: usize = 220;

/// A MiMC sponge with a fixed set of round constants.
///
/// Construction derives (or receives) the constants once; hashing reuses
/// them, so a sponge is cheap to call repeatedly and can be shared freely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimcSponge {
    constants: Vec<FieldElement>,
}

impl MimcSponge {
    /// The canonical sponge: seed `"mimcsponge"`, 220 Keccak-256-derived
    /// round constants.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED, DEFAULT_ROUNDS)
    }

    /// A sponge with Keccak-256-derived constants from a custom seed and
    /// round count.
    ///
    /// # Panics
    ///
    /// Panics if `n_rounds < 2`: the Feistel network needs at least one
    /// swapping round and one final round.
    pub fn with_seed(seed: &str, n_rounds: usize) -> Self {
        Self::with_digest(|input| primitives::keccak256(input).to_vec(), seed, n_rounds)
    }

    /// A sponge whose round constants come from an injected digest.
    ///
    /// The digest is applied to the seed bytes, then iterated over its own
    /// raw output; each output is read as an unsigned big-endian integer and
    /// canonicalized into the field. The first and last constants are pinned
    /// to zero regardless of the digest.
    ///
    /// # Panics
    ///
    /// Panics if `n_rounds < 2`.
    pub fn with_digest<F>(digest: F, seed: &str, n_rounds: usize) -> Self
    where
        F: Fn(&[u8]) -> Vec<u8>,
    {
        assert!(n_rounds >= 2, "MiMC needs at least two rounds");

        let mut constants = vec![FieldElement::zero(); n_rounds];
        let mut state = digest(seed.as_bytes());
        for constant in constants.iter_mut().take(n_rounds - 1).skip(1) {
            state = digest(&state);
            *constant = FieldElement::from_bytes_be(&state);
        }

        MimcSponge { constants }
    }

    /// A sponge using precomputed round constants.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two constants are supplied.
    pub fn from_constants(constants: Vec<FieldElement>) -> Self {
        assert!(constants.len() >= 2, "MiMC needs at least two rounds");
        MimcSponge { constants }
    }

    /// The round constants, one per round.
    pub fn constants(&self) -> &[FieldElement] {
        &self.constants
    }

    /// One application of the keyed Feistel permutation to the state
    /// `(xl, xr)`.
    ///
    /// Each round computes `t = xl + key + constants[i]` (the key alone in
    /// round zero) and raises it to the fifth power with two squarings and a
    /// multiply; every round but the last swaps the halves.
    pub fn hash(
        &self,
        xl: &FieldElement,
        xr: &FieldElement,
        key: &FieldElement,
    ) -> (FieldElement, FieldElement) {
        let mut xl = xl.clone();
        let mut xr = xr.clone();
        let last = self.constants.len() - 1;

        for (i, constant) in self.constants.iter().enumerate() {
            let t = if i == 0 {
                &xl + key
            } else {
                &(&xl + key) + constant
            };
            let t5 = &t.square().square() * &t;
            if i < last {
                let mixed = &xr + &t5;
                xr = xl;
                xl = mixed;
            } else {
                xr = &xr + &t5;
            }
        }

        (xl, xr)
    }

    /// Sponge-mode hash of a sequence of field elements.
    ///
    /// Absorbs each input by field addition into the rate half of the state
    /// and permutes; squeezes `num_outputs` outputs, re-permuting between
    /// them. `num_outputs == 0` yields an empty vector.
    pub fn multi_hash(
        &self,
        inputs: &[FieldElement],
        key: &FieldElement,
        num_outputs: usize,
    ) -> Vec<FieldElement> {
        let mut r = FieldElement::zero();
        let mut c = FieldElement::zero();

        for input in inputs {
            r = &r + input;
            (r, c) = self.hash(&r, &c, key);
        }

        let mut outputs = Vec::with_capacity(num_outputs);
        if num_outputs == 0 {
            return outputs;
        }
        outputs.push(r.clone());
        for _ in 1..num_outputs {
            (r, c) = self.hash(&r, &c, key);
            outputs.push(r.clone());
        }

        outputs
    }

    /// [`Self::multi_hash`] with a zero key and a single output.
    pub fn hash_elements(&self, inputs: &[FieldElement]) -> FieldElement {
        self.multi_hash(inputs, &FieldElement::zero(), 1).remove(0)
    }
}

impl Default for MimcSponge {
    fn default() -> Self {
        MimcSponge::new()
    }
}

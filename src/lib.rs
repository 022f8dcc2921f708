//! Circuit-friendly hash primitives over the Baby Jubjub curve.
//!
//! This crate implements the Pedersen hash and the MiMC sponge permutation
//! over the twisted-Edwards curve known as Baby Jubjub, defined over the
//! BN254 scalar field. Both primitives are designed to be cheap to express
//! inside arithmetic circuits, and their outputs are consumed by external
//! proof verifiers, so every operation here is bit-exact: values are always
//! kept in canonical form and the byte encodings match the reference
//! implementation down to the sign-bit convention.
//!
//! None of the operations are constant-time; this crate is not meant to
//! process secret data on shared hardware.
#![deny(missing_docs)]

pub mod babyjub;
pub mod error;
pub mod fields;
pub mod mimc;
pub mod pedersen;
pub mod primitives;

pub use crate::{
    babyjub::{CompressedPoint, Point},
    fields::FieldElement,
    mimc::MimcSponge,
    pedersen::PedersenHasher,
};

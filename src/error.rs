//! Errors that can occur inside any `babyjub-primitives` submodule.

use thiserror::Error;

/// Errors from canonical field arithmetic.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Division by a value that reduces to zero modulo the field prime.
    #[error("division by zero in the field")]
    DivisionByZero,
    /// `sqrt` was called on a quadratic non-residue.
    #[error("field element has no square root")]
    NoSquareRoot,
    /// A textual or byte representation could not be canonicalized.
    #[error("malformed field element representation")]
    MalformedInput,
}

/// Errors from the twisted-Edwards group law.
///
/// The unified addition formula is complete for valid curve points, so these
/// errors indicate a non-curve or malformed point fed into group-law code,
/// not a recoverable input condition.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointError {
    /// A group-law step divided by a value that reduces to zero.
    #[error("point operation divided by zero; operand is not a valid curve point")]
    InvalidPointOperation,
}

impl From<FieldError> for PointError {
    fn from(_: FieldError) -> Self {
        PointError::InvalidPointOperation
    }
}

/// Errors from Pedersen base-point derivation and hashing.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PedersenError {
    /// A derived base point failed the subgroup check after cofactor
    /// multiplication. Never expected with the fixed curve parameters;
    /// indicates a misconfigured digest function.
    #[error("derived base point is not in the prime-order subgroup")]
    InvalidGenerator,
    /// No digest output decoded to a curve point within the retry bound.
    #[error("no valid base point found after {0} tries")]
    GeneratorDerivationExhausted(u32),
    /// A group-law failure while accumulating segment terms.
    #[error(transparent)]
    Point(#[from] PointError),
}

//! Canonical arithmetic over the BN254 scalar field.
//!
//! Every value handled by this module is an integer in `[0, p)` for the fixed
//! prime `p` below. Raw signed integers are re-mapped into that range before
//! they can be observed: a negative `v` becomes `p - ((-v) mod p)`. This
//! signed-residue convention is load-bearing for the Pedersen window
//! encoding, where "negative" means strictly greater than `(p-1)/2`.

use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::FieldError;

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;

lazy_static! {
    /// The field modulus `p`, the order of the BN254 (alt_bn128) scalar field.
    ///
    /// Baby Jubjub is defined over this field, which makes its group
    /// operations cheap inside BN254-based proof systems.
    pub static ref MODULUS: BigUint = BigUint::parse_bytes(
        b"21888242871839275222246405745257275088548364400416034343698204186575808495617",
        10,
    )
    .expect("constant is a valid decimal literal");

    /// `(p - 1) / 2`, the negativity threshold and Euler's-criterion exponent.
    pub static ref HALF_MODULUS: BigUint = (&*MODULUS - 1u8) >> 1;

    static ref TONELLI: TonelliParams = TonelliParams::derive();
}

/// Precomputed parameters for the Tonelli–Shanks square root.
///
/// `p ≡ 1 (mod 4)` for this field (its 2-adicity is 28), so the direct
/// `a^((p+1)/4)` formula available for `p ≡ 3 (mod 4)` primes does not apply.
struct TonelliParams {
    /// The odd `q` in `p - 1 = q * 2^s`.
    odd_factor: BigUint,
    /// The `s` in `p - 1 = q * 2^s`.
    two_adicity: u32,
    /// `z^q mod p` for `z` the smallest quadratic non-residue.
    nonresidue_pow: BigUint,
    /// `(q + 1) / 2`, the exponent producing the initial root candidate.
    root_exponent: BigUint,
}

impl TonelliParams {
    fn derive() -> Self {
        let p_minus_one = &*MODULUS - 1u8;
        let two_adicity = p_minus_one
            .trailing_zeros()
            .expect("p - 1 is nonzero")
            .try_into()
            .expect("2-adicity of a 254-bit prime fits in u32");
        let odd_factor = &p_minus_one >> two_adicity;

        // The smallest non-residue for this prime is 5, but deriving it keeps
        // the parameters correct under Euler's criterion by construction.
        let mut z = BigUint::from(2u8);
        while z.modpow(&HALF_MODULUS, &MODULUS) != p_minus_one {
            z += 1u8;
        }

        TonelliParams {
            nonresidue_pow: z.modpow(&odd_factor, &MODULUS),
            root_exponent: (&odd_factor + 1u8) >> 1,
            odd_factor,
            two_adicity,
        }
    }
}

/// An integer in canonical form modulo [`struct@MODULUS`].
///
/// `FieldElement` is an immutable value type; operations return new values.
/// Comparison (`PartialOrd`/`Ord`) is canonical-integer comparison.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    /// Canonicalizes an unsigned integer into `[0, p)`.
    pub fn new(value: BigUint) -> Self {
        FieldElement(value % &*MODULUS)
    }

    /// Canonicalizes a raw signed integer into `[0, p)`.
    ///
    /// A negative `v` maps to `p - ((-v) mod p)`, folded so that multiples of
    /// `p` (of either sign) map to zero.
    pub fn from_signed(value: &BigInt) -> Self {
        let modulus = BigInt::from_biguint(Sign::Plus, MODULUS.clone());
        let canonical = value.mod_floor(&modulus);
        FieldElement(
            canonical
                .to_biguint()
                .expect("mod_floor by a positive modulus is non-negative"),
        )
    }

    /// Returns the canonical integer value.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// `self * self mod p`.
    pub fn square(&self) -> Self {
        FieldElement(&self.0 * &self.0 % &*MODULUS)
    }

    /// Modular exponentiation by square-and-multiply.
    ///
    /// The exponent is an arbitrary unsigned integer and may exceed `p`:
    /// internal callers raise to exponents like `(p-1)/2`.
    pub fn pow(&self, exponent: &BigUint) -> Self {
        FieldElement(self.0.modpow(exponent, &MODULUS))
    }

    /// The multiplicative inverse, via Fermat exponentiation `self^(p-2)`.
    ///
    /// Fails with [`FieldError::DivisionByZero`] for the zero element.
    pub fn inverse(&self) -> Result<Self, FieldError> {
        if self.0.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.pow(&(&*MODULUS - 2u8)))
    }

    /// `self / rhs mod p`.
    ///
    /// Fails with [`FieldError::DivisionByZero`] when `rhs` is zero.
    pub fn div(&self, rhs: &Self) -> Result<Self, FieldError> {
        Ok(self * &rhs.inverse()?)
    }

    /// The square root of `self` that is non-negative under the
    /// signed-residue convention (i.e. at most `(p-1)/2`); the other root is
    /// its negation. Point decompression relies on this normalization to
    /// round-trip the sign bit.
    ///
    /// Verifies quadratic residuosity via Euler's criterion and fails with
    /// [`FieldError::NoSquareRoot`] for non-residues.
    pub fn sqrt(&self) -> Result<Self, FieldError> {
        if self.0.is_zero() {
            return Ok(Self::zero());
        }
        if self.0.modpow(&HALF_MODULUS, &MODULUS) != BigUint::one() {
            return Err(FieldError::NoSquareRoot);
        }

        let params = &*TONELLI;
        let mut m = params.two_adicity;
        let mut c = params.nonresidue_pow.clone();
        let mut t = self.0.modpow(&params.odd_factor, &MODULUS);
        let mut r = self.0.modpow(&params.root_exponent, &MODULUS);

        while !t.is_one() {
            // Least i in (0, m) with t^(2^i) == 1; the residue check above
            // guarantees one exists.
            let mut i = 0u32;
            let mut t_pow = t.clone();
            while !t_pow.is_one() {
                t_pow = &t_pow * &t_pow % &*MODULUS;
                i += 1;
            }

            let b = c.modpow(&(BigUint::one() << (m - i - 1)), &MODULUS);
            c = &b * &b % &*MODULUS;
            t = t * &c % &*MODULUS;
            r = r * &b % &*MODULUS;
            m = i;
        }

        if r > *HALF_MODULUS {
            r = &*MODULUS - r;
        }

        Ok(FieldElement(r))
    }

    /// Integer left shift of the canonical value, re-canonicalized mod `p`.
    pub fn shift_left(&self, bits: usize) -> Self {
        FieldElement((&self.0 << bits) % &*MODULUS)
    }

    /// Integer right shift of the canonical value.
    pub fn shift_right(&self, bits: usize) -> Self {
        FieldElement(&self.0 >> bits)
    }

    /// Whether the canonical value is odd.
    pub fn is_odd(&self) -> bool {
        self.0.is_odd()
    }

    /// Whether the canonical value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value is negative under the signed-residue convention,
    /// i.e. strictly greater than `(p-1)/2`.
    pub fn is_negative(&self) -> bool {
        self.0 > *HALF_MODULUS
    }

    /// Canonicalizes an unsigned big-endian byte buffer of any length.
    ///
    /// This is the digest-output and sponge-input conversion: any raw
    /// integer is accepted and reduced, so it cannot fail.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// Canonicalizes an unsigned little-endian byte buffer of any length.
    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_le(bytes))
    }

    /// Decodes a little-endian buffer that must already be canonical.
    ///
    /// Returns `None` when the value is `p` or larger, instead of reducing.
    /// Used by point decompression, where a non-canonical `y` coordinate is
    /// an invalid encoding rather than an alias of a valid one.
    pub fn from_canonical_le_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let value = BigUint::from_bytes_le(bytes);
        if value >= *MODULUS {
            return None;
        }
        Some(FieldElement(value))
    }

    /// The canonical value as 32 big-endian bytes, zero-padded on the left.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        bytes
    }

    /// The canonical value as 32 little-endian bytes, zero-padded on the right.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_le();
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(&raw);
        bytes
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        // Always below p.
        FieldElement(BigUint::from(value))
    }
}

impl From<FieldElement> for BigUint {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

impl FromStr for FieldElement {
    type Err = FieldError;

    /// Parses a decimal integer, canonicalizing mod `p`. A leading `-` is
    /// accepted and mapped through the signed-residue rule.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigInt::parse_bytes(s.as_bytes(), 10).ok_or(FieldError::MalformedInput)?;
        Ok(Self::from_signed(&value))
    }
}

impl Add for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: Self) -> FieldElement {
        // Both operands are canonical, so the sum is below 2p.
        let sum = &self.0 + &rhs.0;
        if sum >= *MODULUS {
            FieldElement(sum - &*MODULUS)
        } else {
            FieldElement(sum)
        }
    }
}

impl Sub for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: Self) -> FieldElement {
        if self.0 >= rhs.0 {
            FieldElement(&self.0 - &rhs.0)
        } else {
            FieldElement(&*MODULUS - (&rhs.0 - &self.0))
        }
    }
}

impl Mul for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: Self) -> FieldElement {
        FieldElement(&self.0 * &rhs.0 % &*MODULUS)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    /// `p - self` for nonzero values; zero stays zero.
    fn neg(self) -> FieldElement {
        if self.0.is_zero() {
            FieldElement::zero()
        } else {
            FieldElement(&*MODULUS - &self.0)
        }
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("FieldElement")
            .field(&format!("{:x}", self.0))
            .finish()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for FieldElement {
    /// Unpadded lowercase hex of the canonical integer, matching the
    /// interop convention for sponge outputs.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

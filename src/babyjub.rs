//! The Baby Jubjub twisted-Edwards curve group.
//!
//! Baby Jubjub is the curve `A·x² + y² = 1 + D·x²·y²` over the BN254 scalar
//! field, with `A = 168700` and `D = 168696`. Its parameters satisfy the
//! completeness conditions for the unified twisted-Edwards addition law, so
//! one formula covers addition, doubling, and the neutral element without
//! special cases.
//!
//! The curve has cofactor 8; security-relevant callers work in the
//! prime-order subgroup of order [`struct@SUB_ORDER`] and check membership
//! with [`Point::is_in_subgroup`].

use std::fmt;

use hex::{FromHex, FromHexError, ToHex};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{
    error::PointError,
    fields::{FieldElement, HALF_MODULUS},
};

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;

lazy_static! {
    /// The order of the full Baby Jubjub curve group.
    pub static ref CURVE_ORDER: BigUint = BigUint::parse_bytes(
        b"21888242871839275222246405745257275088614511777268538073601725287587578984328",
        10,
    )
    .expect("constant is a valid decimal literal");

    /// The order of the prime-order subgroup, `CURVE_ORDER / 8`.
    pub static ref SUB_ORDER: BigUint = &*CURVE_ORDER >> 3u32;

    /// The curve coefficient `A = 168700`.
    pub static ref COEFF_A: FieldElement = FieldElement::from(168700);

    /// The curve coefficient `D = 168696`.
    pub static ref COEFF_D: FieldElement = FieldElement::from(168696);

    /// The conventional generator of the prime-order subgroup ("Base8"):
    /// the standard generator point multiplied by the cofactor.
    pub static ref BASE8: Point = Point {
        x: "5299619240641551281634865583518297030282874472190772894086521144482721001553"
            .parse()
            .expect("constant is a valid decimal literal"),
        y: "16950150798460657717958625567821834550301663161624707787222815936182638968203"
            .parse()
            .expect("constant is a valid decimal literal"),
    };
}

/// The cofactor separating the curve order from the subgroup order.
pub const COFACTOR: u64 = 8;

/// An affine point on Baby Jubjub.
///
/// Points are immutable value types; the group operations return new points.
/// Coordinates are public for interoperability testing, but arbitrary
/// coordinate pairs are not necessarily on the curve: validate with
/// [`Point::is_on_curve`] before feeding external data into group-law code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    /// The x coordinate. Carries the sign under the compressed encoding.
    pub x: FieldElement,
    /// The y coordinate.
    pub y: FieldElement,
}

impl Point {
    /// The neutral element `(0, 1)`.
    pub fn identity() -> Self {
        Point {
            x: FieldElement::zero(),
            y: FieldElement::one(),
        }
    }

    /// Whether this point is the neutral element.
    ///
    /// Both coordinates are checked: `x == 0` alone also holds for the
    /// order-2 point `(0, -1)`.
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == FieldElement::one()
    }

    /// Unified twisted-Edwards addition. Valid for doubling (`self == rhs`)
    /// and for the neutral element.
    ///
    /// Fails with [`PointError::InvalidPointOperation`] if a denominator
    /// reduces to zero, which cannot happen for points on the curve.
    pub fn add(&self, rhs: &Point) -> Result<Point, PointError> {
        let beta = &self.x * &rhs.y;
        let gamma = &self.y * &rhs.x;
        let delta = &(&self.y - &(&*COEFF_A * &self.x)) * &(&rhs.x + &rhs.y);
        let tau = &beta * &gamma;
        let d_tau = &*COEFF_D * &tau;

        let one = FieldElement::one();
        let x = (&beta + &gamma).div(&(&one + &d_tau))?;
        let y = (&(&delta + &(&*COEFF_A * &beta)) - &gamma).div(&(&one - &d_tau))?;

        Ok(Point { x, y })
    }

    /// The point doubled.
    pub fn double(&self) -> Result<Point, PointError> {
        self.add(self)
    }

    /// Double-and-add scalar multiplication, scanning the scalar's bits
    /// from least to most significant.
    pub fn mul_scalar(&self, scalar: &BigUint) -> Result<Point, PointError> {
        let mut result = Point::identity();
        let mut addend = self.clone();
        let mut remaining = scalar.clone();

        while !remaining.is_zero() {
            if remaining.bit(0) {
                result = result.add(&addend)?;
            }
            addend = addend.double()?;
            remaining >>= 1u32;
        }

        Ok(result)
    }

    /// The point multiplied by the cofactor 8.
    pub fn mul_by_cofactor(&self) -> Result<Point, PointError> {
        self.mul_scalar(&BigUint::from(COFACTOR))
    }

    /// Whether the coordinates satisfy the curve equation.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let lhs = &(&*COEFF_A * &x2) + &y2;
        let rhs = &FieldElement::one() + &(&(&x2 * &y2) * &*COEFF_D);
        lhs == rhs
    }

    /// Whether the point is on the curve and in the prime-order subgroup,
    /// i.e. `SUB_ORDER · self` is the neutral element.
    pub fn is_in_subgroup(&self) -> bool {
        if !self.is_on_curve() {
            return false;
        }
        match self.mul_scalar(&SUB_ORDER) {
            Ok(product) => product.is_identity(),
            Err(_) => false,
        }
    }

    /// Compresses the point to 32 bytes: `y` in little-endian, with the most
    /// significant bit of the last byte set when `x > (p-1)/2`.
    pub fn pack(&self) -> CompressedPoint {
        let mut bytes = self.y.to_bytes_le();
        if self.x.as_biguint() > &*HALF_MODULUS {
            bytes[31] |= 0x80;
        }
        CompressedPoint(bytes)
    }

    /// Decompresses 32 bytes into a curve point.
    ///
    /// This is a total parser: any validation failure, whether a `y`
    /// coordinate at or above the field modulus or a `y` for which no `x`
    /// exists on the curve, yields `None` rather than an error. Points
    /// returned here are
    /// always on the curve, but not necessarily in the prime-order subgroup.
    pub fn unpack(bytes: &CompressedPoint) -> Option<Point> {
        let mut buffer = bytes.0;
        let sign = buffer[31] & 0x80 != 0;
        buffer[31] &= 0x7f;

        let y = FieldElement::from_canonical_le_bytes(&buffer)?;
        let y2 = y.square();

        // x² = (1 - y²) / (A - D·y²); the right-hand side must be a
        // quadratic residue for y to correspond to a curve point.
        let numerator = &FieldElement::one() - &y2;
        let denominator = &*COEFF_A - &(&*COEFF_D * &y2);
        let x2 = numerator.div(&denominator).ok()?;

        let mut x = x2.sqrt().ok()?;
        if sign {
            x = -&x;
        }

        Some(Point { x, y })
    }
}

/// A Baby Jubjub point in its 32-byte compressed encoding.
///
/// The encoding is the little-endian `y` coordinate with the top bit of the
/// last byte repurposed as the sign of `x`. Hex displays use the byte order
/// of the buffer itself, matching the reference vectors.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompressedPoint(pub(crate) [u8; 32]);

impl CompressedPoint {
    /// Return the raw serialized bytes of this compressed point.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Debug for CompressedPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CompressedPoint")
            .field(&hex::encode(self.0))
            .finish()
    }
}

impl From<[u8; 32]> for CompressedPoint {
    fn from(bytes: [u8; 32]) -> Self {
        CompressedPoint(bytes)
    }
}

impl From<CompressedPoint> for [u8; 32] {
    fn from(packed: CompressedPoint) -> [u8; 32] {
        packed.0
    }
}

impl PartialEq<[u8; 32]> for CompressedPoint {
    fn eq(&self, other: &[u8; 32]) -> bool {
        &self.0 == other
    }
}

impl ToHex for &CompressedPoint {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.0.encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.0.encode_hex_upper()
    }
}

impl FromHex for CompressedPoint {
    type Error = FromHexError;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        Ok(CompressedPoint(<[u8; 32]>::from_hex(hex)?))
    }
}

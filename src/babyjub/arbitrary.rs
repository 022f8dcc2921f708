//! Randomised test data generation for curve points.

use proptest::{arbitrary::any, prelude::*};

use num_bigint::BigUint;

use super::{Point, BASE8};

impl Arbitrary for Point {
    type Parameters = ();

    /// A random point of the prime-order subgroup: `BASE8` times a random
    /// scalar. Scalar zero yields the neutral element, which is a valid
    /// (and worthwhile) case for the group-law properties.
    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        proptest::array::uniform32(any::<u8>())
            .prop_map(|bytes| {
                BASE8
                    .mul_scalar(&BigUint::from_bytes_le(&bytes))
                    .expect("scalar multiplication of a curve point cannot fail")
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

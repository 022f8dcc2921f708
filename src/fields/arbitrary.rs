//! Randomised test data generation for field elements.

use proptest::{arbitrary::any, array, prelude::*};

use super::FieldElement;

impl Arbitrary for FieldElement {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        array::uniform32(any::<u8>())
            .prop_map(|bytes| FieldElement::from_bytes_be(&bytes))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

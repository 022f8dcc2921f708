//! Pedersen hash tests against the reference vectors.

use proptest::prelude::*;

use super::PedersenHasher;
use crate::{babyjub::Point, error::PedersenError};

fn point(x: &str, y: &str) -> Point {
    Point {
        x: x.parse().expect("test literal is valid decimal"),
        y: y.parse().expect("test literal is valid decimal"),
    }
}

#[test]
fn hello_vector() {
    let hasher = PedersenHasher::new();
    let hash = hasher.hash(b"Hello").expect("hashing succeeds");
    assert_eq!(
        hex::encode(hash.to_bytes()),
        "0e90d7d613ab8b5ea7f4f8bc537db6bb0fa2e5e97bbac1c1f609ef9e6a35fd8b"
    );
}

#[test]
fn empty_input_hashes_to_the_packed_neutral_element() {
    let hasher = PedersenHasher::new();
    let hash = hasher.hash(&[]).expect("hashing succeeds");
    assert_eq!(
        hex::encode(hash.to_bytes()),
        "0100000000000000000000000000000000000000000000000000000000000000"
    );
}

#[test]
fn multi_segment_vector() {
    // 32 bytes is 256 bits: a full 200-bit segment plus a 56-bit tail.
    let input: Vec<u8> = (0u8..32).collect();
    let hasher = PedersenHasher::new();
    let hash = hasher.hash(&input).expect("hashing succeeds");
    assert_eq!(
        hex::encode(hash.to_bytes()),
        "3b8b309e4979c8ad186a18c7895478e5e5f6dff59d2b91d3e71824cf7d5e3da1"
    );

    let unpacked = Point::unpack(&hash).expect("hash output decodes");
    assert!(unpacked.is_in_subgroup());
}

#[test]
fn derived_base_points() {
    let hasher = PedersenHasher::new();

    // Segment 1 is the interesting case: its first two candidate digests do
    // not decode, so derivation lands on try index 2.
    let expected = [
        point(
            "10457101036533406547632367118273992217979173478358440826365724437999023779287",
            "19824078218392094440610104313265183977899662750282163392862422243483260492317",
        ),
        point(
            "2671756056509184035029146175565761955751135805354291559563293617232983272177",
            "2663205510731142763556352975002641716101654201788071096152948830924149045094",
        ),
        point(
            "5802099305472655231388284418920769829666717045250560929368476121199858275951",
            "5980429700218124965372158798884772646841287887664001482443826541541529227896",
        ),
    ];

    for (index, expected) in expected.iter().enumerate() {
        let base = hasher.base_point(index).expect("derivation succeeds");
        assert_eq!(&base, expected, "base point {index}");
        assert!(base.is_in_subgroup());

        // Cached lookups return the same point.
        assert_eq!(&hasher.base_point(index).expect("cache hit succeeds"), expected);
    }
}

#[test]
fn hashers_with_the_same_digest_agree() {
    let a = PedersenHasher::new();
    let b = PedersenHasher::default();
    let input = b"pedersen determinism check";

    let first = a.hash(input).expect("hashing succeeds");
    assert_eq!(first, a.hash(input).expect("hashing succeeds"));
    assert_eq!(first, b.hash(input).expect("hashing succeeds"));
}

#[test]
fn blake2b_variant_is_consistent_but_incompatible() {
    let blake2b = PedersenHasher::with_blake2b();
    let canonical = PedersenHasher::new();
    let input = b"Hello";

    let hash = blake2b.hash(input).expect("hashing succeeds");
    assert_eq!(hash, blake2b.hash(input).expect("hashing succeeds"));
    assert_ne!(hash, canonical.hash(input).expect("hashing succeeds"));

    let unpacked = Point::unpack(&hash).expect("hash output decodes");
    assert!(unpacked.is_in_subgroup());
}

#[test]
fn short_digest_output_is_rejected() {
    let hasher = PedersenHasher::with_digest(Box::new(|input| input[..1].to_vec()));
    assert_eq!(hasher.hash(b"x"), Err(PedersenError::InvalidGenerator));
}

proptest! {
    // Every case multiplies several 200-bit scalars onto derived bases.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn hash_output_is_a_subgroup_point(input in proptest::collection::vec(any::<u8>(), 0..64)) {
        let hasher = PedersenHasher::new();
        let hash = hasher.hash(&input).expect("hashing succeeds");
        let unpacked = Point::unpack(&hash).expect("hash output decodes");
        prop_assert!(unpacked.is_in_subgroup());
    }

    #[test]
    fn single_bit_flips_change_the_hash(input in proptest::collection::vec(any::<u8>(), 1..32), flip in 0usize..256) {
        let hasher = PedersenHasher::new();
        let reference = hasher.hash(&input).expect("hashing succeeds");

        let mut flipped = input.clone();
        let byte = flip % flipped.len();
        let bit = (flip / flipped.len()) % 8;
        flipped[byte] ^= 1 << bit;

        prop_assert_ne!(hasher.hash(&flipped).expect("hashing succeeds"), reference);
    }
}

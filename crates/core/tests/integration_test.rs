//! Integration tests for the full codec pipeline.
//!
//! These tests go through the public API only: compress -> serialize the
//! sidecar -> parse it back -> decompress, and verify the output matches
//! the input byte for byte.

use huffpack_core::{
    compress, decompress, decompress_with_sidecar, error::MetadataError, Error, MetadataRecord,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use test_case::test_case;

/// Compress, persist the sidecar to bytes, then restore from both.
fn round_trip(data: &[u8]) -> Vec<u8> {
    let compressed = compress(data).expect("compression failed");

    let mut sidecar = Vec::new();
    compressed
        .write_sidecar(&mut sidecar)
        .expect("sidecar write failed");

    decompress_with_sidecar(&compressed.packed, &sidecar).expect("decompression failed")
}

#[test_case(b""; "empty")]
#[test_case(b"a"; "single byte")]
#[test_case(b"ab"; "two distinct bytes")]
#[test_case(b"aaab"; "skewed pair")]
#[test_case(b"abracadabra"; "short word")]
#[test_case(b"\x00\x00\x00\xff\x80\x7f"; "signed boundary bytes")]
#[test_case(b"The quick brown fox jumps over the lazy dog."; "pangram")]
fn test_round_trip_literals(data: &[u8]) {
    assert_eq!(round_trip(data), data);
}

#[test]
fn test_round_trip_random_buffers() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let len = rng.gen_range(0..2048);
        let alphabet = rng.gen_range(1..=256usize);
        let data: Vec<u8> = (0..len)
            .map(|_| rng.gen_range(0..alphabet) as u8)
            .collect();

        assert_eq!(round_trip(&data), data);
    }
}

#[test]
fn test_round_trip_skewed_distribution() {
    // Fibonacci-like counts give a maximally deep tree.
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..20u8 {
        data.extend(std::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }

    assert_eq!(round_trip(&data), data);
}

#[test]
fn test_full_alphabet() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 5 + 17).collect();
    let compressed = compress(&data).unwrap();
    assert_eq!(compressed.metadata.symbol_count(), 256);
    assert_eq!(decompress(&compressed.packed, &compressed.metadata).unwrap(), data);
}

#[test]
fn test_determinism() {
    let data = b"she sells sea shells by the sea shore".repeat(7);

    let first = compress(&data).unwrap();
    let second = compress(&data).unwrap();

    assert_eq!(first.packed, second.packed);
    assert_eq!(first.metadata.to_bytes(), second.metadata.to_bytes());
}

#[test_case(1, 1, 7; "one")]
#[test_case(8, 1, 0; "exactly one byte")]
#[test_case(9, 2, 7; "spills into second byte")]
#[test_case(1000, 125, 0; "thousand")]
#[test_case(1001, 126, 7; "thousand and one")]
fn test_single_symbol(n: usize, packed_len: usize, padding: u8) {
    let data = vec![b'q'; n];
    let compressed = compress(&data).unwrap();

    assert_eq!(compressed.metadata.symbol_count(), 1);
    assert_eq!(compressed.packed.len(), packed_len);
    assert_eq!(compressed.metadata.padding(), padding);
    assert!(compressed.packed.iter().all(|&byte| byte == 0));

    assert_eq!(decompress(&compressed.packed, &compressed.metadata).unwrap(), data);
}

#[test]
fn test_empty_buffer() {
    let compressed = compress(b"").unwrap();
    assert!(compressed.packed.is_empty());
    assert_eq!(compressed.metadata.symbol_count(), 0);
    assert_eq!(compressed.metadata.padding(), 0);
    assert_eq!(compressed.metadata.original_size(), 0);

    let sidecar = compressed.metadata.to_bytes();
    assert!(decompress_with_sidecar(&[], &sidecar).unwrap().is_empty());
}

#[test]
fn test_aaab() {
    let compressed = compress(b"aaab").unwrap();
    assert_eq!(compressed.packed.len(), 1);
    assert_eq!(compressed.metadata.padding(), 4);
    assert_eq!(compressed.metadata.original_size(), 4);

    assert_eq!(
        decompress(&compressed.packed, &compressed.metadata).unwrap(),
        b"aaab"
    );
}

#[test]
fn test_truncated_sidecar_is_rejected() {
    let data = b"truncation must never decode to a wrong answer";
    let compressed = compress(data).unwrap();
    let sidecar = compressed.metadata.to_bytes();

    for len in 0..sidecar.len() {
        let err = decompress_with_sidecar(&compressed.packed, &sidecar[..len]).unwrap_err();
        assert!(
            err.is_metadata_missing_or_truncated(),
            "prefix of {len} bytes gave {err}"
        );
    }
}

#[test]
fn test_missing_sidecar() {
    let compressed = compress(b"abc").unwrap();
    let err = decompress_with_sidecar(&compressed.packed, &[]).unwrap_err();
    assert!(matches!(err, Error::Metadata(MetadataError::Missing)));
}

#[test]
fn test_mismatched_sidecar_is_corruption() {
    let one = compress(b"aaaab").unwrap();
    let other = compress(b"abcdefgh").unwrap();

    let result = decompress(&one.packed, &other.metadata);
    assert!(matches!(result, Err(Error::StreamCorruption(_))));
}

#[test]
fn test_sidecar_survives_reader_round_trip() {
    let compressed = compress(b"persist me").unwrap();

    let mut stored = Vec::new();
    compressed.write_sidecar(&mut stored).unwrap();
    let parsed = MetadataRecord::read_from(&mut stored.as_slice()).unwrap();

    assert_eq!(parsed, compressed.metadata);
}

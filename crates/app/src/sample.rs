//! Seeded sample data for the `demo` command.
//!
//! The generated buffer alternates sections with very different symbol
//! statistics so the size report shows how the frequency table and the
//! packed payload react:
//! - runs of a single byte (one-symbol alphabet, 1-bit codes)
//! - text drawn from a small alphabet
//! - short repeating patterns
//! - uniformly random bytes (close to 8 bits per symbol)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest single section
const SECTION_BYTES: usize = 8192;

const TEXT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz .,!\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Run,
    Text,
    Pattern,
    Noise,
}

impl Section {
    fn pick(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..10) {
            0..=2 => Section::Run,
            3..=5 => Section::Text,
            6..=7 => Section::Pattern,
            _ => Section::Noise,
        }
    }
}

/// Generate exactly `size_bytes` of sample data from `seed`.
///
/// The same seed and size always produce the same bytes.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let len = (size_bytes - data.len()).min(SECTION_BYTES);

        match Section::pick(&mut rng) {
            Section::Run => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(len));
            }
            Section::Text => {
                data.extend((0..len).map(|_| TEXT_ALPHABET[rng.gen_range(0..TEXT_ALPHABET.len())]));
            }
            Section::Pattern => {
                let pattern: Vec<u8> = (0..rng.gen_range(4..=32)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().copied().cycle().take(len));
            }
            Section::Noise => {
                data.extend((0..len).map(|_| rng.gen::<u8>()));
            }
        }
    }

    data
}

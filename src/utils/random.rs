//! Random text generation for benchmarking

use rand::Rng;

const DNA: &[u8; 4] = b"ACGT";

/// Alphabet used for generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Alphabet {
    /// A, C, G, T
    Dna,
    /// Printable ASCII from `!` to `~`, which gives much wider branching
    Ascii,
}

/// Generate `len` random symbols from `alphabet`
pub fn random_text<R: Rng>(alphabet: Alphabet, len: usize, rng: &mut R) -> Vec<u8> {
    match alphabet {
        Alphabet::Dna => (0..len).map(|_| DNA[rng.gen_range(0..DNA.len())]).collect(),
        Alphabet::Ascii => (0..len).map(|_| rng.gen_range(b'!'..=b'~')).collect(),
    }
}

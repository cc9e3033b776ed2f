//! Random inputs: a text, and a pattern copied from it with some mutations.

use crate::types::Sequence;
use clap::Parser;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
pub struct GenerateArgs {
    /// The number of pattern/text pairs to generate
    #[clap(short = 'x', long, default_value_t = 1, display_order = 2)]
    pub cnt: usize,

    /// Length of generated texts
    #[clap(short = 'n', long, display_order = 3, requires = "pattern_length")]
    pub length: Option<usize>,

    /// Length of the pattern copied from the text
    #[clap(short = 'm', long, display_order = 3, requires = "length")]
    pub pattern_length: Option<usize>,

    /// Fraction of the pattern that is mutated after copying
    #[clap(short, long, default_value_t = 0.1, display_order = 4)]
    pub error_rate: f32,

    /// Seed to initialize RNG for reproducability
    #[clap(long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    pub fn to_generate_options(&self) -> Option<GenerateOptions> {
        Some(GenerateOptions {
            length: self.length?,
            pattern_length: self.pattern_length?,
            error_rate: self.error_rate,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GenerateOptions {
    pub length: usize,
    pub pattern_length: usize,
    pub error_rate: f32,
}

const ALPH: [u8; 4] = *b"ACGT";

enum Mutation {
    // Replace char at pos.
    Substitution(usize, u8),
    // Insert char before pos.
    Insertion(usize, u8),
    // Delete char at pos.
    Deletion(usize),
}

fn rand_char(rng: &mut impl Rng) -> u8 {
    ALPH[rng.gen_range(0..ALPH.len())]
}

fn random_mutation(len: usize, rng: &mut impl Rng) -> Mutation {
    // Substitution / insertion / deletion all with equal probability.
    // Never delete the last character.
    match if len <= 1 {
        rng.gen_range(0..2usize)
    } else {
        rng.gen_range(0..3usize)
    } {
        0 if len > 0 => Mutation::Substitution(rng.gen_range(0..len), rand_char(rng)),
        0 | 1 => Mutation::Insertion(rng.gen_range(0..len + 1), rand_char(rng)),
        2 => Mutation::Deletion(rng.gen_range(0..len)),
        _ => unreachable!(),
    }
}

/// A random text of length `opt.length`, and a pattern made by copying a
/// random window of `opt.pattern_length` characters and applying
/// `ceil(error_rate * pattern_length)` random edits.
///
/// The pattern is never empty and never longer than the text.
pub fn generate_pair(opt: &GenerateOptions, rng: &mut impl Rng) -> (Sequence, Sequence) {
    let n = opt.length.max(1);
    let m = opt.pattern_length.clamp(1, n);
    let text = (0..n).map(|_| rand_char(rng)).collect_vec();
    let offset = rng.gen_range(0..=n - m);
    let mut pattern = text[offset..offset + m].to_vec();

    let num_mutations = (opt.error_rate * m as f32).ceil() as usize;
    for _ in 0..num_mutations {
        match random_mutation(pattern.len(), rng) {
            Mutation::Substitution(i, c) => pattern[i] = c,
            Mutation::Insertion(i, c) => pattern.insert(i, c),
            Mutation::Deletion(i) => {
                pattern.remove(i);
            }
        }
    }
    pattern.truncate(n);
    (pattern, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_pairs_are_valid() {
        let rng = &mut ChaCha8Rng::seed_from_u64(31415);
        for (n, m, e) in [(1, 1, 1.0), (10, 4, 0.0), (50, 10, 0.5), (100, 100, 0.3)] {
            let opt = GenerateOptions {
                length: n,
                pattern_length: m,
                error_rate: e,
            };
            for _ in 0..20 {
                let (p, t) = generate_pair(&opt, rng);
                assert_eq!(t.len(), n);
                assert!(!p.is_empty() && p.len() <= t.len());
                assert!(p.iter().chain(&t).all(|c| ALPH.contains(c)));
            }
        }
    }

    #[test]
    fn no_errors_copies_a_window() {
        let rng = &mut ChaCha8Rng::seed_from_u64(2);
        let opt = GenerateOptions {
            length: 40,
            pattern_length: 8,
            error_rate: 0.0,
        };
        let (p, t) = generate_pair(&opt, rng);
        assert!(t.windows(8).any(|w| w == p));
    }
}

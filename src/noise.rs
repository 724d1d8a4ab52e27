//! Character-level noise injection
//!
//! Each position of a text is corrupted independently: with probability
//! 1 - eps the character is kept, otherwise it is replaced by a symbol drawn
//! uniformly from the other |S| - 1 alphabet symbols. The expected Hamming
//! distance between input and output is therefore eps * n.
//!
//! Randomness always comes from the caller (any `rand::Rng`), so concurrent
//! callers with distinct generators never interfere and seeded runs are
//! reproducible.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DriftError, Result};

/// Noise level eps in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NoiseLevel(f64);

impl NoiseLevel {
    pub const ZERO: NoiseLevel = NoiseLevel(0.0);
    pub const FULL: NoiseLevel = NoiseLevel(1.0);

    /// Validate a probability in [0, 1]
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DriftError::InvalidNoiseLevel { value });
        }
        Ok(Self(value))
    }

    /// Noise level from a percentage (e.g. 25 -> 0.25)
    pub fn from_percent(percent: u8) -> Result<Self> {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for NoiseLevel {
    type Error = DriftError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NoiseLevel> for f64 {
    fn from(level: NoiseLevel) -> f64 {
        level.0
    }
}

impl fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

/// Replacement alphabet (at least two distinct symbols)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet, dropping duplicate symbols but keeping first-seen order
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let mut unique: Vec<char> = Vec::new();
        for c in symbols {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        if unique.len() < 2 {
            return Err(DriftError::InvalidAlphabet { size: unique.len() });
        }

        Ok(Self { symbols: unique })
    }

    /// The 26 lowercase ASCII letters
    pub fn lowercase_ascii() -> Self {
        Self {
            symbols: ('a'..='z').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Draw a symbol different from `original`, uniformly
    fn replacement<R: Rng + ?Sized>(&self, original: char, rng: &mut R) -> char {
        match self.symbols.iter().position(|&c| c == original) {
            Some(pos) => {
                // Uniform over the other |S| - 1 symbols: skip the original's slot
                let mut idx = rng.gen_range(0..self.symbols.len() - 1);
                if idx >= pos {
                    idx += 1;
                }
                self.symbols[idx]
            }
            None => self.symbols[rng.gen_range(0..self.symbols.len())],
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lowercase_ascii()
    }
}

/// Perturbed text plus the character positions that changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoisyText {
    pub text: String,
    pub changed_positions: Vec<usize>,
}

impl NoisyText {
    /// Hamming distance to the input
    pub fn changes(&self) -> usize {
        self.changed_positions.len()
    }
}

/// Character-independent noise injector
#[derive(Debug, Clone, Default)]
pub struct NoiseInjector {
    alphabet: Alphabet,
    preserve_whitespace: bool,
}

impl NoiseInjector {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            preserve_whitespace: false,
        }
    }

    /// Never corrupt whitespace positions
    ///
    /// With this set the expected Hamming distance is eps times the number
    /// of non-whitespace characters.
    pub fn preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Perturb `text` at noise level `level` using `rng`
    pub fn inject<R: Rng + ?Sized>(&self, text: &str, level: NoiseLevel, rng: &mut R) -> NoisyText {
        let eps = level.value();
        let mut out = String::with_capacity(text.len());
        let mut changed_positions = Vec::new();

        for (pos, c) in text.chars().enumerate() {
            if self.preserve_whitespace && c.is_whitespace() {
                out.push(c);
                continue;
            }

            // gen::<f64>() is in [0, 1): eps = 0 never corrupts, eps = 1 always does
            if rng.gen::<f64>() < eps {
                out.push(self.alphabet.replacement(c, rng));
                changed_positions.push(pos);
            } else {
                out.push(c);
            }
        }

        debug!(
            chars = text.chars().count(),
            changed = changed_positions.len(),
            epsilon = eps,
            "Injected character noise"
        );

        NoisyText {
            text: out,
            changed_positions,
        }
    }
}

/// Perturb `text` with the default lowercase alphabet and a seeded `StdRng`
pub fn inject_noise(text: &str, epsilon: f64, rng_seed: u64) -> Result<String> {
    let level = NoiseLevel::new(epsilon)?;
    let mut rng = StdRng::seed_from_u64(rng_seed);
    Ok(NoiseInjector::default().inject(text, level, &mut rng).text)
}

/// Number of positions at which two equal-length texts differ
pub fn hamming_distance(a: &str, b: &str) -> Result<usize> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a != len_b {
        return Err(DriftError::invalid_input(
            "hamming_distance",
            format!("texts differ in length: {} != {}", len_a, len_b),
        ));
    }
    Ok(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count())
}

//! Cosine distance and surface text similarity
//!
//! Cosine distance d(u, v) = 1 - (u.v)/(|u||v|) lies in [0, 2]. It is
//! symmetric and zero exactly for positive multiples, but it is NOT a
//! metric: the triangle inequality fails, e.g. for (1,0), (1,1), (0,1).
//! Callers must not use it for metric-space pruning.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{DriftError, Result};
use crate::vectorizer::Embedding;

/// Cosine similarity in [-1, 1]
///
/// Fails with `UndefinedDistance` when either vector has zero magnitude,
/// with `DimensionMismatch` when lengths differ and with `InvalidInput` when
/// a component is NaN or infinite.
pub fn cosine_similarity(u: &[f64], v: &[f64]) -> Result<f64> {
    if u.len() != v.len() {
        return Err(DriftError::DimensionMismatch {
            operation: "cosine_similarity",
            left: u.len(),
            right: v.len(),
        });
    }

    let max_u = max_magnitude("cosine_similarity", u)?;
    let max_v = max_magnitude("cosine_similarity", v)?;
    if max_u == 0.0 {
        return Err(DriftError::UndefinedDistance {
            operation: "cosine_similarity",
            which: "first",
        });
    }
    if max_v == 0.0 {
        return Err(DriftError::UndefinedDistance {
            operation: "cosine_similarity",
            which: "second",
        });
    }

    // Components scaled into [-1, 1]: squares cannot overflow, and the
    // largest component contributes exactly 1 so norms cannot underflow
    let (mut dot, mut sq_u, mut sq_v) = (0.0, 0.0, 0.0);
    for (x, y) in u.iter().zip(v) {
        let (x, y) = (x / max_u, y / max_v);
        dot += x * y;
        sq_u += x * x;
        sq_v += y * y;
    }

    similarity_from_parts("cosine_similarity", dot, sq_u.sqrt(), sq_v.sqrt())
}

/// Largest |x|, rejecting non-finite components
fn max_magnitude(operation: &'static str, values: &[f64]) -> Result<f64> {
    let mut max = 0.0f64;
    for (i, x) in values.iter().enumerate() {
        if !x.is_finite() {
            return Err(DriftError::invalid_input(
                operation,
                format!("component {} is not finite ({})", i, x),
            ));
        }
        max = max.max(x.abs());
    }
    Ok(max)
}

/// Cosine distance 1 - cos(u, v), clamped into [0, 2]
pub fn cosine_distance(u: &[f64], v: &[f64]) -> Result<f64> {
    let similarity = cosine_similarity(u, v).map_err(|err| rename_operation(err, "cosine_distance"))?;
    let distance = (1.0 - similarity).clamp(0.0, 2.0);
    debug!(distance, dimension = u.len(), "Calculated cosine distance");
    Ok(distance)
}

impl Embedding {
    /// Cosine distance between two embeddings of the same vocabulary
    pub fn cosine_distance(&self, other: &Embedding) -> Result<f64> {
        if self.dimension() != other.dimension() {
            return Err(DriftError::DimensionMismatch {
                operation: "embedding_cosine_distance",
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        let similarity =
            similarity_from_parts("embedding_cosine_distance", self.dot(other), self.norm(), other.norm())?;
        Ok((1.0 - similarity).clamp(0.0, 2.0))
    }
}

fn similarity_from_parts(operation: &'static str, dot: f64, mag_u: f64, mag_v: f64) -> Result<f64> {
    if mag_u == 0.0 {
        return Err(DriftError::UndefinedDistance {
            operation,
            which: "first",
        });
    }
    if mag_v == 0.0 {
        return Err(DriftError::UndefinedDistance {
            operation,
            which: "second",
        });
    }

    Ok((dot / (mag_u * mag_v)).clamp(-1.0, 1.0))
}

fn rename_operation(err: DriftError, operation: &'static str) -> DriftError {
    match err {
        DriftError::DimensionMismatch { left, right, .. } => DriftError::DimensionMismatch {
            operation,
            left,
            right,
        },
        DriftError::UndefinedDistance { which, .. } => DriftError::UndefinedDistance { operation, which },
        DriftError::InvalidInput { reason, .. } => DriftError::InvalidInput { operation, reason },
        other => other,
    }
}

/// Jaccard similarity of lowercase whitespace-separated word sets
///
/// Returns 0.0 when either text has no words.
pub fn word_overlap(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let words_b: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Sequences at least this long stop seeding matches on popular characters
const AUTOJUNK_MIN_LEN: usize = 200;

/// Character-level similarity ratio (Ratcliff/Obershelp) in [0, 1]
///
/// ratio = 2M / (|a| + |b|), where M counts characters in matching blocks
/// found by repeatedly taking the longest common substring and recursing on
/// both sides. Comparison is case-insensitive.
///
/// When `b` has 200 or more characters, any character occurring more than
/// |b| / 100 + 1 times in it is "popular": it cannot start a match, only
/// extend one that a rarer character started. Long texts built entirely
/// from popular characters therefore score 0 even against themselves.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let positions = seed_positions(b);
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, &positions, (a_lo, a_hi), (b_lo, b_hi));
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Ascending positions of each character of `b` that may start a match
fn seed_positions(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }

    if b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        positions.retain(|_, js| js.len() <= limit);
    }
    positions
}

/// Longest common substring of a[a_lo..a_hi] and b[b_lo..b_hi]
///
/// Ties resolve to the earliest start in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    positions: &HashMap<char, Vec<usize>>,
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // Length of the run ending at each b position, for the previous row of a
    let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

    for i in a_lo..a_hi {
        let mut next = HashMap::new();
        if let Some(js) = positions.get(&a[i]) {
            for &j in js {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_ending_at.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        run_ending_at = next;
    }

    // Popular characters never seed a match but may extend one
    while best_i > a_lo && best_j > b_lo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }
    while best_i + best_size < a_hi && best_j + best_size < b_hi && a[best_i + best_size] == b[best_j + best_size] {
        best_size += 1;
    }

    (best_i, best_j, best_size)
}

//! TF-IDF vectorizer
//!
//! Turns a corpus of texts into sparse, non-negative weight vectors over the
//! corpus vocabulary.
//!
//! - TF(w, t) = count(w, t) / total_words(t)
//! - IDF(w) = ln(m / df(w)) over the m corpus documents
//! - weight(w) = TF(w, t) x IDF(w)
//!
//! A word that occurs in no corpus document has df(w) = 0, where the raw IDF
//! formula divides by zero. Such words get IDF = 0 and are left out of the
//! embedding. A word present in every document also ends up with weight 0
//! (ln 1 = 0), so only distinctive terms carry signal.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DriftError, Result};

/// Tokenizer pattern: maximal runs of Unicode word characters
fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+").expect("static word pattern compiles"))
}

/// Vectorizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[serde(default)]
pub struct VectorizerConfig {
    /// Lowercase text before tokenizing
    pub lowercase: bool,

    /// Inclusive n-gram range; (1, 1) means unigrams only
    pub ngram_range: (usize, usize),

    /// Keep only the N terms with the highest total corpus count
    pub max_features: Option<usize>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            ngram_range: (1, 1),
            max_features: None,
        }
    }
}

impl VectorizerConfig {
    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({}, {})",
                min_n, max_n
            ));
        }

        if self.max_features == Some(0) {
            return Err("max_features must be positive when set".to_string());
        }

        Ok(())
    }

    /// Split text into terms (words, or space-joined n-grams)
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = tokenize(text, self.lowercase);
        let (min_n, max_n) = self.ngram_range;

        if min_n == 1 && max_n == 1 {
            return words;
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}

/// Split text into words
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    word_pattern()
        .find_iter(text)
        .map(|m| {
            if lowercase {
                m.as_str().to_lowercase()
            } else {
                m.as_str().to_string()
            }
        })
        .collect()
}

/// Distinct terms of a corpus with their document frequencies
///
/// Indices follow lexicographic term order, so two vocabularies built from
/// the same corpus are identical regardless of document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: BTreeMap<String, usize>,
    document_frequency: Vec<usize>,
    documents: usize,
}

impl Vocabulary {
    /// Number of terms (embedding dimension)
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of a term, if it was observed in the corpus
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at an index
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Number of corpus documents containing the term at least once
    pub fn document_frequency(&self, term: &str) -> usize {
        self.index_of(term)
            .map(|i| self.document_frequency[i])
            .unwrap_or(0)
    }

    /// Number of documents the vocabulary was built from
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// IDF(w) = ln(m / df(w)), defined as 0 when df(w) = 0
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        (self.documents as f64 / df as f64).ln()
    }

    fn idf_at(&self, index: usize) -> f64 {
        let df = self.document_frequency[index];
        if df == 0 {
            return 0.0;
        }
        (self.documents as f64 / df as f64).ln()
    }

    /// Iterate terms in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Sparse TF-IDF embedding over a fixed vocabulary
///
/// Only strictly positive weights are stored; absent indices are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    dimension: usize,
    weights: BTreeMap<usize, f64>,
}

impl Embedding {
    /// Embedding dimension (vocabulary size)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of non-zero weights
    pub fn nnz(&self) -> usize {
        self.weights.len()
    }

    /// True when every weight is zero
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight at a vocabulary index (zero if absent)
    pub fn get(&self, index: usize) -> f64 {
        self.weights.get(&index).copied().unwrap_or(0.0)
    }

    /// Non-zero entries as (index, weight) in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights.iter().map(|(&i, &w)| (i, w))
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Dot product with another embedding over the same vocabulary
    pub fn dot(&self, other: &Embedding) -> f64 {
        let (small, large) = if self.nnz() <= other.nnz() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(i, w)| large.weights.get(i).map(|v| w * v))
            .sum()
    }

    /// Dense representation of length `dimension`
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (&i, &w) in &self.weights {
            dense[i] = w;
        }
        dense
    }
}

/// TF-IDF model fitted on a corpus
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    config: VectorizerConfig,
    vocabulary: Vocabulary,
}

impl TfIdfModel {
    /// Build the vocabulary and document frequencies of a corpus
    pub fn fit<S: AsRef<str>>(corpus: &[S], config: &VectorizerConfig) -> Result<Self> {
        if corpus.is_empty() {
            return Err(DriftError::invalid_input(
                "tfidf_fit",
                "corpus must contain at least one document",
            ));
        }
        config
            .validate()
            .map_err(|reason| DriftError::invalid_input("tfidf_fit", reason))?;

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut corpus_count: HashMap<String, usize> = HashMap::new();

        for document in corpus {
            let terms = config.terms(document.as_ref());
            let mut seen = HashSet::new();
            for term in terms {
                *corpus_count.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.clone()) {
                    *document_frequency.entry(term).or_insert(0) += 1;
                }
            }
        }

        let mut kept: Vec<String> = document_frequency.keys().cloned().collect();
        if let Some(limit) = config.max_features {
            // Highest corpus count first, lexicographic tie-break
            kept.sort_by(|a, b| corpus_count[b].cmp(&corpus_count[a]).then_with(|| a.cmp(b)));
            kept.truncate(limit);
        }
        kept.sort();

        let index: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        let df: Vec<usize> = kept.iter().map(|term| document_frequency[term]).collect();

        debug!(
            documents = corpus.len(),
            vocabulary = kept.len(),
            "Fitted TF-IDF vocabulary"
        );

        Ok(Self {
            config: config.clone(),
            vocabulary: Vocabulary {
                terms: kept,
                index,
                document_frequency: df,
                documents: corpus.len(),
            },
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Embed a text against the fitted vocabulary
    ///
    /// The text does not need to be a corpus member. Terms it contains that
    /// the corpus never saw still count toward total_words(t) but get no
    /// weight.
    pub fn embed(&self, text: &str) -> Embedding {
        let terms = self.config.terms(text);
        let total = terms.len();
        let mut weights = BTreeMap::new();

        if total > 0 {
            let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
            for term in &terms {
                if let Some(i) = self.vocabulary.index_of(term) {
                    *counts.entry(i).or_insert(0) += 1;
                }
            }

            for (i, count) in counts {
                let weight = (count as f64 / total as f64) * self.vocabulary.idf_at(i);
                if weight > 0.0 {
                    weights.insert(i, weight);
                }
            }
        }

        Embedding {
            dimension: self.vocabulary.len(),
            weights,
        }
    }

    /// Weight of a term in an embedding produced by this model
    pub fn weight(&self, embedding: &Embedding, term: &str) -> f64 {
        self.vocabulary
            .index_of(term)
            .map(|i| embedding.get(i))
            .unwrap_or(0.0)
    }

    /// Embed each text in order
    pub fn embed_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Embedding> {
        texts.iter().map(|t| self.embed(t.as_ref())).collect()
    }
}

/// Embed `target` against the vocabulary and statistics of `corpus`
pub fn embed<S: AsRef<str>>(corpus: &[S], target: &str) -> Result<Embedding> {
    let model = TfIdfModel::fit(corpus, &VectorizerConfig::default())?;
    Ok(model.embed(target))
}

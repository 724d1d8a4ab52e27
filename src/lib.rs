//! Semdrift - semantic drift measurement for noisy translation chains
//!
//! This library provides the numerical core for quantifying how far a text
//! drifts from its original meaning: TF-IDF embeddings, cosine distance,
//! character-level noise injection and the resampling statistics (bootstrap,
//! ANOVA, effect sizes) used to judge whether drift differs across noise
//! levels.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod distance;
pub mod error;
pub mod json_output;
pub mod noise;
pub mod resampling;
pub mod vectorizer;

pub use error::{DriftError, Result};

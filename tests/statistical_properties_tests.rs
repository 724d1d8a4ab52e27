//! Statistical properties of distance, noise and resampling
//!
//! These run many seeded trials, so tolerances are several standard errors
//! wide and every run is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use semdrift::distance::cosine_distance;
use semdrift::noise::{hamming_distance, inject_noise, Alphabet, NoiseInjector, NoiseLevel};
use semdrift::resampling::{bootstrap, cohens_d, mean, sample_variance};
use semdrift::DriftError;

fn standard_normal(rng: &mut StdRng) -> f64 {
    // Box-Muller; 1 - gen() keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[test]
fn test_cosine_distance_violates_triangle_inequality() {
    let u = [1.0, 0.0];
    let v = [1.0, 1.0];
    let w = [0.0, 1.0];

    let uv = cosine_distance(&u, &v).unwrap();
    let vw = cosine_distance(&v, &w).unwrap();
    let uw = cosine_distance(&u, &w).unwrap();

    assert!((uv - 0.2929).abs() < 1e-4);
    assert!((vw - 0.2929).abs() < 1e-4);
    assert!((uw - 1.0).abs() < 1e-12);
    assert!(uw > uv + vw);
}

#[test]
fn test_noise_expected_hamming_distance() {
    let text: String = "abcdefghijklmnopqrstuvwxy".chars().cycle().take(1000).collect();
    let trials = 1000;

    let total: usize = (0..trials)
        .map(|seed| {
            let noisy = inject_noise(&text, 0.1, seed).unwrap();
            hamming_distance(&text, &noisy).unwrap()
        })
        .sum();
    let average = total as f64 / trials as f64;

    assert!((average - 100.0).abs() < 5.0, "mean Hamming distance {}", average);
}

#[test]
fn test_noise_expectation_holds_for_small_alphabet() {
    // Binary alphabet: every corrupted position flips
    let injector = NoiseInjector::new(Alphabet::new(['0', '1']).unwrap());
    let text = "0".repeat(500);
    let level = NoiseLevel::new(0.3).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    let total: usize = (0..400)
        .map(|_| injector.inject(&text, level, &mut rng).text.matches('1').count())
        .sum();
    let average = total as f64 / 400.0;

    assert!((average - 150.0).abs() < 7.5, "mean flips {}", average);
}

#[test]
fn test_noise_edges_over_seeds() {
    let text = "the quick brown fox jumps over the lazy dog";
    for seed in 0..50 {
        assert_eq!(inject_noise(text, 0.0, seed).unwrap(), text);

        let full = inject_noise(text, 1.0, seed).unwrap();
        assert!(text.chars().zip(full.chars()).all(|(a, b)| a != b));
    }
}

#[test]
fn test_bootstrap_variance_shrinks_with_resamples() {
    let samples = [
        0.12, 0.18, 0.25, 0.22, 0.31, 0.40, 0.37, 0.09, 0.28, 0.33, 0.15, 0.26, 0.19, 0.35, 0.21,
        0.30,
    ];
    let repeats = 100;

    let estimates = |resamples: usize, seed_offset: u64| -> Vec<f64> {
        (0..repeats)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed_offset + i as u64);
                bootstrap(&samples, resamples, mean, &mut rng).unwrap().mean
            })
            .collect()
    };

    let small = sample_variance(&estimates(100, 0));
    let large = sample_variance(&estimates(10_000, 10_000));
    let ratio = small / large;

    assert!(
        (40.0..250.0).contains(&ratio),
        "variance ratio {} not near 100",
        ratio
    );
}

#[test]
fn test_cohens_d_constant_groups_degenerate() {
    let err = cohens_d(&[1.0, 1.0, 1.0, 1.0], &[2.0, 2.0, 2.0, 2.0]).unwrap_err();
    assert!(matches!(err, DriftError::DegenerateVariance { .. }));
}

#[test]
fn test_cohens_d_recovers_half_sigma_shift() {
    let mut rng = StdRng::seed_from_u64(2025);
    let n = 5000;
    let group1: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
    let group2: Vec<f64> = (0..n).map(|_| 0.5 + standard_normal(&mut rng)).collect();

    let d = cohens_d(&group1, &group2).unwrap();
    assert!((d - 0.5).abs() < 0.1, "d = {}", d);
}

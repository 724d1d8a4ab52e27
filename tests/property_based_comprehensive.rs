//! Comprehensive property-based tests
//!
//! Core features tested:
//! 1. TF-IDF embedding dimension and non-negativity
//! 2. Cosine distance bounds and symmetry
//! 3. Noise injection length, identity and saturation
//! 4. Bootstrap interval ordering
//! 5. Effect size and ANOVA invariants

use proptest::prelude::*;
use semdrift::distance::{cosine_distance, text_similarity, word_overlap};
use semdrift::noise::{hamming_distance, inject_noise};
use semdrift::resampling::{anova_f, bootstrap, cliffs_delta, mean};
use semdrift::vectorizer::{TfIdfModel, VectorizerConfig};

fn vector(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, len)
}

fn non_zero_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..16)
        .prop_flat_map(|n| (vector(n), vector(n)))
        .prop_filter("non-zero vectors", |(u, v)| {
            u.iter().any(|x| x.abs() > 1e-6) && v.iter().any(|x| x.abs() > 1e-6)
        })
}

// P1: embedding dimension equals vocabulary size, weights non-negative
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_embedding_dimension_and_sign(
        corpus in prop::collection::vec("[a-e]{1,3}( [a-e]{1,3}){0,6}", 1..8),
        target in "[a-f]{1,3}( [a-f]{1,3}){0,6}",
    ) {
        let model = TfIdfModel::fit(&corpus, &VectorizerConfig::default()).unwrap();
        let embedding = model.embed(&target);

        prop_assert_eq!(embedding.dimension(), model.vocabulary().len());
        prop_assert!(embedding.iter().all(|(_, w)| w >= 0.0));
        prop_assert!(embedding.to_dense().iter().all(|w| *w >= 0.0));
        prop_assert!(embedding.nnz() <= target.split_whitespace().count());
    }

    #[test]
    fn prop_term_in_every_document_has_zero_weight(
        corpus in prop::collection::vec("[a-d]{1,3}( [a-d]{1,3}){0,4}", 1..6),
    ) {
        let docs: Vec<String> = corpus.iter().map(|d| format!("{} shared", d)).collect();
        let model = TfIdfModel::fit(&docs, &VectorizerConfig::default()).unwrap();
        for doc in &docs {
            let embedding = model.embed(doc);
            prop_assert_eq!(model.weight(&embedding, "shared"), 0.0);
        }
    }
}

// P2: cosine distance in [0, 2], symmetric, zero on identical input
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_cosine_distance_bounds((u, v) in non_zero_pair()) {
        let d = cosine_distance(&u, &v).unwrap();
        prop_assert!((0.0..=2.0).contains(&d));

        let back = cosine_distance(&v, &u).unwrap();
        prop_assert!((d - back).abs() < 1e-12);

        let own = cosine_distance(&u, &u).unwrap();
        prop_assert!(own.abs() < 1e-9);
    }

    #[test]
    fn prop_cosine_distance_scale_invariant((u, v) in non_zero_pair(), k in 0.01f64..100.0) {
        let scaled: Vec<f64> = u.iter().map(|x| x * k).collect();
        let d = cosine_distance(&u, &v).unwrap();
        let ds = cosine_distance(&scaled, &v).unwrap();
        prop_assert!((d - ds).abs() < 1e-9);
    }

    #[test]
    fn prop_cosine_distance_finite_across_magnitudes(
        (u, v) in non_zero_pair(),
        exp_u in -300i32..=300,
        exp_v in -300i32..=300,
    ) {
        let scaled_u: Vec<f64> = u.iter().map(|x| x * 10f64.powi(exp_u)).collect();
        let scaled_v: Vec<f64> = v.iter().map(|x| x * 10f64.powi(exp_v)).collect();

        let d = cosine_distance(&scaled_u, &scaled_v).unwrap();
        prop_assert!(d.is_finite());
        prop_assert!((0.0..=2.0).contains(&d));
        prop_assert!((d - cosine_distance(&u, &v).unwrap()).abs() < 1e-6);
    }

    #[test]
    fn prop_text_metrics_in_unit_interval(a in "[a-z ]{0,30}", b in "[a-z ]{0,30}") {
        let sim = text_similarity(&a, &b);
        let overlap = word_overlap(&a, &b);
        prop_assert!((0.0..=1.0).contains(&sim));
        prop_assert!((0.0..=1.0).contains(&overlap));
        prop_assert!((word_overlap(&b, &a) - overlap).abs() < 1e-12);
    }
}

// Noise injection: length preserved, eps = 0 identity, eps = 1 changes all
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_noise_preserves_length(text in "[a-z ]{0,80}", eps in 0.0f64..=1.0, seed in any::<u64>()) {
        let noisy = inject_noise(&text, eps, seed).unwrap();
        prop_assert_eq!(noisy.chars().count(), text.chars().count());
    }

    #[test]
    fn prop_noise_zero_is_identity(text in "\\PC{0,40}", seed in any::<u64>()) {
        prop_assert_eq!(inject_noise(&text, 0.0, seed).unwrap(), text);
    }

    #[test]
    fn prop_full_noise_changes_every_char(text in "[a-z]{1,60}", seed in any::<u64>()) {
        let noisy = inject_noise(&text, 1.0, seed).unwrap();
        prop_assert_eq!(hamming_distance(&text, &noisy).unwrap(), text.len());
    }

    #[test]
    fn prop_noise_is_deterministic_per_seed(text in "[a-z ]{0,40}", eps in 0.0f64..=1.0, seed in any::<u64>()) {
        prop_assert_eq!(inject_noise(&text, eps, seed).unwrap(), inject_noise(&text, eps, seed).unwrap());
    }
}

// Resampling invariants
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_bootstrap_interval_ordered(
        samples in prop::collection::vec(-10.0f64..10.0, 1..30),
        seed in any::<u64>(),
    ) {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let result = bootstrap(&samples, 200, mean, &mut rng).unwrap();

        prop_assert!(result.ci_lower <= result.ci_upper);
        prop_assert!(result.std_error >= 0.0);
        let lo = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(result.ci_lower >= lo - 1e-9 && result.ci_upper <= hi + 1e-9);
    }

    #[test]
    fn prop_cliffs_delta_antisymmetric(
        x in prop::collection::vec(0.0f64..1.0, 1..20),
        y in prop::collection::vec(0.0f64..1.0, 1..20),
    ) {
        let d = cliffs_delta(&x, &y).unwrap();
        prop_assert!((-1.0..=1.0).contains(&d));
        prop_assert!((d + cliffs_delta(&y, &x).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn prop_anova_eta_squared_in_unit_interval(
        groups in prop::collection::vec(prop::collection::vec(0.0f64..1.0, 2..10), 2..5),
    ) {
        if let Ok(result) = anova_f(&groups) {
            prop_assert!((0.0..=1.0).contains(&result.eta_squared));
            prop_assert!((0.0..=1.0).contains(&result.p_value));
            prop_assert!(result.f_statistic >= 0.0);
        }
    }
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use semdrift::vectorizer::{TfIdfModel, VectorizerConfig};

#[derive(Debug, Arbitrary)]
struct Input {
    config: VectorizerConfig,
    corpus: Vec<String>,
    target: String,
}

fuzz_target!(|input: Input| {
    // Oversized n-gram ranges only slow the run down
    if input.config.validate().is_err() || input.config.ngram_range.1 > 8 {
        return;
    }

    if let Ok(model) = TfIdfModel::fit(&input.corpus, &input.config) {
        let embedding = model.embed(&input.target);
        assert_eq!(embedding.dimension(), model.vocabulary().len());
        assert!(embedding.iter().all(|(_, w)| w >= 0.0 && w.is_finite()));

        if let Ok(d) = embedding.cosine_distance(&model.embed(&input.target)) {
            assert!((0.0..=2.0).contains(&d));
        }
    }
});

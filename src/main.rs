use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use semdrift::analysis::{self, DriftInput, DriftReport, NOISE_LEVELS};
use semdrift::cli::{Cli, Command, OutputFormat};
use semdrift::config::DriftConfig;
use semdrift::distance;
use semdrift::json_output::{
    JsonDistance, JsonEffectSize, JsonEmbedding, JsonNoise, JsonOutput, JsonResult,
};
use semdrift::noise::NoiseLevel;
use semdrift::resampling::{self, AnovaResult, BootstrapResult, EffectMagnitude};
use semdrift::vectorizer::TfIdfModel;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read and parse a JSON input file
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_embedding(embedding: &JsonEmbedding) {
    println!("Embedding dimension: {}", embedding.dimension);
    println!("Non-zero terms: {}", embedding.terms.len());
    println!("─────────────────────────────────────────");
    for term in &embedding.terms {
        println!("{:<24} {:.6}", term.term, term.weight);
    }
}

fn print_noise(records: &[JsonNoise]) {
    for record in records {
        println!(
            "[{:>3}%] {} ({} of {} chars changed)",
            (record.epsilon * 100.0).round(),
            record.noisy,
            record.changes,
            record.original.chars().count()
        );
    }
}

fn print_bootstrap(result: &BootstrapResult) {
    println!("Observed:   {:.6}", result.observed);
    println!("Boot mean:  {:.6}", result.mean);
    println!("Bias:       {:.6}", result.bias);
    println!("Std error:  {:.6}", result.std_error);
    println!(
        "{:.0}% CI:    [{:.6}, {:.6}] ({} resamples)",
        result.confidence_level * 100.0,
        result.ci_lower,
        result.ci_upper,
        result.resamples
    );
}

fn print_anova(result: &AnovaResult) {
    println!("{}", result.interpretation());
    println!(
        "SS between: {:.6}  SS within: {:.6}",
        result.ss_between, result.ss_within
    );
    if result.is_significant(0.05) {
        println!("Significant difference between groups (alpha = 0.05)");
    } else {
        println!("No significant difference between groups (alpha = 0.05)");
    }
}

fn print_effect_size(result: &JsonEffectSize) {
    println!("Cohen's d:     {:.4} ({})", result.cohens_d, result.magnitude);
    println!(
        "Cliff's delta: {:.4} ({})",
        result.cliffs_delta, result.cliffs_magnitude
    );
}

fn print_drift(report: &DriftReport) {
    println!("=== Semantic Drift Analysis ===");
    println!("Original: {}", report.original);
    println!("Embedding dimension: {}", report.embedding_dimension);
    println!();
    println!("Noise  Cosine dist  Text sim  Word overlap");
    println!("─────────────────────────────────────────");
    for m in &report.measurements {
        let distance = m
            .cosine_distance
            .map(|d| format!("{:.4}", d))
            .unwrap_or_else(|| "undefined".to_string());
        println!(
            "{:>4}%  {:>11}  {:>8.4}  {:>12.4}",
            m.noise_percent, distance, m.text_similarity, m.word_overlap
        );
    }
    println!("─────────────────────────────────────────");

    if let Some(summary) = &report.cosine_distance {
        println!(
            "Cosine distance: mean {:.4}, median {:.4}, std {:.4}, min {:.4} at {}%, max {:.4} at {}%",
            summary.mean,
            summary.median,
            summary.std,
            summary.min,
            summary.min_level,
            summary.max,
            summary.max_level
        );
    }
    let sim = &report.text_similarity;
    println!(
        "Text similarity: mean {:.4}, min {:.4} at {}%",
        sim.mean, sim.min, sim.min_level
    );
    let overlap = &report.word_overlap;
    println!(
        "Word overlap:    mean {:.4}, min {:.4} at {}%",
        overlap.mean, overlap.min, overlap.min_level
    );
    if let Some(r) = report.noise_distance_correlation {
        println!("Noise/distance correlation: r = {:.4}", r);
    }
    if let Some(interval) = &report.mean_distance_interval {
        println!(
            "Mean distance {:.0}% CI: [{:.4}, {:.4}]",
            interval.confidence_level * 100.0,
            interval.ci_lower,
            interval.ci_upper
        );
    }
}

fn print_text(result: &JsonResult) {
    match result {
        JsonResult::Distance(d) => {
            println!("Cosine similarity: {:.6}", d.similarity);
            println!("Cosine distance:   {:.6}", d.distance);
        }
        JsonResult::Embedding(e) => print_embedding(e),
        JsonResult::Noise(records) => print_noise(records),
        JsonResult::Bootstrap(b) => print_bootstrap(b),
        JsonResult::Anova(a) => print_anova(a),
        JsonResult::EffectSize(e) => print_effect_size(e),
        JsonResult::Drift(report) => print_drift(report),
    }
}

/// Run one subcommand and return its result record
fn run_command(command: Command, mut config: DriftConfig) -> Result<JsonResult> {
    let result = match command {
        Command::Distance { u, v } => {
            let similarity = distance::cosine_similarity(&u, &v)?;
            let distance = distance::cosine_distance(&u, &v)?;
            JsonResult::Distance(JsonDistance {
                similarity,
                distance,
            })
        }
        Command::Embed { corpus, text } => {
            let documents: Vec<String> = read_json(&corpus)?;
            let model = TfIdfModel::fit(&documents, &config.vectorizer)?;
            let embedding = model.embed(&text);
            JsonResult::Embedding(JsonEmbedding::from_embedding(&model, &embedding))
        }
        Command::Noise {
            text,
            epsilon,
            sweep,
            seed,
            alphabet,
            preserve_whitespace,
        } => {
            if let Some(alphabet) = alphabet {
                config.noise.alphabet = alphabet;
            }
            if let Some(seed) = seed {
                config.noise.seed = seed;
            }
            config.noise.preserve_whitespace |= preserve_whitespace;
            let injector = config.noise.injector()?;

            let levels = if sweep {
                NOISE_LEVELS
                    .iter()
                    .map(|&p| NoiseLevel::from_percent(p))
                    .collect::<semdrift::Result<Vec<_>>>()?
            } else {
                let epsilon = epsilon.context("Either --epsilon or --sweep is required")?;
                vec![NoiseLevel::new(epsilon)?]
            };

            let records = levels
                .into_iter()
                .map(|level| {
                    // Each level starts from the same seed so runs are comparable
                    let mut rng = StdRng::seed_from_u64(config.noise.seed);
                    let noisy = injector.inject(&text, level, &mut rng);
                    JsonNoise::new(&text, noisy, level.value(), config.noise.seed)
                })
                .collect();
            JsonResult::Noise(records)
        }
        Command::Bootstrap {
            samples,
            resamples,
            confidence,
            seed,
        } => {
            if let Some(resamples) = resamples {
                config.bootstrap.resamples = resamples;
            }
            if let Some(confidence) = confidence {
                config.bootstrap.confidence_level = confidence;
            }
            if let Some(seed) = seed {
                config.bootstrap.seed = seed;
            }
            JsonResult::Bootstrap(resampling::bootstrap_mean(&samples, &config.bootstrap)?)
        }
        Command::Anova { groups } => {
            let groups: Vec<Vec<f64>> = read_json(&groups)?;
            JsonResult::Anova(resampling::anova_f(&groups)?)
        }
        Command::CohensD { group1, group2 } => {
            let cohens_d = resampling::cohens_d(&group1, &group2)?;
            let cliffs_delta = resampling::cliffs_delta(&group2, &group1)?;
            JsonResult::EffectSize(JsonEffectSize {
                cohens_d,
                magnitude: EffectMagnitude::from_cohens_d(cohens_d),
                cliffs_delta,
                cliffs_magnitude: EffectMagnitude::from_cliffs_delta(cliffs_delta),
            })
        }
        Command::Drift { input } => {
            let input: DriftInput = read_json(&input)?;
            JsonResult::Drift(Box::new(analysis::analyze_drift(&input, &config)?))
        }
    };
    Ok(result)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => DriftConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DriftConfig::default(),
    };

    let command_name = args.command.name();
    let result = run_command(args.command, config)?;

    match args.format {
        OutputFormat::Json => println!("{}", JsonOutput::new(command_name, result).to_json()?),
        OutputFormat::Text => print_text(&result),
    }

    Ok(())
}

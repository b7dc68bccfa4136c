use dense_nn::activations::ActivationKind;
use dense_nn::serialization::Format;
use dense_nn::Network;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const SAMPLES: [([f64; 2], [f64; 1]); 4] = [
    ([0.0, 0.0], [0.0]),
    ([0.0, 1.0], [1.0]),
    ([1.0, 0.0], [1.0]),
    ([1.0, 1.0], [0.0]),
];

// Fitness of a network answering every sample within the error margin.
const PERFECT_FITNESS: f64 = 16.0;

/// Run settings, optionally read from a RON file
/// given as the first command line argument.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct XorConfig {
    learning_rate: f64,
    hidden_neurons: usize,
    epochs: usize,
    population_size: usize,
    generations: usize,
    mutation_probability: f64,
    mutation_severity: f64,
    error_margin: f64,
    seed: Option<u64>,
    champion_path: Option<PathBuf>,
}

impl Default for XorConfig {
    fn default() -> XorConfig {
        XorConfig {
            learning_rate: 0.5,
            hidden_neurons: 3,
            epochs: 2000,
            population_size: 150,
            generations: 100,
            mutation_probability: 0.8,
            mutation_severity: 0.5,
            error_margin: 0.3,
            seed: None,
            champion_path: None,
        }
    }
}

type AnyResult<T> = Result<T, Box<dyn std::error::Error>>;

fn load_config() -> AnyResult<XorConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            let config = ron::from_str(&text)?;
            info!(%path, "loaded configuration");
            Ok(config)
        }
        None => Ok(XorConfig::default()),
    }
}

fn build_network(config: &XorConfig, rng: &mut StdRng) -> dense_nn::Result<Network> {
    let mut network = Network::new(config.learning_rate);
    network
        .add_input_with_rng(2, &["a", "b"], Some(ActivationKind::Sigmoid.into()), rng)?
        .add_intermediate_with_rng(
            config.hidden_neurons,
            Some(ActivationKind::Sigmoid.into()),
            rng,
        )?
        .add_output_with_rng(1, &["xor"], None, rng)?;
    Ok(network)
}

/// Scores a network like the classic NEAT XOR benchmark: errors within
/// the margin count as zero, and the remaining score is squared.
fn evaluate_xor(network: &mut Network, error_margin: f64) -> dense_nn::Result<f64> {
    let mut errors = 0.0;
    for (input, expected) in &SAMPLES {
        let error = (network.forward(input)?[0] - expected[0]).abs();
        if error >= error_margin {
            errors += error;
        }
    }
    Ok((4.0 - errors).powi(2))
}

/// Trains by backpropagation, returning the total loss of the last epoch.
fn backpropagate(network: &mut Network, epochs: usize) -> dense_nn::Result<f64> {
    let mut total = f64::NAN;
    for epoch in 0..epochs {
        total = 0.0;
        for (input, expected) in &SAMPLES {
            total += network.train(input, expected)?;
        }
        if epoch % 250 == 0 {
            debug!(epoch, loss = total, "backpropagation");
        }
    }
    Ok(total)
}

/// Refines a parent by repeatedly mutating it in parallel
/// and keeping the fittest of each generation.
///
/// Every offspring mutates with its own generator, seeded from `rng`
/// before the parallel section, so a seeded run is reproducible.
fn evolve(parent: Network, config: &XorConfig, rng: &mut StdRng) -> dense_nn::Result<Network> {
    let mut champion = parent;
    let fitness = evaluate_xor(&mut champion, config.error_margin)?;
    champion.set_fitness(fitness);
    for generation in 0..config.generations {
        if champion.fitness() >= PERFECT_FITNESS {
            info!(generation, "solution found");
            break;
        }
        let seeds: Vec<u64> = (0..config.population_size).map(|_| rng.gen()).collect();
        let offspring = seeds
            .into_par_iter()
            .map(|seed| -> dense_nn::Result<Network> {
                let mut child = champion.mutate_new_with_rng(
                    config.mutation_probability,
                    config.mutation_severity,
                    &mut StdRng::seed_from_u64(seed),
                );
                let fitness = evaluate_xor(&mut child, config.error_margin)?;
                child.set_fitness(fitness);
                Ok(child)
            })
            .collect::<dense_nn::Result<Vec<_>>>()?;

        if let Some(best) = offspring
            .into_iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
        {
            if best.fitness() > champion.fitness() {
                debug!(generation, fitness = best.fitness(), "new champion");
                champion = best;
            }
        }
    }
    Ok(champion)
}

fn main() -> AnyResult<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));
    tracing_subscriber::registry().with(stderr_layer).init();

    let config = load_config()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = build_network(&config, &mut rng)?;
    info!(%network, "training");
    let loss = backpropagate(&mut network, config.epochs)?;
    info!(loss, "backpropagation finished");

    let champion = evolve(network, &config, &mut rng)?;
    info!(fitness = champion.fitness(), "evolution finished");
    if champion.fitness() < PERFECT_FITNESS {
        warn!("no network solved XOR within the error margin");
    }

    let mut restored = match &config.champion_path {
        Some(path) => {
            champion.save(BufWriter::new(File::create(path)?), Format::Ron)?;
            Network::load(BufReader::new(File::open(path)?), Format::Ron)?
        }
        None => Network::from_ron(&champion.to_ron()?)?,
    };

    for (input, expected) in &SAMPLES {
        let outputs = restored.forward_named([("a", input[0]), ("b", input[1])])?;
        println!(
            "{} XOR {} = {:.3} (expected {})",
            input[0], input[1], outputs["xor"], expected[0]
        );
    }
    Ok(())
}

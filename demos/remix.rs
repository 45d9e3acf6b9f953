#[cfg(feature = "serde")]
use anyhow::{bail, Result};
#[cfg(feature = "serde")]
use beat_splice::{JumpWalker, RemixConfig, SeededRandom, SimilarityGraph};
#[cfg(feature = "serde")]
use clap::{Arg, Command};
#[cfg(feature = "serde")]
use ndarray::Array1;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use std::fs;
#[cfg(feature = "serde")]
use std::io::BufReader;

/// Output of a beat tracker: the start of each beat, in seconds, and one
/// feature vector per beat.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct Analysis {
    timestamps: Vec<f64>,
    features: Vec<Vec<f32>>,
}

/* Computes a remix of an already analyzed track, and prints the order in
 * which its beats should be played. */
// How to use: ./remix [-c config.json] [-s seed] [-o sequence.json] <analysis.json>
#[cfg(feature = "serde")]
fn main() -> Result<()> {
    let matches = Command::new("remix")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Polochon_street")
        .about("Compute the beat order of a remix from a beat analysis")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("CONFIG.JSON")
                .help("Use the remix configuration in <config>. Missing options take their default value."),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .value_parser(clap::value_parser!(u64))
                .help("Override the seed of the configuration."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("SEQUENCE.JSON")
                .help("Write the beat sequence to a JSON file."),
        )
        .arg(
            Arg::new("ANALYSIS")
                .help("JSON file containing the \"timestamps\" and \"features\" of every beat.")
                .required(true),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RemixConfig::from_path(path)?,
        None => RemixConfig::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = *seed;
    }

    let Some(analysis_path) = matches.get_one::<String>("ANALYSIS") else {
        bail!("an analysis file is required");
    };
    let reader = BufReader::new(fs::File::open(analysis_path)?);
    let analysis: Analysis = serde_json::from_reader(reader)?;
    if analysis.timestamps.len() != analysis.features.len() {
        bail!(
            "{} timestamps but {} feature vectors in {analysis_path}",
            analysis.timestamps.len(),
            analysis.features.len(),
        );
    }
    let features = analysis
        .features
        .into_iter()
        .map(Array1::from)
        .collect::<Vec<_>>();

    config.validate(features.len())?;
    let graph = SimilarityGraph::build(&features, config.metric, config.neighbors)?;
    let walker = JumpWalker::new(config.walk_settings())?;
    let walk = walker.trace(&graph, &mut SeededRandom::new(config.seed))?;

    for jump in &walk.jumps {
        println!(
            "{:>6.2}s -> {:>6.2}s (beat {} -> beat {}, at position {})",
            analysis.timestamps[jump.from],
            analysis.timestamps[jump.landing],
            jump.from,
            jump.landing,
            jump.position,
        );
    }
    println!(
        "{} beats played, {} jumps, {} wraps.",
        walk.sequence.len(),
        walk.jumps.len(),
        walk.wraps,
    );

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, serde_json::to_string(&walk.sequence)?)?,
        None => println!("{:?}", walk.sequence),
    }
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn main() {
    println!("You need the serde feature enabled to run this file.");
}

//! Module containing everything pertaining to the configuration of a
//! remix.
//!
//! Every knob of the algorithm lives in [RemixConfig]: nothing in the graph
//! or the walker has a hidden default. The defaults below are a good
//! starting point for a typical pop song analyzed beat by beat.
//!
//! With the `serde` feature enabled, the configuration can be stored and
//! loaded as a JSON file, e.g. to keep the settings that made a good remix
//! next to the track:
//! ```
//! # #[cfg(feature = "serde")]
//! # fn main() -> beat_splice::RemixResult<()> {
//! use beat_splice::{DistanceMetric, RemixConfig};
//!
//! let config = RemixConfig::from_json_str(r#"{"max_jumps": 4, "metric": "cosine"}"#)?;
//! assert_eq!(config.max_jumps, 4);
//! assert_eq!(config.metric, DistanceMetric::Cosine);
//! // Omitted fields keep their default value.
//! assert_eq!(config.run_length, RemixConfig::default().run_length);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
use crate::distance::DistanceMetric;
use crate::graph::NeighborPolicy;
use crate::matcher::check_run_parameters;
use crate::walker::{JumpValidation, Termination, WalkSettings};
use crate::RemixResult;
#[cfg(feature = "serde")]
use crate::RemixError;
#[cfg(feature = "serde")]
use std::fs;
#[cfg(feature = "serde")]
use std::path::Path;

/// The configuration of a remix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemixConfig {
    /// Upper bound on the number of jumps taken.
    pub max_jumps: usize,
    /// Length of the weight pattern used to validate a jump target.
    pub run_length: usize,
    /// Number of beats to play after a jump before another one may be
    /// taken.
    pub jump_cooldown: usize,
    /// Per-beat probability of attempting a jump once the cooldown has
    /// elapsed, in `[0, 1]`.
    pub jump_probability: f32,
    /// Distance function the similarity graph is built with.
    pub metric: DistanceMetric,
    /// Tolerance under which two weights are considered equal when
    /// matching runs. Zero disables matching altogether.
    pub epsilon: f32,
    /// Seed of the random source driving the walk.
    pub seed: u64,
    /// Which beats are considered neighbors of a given beat.
    pub neighbors: NeighborPolicy,
    /// How jump targets are validated.
    pub validation: JumpValidation,
    /// What happens once all the jumps are used.
    pub termination: Termination,
}

impl Default for RemixConfig {
    fn default() -> Self {
        RemixConfig {
            max_jumps: 15,
            run_length: 10,
            jump_cooldown: 25,
            jump_probability: 0.2,
            metric: DistanceMetric::Euclidean,
            epsilon: 1e-8,
            seed: 0,
            neighbors: NeighborPolicy::default(),
            validation: JumpValidation::default(),
            termination: Termination::default(),
        }
    }
}

impl RemixConfig {
    /// Check that the configuration can be used on a track of
    /// `beat_count` beats, naming the offending option if not.
    pub fn validate(&self, beat_count: usize) -> RemixResult<()> {
        self.walk_settings().validate()?;
        check_run_parameters(beat_count, self.run_length, self.epsilon)?;
        self.neighbors.validate()
    }

    /// The part of the configuration the [JumpWalker](crate::JumpWalker)
    /// needs.
    pub fn walk_settings(&self) -> WalkSettings {
        WalkSettings {
            max_jumps: self.max_jumps,
            run_length: self.run_length,
            jump_cooldown: self.jump_cooldown,
            jump_probability: self.jump_probability,
            epsilon: self.epsilon,
            validation: self.validation,
            termination: self.termination,
        }
    }

    /// Load a configuration from a JSON string. Missing fields take their
    /// default value.
    #[cfg(feature = "serde")]
    pub fn from_json_str(data: &str) -> RemixResult<Self> {
        serde_json::from_str(data)
            .map_err(|e| RemixError::InvalidInput(format!("while parsing configuration: {e}")))
    }

    /// Serialize the configuration to a pretty-printed JSON string.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> RemixResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RemixError::InvalidInput(format!("while serializing configuration: {e}")))
    }

    /// Load a configuration from the JSON file at `path`.
    #[cfg(feature = "serde")]
    pub fn from_path<P: AsRef<Path>>(path: P) -> RemixResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            RemixError::InvalidInput(format!(
                "while reading configuration file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&data)
    }

    /// Write the configuration as JSON to the file at `path`.
    #[cfg(feature = "serde")]
    pub fn write<P: AsRef<Path>>(&self, path: P) -> RemixResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|e| {
            RemixError::InvalidInput(format!(
                "while writing configuration file '{}': {e}",
                path.display()
            ))
        })
    }
}

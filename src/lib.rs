//! # beat-splice
//!
//! beat-splice is a library for making "endless" remixes of a song.
//!
//! Given the beats of a track and one feature vector per beat (a chroma
//! fingerprint for instance), it builds a [SimilarityGraph] over the beats,
//! and walks it with a [JumpWalker]: most of the time the walker just plays
//! the next beat, but every now and then it splices to another point of the
//! track whose surroundings look the same, so that the jump cannot be heard.
//!
//! The result of a walk is an ordered list of beat indices, that can be
//! turned back into audio with [assemble].
//!
//! Beat tracking, feature extraction and audio decoding are not done here:
//! feed the library with the output of your favorite analysis tool.
//!
//! # Examples
//!
//! ### Compute the order in which beats should be played
//! ```
//! use beat_splice::{remix_sequence, RemixConfig, RemixResult};
//! use ndarray::arr1;
//!
//! fn main() -> RemixResult<()> {
//!     let features = (0..8)
//!         .map(|i| arr1(&[(i % 4) as f32, 1., 0.5]))
//!         .collect::<Vec<_>>();
//!     let config = RemixConfig {
//!         run_length: 2,
//!         ..Default::default()
//!     };
//!     let sequence = remix_sequence(&features, &config)?;
//!     assert_eq!(sequence.last(), Some(&7));
//!     Ok(())
//! }
//! ```
//!
//! ### Remix a (mono) track
//! ```
//! use beat_splice::{remix, RemixConfig, RemixResult};
//! use ndarray::{arr1, Array2};
//!
//! fn main() -> RemixResult<()> {
//!     let sample_rate = 10;
//!     let source = Array2::from_shape_fn((1, 40), |(_, i)| i as f32);
//!     let timestamps = [0., 1., 2., 3.];
//!     let features = vec![
//!         arr1(&[1., 0.]),
//!         arr1(&[0., 1.]),
//!         arr1(&[1., 0.]),
//!         arr1(&[0., 1.]),
//!     ];
//!     let config = RemixConfig {
//!         max_jumps: 0,
//!         run_length: 1,
//!         ..Default::default()
//!     };
//!     let output = remix(source.view(), sample_rate, &timestamps, &features, &config)?;
//!     assert_eq!(output, source);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]
mod assembler;
mod beats;
pub mod config;
pub mod distance;
mod graph;
pub mod matcher;
pub mod random;
pub mod walker;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
use log::info;
use ndarray::{Array1, Array2, ArrayView2};
use thiserror::Error;

pub use assembler::assemble;
pub use beats::{Beat, Beats};
pub use config::RemixConfig;
pub use distance::DistanceMetric;
pub use graph::{NeighborPolicy, SimilarityGraph};
pub use random::{RandomSource, SeededRandom};
pub use walker::{JumpWalker, Walk};

#[derive(Error, Clone, Debug, PartialEq, Eq)]
/// Umbrella type for beat-splice error types
pub enum RemixError {
    #[error("invalid input – {0}")]
    /// Malformed or inconsistent input: wrong dimensions, out-of-bounds
    /// parameters, unsorted timestamps...
    InvalidInput(String),
    #[error("index out of range – {0}")]
    /// A beat index fell outside of the track. Hitting this from a walk
    /// is a bug in beat-splice.
    OutOfRange(String),
}

/// beat-splice error type
pub type RemixResult<T> = Result<T, RemixError>;

/// Compute the order in which the beats described by `features` should be
/// played, according to `config`.
///
/// The graph is built with the configured metric and neighbor policy, and
/// the walk is driven by a [SeededRandom] seeded with `config.seed`, so
/// the same inputs always give the same sequence.
///
/// Use [JumpWalker] directly if you need to inject your own random source,
/// or to get the list of jumps that were taken.
pub fn remix_sequence(features: &[Array1<f32>], config: &RemixConfig) -> RemixResult<Vec<usize>> {
    config.validate(features.len())?;
    let graph = SimilarityGraph::build(features, config.metric, config.neighbors)?;
    let walker = JumpWalker::new(config.walk_settings())?;
    let mut rng = SeededRandom::new(config.seed);
    walker.walk(&graph, &mut rng)
}

/// Remix `source`, a `channels x samples` array sampled at `sample_rate`.
///
/// `timestamps` holds the start of each beat in seconds, and `features`
/// one feature vector per beat, in the same order.
///
/// Returns the concatenation of the beats, in the order computed by
/// [remix_sequence].
pub fn remix(
    source: ArrayView2<f32>,
    sample_rate: u32,
    timestamps: &[f64],
    features: &[Array1<f32>],
    config: &RemixConfig,
) -> RemixResult<Array2<f32>> {
    let beats = Beats::from_timestamps(timestamps)?;
    if beats.len() != features.len() {
        return Err(RemixError::InvalidInput(format!(
            "got {} timestamps but {} feature vectors",
            beats.len(),
            features.len(),
        )));
    }
    let sequence = remix_sequence(features, config)?;
    info!(
        "Assembling {} beats out of a {}-beat track",
        sequence.len(),
        beats.len()
    );
    assemble(&sequence, &beats, source, sample_rate)
}

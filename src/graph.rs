//! The beat similarity graph.
//!
//! Conceptually a complete weighted graph over the beats of a track, where
//! the weight of an edge is the distance between the two beats' feature
//! vectors. It is stored as the raw distance matrix, plus the list of
//! neighbors each beat is allowed to jump to, as decided by a
//! [NeighborPolicy].
use crate::distance::{distance_matrix, euclidean_distance, DistanceMetric};
use crate::{RemixError, RemixResult};
use log::{debug, warn};
use ndarray::{Array1, Array2};
use noisy_float::prelude::*;

/// How the neighbors of a beat are picked among all the other beats.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeighborPolicy {
    /// Every other beat is a neighbor.
    All,
    /// The `k` closest beats are neighbors. Ties are broken by picking the
    /// lowest beat index.
    Nearest(usize),
    /// Every beat that is at most at this distance is a neighbor.
    Threshold(f32),
}

impl Default for NeighborPolicy {
    fn default() -> Self {
        NeighborPolicy::Nearest(32)
    }
}

impl NeighborPolicy {
    pub(crate) fn validate(&self) -> RemixResult<()> {
        match self {
            NeighborPolicy::Nearest(0) => Err(RemixError::InvalidInput(String::from(
                "neighbors: a nearest-neighbor policy needs at least one neighbor",
            ))),
            NeighborPolicy::Threshold(t) if !(*t >= 0.) => Err(RemixError::InvalidInput(
                format!("neighbors: threshold must be a non-negative number, got {t}"),
            )),
            _ => Ok(()),
        }
    }

    fn select(&self, beat: usize, weights: &[f32]) -> Vec<usize> {
        let others = (0..weights.len()).filter(|&j| j != beat);
        match *self {
            NeighborPolicy::All => others.collect(),
            NeighborPolicy::Threshold(threshold) => {
                others.filter(|&j| weights[j] <= threshold).collect()
            }
            NeighborPolicy::Nearest(k) => {
                let mut closest = others.collect::<Vec<_>>();
                closest.sort_by_key(|&j| (n32(weights[j]), j));
                closest.truncate(k);
                closest.sort_unstable();
                closest
            }
        }
    }
}

/// An undirected weighted graph over the beats of a track.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityGraph {
    features: Vec<Array1<f32>>,
    distances: Array2<f32>,
    neighbors: Vec<Vec<usize>>,
    metric: Option<DistanceMetric>,
}

impl SimilarityGraph {
    /// Build the graph of `features` (one vector per beat), weighting
    /// edges with `metric`.
    ///
    /// Fails if there are less than two beats, or if the feature vectors
    /// are empty, of different lengths, or contain non-finite values.
    pub fn build(
        features: &[Array1<f32>],
        metric: DistanceMetric,
        policy: NeighborPolicy,
    ) -> RemixResult<Self> {
        check_features(features)?;
        policy.validate()?;
        debug!(
            "Computing {} distance matrix for {} beats",
            metric,
            features.len()
        );
        let distances = distance_matrix(features, metric);
        Ok(Self::assemble(features, distances, policy, Some(metric)))
    }

    /// Build the graph of `features` from an already computed matrix of
    /// pairwise `distances`.
    ///
    /// On top of the checks done by [build](SimilarityGraph::build), the
    /// matrix must be square, of the same size as `features`, symmetric,
    /// and contain only finite, non-negative values.
    pub fn from_distance_matrix(
        features: &[Array1<f32>],
        distances: Array2<f32>,
        policy: NeighborPolicy,
    ) -> RemixResult<Self> {
        check_features(features)?;
        policy.validate()?;
        let n = features.len();
        if distances.dim() != (n, n) {
            return Err(RemixError::InvalidInput(format!(
                "distance matrix should be {n}x{n}, got {}x{}",
                distances.nrows(),
                distances.ncols(),
            )));
        }
        if let Some(((i, j), d)) = distances
            .indexed_iter()
            .find(|(_, d)| !d.is_finite() || **d < 0.)
        {
            return Err(RemixError::InvalidInput(format!(
                "distance ({i}, {j}) must be finite and non-negative, got {d}"
            )));
        }
        if distances != distances.t() {
            return Err(RemixError::InvalidInput(String::from(
                "distance matrix must be symmetric",
            )));
        }
        Ok(Self::assemble(features, distances, policy, None))
    }

    fn assemble(
        features: &[Array1<f32>],
        distances: Array2<f32>,
        policy: NeighborPolicy,
        metric: Option<DistanceMetric>,
    ) -> Self {
        let neighbors = distances
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| policy.select(i, &row.to_vec()))
            .collect::<Vec<Vec<usize>>>();
        if neighbors.iter().all(Vec::is_empty) {
            warn!("No beat has any neighbor with {policy:?}, remixes will play linearly");
        }
        SimilarityGraph {
            features: features.to_vec(),
            distances,
            neighbors,
            metric,
        }
    }

    /// The number of beats in the graph.
    pub fn beat_count(&self) -> usize {
        self.features.len()
    }

    /// The metric the graph was built with, or `None` if it was built from
    /// an external distance matrix.
    pub fn metric(&self) -> Option<DistanceMetric> {
        self.metric
    }

    /// The full distance matrix.
    pub fn distances(&self) -> &Array2<f32> {
        &self.distances
    }

    /// The neighbors of `beat`, sorted by index. Empty for unknown beats.
    pub fn neighbors(&self, beat: usize) -> &[usize] {
        self.neighbors
            .get(beat)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether at least one beat has a neighbor.
    pub fn has_edges(&self) -> bool {
        self.neighbors.iter().any(|n| !n.is_empty())
    }

    /// The weight of the edge between `a` and `b`.
    pub fn weight(&self, a: usize, b: usize) -> Option<f32> {
        self.distances.get((a, b)).copied()
    }

    /// The `(neighbor, weight)` pairs of `beat`, sorted by neighbor index.
    pub fn weights(&self, beat: usize) -> Vec<(usize, f32)> {
        self.neighbors(beat)
            .iter()
            .map(|&j| (j, self.distances[[beat, j]]))
            .collect()
    }

    /// The euclidean distance between the feature vectors of `a` and `b`,
    /// regardless of the metric the graph was built with.
    pub fn feature_distance(&self, a: usize, b: usize) -> Option<f32> {
        Some(euclidean_distance(
            self.features.get(a)?,
            self.features.get(b)?,
        ))
    }
}

fn check_features(features: &[Array1<f32>]) -> RemixResult<()> {
    if features.len() < 2 {
        return Err(RemixError::InvalidInput(format!(
            "at least two beats are needed to build a graph, got {}",
            features.len()
        )));
    }
    let dimension = features[0].len();
    if dimension == 0 {
        return Err(RemixError::InvalidInput(String::from(
            "feature vectors must not be empty",
        )));
    }
    for (i, feature) in features.iter().enumerate() {
        if feature.len() != dimension {
            return Err(RemixError::InvalidInput(format!(
                "feature vector {i} has length {}, expected {dimension}",
                feature.len()
            )));
        }
        if feature.iter().any(|x| !x.is_finite()) {
            return Err(RemixError::InvalidInput(format!(
                "feature vector {i} contains non-finite values"
            )));
        }
    }
    Ok(())
}

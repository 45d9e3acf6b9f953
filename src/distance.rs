//! Module containing the distance metrics used to compare beats.
//!
//! A [DistanceMetric] is used to build the pairwise distance matrix a
//! [SimilarityGraph](crate::SimilarityGraph) is made of.
//!
//! They will yield different jump patterns, so don't hesitate to
//! experiment with them if the default (euclidean distance) doesn't
//! suit your track.
use crate::{RemixError, RemixResult};
use ndarray::{Array1, Array2};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The distance functions a similarity graph can be built with.
///
/// Parses from, and displays as, `euclidean`, `correlation` or `cosine`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DistanceMetric {
    /// See [euclidean_distance].
    #[default]
    Euclidean,
    /// See [correlation_distance].
    Correlation,
    /// See [cosine_distance].
    Cosine,
}

impl DistanceMetric {
    /// Parse a metric name, turning unknown names into a
    /// [RemixError::InvalidInput].
    pub fn from_name(name: &str) -> RemixResult<Self> {
        DistanceMetric::from_str(name).map_err(|_| {
            RemixError::InvalidInput(format!(
                "unknown distance metric '{name}', expected one of euclidean, correlation, cosine"
            ))
        })
    }

    /// Compute the distance between `a` and `b` with this metric.
    pub fn distance(&self, a: &Array1<f32>, b: &Array1<f32>) -> f32 {
        match self {
            DistanceMetric::Euclidean => euclidean_distance(a, b),
            DistanceMetric::Correlation => correlation_distance(a, b),
            DistanceMetric::Cosine => cosine_distance(a, b),
        }
    }
}

/// Return the [euclidean
/// distance](https://en.wikipedia.org/wiki/Euclidean_distance#Higher_dimensions)
/// between two vectors.
pub fn euclidean_distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let difference = a - b;
    difference.dot(&difference).sqrt()
}

/// Return the [cosine
/// distance](https://en.wikipedia.org/wiki/Cosine_similarity#Angular_distance_and_similarity)
/// between two vectors.
///
/// If one of the vectors is null, the distance is 0 if both vectors are
/// equal, and 1 otherwise.
pub fn cosine_distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let norms = a.dot(a).sqrt() * b.dot(b).sqrt();
    if norms == 0. {
        return if a == b { 0. } else { 1. };
    }
    let similarity = a.dot(b) / norms;
    // Rounding can push identical vectors slightly below zero.
    (1. - similarity).max(0.)
}

/// Return the correlation distance between two vectors, i.e. one minus
/// their [Pearson correlation
/// coefficient](https://en.wikipedia.org/wiki/Pearson_correlation_coefficient).
///
/// If one of the vectors is constant, the distance is 0 if both vectors are
/// equal, and 1 otherwise.
pub fn correlation_distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let centered_a = a - a.mean().unwrap_or(0.);
    let centered_b = b - b.mean().unwrap_or(0.);
    let norms = centered_a.dot(&centered_a).sqrt() * centered_b.dot(&centered_b).sqrt();
    if norms == 0. {
        return if a == b { 0. } else { 1. };
    }
    let correlation = centered_a.dot(&centered_b) / norms;
    (1. - correlation).max(0.)
}

/// Compute the `N x N` matrix of the distances between every pair of
/// `features`, using `metric`.
///
/// The matrix is symmetric, with a null diagonal. `features` are assumed
/// to all have the same length; see
/// [SimilarityGraph::build](crate::SimilarityGraph::build) for a checked
/// version.
pub fn distance_matrix(features: &[Array1<f32>], metric: DistanceMetric) -> Array2<f32> {
    let n = features.len();
    let mut distances = Array2::zeros((n, n));
    for i in 0..n {
        for j in i + 1..n {
            let distance = metric.distance(&features[i], &features[j]);
            distances[[i, j]] = distance;
            distances[[j, i]] = distance;
        }
    }
    distances
}

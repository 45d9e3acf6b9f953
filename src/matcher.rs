//! Module finding repeated weight patterns around a beat.
//!
//! Two beats being close in feature space is not enough for a jump between
//! them to sound right: the music around them should also be structured the
//! same way. The way this is checked here is by looking at the list of
//! weights from a beat to its neighbors, and finding the windows ("runs")
//! of that list whose pattern shows up more than once. Two beats sharing
//! such a repeated pattern are considered structurally compatible.
//!
//! Everything in here is pure: the same inputs always yield the same runs.
use crate::{RemixError, RemixResult, SimilarityGraph};
use noisy_float::prelude::*;

/// A window of consecutive `(neighbor, weight)` pairs, taken from the
/// weight list of a beat.
///
/// The neighbor indices locate the window; only the weights are compared
/// when matching runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pairs: Vec<(usize, f32)>,
}

impl Run {
    pub(crate) fn new(pairs: Vec<(usize, f32)>) -> Self {
        Run { pairs }
    }

    /// The `(neighbor, weight)` pairs making up this run.
    pub fn pairs(&self) -> &[(usize, f32)] {
        &self.pairs
    }

    /// The number of pairs in this run.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether this run has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether the weights of `self` and `other` are pairwise equal, within
    /// `epsilon` (`|w1 - w2| < epsilon`).
    ///
    /// Runs of different lengths never match.
    pub fn matches(&self, other: &Run, epsilon: f32) -> bool {
        self.len() == other.len()
            && self
                .pairs
                .iter()
                .zip(&other.pairs)
                .all(|((_, w1), (_, w2))| (w1 - w2).abs() < epsilon)
    }

    fn first_weight(&self) -> f32 {
        self.pairs.first().map_or(0., |&(_, w)| w)
    }
}

pub(crate) fn check_run_parameters(
    beat_count: usize,
    run_length: usize,
    epsilon: f32,
) -> RemixResult<()> {
    if run_length < 1 {
        return Err(RemixError::InvalidInput(String::from(
            "run_length must be at least 1",
        )));
    }
    if run_length >= beat_count {
        return Err(RemixError::InvalidInput(format!(
            "run_length must be smaller than the number of beats ({beat_count}), got {run_length}"
        )));
    }
    if !epsilon.is_finite() || epsilon < 0. {
        return Err(RemixError::InvalidInput(format!(
            "epsilon must be a finite, non-negative number, got {epsilon}"
        )));
    }
    Ok(())
}

/// Find the runs of `run_length` consecutive weights around `anchor_beat`
/// whose pattern appears at least twice in its weight list.
///
/// The weight list is [SimilarityGraph::weights] of the anchor: its
/// neighbors, by index, along with their distance to the anchor (the
/// anchor itself is never part of it). Every window of `run_length`
/// entries is compared to every other one, and kept if it
/// [matches](Run::matches) at least one of them. The runs are returned in
/// the order they appear in the weight list.
///
/// An anchor with fewer than `run_length` neighbors has no runs.
///
/// Fails if `run_length` is zero or not smaller than the number of beats,
/// if `epsilon` is negative or not finite, or if `anchor_beat` is not a
/// beat of the graph.
pub fn find_repeated_runs(
    graph: &SimilarityGraph,
    anchor_beat: usize,
    run_length: usize,
    epsilon: f32,
) -> RemixResult<Vec<Run>> {
    check_run_parameters(graph.beat_count(), run_length, epsilon)?;
    if anchor_beat >= graph.beat_count() {
        return Err(RemixError::OutOfRange(format!(
            "anchor beat {anchor_beat} in a {}-beat track",
            graph.beat_count()
        )));
    }
    Ok(repeated_runs(&graph.weights(anchor_beat), run_length, epsilon))
}

pub(crate) fn repeated_runs(weights: &[(usize, f32)], run_length: usize, epsilon: f32) -> Vec<Run> {
    let windows = weights
        .windows(run_length)
        .map(|w| Run::new(w.to_vec()))
        .collect::<Vec<_>>();

    // Matching runs have their first weights within epsilon of each other,
    // so only neighbors in that order need to be compared.
    let mut order = (0..windows.len()).collect::<Vec<_>>();
    order.sort_by_key(|&i| (n32(windows[i].first_weight()), i));

    let mut repeated = vec![false; windows.len()];
    for (position, &i) in order.iter().enumerate() {
        for &j in &order[position + 1..] {
            if windows[j].first_weight() - windows[i].first_weight() >= epsilon {
                break;
            }
            if windows[i].matches(&windows[j], epsilon) {
                repeated[i] = true;
                repeated[j] = true;
            }
        }
    }

    windows
        .into_iter()
        .zip(repeated)
        .filter_map(|(run, repeated)| repeated.then_some(run))
        .collect()
}

/// Whether at least one run of `a` matches at least one run of `b`.
pub fn runs_overlap(a: &[Run], b: &[Run], epsilon: f32) -> bool {
    let mut sorted = b.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|run| n32(run.first_weight()));
    a.iter().any(|run| {
        let first = run.first_weight();
        let start = sorted.partition_point(|other| other.first_weight() <= first - epsilon);
        sorted[start..]
            .iter()
            .take_while(|other| other.first_weight() < first + epsilon)
            .any(|other| run.matches(other, epsilon))
    })
}

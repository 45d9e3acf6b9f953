//! Module walking a [SimilarityGraph] to produce the order in which beats
//! should be played.
//!
//! The walker starts at the first beat and mostly plays beats linearly.
//! Once enough beats have been played since the last jump (the cooldown),
//! it randomly decides to try a jump: among the neighbors of the current
//! beat, it keeps those that are structurally compatible with it, and
//! splices to the one right after the closest of them.
//!
//! When it runs out of jumps, it plays the rest of the track linearly, so
//! that a remix always ends like the original song does.
use crate::matcher::{check_run_parameters, repeated_runs, runs_overlap, Run};
use crate::random::RandomSource;
use crate::{RemixConfig, RemixError, RemixResult, SimilarityGraph};
use log::{debug, info};
use ndarray::Array1;
use ndarray_stats::QuantileExt;

/// How a neighbor of the current beat is confirmed as a jump target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JumpValidation {
    /// The two beats must share at least one repeated run, see
    /// [find_repeated_runs](crate::matcher::find_repeated_runs).
    #[default]
    RepeatedRuns,
    /// The two beats must have at least `min_shared` neighbors in common.
    SharedNeighbors {
        /// Number of common neighbors needed.
        min_shared: usize,
    },
}

/// What the walker does once it has used all of its jumps.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Play the rest of the track linearly, until its last beat.
    #[default]
    PlayToEnd,
    /// Stop right after the beat the last jump landed on. A walk that
    /// never jumps still plays the whole track.
    StopAfterLastJump,
}

/// The parameters of a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSettings {
    /// Maximum number of jumps the walker takes.
    pub max_jumps: usize,
    /// Length of the runs used to validate a jump target.
    pub run_length: usize,
    /// Number of beats that must be played after a jump before the next
    /// one can be taken.
    pub jump_cooldown: usize,
    /// Probability of attempting a jump at each beat, once the cooldown
    /// has elapsed.
    pub jump_probability: f32,
    /// Tolerance under which two weights are considered equal.
    pub epsilon: f32,
    /// How jump targets are validated.
    pub validation: JumpValidation,
    /// What happens once all the jumps are used.
    pub termination: Termination,
}

impl Default for WalkSettings {
    fn default() -> Self {
        RemixConfig::default().walk_settings()
    }
}

impl WalkSettings {
    pub(crate) fn validate(&self) -> RemixResult<()> {
        if !(0. ..=1.).contains(&self.jump_probability) {
            return Err(RemixError::InvalidInput(format!(
                "jump_probability must be within [0, 1], got {}",
                self.jump_probability
            )));
        }
        if self.run_length < 1 {
            return Err(RemixError::InvalidInput(String::from(
                "run_length must be at least 1",
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0. {
            return Err(RemixError::InvalidInput(format!(
                "epsilon must be a finite, non-negative number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// The states a walk goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkState {
    /// Playing beats linearly, jumps still available.
    Advancing,
    /// Looking for a jump target from the current beat.
    ConsideringJump,
    /// A jump was just taken.
    Jumped,
    /// All the jumps are used, playing out the rest of the track.
    Finishing,
    /// The walk is over.
    Done,
}

/// A jump taken during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    /// Position, in the walk's sequence, of the beat the jump was taken from.
    pub position: usize,
    /// The beat the jump was taken from.
    pub from: usize,
    /// The beat that was found to be similar to `from`.
    pub target: usize,
    /// The beat played right after the jump, i.e. `target + 1`.
    pub landing: usize,
}

/// The result of a walk: the beats to play, and how they were picked.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Walk {
    /// The beats to play, in order.
    pub sequence: Vec<usize>,
    /// The jumps that were taken, in order.
    pub jumps: Vec<Jump>,
    /// How many times the walker went from the last beat back to the first.
    pub wraps: usize,
}

struct JumpState {
    phase: WalkState,
    current_beat: usize,
    potential_jumps: usize,
    jump_count: usize,
}

// Repeated runs only depend on the graph, so they are computed at most
// once per beat and per walk.
struct RunCache {
    runs: Vec<Option<Vec<Run>>>,
    run_length: usize,
    epsilon: f32,
}

impl RunCache {
    fn new(beat_count: usize, run_length: usize, epsilon: f32) -> Self {
        RunCache {
            runs: vec![None; beat_count],
            run_length,
            epsilon,
        }
    }

    fn fill(&mut self, graph: &SimilarityGraph, beat: usize) {
        if self.runs[beat].is_none() {
            self.runs[beat] = Some(repeated_runs(
                &graph.weights(beat),
                self.run_length,
                self.epsilon,
            ));
        }
    }

    fn get(&self, beat: usize) -> &[Run] {
        self.runs[beat].as_deref().unwrap_or_default()
    }
}

/// Walks a [SimilarityGraph], deciding beat by beat whether to keep on
/// playing linearly or to jump elsewhere in the track.
#[derive(Debug, Clone)]
pub struct JumpWalker {
    settings: WalkSettings,
}

impl JumpWalker {
    /// Create a new walker, failing if `settings` are out of bounds.
    pub fn new(settings: WalkSettings) -> RemixResult<Self> {
        settings.validate()?;
        Ok(JumpWalker { settings })
    }

    /// The settings this walker was created with.
    pub fn settings(&self) -> &WalkSettings {
        &self.settings
    }

    /// Walk `graph`, drawing random numbers from `rng`, and return the
    /// beats to play, in order.
    ///
    /// See [trace](JumpWalker::trace) to also get the jumps that were
    /// taken.
    pub fn walk(
        &self,
        graph: &SimilarityGraph,
        rng: &mut impl RandomSource,
    ) -> RemixResult<Vec<usize>> {
        Ok(self.trace(graph, rng)?.sequence)
    }

    /// Walk `graph`, drawing random numbers from `rng`.
    ///
    /// The only source of randomness is `rng`: walking the same graph
    /// with the same settings and an identically seeded source always
    /// gives the same [Walk].
    ///
    /// If at least one beat has a valid jump target, the walker keeps on
    /// going back to the first beat until all of its jumps are taken. A
    /// source that never draws below `jump_probability` would then walk
    /// forever.
    pub fn trace(
        &self,
        graph: &SimilarityGraph,
        rng: &mut impl RandomSource,
    ) -> RemixResult<Walk> {
        let beat_count = graph.beat_count();
        if beat_count < 2 {
            return Err(RemixError::InvalidInput(format!(
                "at least two beats are needed to walk, got {beat_count}"
            )));
        }
        check_run_parameters(beat_count, self.settings.run_length, self.settings.epsilon)?;
        info!(
            "Walking a {}-beat track, with up to {} jumps",
            beat_count, self.settings.max_jumps
        );

        let mut cache = RunCache::new(beat_count, self.settings.run_length, self.settings.epsilon);
        // Wrapping around only makes sense if a jump can happen at all.
        let can_jump = self.settings.max_jumps > 0
            && self.settings.jump_probability > 0.
            && (0..beat_count).any(|beat| !self.valid_targets(graph, beat, &mut cache).is_empty());
        if !can_jump {
            debug!("No jump can be taken, the walk will be linear");
        }

        let mut state = JumpState {
            phase: WalkState::Advancing,
            current_beat: 0,
            potential_jumps: 0,
            jump_count: 0,
        };
        let mut walk = Walk::default();

        loop {
            state.phase = match state.phase {
                WalkState::Advancing | WalkState::Jumped => {
                    self.emit(&state, &mut walk, beat_count)?;
                    if state.jump_count >= self.settings.max_jumps {
                        self.finish(&mut state, beat_count)
                    } else if self.wants_jump(graph, &mut state, rng) {
                        WalkState::ConsideringJump
                    } else {
                        self.advance(&mut state, &mut walk, beat_count, can_jump)
                    }
                }
                WalkState::ConsideringJump => {
                    let beat = state.current_beat;
                    match self.pick_target(graph, beat, &mut cache)? {
                        Some(target) => {
                            let landing = target + 1;
                            debug!(
                                "Jumping from beat {} to beat {} (similar to {})",
                                beat, landing, target
                            );
                            walk.jumps.push(Jump {
                                position: walk.sequence.len() - 1,
                                from: beat,
                                target,
                                landing,
                            });
                            state.current_beat = landing;
                            state.potential_jumps = 0;
                            state.jump_count += 1;
                            WalkState::Jumped
                        }
                        None => self.advance(&mut state, &mut walk, beat_count, can_jump),
                    }
                }
                WalkState::Finishing => {
                    self.emit(&state, &mut walk, beat_count)?;
                    self.finish(&mut state, beat_count)
                }
                WalkState::Done => break,
            };
        }

        info!(
            "Walk done: {} beats played, {} jumps taken, {} wraps",
            walk.sequence.len(),
            walk.jumps.len(),
            walk.wraps
        );
        Ok(walk)
    }

    fn emit(&self, state: &JumpState, walk: &mut Walk, beat_count: usize) -> RemixResult<()> {
        if state.current_beat >= beat_count {
            return Err(RemixError::OutOfRange(format!(
                "walked to beat {} in a {beat_count}-beat track",
                state.current_beat
            )));
        }
        walk.sequence.push(state.current_beat);
        Ok(())
    }

    /// Move to the next beat, going back to the first one after the last
    /// beat as long as jumps can still happen.
    fn advance(
        &self,
        state: &mut JumpState,
        walk: &mut Walk,
        beat_count: usize,
        can_jump: bool,
    ) -> WalkState {
        if state.current_beat + 1 < beat_count {
            state.current_beat += 1;
            WalkState::Advancing
        } else if can_jump {
            debug!("Reached the last beat with jumps left, going back to the first one");
            state.current_beat = 0;
            walk.wraps += 1;
            WalkState::Advancing
        } else {
            WalkState::Done
        }
    }

    fn finish(&self, state: &mut JumpState, beat_count: usize) -> WalkState {
        let stop_now = self.settings.termination == Termination::StopAfterLastJump
            && state.jump_count > 0;
        if stop_now || state.current_beat + 1 >= beat_count {
            WalkState::Done
        } else {
            state.current_beat += 1;
            WalkState::Finishing
        }
    }

    /// Whether the walker tries to jump from the current beat: it needs
    /// neighbors, an elapsed cooldown and a lucky draw.
    fn wants_jump(
        &self,
        graph: &SimilarityGraph,
        state: &mut JumpState,
        rng: &mut impl RandomSource,
    ) -> bool {
        if graph.neighbors(state.current_beat).is_empty() {
            return false;
        }
        state.potential_jumps += 1;
        let draw = rng.next_f32();
        draw < self.settings.jump_probability
            && state.potential_jumps >= self.settings.jump_cooldown
    }

    /// The valid target closest to `beat` in feature space, if any.
    fn pick_target(
        &self,
        graph: &SimilarityGraph,
        beat: usize,
        cache: &mut RunCache,
    ) -> RemixResult<Option<usize>> {
        let targets = self.valid_targets(graph, beat, cache);
        if targets.is_empty() {
            return Ok(None);
        }
        let distances = targets
            .iter()
            .map(|&target| {
                graph.feature_distance(beat, target).ok_or_else(|| {
                    RemixError::OutOfRange(format!(
                        "jump target {target} in a {}-beat track",
                        graph.beat_count()
                    ))
                })
            })
            .collect::<RemixResult<Array1<f32>>>()?;
        // Targets are sorted by index, so ties go to the lowest one.
        let closest = distances.argmin().map_err(|e| {
            RemixError::InvalidInput(format!("while picking a jump target: {e}"))
        })?;
        Ok(Some(targets[closest]))
    }

    fn valid_targets(
        &self,
        graph: &SimilarityGraph,
        beat: usize,
        cache: &mut RunCache,
    ) -> Vec<usize> {
        let beat_count = graph.beat_count();
        let candidates = graph
            .neighbors(beat)
            .iter()
            .copied()
            .filter(|&b| b != beat && b + 1 < beat_count);

        match self.settings.validation {
            JumpValidation::RepeatedRuns => {
                cache.fill(graph, beat);
                if cache.get(beat).is_empty() {
                    return vec![];
                }
                let candidates = candidates.collect::<Vec<_>>();
                for &candidate in &candidates {
                    cache.fill(graph, candidate);
                }
                let epsilon = self.settings.epsilon;
                candidates
                    .into_iter()
                    .filter(|&b| runs_overlap(cache.get(beat), cache.get(b), epsilon))
                    .collect()
            }
            JumpValidation::SharedNeighbors { min_shared } => candidates
                .filter(|&b| {
                    shared_neighbors(graph.neighbors(beat), graph.neighbors(b)) >= min_shared
                })
                .collect(),
        }
    }
}

// Both slices are sorted.
fn shared_neighbors(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{DistanceMetric, NeighborPolicy, SeededRandom};
    use ndarray::{arr1, Array1};
    use pretty_assertions::assert_eq;

    /// Replays `values`, then keeps on returning the last one.
    struct ScriptedRandom {
        values: Vec<f32>,
        position: usize,
    }

    impl ScriptedRandom {
        fn new(values: &[f32]) -> Self {
            ScriptedRandom {
                values: values.to_vec(),
                position: 0,
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_f32(&mut self) -> f32 {
            let value = self.values[self.position.min(self.values.len() - 1)];
            self.position += 1;
            value
        }
    }

    fn one_hot(beat_count: usize, hot: impl Fn(usize) -> usize) -> Vec<Array1<f32>> {
        (0..beat_count)
            .map(|i| {
                let mut feature = Array1::zeros(beat_count);
                feature[hot(i)] = 1.;
                feature
            })
            .collect()
    }

    // Every beat is at the same distance of every other beat, so that
    // every beat is a valid jump target for every other beat.
    fn uniform_graph(beat_count: usize) -> SimilarityGraph {
        SimilarityGraph::build(
            &one_hot(beat_count, |i| i),
            DistanceMetric::Euclidean,
            NeighborPolicy::All,
        )
        .unwrap()
    }

    fn settings() -> WalkSettings {
        WalkSettings {
            max_jumps: 3,
            run_length: 3,
            jump_cooldown: 0,
            jump_probability: 1.,
            epsilon: 1e-6,
            validation: JumpValidation::RepeatedRuns,
            termination: Termination::PlayToEnd,
        }
    }

    #[test]
    fn test_walk_no_jumps() {
        let walker = JumpWalker::new(WalkSettings {
            max_jumps: 0,
            ..settings()
        })
        .unwrap();
        let walk = walker
            .trace(&uniform_graph(5), &mut SeededRandom::new(0))
            .unwrap();
        assert_eq!(walk.sequence, vec![0, 1, 2, 3, 4]);
        assert_eq!(walk.jumps, vec![]);
        assert_eq!(walk.wraps, 0);
    }

    #[test]
    fn test_walk_no_edges() {
        let graph = SimilarityGraph::build(
            &one_hot(6, |i| i),
            DistanceMetric::Euclidean,
            NeighborPolicy::Threshold(0.5),
        )
        .unwrap();
        assert!(!graph.has_edges());
        for jump_probability in [0., 0.5, 1.] {
            let walker = JumpWalker::new(WalkSettings {
                jump_probability,
                ..settings()
            })
            .unwrap();
            assert_eq!(
                walker.walk(&graph, &mut SeededRandom::new(3)).unwrap(),
                vec![0, 1, 2, 3, 4, 5],
            );
        }
    }

    #[test]
    fn test_walk_always_jumping() {
        let walker = JumpWalker::new(settings()).unwrap();
        let walk = walker
            .trace(&uniform_graph(10), &mut SeededRandom::new(0))
            .unwrap();
        assert_eq!(walk.jumps.len(), 3);
        // All candidates are equally close: the lowest index wins.
        assert_eq!(
            walk.jumps,
            vec![
                Jump {
                    position: 0,
                    from: 0,
                    target: 1,
                    landing: 2,
                },
                Jump {
                    position: 1,
                    from: 2,
                    target: 0,
                    landing: 1,
                },
                Jump {
                    position: 2,
                    from: 1,
                    target: 0,
                    landing: 1,
                },
            ],
        );
        assert_eq!(walk.sequence, vec![0, 2, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(walk.sequence.len() >= 10);
    }

    #[test]
    fn test_walk_closest_target() {
        // Beat 7 has the same features as beat 2.
        let features = one_hot(10, |i| if i == 7 { 2 } else { i });
        let graph =
            SimilarityGraph::build(&features, DistanceMetric::Euclidean, NeighborPolicy::All)
                .unwrap();
        let walker = JumpWalker::new(WalkSettings {
            max_jumps: 1,
            run_length: 2,
            jump_cooldown: 3,
            ..settings()
        })
        .unwrap();
        let walk = walker.trace(&graph, &mut SeededRandom::new(0)).unwrap();
        assert_eq!(
            walk.jumps,
            vec![Jump {
                position: 2,
                from: 2,
                target: 7,
                landing: 8,
            }],
        );
        assert_eq!(walk.sequence, vec![0, 1, 2, 8, 9]);
    }

    #[test]
    fn test_walk_wraps_around() {
        let walker = JumpWalker::new(WalkSettings {
            max_jumps: 2,
            jump_probability: 0.5,
            ..settings()
        })
        .unwrap();
        let mut rng = ScriptedRandom::new(&[0., 0.9, 0.9, 0.9, 0.9, 0.9, 0.]);
        let walk = walker.trace(&uniform_graph(5), &mut rng).unwrap();
        assert_eq!(walk.sequence, vec![0, 2, 3, 4, 0, 1, 2, 1, 2, 3, 4]);
        assert_eq!(walk.jumps.len(), 2);
        assert_eq!(walk.wraps, 1);
    }

    #[test]
    fn test_walk_wraps_after_a_pass_without_jumps() {
        let walker = JumpWalker::new(WalkSettings {
            jump_probability: 0.5,
            ..settings()
        })
        .unwrap();
        // No jump during the whole first pass, then every draw succeeds.
        let mut rng = ScriptedRandom::new(&[0.9, 0.9, 0.9, 0.9, 0.9, 0.]);
        let walk = walker.trace(&uniform_graph(5), &mut rng).unwrap();
        assert_eq!(walk.wraps, 1);
        assert_eq!(
            walk.jumps.iter().map(|j| j.position).collect::<Vec<_>>(),
            vec![5, 6, 7],
        );
        assert_eq!(walk.sequence, vec![0, 1, 2, 3, 4, 0, 2, 1, 1, 2, 3, 4]);
    }

    #[test]
    fn test_walk_draws_only_while_jumps_are_left() {
        let walker = JumpWalker::new(settings()).unwrap();
        let mut rng = ScriptedRandom::new(&[0.]);
        let walk = walker.trace(&uniform_graph(10), &mut rng).unwrap();
        assert_eq!(walk.jumps.len(), 3);
        // One draw per jump, none while finishing the track.
        assert_eq!(rng.position, 3);
    }

    #[test]
    fn test_walk_stop_after_last_jump() {
        let walker = JumpWalker::new(WalkSettings {
            termination: Termination::StopAfterLastJump,
            ..settings()
        })
        .unwrap();
        let walk = walker
            .trace(&uniform_graph(10), &mut SeededRandom::new(0))
            .unwrap();
        assert_eq!(walk.sequence, vec![0, 2, 1, 1]);

        // Without any jump, the whole track still gets played.
        let walker = JumpWalker::new(WalkSettings {
            termination: Termination::StopAfterLastJump,
            jump_probability: 0.,
            ..settings()
        })
        .unwrap();
        assert_eq!(
            walker
                .walk(&uniform_graph(4), &mut SeededRandom::new(0))
                .unwrap(),
            vec![0, 1, 2, 3],
        );
    }

    #[test]
    fn test_walk_no_repeated_runs() {
        // Beats on a line: no two windows of weights look alike.
        let features = [0., 1., 3., 7., 15., 31.]
            .iter()
            .map(|&x| arr1(&[x]))
            .collect::<Vec<_>>();
        let graph =
            SimilarityGraph::build(&features, DistanceMetric::Euclidean, NeighborPolicy::All)
                .unwrap();
        let walker = JumpWalker::new(WalkSettings {
            run_length: 2,
            ..settings()
        })
        .unwrap();
        let walk = walker.trace(&graph, &mut SeededRandom::new(0)).unwrap();
        assert_eq!(walk.sequence, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(walk.jumps, vec![]);
    }

    #[test]
    fn test_walk_shared_neighbors() {
        let features = [0., 1., 2., 10., 11., 12.]
            .iter()
            .map(|&x| arr1(&[x]))
            .collect::<Vec<_>>();
        // Two clusters, {0, 1, 2} and {3, 4, 5}.
        let graph = SimilarityGraph::build(
            &features,
            DistanceMetric::Euclidean,
            NeighborPolicy::Threshold(2.),
        )
        .unwrap();
        let walker = JumpWalker::new(WalkSettings {
            max_jumps: 1,
            jump_cooldown: 2,
            validation: JumpValidation::SharedNeighbors { min_shared: 1 },
            ..settings()
        })
        .unwrap();
        let walk = walker.trace(&graph, &mut SeededRandom::new(0)).unwrap();
        // From beat 1, 0 and 2 share a neighbor with it; 0 is picked on
        // ties, which makes the walker play beat 1 again.
        assert_eq!(
            walk.jumps,
            vec![Jump {
                position: 1,
                from: 1,
                target: 0,
                landing: 1,
            }],
        );
        assert_eq!(walk.sequence, vec![0, 1, 1, 2, 3, 4, 5]);

        let walker = JumpWalker::new(WalkSettings {
            validation: JumpValidation::SharedNeighbors { min_shared: 3 },
            ..settings()
        })
        .unwrap();
        assert_eq!(
            walker.walk(&graph, &mut SeededRandom::new(0)).unwrap(),
            vec![0, 1, 2, 3, 4, 5],
        );
    }

    #[test]
    fn test_walk_invariants() {
        let graph = uniform_graph(12);
        for (seed, jump_cooldown) in (0..40).zip([0, 1, 2, 5].iter().cycle()) {
            let walker = JumpWalker::new(WalkSettings {
                max_jumps: 6,
                jump_cooldown: *jump_cooldown,
                jump_probability: 0.3,
                ..settings()
            })
            .unwrap();
            let walk = walker.trace(&graph, &mut SeededRandom::new(seed)).unwrap();
            assert_eq!(walk.sequence.first(), Some(&0));
            assert_eq!(walk.sequence.last(), Some(&11));
            // Every beat has valid targets, so all the jumps get taken.
            assert_eq!(walk.jumps.len(), 6);
            for pair in walk.jumps.windows(2) {
                assert!(pair[1].position - pair[0].position >= *jump_cooldown);
            }
            for jump in &walk.jumps {
                assert_eq!(walk.sequence[jump.position], jump.from);
                assert_eq!(walk.sequence[jump.position + 1], jump.landing);
                assert_eq!(jump.landing, jump.target + 1);
            }
            // Every other transition is linear, or a wrap.
            let jump_positions = walk.jumps.iter().map(|j| j.position).collect::<Vec<_>>();
            let wraps = walk
                .sequence
                .windows(2)
                .enumerate()
                .filter(|(i, _)| !jump_positions.contains(i))
                .filter(|(_, pair)| pair[1] != pair[0] + 1)
                .inspect(|(_, pair)| assert_eq!(pair.to_vec(), vec![11, 0]))
                .count();
            assert_eq!(wraps, walk.wraps);

            let replay = walker.trace(&graph, &mut SeededRandom::new(seed)).unwrap();
            assert_eq!(walk, replay);
        }
    }

    #[test]
    fn test_walker_invalid_settings() {
        assert_eq!(
            JumpWalker::new(WalkSettings {
                jump_probability: -0.1,
                ..settings()
            })
            .unwrap_err(),
            RemixError::InvalidInput(String::from(
                "jump_probability must be within [0, 1], got -0.1"
            )),
        );
        assert_eq!(
            JumpWalker::new(WalkSettings {
                jump_probability: f32::NAN,
                ..settings()
            })
            .unwrap_err(),
            RemixError::InvalidInput(String::from(
                "jump_probability must be within [0, 1], got NaN"
            )),
        );
        assert_eq!(
            JumpWalker::new(WalkSettings {
                run_length: 0,
                ..settings()
            })
            .unwrap_err(),
            RemixError::InvalidInput(String::from("run_length must be at least 1")),
        );
        assert_eq!(
            JumpWalker::new(WalkSettings {
                epsilon: f32::INFINITY,
                ..settings()
            })
            .unwrap_err(),
            RemixError::InvalidInput(String::from(
                "epsilon must be a finite, non-negative number, got inf"
            )),
        );
        let walker = JumpWalker::new(WalkSettings {
            run_length: 5,
            ..settings()
        })
        .unwrap();
        assert_eq!(
            walker.walk(&uniform_graph(5), &mut SeededRandom::new(0)),
            Err(RemixError::InvalidInput(String::from(
                "run_length must be smaller than the number of beats (5), got 5"
            ))),
        );
    }

    #[test]
    fn test_shared_neighbors() {
        assert_eq!(shared_neighbors(&[0, 2, 4, 6], &[1, 2, 3, 6, 7]), 2);
        assert_eq!(shared_neighbors(&[], &[1, 2]), 0);
        assert_eq!(shared_neighbors(&[1, 2], &[1, 2]), 2);
    }
}

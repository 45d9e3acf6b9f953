//! Beat boundaries.
//!
//! Beats are computed upstream (by a beat tracker) and handed to the
//! library as the list of their start times. The end of a beat is the
//! start of the next one; the last beat runs until the end of the track.
use crate::{RemixError, RemixResult};
use std::ops::Range;

/// A single beat of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beat {
    /// Position of the beat in the track, starting from 0.
    pub index: usize,
    /// Start of the beat, in seconds.
    pub start_time: f64,
    /// End of the beat, in seconds. `None` for the last beat, which ends
    /// with the track itself.
    pub end_time: Option<f64>,
}

/// The validated, ordered beat boundaries of a track.
#[derive(Debug, Clone, PartialEq)]
pub struct Beats {
    timestamps: Vec<f64>,
}

impl Beats {
    /// Build beat boundaries from the start times of each beat, in
    /// seconds.
    ///
    /// Timestamps must be finite, non-negative and strictly increasing,
    /// and there must be at least one of them.
    pub fn from_timestamps(timestamps: &[f64]) -> RemixResult<Self> {
        if timestamps.is_empty() {
            return Err(RemixError::InvalidInput(String::from(
                "at least one beat timestamp is needed",
            )));
        }
        if let Some((i, t)) = timestamps
            .iter()
            .enumerate()
            .find(|(_, t)| !t.is_finite() || **t < 0.)
        {
            return Err(RemixError::InvalidInput(format!(
                "timestamp {i} must be finite and non-negative, got {t}"
            )));
        }
        if let Some(i) = timestamps.windows(2).position(|w| w[0] >= w[1]) {
            return Err(RemixError::InvalidInput(format!(
                "timestamps must be strictly increasing, but timestamp {} ({}) \
                 comes after {}",
                i + 1,
                timestamps[i + 1],
                timestamps[i],
            )));
        }
        Ok(Beats {
            timestamps: timestamps.to_vec(),
        })
    }

    /// The number of beats.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false, since building empty beats fails.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// The beat at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Beat> {
        let start_time = *self.timestamps.get(index)?;
        Some(Beat {
            index,
            start_time,
            end_time: self.timestamps.get(index + 1).copied(),
        })
    }

    /// Iterate over every beat, in order.
    pub fn iter(&self) -> impl Iterator<Item = Beat> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// The samples beat `index` spans in a track of `total_samples`
    /// samples, sampled at `sample_rate`.
    ///
    /// Seconds are converted to samples by truncation. Both bounds are
    /// clamped to `total_samples`, and the last beat always ends at
    /// `total_samples`.
    pub fn sample_range(
        &self,
        index: usize,
        sample_rate: u32,
        total_samples: usize,
    ) -> RemixResult<Range<usize>> {
        let beat = self.get(index).ok_or_else(|| {
            RemixError::OutOfRange(format!("beat {index} in a {}-beat track", self.len()))
        })?;
        let to_samples =
            |seconds: f64| ((seconds * sample_rate as f64) as usize).min(total_samples);
        let start = to_samples(beat.start_time);
        let end = beat.end_time.map_or(total_samples, to_samples);
        Ok(start..end)
    }
}

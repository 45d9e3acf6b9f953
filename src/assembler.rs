//! Turning a beat sequence back into audio.
use crate::{Beats, RemixError, RemixResult};
use log::debug;
use ndarray::{concatenate, s, Array2, ArrayView2, Axis};

/// Render `sequence` by concatenating, in order, the samples of every beat
/// it lists.
///
/// `source` holds the decoded track, one row per channel, sampled at
/// `sample_rate`. The beat boundaries are converted to samples with
/// [Beats::sample_range], so the output has as many channels as `source`
/// and a sequence playing every beat once gives back `source` unchanged.
///
/// An empty sequence gives an empty (zero-sample) track.
pub fn assemble(
    sequence: &[usize],
    beats: &Beats,
    source: ArrayView2<f32>,
    sample_rate: u32,
) -> RemixResult<Array2<f32>> {
    if sample_rate == 0 {
        return Err(RemixError::InvalidInput(String::from(
            "sample rate must be strictly positive",
        )));
    }
    let (channels, total_samples) = source.dim();
    if channels == 0 {
        return Err(RemixError::InvalidInput(String::from(
            "source audio must have at least one channel",
        )));
    }
    if sequence.is_empty() {
        return Ok(Array2::zeros((channels, 0)));
    }

    let segments = sequence
        .iter()
        .map(|&beat| {
            let range = beats.sample_range(beat, sample_rate, total_samples)?;
            Ok(source.slice(s![.., range]))
        })
        .collect::<RemixResult<Vec<_>>>()?;
    let output = concatenate(Axis(1), &segments)
        .map_err(|e| RemixError::InvalidInput(format!("while assembling beats: {e}")))?;
    debug!(
        "Assembled {} beats into {} samples over {channels} channel(s).",
        sequence.len(),
        output.ncols(),
    );
    Ok(output)
}

//! # Gain + Pitch Block Transform
//!
//! The whole effect runs once per block, never per sample across blocks,
//! and keeps no history between calls. Per block:
//!
//! ```text
//! input ──► × gain ──┬──────────────────────────► frames [0, N)
//!                    │  (pitch on: even samples zeroed first)
//!                    │
//!                    └──► × gain ──► scratch ──► channel 0, frames [N, 2N)
//!                          (pitch on only)
//! ```
//!
//! With the pitch effect on, the block comes out twice as long. Odd
//! samples in the first half carry `input × gain`; odd samples in the
//! appended half carry `input × gain²` because the scratch copy is taken
//! from the already-gained signal and gained again. Only channel 0
//! receives the appended half; the other channels' appended frames stay
//! silent.
//!
//! ## Decibels to linear gain
//!
//! ```text
//! gain = 10^(dB / 20)
//! ```
//!
//! 0 dB is unity gain, -20 dB is 0.1, and the bottom of the gain range,
//! -60 dB, is 0.001.

use nih_plug::util;

use super::block::AudioBlock;
use super::error::BlockError;

/// Parameter values for one block, read once at the block boundary and
/// held constant until the next call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams {
    /// Gain in decibels, nominally in [-60, 0].
    pub gain_db: f32,

    /// Whether the sample-drop/duplicate effect is on.
    pub pitch_enabled: bool,
}

impl BlockParams {
    /// Linear gain for this block.
    pub fn gain(&self) -> f32 {
        util::db_to_gain(self.gain_db)
    }
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            gain_db: -20.0,
            pitch_enabled: false,
        }
    }
}

/// How a block's frame count changes through the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCount {
    Unchanged,
    Doubled,
}

impl FrameCount {
    pub fn apply(self, input_frames: usize) -> usize {
        match self {
            FrameCount::Unchanged => input_frames,
            FrameCount::Doubled => input_frames * 2,
        }
    }
}

/// The block processor. Owns the per-channel scratch storage that the
/// pitch effect fills before appending it to the block.
pub struct GainPitch {
    /// One scratch vector per channel, each `max_frames` long.
    scratch: Vec<Vec<f32>>,

    /// Largest input block this processor can handle without allocating.
    max_frames: usize,
}

impl GainPitch {
    /// Create a processor for up to `num_channels` input channels and
    /// input blocks of at most `max_frames` frames.
    ///
    /// All scratch memory is allocated here, so call this from
    /// `initialize()` and not from the audio callback.
    pub fn new(num_channels: usize, max_frames: usize) -> Self {
        Self {
            scratch: vec![vec![0.0; max_frames]; num_channels],
            max_frames,
        }
    }

    /// Declares the output shape for a given parameter snapshot, so that
    /// whoever owns the block storage can size it before processing.
    pub fn frame_count(params: &BlockParams) -> FrameCount {
        if params.pitch_enabled {
            FrameCount::Doubled
        } else {
            FrameCount::Unchanged
        }
    }

    /// Number of frames a block of `input_frames` frames will have after
    /// [`process`](Self::process).
    pub fn output_frames(params: &BlockParams, input_frames: usize) -> usize {
        Self::frame_count(params).apply(input_frames)
    }

    /// Zero the scratch storage.
    pub fn reset(&mut self) {
        for scratch in &mut self.scratch {
            scratch.fill(0.0);
        }
    }

    #[cfg(test)]
    pub(crate) fn scratch_is_silent(&self) -> bool {
        self.scratch.iter().flatten().all(|s| *s == 0.0)
    }

    /// Transform one block in place.
    ///
    /// `input_channels` is the number of leading channels in `block` that
    /// carry input audio. Channels past it are output-only and are
    /// cleared to silence.
    ///
    /// A block with no channels or no frames is left untouched. Shape
    /// errors are reported before anything in the block is modified.
    pub fn process(
        &mut self,
        params: BlockParams,
        input_channels: usize,
        block: &mut AudioBlock,
    ) -> Result<(), BlockError> {
        let num_channels = block.num_channels();
        let frames = block.num_frames();
        if num_channels == 0 || frames == 0 {
            return Ok(());
        }

        if input_channels > num_channels {
            return Err(BlockError::ChannelMismatch {
                expected: num_channels,
                actual: input_channels,
            });
        }
        if input_channels > self.scratch.len() {
            return Err(BlockError::ChannelMismatch {
                expected: self.scratch.len(),
                actual: input_channels,
            });
        }
        if frames > self.max_frames {
            return Err(BlockError::CapacityExceeded {
                requested: frames,
                capacity: self.max_frames,
            });
        }
        let output_frames = Self::output_frames(&params, frames);
        if output_frames > block.capacity() {
            return Err(BlockError::CapacityExceeded {
                requested: output_frames,
                capacity: block.capacity(),
            });
        }

        for channel in input_channels..num_channels {
            block.clear_channel(channel);
        }

        let gain = params.gain();
        for channel in 0..input_channels {
            let data = block.channel_mut(channel);
            for sample in data.iter_mut() {
                *sample *= gain;
            }

            if params.pitch_enabled {
                for sample in data.iter_mut().step_by(2) {
                    *sample = 0.0;
                }

                // The scratch copy is gained a second time.
                let scratch = &mut self.scratch[channel][..frames];
                for (dst, src) in scratch.iter_mut().zip(data.iter()) {
                    *dst = *src * gain;
                }
            }
        }

        if params.pitch_enabled {
            block.set_num_frames(output_frames)?;
            if input_channels > 0 {
                block.channel_mut(0)[frames..].copy_from_slice(&self.scratch[0][..frames]);
            }
        }

        Ok(())
    }
}

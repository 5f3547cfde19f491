//! # Audio Block
//!
//! Host buffers have a fixed number of frames per call, but the pitch
//! effect doubles the frame count of the block it processes. Rather than
//! letting the effect reallocate the host's memory, the host adapter owns
//! an `AudioBlock` whose storage is reserved up front:
//!
//! ```text
//!  channel 0: [ f0 f1 ... fN-1 | zero-filled headroom ... ]
//!  channel 1: [ f0 f1 ... fN-1 | zero-filled headroom ... ]
//!             |<-- frames --->|
//!             |<------------ capacity ------------------>|
//! ```
//!
//! Growing the block only moves the `frames` marker and zero-fills the
//! newly exposed region, so it is safe on the audio thread.

use super::error::BlockError;

/// Channel-major audio storage with a fixed, pre-allocated capacity.
#[derive(Debug, Clone)]
pub struct AudioBlock {
    /// One vector per channel. Every vector has length `capacity`; only
    /// the first `frames` samples are part of the block.
    channels: Vec<Vec<f32>>,

    /// Number of frames currently in the block.
    frames: usize,

    /// Maximum number of frames the block can hold without allocating.
    capacity: usize,
}

impl AudioBlock {
    /// Create an empty block that can grow to `capacity` frames.
    ///
    /// Call this from `initialize()`, never from `process()`.
    pub fn with_capacity(num_channels: usize, capacity: usize) -> Self {
        Self {
            channels: vec![vec![0.0; capacity]; num_channels],
            frames: 0,
            capacity,
        }
    }

    /// Build a block from owned channel data, reserving room for the
    /// frame count to double.
    ///
    /// Every channel must have the same length as channel 0.
    pub fn from_channels(mut channels: Vec<Vec<f32>>) -> Result<Self, BlockError> {
        let frames = channels.first().map_or(0, Vec::len);
        if let Some((channel, data)) = channels
            .iter()
            .enumerate()
            .find(|(_, data)| data.len() != frames)
        {
            return Err(BlockError::RaggedChannels {
                channel,
                expected: frames,
                actual: data.len(),
            });
        }

        let capacity = frames * 2;
        for data in &mut channels {
            data.resize(capacity, 0.0);
        }

        Ok(Self {
            channels,
            frames,
            capacity,
        })
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn num_frames(&self) -> usize {
        self.frames
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The block's samples for one channel.
    ///
    /// # Panics
    /// Panics if `index >= self.num_channels()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index][..self.frames]
    }

    /// Mutable access to one channel's samples.
    ///
    /// # Panics
    /// Panics if `index >= self.num_channels()`.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index][..self.frames]
    }

    /// Overwrite one channel with silence.
    pub fn clear_channel(&mut self, index: usize) {
        self.channel_mut(index).fill(0.0);
    }

    /// Change the frame count, keeping existing content.
    ///
    /// Frames exposed by growing are zero-filled, so nothing left over
    /// from an earlier, longer block can leak back into the output.
    pub fn set_num_frames(&mut self, frames: usize) -> Result<(), BlockError> {
        if frames > self.capacity {
            return Err(BlockError::CapacityExceeded {
                requested: frames,
                capacity: self.capacity,
            });
        }

        if frames > self.frames {
            for data in &mut self.channels {
                data[self.frames..frames].fill(0.0);
            }
        }
        self.frames = frames;

        Ok(())
    }

    /// Copy a host buffer into the block, replacing its content.
    ///
    /// The host must supply exactly `num_channels()` channels of equal
    /// length. Does not allocate.
    pub fn load(&mut self, host: &[&mut [f32]]) -> Result<(), BlockError> {
        if host.len() != self.channels.len() {
            return Err(BlockError::ChannelMismatch {
                expected: self.channels.len(),
                actual: host.len(),
            });
        }

        let frames = host.first().map_or(0, |c| c.len());
        if let Some((channel, data)) = host.iter().enumerate().find(|(_, c)| c.len() != frames) {
            return Err(BlockError::RaggedChannels {
                channel,
                expected: frames,
                actual: data.len(),
            });
        }
        if frames > self.capacity {
            return Err(BlockError::CapacityExceeded {
                requested: frames,
                capacity: self.capacity,
            });
        }

        for (dst, src) in self.channels.iter_mut().zip(host) {
            dst[..frames].copy_from_slice(src);
        }
        self.frames = frames;

        Ok(())
    }

    /// Copy the block's leading frames back into a host buffer.
    ///
    /// Each host channel receives as many frames as it can hold. If the
    /// block is longer than the host buffer, the trailing frames are not
    /// delivered.
    pub fn store(&self, host: &mut [&mut [f32]]) -> Result<(), BlockError> {
        if host.len() != self.channels.len() {
            return Err(BlockError::ChannelMismatch {
                expected: self.channels.len(),
                actual: host.len(),
            });
        }

        for (dst, src) in host.iter_mut().zip(&self.channels) {
            let n = dst.len().min(self.frames);
            dst[..n].copy_from_slice(&src[..n]);
        }

        Ok(())
    }

    /// True if every sample of the storage, including the headroom past
    /// `frames`, is zero.
    #[cfg(test)]
    pub(crate) fn storage_is_silent(&self) -> bool {
        self.channels.iter().flatten().all(|s| *s == 0.0)
    }

    /// Silence all storage and empty the block.
    pub fn reset(&mut self) {
        for data in &mut self.channels {
            data.fill(0.0);
        }
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_reserves_room_to_double() {
        let block = AudioBlock::from_channels(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(block.num_frames(), 3);
        assert_eq!(block.capacity(), 6);
        assert_eq!(block.channel(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_channels_rejects_ragged_input() {
        let err = AudioBlock::from_channels(vec![vec![0.0; 4], vec![0.0; 3]]).unwrap_err();
        assert_eq!(
            err,
            BlockError::RaggedChannels {
                channel: 1,
                expected: 4,
                actual: 3
            }
        );
    }

    /// Growing keeps the existing samples and zero-fills the rest.
    #[test]
    fn test_grow_preserves_and_zero_fills() {
        let mut block = AudioBlock::from_channels(vec![vec![0.5, -0.5]]).unwrap();
        block.set_num_frames(4).unwrap();
        assert_eq!(block.channel(0), &[0.5, -0.5, 0.0, 0.0]);
    }

    /// Shrinking then growing again must not resurrect the old tail.
    #[test]
    fn test_regrow_does_not_expose_stale_samples() {
        let mut block = AudioBlock::from_channels(vec![vec![1.0; 4]]).unwrap();
        block.set_num_frames(1).unwrap();
        block.set_num_frames(4).unwrap();
        assert_eq!(block.channel(0), &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_grow_past_capacity_fails() {
        let mut block = AudioBlock::with_capacity(2, 8);
        let err = block.set_num_frames(9).unwrap_err();
        assert_eq!(
            err,
            BlockError::CapacityExceeded {
                requested: 9,
                capacity: 8
            }
        );
        assert_eq!(block.num_frames(), 0, "failed grow must not change the block");
    }

    #[test]
    fn test_load_and_store_round_trip_through_host_slices() {
        let mut left = [0.1, 0.2, 0.3];
        let mut right = [-0.1, -0.2, -0.3];
        let mut block = AudioBlock::with_capacity(2, 6);

        {
            let host: [&mut [f32]; 2] = [&mut left, &mut right];
            block.load(&host).unwrap();
        }
        assert_eq!(block.num_frames(), 3);
        assert_eq!(block.channel(1), &[-0.1, -0.2, -0.3]);

        block.channel_mut(0).fill(1.0);
        block.set_num_frames(6).unwrap();

        let mut host: [&mut [f32]; 2] = [&mut left, &mut right];
        block.store(&mut host).unwrap();
        assert_eq!(left, [1.0, 1.0, 1.0]);
        assert_eq!(right, [-0.1, -0.2, -0.3]);
    }

    #[test]
    fn test_load_rejects_wrong_channel_count() {
        let mut mono = [0.0; 4];
        let host: [&mut [f32]; 1] = [&mut mono];
        let mut block = AudioBlock::with_capacity(2, 8);
        assert_eq!(
            block.load(&host).unwrap_err(),
            BlockError::ChannelMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_load_rejects_oversized_host_buffer() {
        let mut mono = [0.0; 16];
        let host: [&mut [f32]; 1] = [&mut mono];
        let mut block = AudioBlock::with_capacity(1, 8);
        assert!(matches!(
            block.load(&host),
            Err(BlockError::CapacityExceeded { requested: 16, .. })
        ));
    }

    #[test]
    fn test_reset_silences_everything() {
        let mut block = AudioBlock::from_channels(vec![vec![1.0; 3]]).unwrap();
        block.reset();
        assert_eq!(block.num_frames(), 0);
        block.set_num_frames(3).unwrap();
        assert_eq!(block.channel(0), &[0.0, 0.0, 0.0]);
    }
}

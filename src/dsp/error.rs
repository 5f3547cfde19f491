//! Shape errors for the block transform.
//!
//! None of these are recoverable inside `process()`. They mean the host
//! adapter and the processor disagree about the block layout, or a block
//! would need more storage than `initialize()` reserved for it.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
    /// A channel count does not fit the block: more input channels than
    /// the block holds, or a host buffer with a different channel count.
    #[error("channel count {actual} does not fit a {expected}-channel block")]
    ChannelMismatch { expected: usize, actual: usize },

    /// One channel's length differs from channel 0's.
    #[error("channel {channel} has {actual} frames, expected {expected}")]
    RaggedChannels {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    /// Growing to `requested` frames would need a heap allocation.
    #[error("block needs {requested} frames but only {capacity} were pre-allocated")]
    CapacityExceeded { requested: usize, capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_numbers() {
        let err = BlockError::CapacityExceeded {
            requested: 1024,
            capacity: 512,
        };
        assert_eq!(
            err.to_string(),
            "block needs 1024 frames but only 512 were pre-allocated"
        );

        let err = BlockError::RaggedChannels {
            channel: 1,
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "channel 1 has 3 frames, expected 4");

        let err = BlockError::ChannelMismatch {
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "channel count 1 does not fit a 2-channel block"
        );
    }
}

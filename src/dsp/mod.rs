//! # DSP
//!
//! - **`block`**: pre-allocated channel-major storage that can grow to
//!   twice the host's block size without touching the heap.
//! - **`gain_pitch`**: the per-block gain and sample-drop/duplicate
//!   transform, plus the per-block parameter snapshot it reads.
//! - **`error`**: shape errors shared by both.

pub mod block;
pub mod error;
pub mod gain_pitch;

//! # Plugin Parameters
//!
//! Two parameters, both written by the editor (or host automation) and
//! read by the audio thread once per block:
//!
//! - **Gain**: -60 dB to 0 dB in 0.01 dB steps, default -20 dB.
//! - **Pitch**: on/off switch for the sample-drop/duplicate effect,
//!   default off.
//!
//! Neither parameter is smoothed. A change lands at the next block
//! boundary and holds for the whole block, which is what the pitch
//! effect's frame doubling needs: a block is either doubled or not.

use std::sync::Arc;

use nih_plug::prelude::*;
use nih_plug_egui::EguiState;

use crate::dsp::gain_pitch::BlockParams;

pub const GAIN_MIN_DB: f32 = -60.0;
pub const GAIN_MAX_DB: f32 = 0.0;
pub const GAIN_STEP_DB: f32 = 0.01;
pub const GAIN_DEFAULT_DB: f32 = -20.0;

/// Editor window size in logical pixels.
pub const EDITOR_WIDTH: u32 = 400;
pub const EDITOR_HEIGHT: u32 = 300;

#[derive(Params)]
pub struct GainPitchParams {
    /// Editor window size. The only value restored with a session; see
    /// `Plugin::filter_state` in `lib.rs`.
    #[persist = "editor-state"]
    pub editor_state: Arc<EguiState>,

    /// **Gain** in decibels, applied to every sample.
    #[id = "gain"]
    pub gain: FloatParam,

    /// **Pitch**: zeroes even samples and appends a re-gained copy of the
    /// block. Despite the name it does not shift pitch.
    #[id = "pitch"]
    pub pitch: BoolParam,
}

impl GainPitchParams {
    /// Read both parameters once for the coming block.
    ///
    /// Each `value()` is a single atomic load, so this never blocks the
    /// audio thread even while the editor is writing.
    pub fn snapshot(&self) -> BlockParams {
        BlockParams {
            gain_db: self.gain.value(),
            pitch_enabled: self.pitch.value(),
        }
    }
}

impl Default for GainPitchParams {
    fn default() -> Self {
        Self {
            editor_state: EguiState::from_size(EDITOR_WIDTH, EDITOR_HEIGHT),

            gain: FloatParam::new(
                "Gain",
                GAIN_DEFAULT_DB,
                FloatRange::Linear {
                    min: GAIN_MIN_DB,
                    max: GAIN_MAX_DB,
                },
            )
            .with_unit(" dB")
            .with_step_size(GAIN_STEP_DB)
            .with_value_to_string(formatters::v2s_f32_rounded(2)),

            pitch: BoolParam::new("Pitch", false)
                .with_value_to_string(Arc::new(|on: bool| {
                    String::from(if on { "On" } else { "Off" })
                }))
                .with_string_to_value(Arc::new(|s: &str| {
                    match s.trim().to_ascii_lowercase().as_str() {
                        "on" | "1" => Some(true),
                        "off" | "0" => Some(false),
                        _ => None,
                    }
                })),
        }
    }
}

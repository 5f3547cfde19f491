//! # Gain Pitch — An AU/VST3/CLAP Gain and Sample-Drop Plugin
//!
//! A small effect built with [nih-plug](https://github.com/robbert-vdh/nih-plug).
//! Two controls: a decibel gain and an on/off "pitch" switch that zeroes
//! every even sample and appends a re-gained copy of the block.
//!
//! ## Signal Flow
//!
//! ```text
//!  host buffer ──► AudioBlock::load ──► GainPitch::process ──► AudioBlock::store ──► host buffer
//!   (N frames)      (copy, no alloc)     (N or 2N frames)       (frames [0, N))
//!                                               ▲
//!                                               │ BlockParams, read once per block
//!                                        GainPitchParams ◄── editor sliders
//! ```
//!
//! The processor works on a block the adapter owns, sized in
//! `initialize()` for twice the host's largest buffer. The host's buffer
//! is fixed-length, so only the first N frames go back to the host. The
//! [`dsp`] module is public for callers that want the full doubled block.

pub mod dsp;
mod editor;
mod params;

use std::num::NonZeroU32;
use std::sync::Arc;

use dsp::{block::AudioBlock, error::BlockError, gain_pitch::GainPitch};
use nih_plug::prelude::*;
use params::GainPitchParams;

/// The main plugin struct.
///
/// `params` is shared with the host and the editor. Everything else is
/// owned by the audio thread and only touched in `initialize()`,
/// `reset()` and `process()`.
struct GainPitchPlugin {
    params: Arc<GainPitchParams>,

    /// Number of leading channels that carry input audio. Channels past
    /// this are output-only and get cleared every block.
    input_channels: usize,

    /// The block transform and its scratch storage.
    processor: GainPitch,

    /// Working copy of the host buffer, with room for the pitch effect
    /// to double it.
    block: AudioBlock,
}

impl Default for GainPitchPlugin {
    fn default() -> Self {
        // Real sizes are only known in initialize().
        Self {
            params: Arc::new(GainPitchParams::default()),
            input_channels: 0,
            processor: GainPitch::new(0, 0),
            block: AudioBlock::with_capacity(0, 0),
        }
    }
}

impl Plugin for GainPitchPlugin {
    // Name and vendor as shown in the DAW's plugin browser.
    const NAME: &'static str = "Gain Pitch";
    const VENDOR: &'static str = "Gain Pitch Audio";
    // No product page or support address yet; hosts accept empty strings.
    const URL: &'static str = "";
    const EMAIL: &'static str = "";
    // Pulled from Cargo.toml so the host sees the crate version.
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Stereo first, so hosts that pick the first matching layout get it.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
    ];

    // Audio only; the effect has no use for note or CC input.
    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    // Parameters are read once per block, so the host only needs to
    // deliver automation at block boundaries.
    const SAMPLE_ACCURATE_AUTOMATION: bool = false;

    // No SysEx and no off-thread work.
    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn editor(&mut self, _async_executor: AsyncExecutor<Self>) -> Option<Box<dyn Editor>> {
        editor::create(self.params.clone(), self.params.editor_state.clone())
    }

    /// Parameter values are not restored from saved sessions or presets;
    /// every instance starts from the defaults. The editor window size
    /// (a persisted field, not a parameter) is kept.
    fn filter_state(state: &mut PluginState) {
        state.params.clear();
    }

    /// Size the scratch and block storage for the host's configuration.
    ///
    /// Returns `false` when the layout has no main output, since there is
    /// nothing to write to.
    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let Some(output_channels) = audio_io_layout.main_output_channels else {
            nih_warn!("Rejecting layout without a main output");
            return false;
        };
        let output_channels = output_channels.get() as usize;
        let input_channels = audio_io_layout
            .main_input_channels
            .map_or(0, |c| c.get() as usize)
            .min(output_channels);
        let max_frames = buffer_config.max_buffer_size as usize;

        self.input_channels = input_channels;
        self.processor = GainPitch::new(input_channels, max_frames);
        self.block = AudioBlock::with_capacity(output_channels, max_frames * 2);

        nih_log!(
            "Initialized: {input_channels} in / {output_channels} out, max block {max_frames} frames"
        );

        true
    }

    fn reset(&mut self) {
        self.processor.reset();
        self.block.reset();
    }

    /// Snapshot the parameters, run the transform on the adapter's block,
    /// and hand the first N frames back to the host.
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        match self.process_block(buffer.as_slice()) {
            Ok(()) => ProcessStatus::Normal,
            Err(err) => {
                nih_debug_assert_failure!("Block processing failed: {err}");
                ProcessStatus::Error("block shape does not match the initialized layout")
            }
        }
    }
}

impl GainPitchPlugin {
    /// Snapshot the parameters, then load, transform and store one host
    /// buffer. Never allocates.
    fn process_block(&mut self, host: &mut [&mut [f32]]) -> Result<(), BlockError> {
        let params = self.params.snapshot();
        self.block.load(host)?;
        self.processor
            .process(params, self.input_channels, &mut self.block)?;
        self.block.store(host)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────
//
// Packaging metadata for CLAP and VST3. The AUv2 build reuses the CLAP
// metadata through clap-wrapper.

impl ClapPlugin for GainPitchPlugin {
    // Reverse-domain ID. Hosts key saved sessions on it, so it must never
    // change once published.
    const CLAP_ID: &'static str = "com.gain-pitch-audio.gain-pitch";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Decibel gain with an every-other-sample drop effect");
    // No manual or support pages exist.
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    // Lists the effect under utilities for both mono and stereo tracks.
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Mono,
        ClapFeature::Utility,
    ];
}

impl Vst3Plugin for GainPitchPlugin {
    // Globally unique 16-byte class ID. `*b"..."` turns the 16-character
    // ASCII literal into a `[u8; 16]`.
    const VST3_CLASS_ID: [u8; 16] = *b"GainPitch___v001";

    // Places the plugin in the host's FX > Tools category.
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Tools];
}

// ─────────────────────────────────────────────────────────────────────
// Export macros
// ─────────────────────────────────────────────────────────────────────
//
// C entry points the host uses to discover the plugin: `clap_entry` for
// CLAP and `GetPluginFactory` for VST3.

nih_export_clap!(GainPitchPlugin);
nih_export_vst3!(GainPitchPlugin);

// AUv2 entry point for Logic Pro, wrapping the CLAP export.
clap_wrapper::export_auv2!();

//! The control surface: two vertical sliders on a black background.
//!
//! Each slider forwards its value to the matching parameter through the
//! host's `ParamSetter`, wrapped in a begin/set/end gesture so automation
//! recording sees one edit per drag. The slider widget does the range
//! clamping; nothing else is validated.

use std::sync::Arc;

use nih_plug::prelude::*;
use nih_plug_egui::{create_egui_editor, egui, EguiState};

use crate::params::{GainPitchParams, GAIN_MAX_DB, GAIN_MIN_DB, GAIN_STEP_DB};

/// Length of each slider's track in logical pixels.
const SLIDER_LENGTH: f32 = 200.0;

pub(crate) fn create(
    params: Arc<GainPitchParams>,
    editor_state: Arc<EguiState>,
) -> Option<Box<dyn Editor>> {
    create_egui_editor(
        editor_state,
        (),
        |_, _| {},
        move |egui_ctx, setter, _state| {
            egui::CentralPanel::default()
                .frame(egui::Frame::default().fill(egui::Color32::BLACK))
                .show(egui_ctx, |ui| {
                    ui.spacing_mut().slider_width = SLIDER_LENGTH;
                    ui.add_space(30.0);
                    ui.columns(2, |columns| {
                        gain_control(&mut columns[0], &params, setter);
                        pitch_control(&mut columns[1], &params, setter);
                    });
                });
        },
    )
}

fn gain_control(ui: &mut egui::Ui, params: &GainPitchParams, setter: &ParamSetter) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("Gain").color(egui::Color32::WHITE));

        let mut value = params.gain.unmodulated_plain_value();
        let response = ui.add(
            egui::Slider::new(&mut value, GAIN_MIN_DB..=GAIN_MAX_DB)
                .vertical()
                .step_by(f64::from(GAIN_STEP_DB))
                .suffix(" dB"),
        );
        forward_edit(&response, setter, &params.gain, clamp_gain(value));
    });
}

fn pitch_control(ui: &mut egui::Ui, params: &GainPitchParams, setter: &ParamSetter) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("Pitch").color(egui::Color32::WHITE));

        let mut value = pitch_to_slider(params.pitch.unmodulated_plain_value());
        let response = ui.add(
            egui::Slider::new(&mut value, 0.0..=1.0)
                .vertical()
                .step_by(1.0)
                .suffix("[ON/OFF]"),
        );
        forward_edit(&response, setter, &params.pitch, pitch_from_slider(value));
    });
}

/// Write `value` to `param` when the slider changed. Drags open and close
/// their own gesture; clicks and typed values get a gesture of their own.
fn forward_edit<P: Param>(
    response: &egui::Response,
    setter: &ParamSetter,
    param: &P,
    value: P::Plain,
) {
    if response.drag_started() {
        setter.begin_set_parameter(param);
    }

    if response.changed() {
        let standalone = !response.dragged();
        if standalone {
            setter.begin_set_parameter(param);
        }
        setter.set_parameter(param, value);
        if standalone {
            setter.end_set_parameter(param);
        }
    }

    if response.drag_stopped() {
        setter.end_set_parameter(param);
    }
}

fn clamp_gain(db: f32) -> f32 {
    db.clamp(GAIN_MIN_DB, GAIN_MAX_DB)
}

fn pitch_to_slider(enabled: bool) -> f32 {
    if enabled {
        1.0
    } else {
        0.0
    }
}

fn pitch_from_slider(position: f32) -> bool {
    position >= 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_passes_through_in_range() {
        for db in [-60.0, -20.0, -0.01, 0.0] {
            assert_eq!(clamp_gain(db), db);
        }
    }

    #[test]
    fn test_gain_clamps_to_slider_range() {
        assert_eq!(clamp_gain(-75.0), -60.0);
        assert_eq!(clamp_gain(3.0), 0.0);
    }

    #[test]
    fn test_pitch_slider_positions() {
        assert!(!pitch_from_slider(0.0));
        assert!(pitch_from_slider(1.0));
        assert!(pitch_from_slider(pitch_to_slider(true)));
        assert!(!pitch_from_slider(pitch_to_slider(false)));
    }
}

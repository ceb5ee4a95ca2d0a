use crate::prelude::*;
use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParametersDraft>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

/// Parameters as currently shown in the panel, possibly mid-edit.
#[derive(Resource, Default)]
struct ParametersDraft(GalaxyParameters);

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn color_ui(ui: &mut egui::Ui, label: &str, color: &mut Srgba) {
    ui.horizontal(|ui| {
        let mut rgb = color.to_u8_array_no_alpha();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            *color = Srgba::from_u8_array_no_alpha(rgb);
        }
        ui.label(label);
    });
}

fn parameters_ui(params: &mut GalaxyParameters, ui: &mut egui::Ui) {
    let minval = GalaxyParameters::MIN;
    let maxval = GalaxyParameters::MAX;
    let step = GalaxyParameters::STEP;

    ui.add(
        egui::Slider::new(&mut params.count, minval.count..=maxval.count)
            .step_by(step.count as f64)
            .text("Count"),
    );
    ui.add(
        egui::Slider::new(&mut params.size, minval.size..=maxval.size)
            .step_by(step.size as f64)
            .text("Size"),
    );
    ui.add(
        egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
            .step_by(step.radius as f64)
            .text("Radius"),
    );
    ui.add(
        egui::Slider::new(&mut params.branches, minval.branches..=maxval.branches)
            .step_by(step.branches as f64)
            .text("Branches"),
    );
    ui.add(
        egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
            .step_by(step.spin as f64)
            .text("Spin"),
    );
    ui.add(
        egui::Slider::new(
            &mut params.randomness,
            minval.randomness..=maxval.randomness,
        )
        .step_by(step.randomness as f64)
        .text("Randomness"),
    );
    ui.add(
        egui::Slider::new(
            &mut params.randomness_power,
            minval.randomness_power..=maxval.randomness_power,
        )
        .step_by(step.randomness_power as f64)
        .text("Randomness Power"),
    );
    ui.separator();
    color_ui(ui, "Inside Color", &mut params.inside_color);
    color_ui(ui, "Outside Color", &mut params.outside_color);
}

/// Edits land in the draft; the draft is committed once the user lets go of
/// the pointer and no text field has focus, so a slider drag regenerates once.
fn ui_system(
    mut contexts: EguiContexts,
    mut draft: ResMut<ParametersDraft>,
    mut galaxy_config: ResMut<GalaxyConfig>,
    control: Res<GenerationControl>,
) {
    let ctx = contexts.ctx_mut();
    let mut regenerate = false;

    egui::SidePanel::left("side_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");
            parameters_ui(&mut draft.0, ui);
            ui.separator();
            ui.horizontal(|ui| {
                regenerate = ui.button("Regenerate").clicked();
                if ui.button("Reset").clicked() {
                    draft.0 = GalaxyParameters::default();
                }
            });
            if control.is_generating() {
                ui.label("Generating...");
            }
        });

    let editing = ctx.is_using_pointer() || ctx.wants_keyboard_input();
    if !editing && draft.0 != galaxy_config.params {
        galaxy_config.params = draft.0.clone();
    }
    if regenerate {
        galaxy_config.regenerate();
    }
}

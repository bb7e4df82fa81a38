use crate::prelude::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParameterDraft>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(PostStartup, init_draft_system)
            .add_systems(Update, ui_system.before(crate::galaxy::apply_ui_updates));
    }
}

/// What the panel shows. Edited every frame, copied into [`GalaxyConfig`] only on commit.
#[derive(Resource, Default)]
struct ParameterDraft(GalaxyParameters);

const DEFAULT_FIXED_SEED: u64 = 1;

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn init_draft_system(galaxy_config: Res<GalaxyConfig>, mut draft: ResMut<ParameterDraft>) {
    draft.0 = galaxy_config.params.clone();
}

/// An edit is finished when a drag ends, or when the value moved without a drag (typed, keyed, picked).
fn committed(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

fn commit_draft(galaxy_config: &mut GalaxyConfig, draft: &mut GalaxyParameters) {
    galaxy_config.params = draft.clamped();
    *draft = galaxy_config.params.clone();
}

fn srgb_bytes(color: Srgba) -> [u8; 3] {
    [color.red, color.green, color.blue].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn color_ui(label: &str, color: &mut Srgba, ui: &mut egui::Ui) -> bool {
    ui.horizontal(|ui| {
        let mut rgb = srgb_bytes(*color);
        let changed = ui.color_edit_button_srgb(&mut rgb).changed();
        ui.label(label);
        if changed {
            *color = Srgba::rgb_u8(rgb[0], rgb[1], rgb[2]);
        }
        changed
    })
    .inner
}

fn parameters_ui(params: &mut GalaxyParameters, ui: &mut egui::Ui) -> bool {
    let minval = GalaxyParameters::MIN;
    let maxval = GalaxyParameters::MAX;
    let fine = GalaxyParameters::FINE_STEP as f64;
    let mut commit = false;

    commit |= committed(
        &ui.add(
            egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                .step_by(GalaxyParameters::COUNT_STEP as f64)
                .logarithmic(true)
                .text("Count"),
        ),
    );
    commit |= committed(
        &ui.add(
            egui::Slider::new(&mut params.size, minval.size..=maxval.size)
                .step_by(GalaxyParameters::SIZE_STEP as f64)
                .text("Size"),
        ),
    );
    commit |= committed(
        &ui.add(
            egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                .step_by(GalaxyParameters::RADIUS_STEP as f64)
                .text("Radius"),
        ),
    );
    commit |= committed(&ui.add(
        egui::Slider::new(&mut params.branches, minval.branches..=maxval.branches).text("Branches"),
    ));
    commit |= committed(
        &ui.add(
            egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                .step_by(fine)
                .text("Spin"),
        ),
    );
    commit |= committed(
        &ui.add(
            egui::Slider::new(&mut params.randomness, minval.randomness..=maxval.randomness)
                .step_by(fine)
                .text("Randomness"),
        ),
    );
    commit |= committed(
        &ui.add(
            egui::Slider::new(
                &mut params.randomness_power,
                minval.randomness_power..=maxval.randomness_power,
            )
            .step_by(fine)
            .text("Randomness Power"),
        ),
    );

    ui.separator();
    commit |= color_ui("Inside Color", &mut params.inside_color, ui);
    commit |= color_ui("Outside Color", &mut params.outside_color, ui);

    ui.separator();
    let mut fixed_seed = params.seed.is_some();
    if ui.checkbox(&mut fixed_seed, "Fixed seed").changed() {
        params.seed = fixed_seed.then_some(DEFAULT_FIXED_SEED);
        commit = true;
    }
    if let Some(seed) = params.seed.as_mut() {
        commit |= committed(&ui.add(egui::DragValue::new(seed).prefix("Seed: ")));
    }

    commit
}

fn ui_system(
    mut contexts: EguiContexts,
    mut galaxy_config: ResMut<GalaxyConfig>,
    mut draft: ResMut<ParameterDraft>,
) {
    let ctx = contexts.ctx_mut();

    egui::SidePanel::left("side_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");

            let mut commit = parameters_ui(&mut draft.0, ui);

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Regenerate").clicked() {
                    galaxy_config.regenerate();
                }
                if ui.button("Reset").clicked() {
                    draft.0 = GalaxyParameters::default();
                    commit = true;
                }
            });

            if commit {
                commit_draft(&mut galaxy_config, &mut draft.0);
            }
        });
}

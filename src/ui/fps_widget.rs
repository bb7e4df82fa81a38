use crate::prelude::*;
use bevy::diagnostic::DiagnosticsStore;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

pub struct FpsWidgetPlugin;

impl Plugin for FpsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system)
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component, Clone, Copy)]
enum StatsLine {
    Fps,
    Particles,
    Generation,
}

fn setup_widget(mut commands: Commands) {
    let holder = commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::FlexStart,
                width: Val::Px(240.),
                right: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                left: Val::Auto,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .id();

    for line in [StatsLine::Fps, StatsLine::Particles, StatsLine::Generation] {
        let text = commands
            .spawn((
                line,
                Text(" N/A".to_string()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                Node {
                    padding: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
            ))
            .id();
        commands.entity(holder).add_child(text);
    }
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    stats: Res<GalaxyStats>,
    mut query: Query<(&mut Text, &StatsLine)>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);

    for (mut text, line) in &mut query {
        text.0 = match line {
            StatsLine::Fps => format!("{:>12} {fps:.1} ({frame_time:.2} ms)", "FPS:"),
            StatsLine::Particles => format!("{:>12} {}", "Particles:", stats.particles),
            StatsLine::Generation => format!("{:>12} {:.1} ms", "Generated in:", stats.generation_ms),
        };
    }
}

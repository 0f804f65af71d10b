use bevy::prelude::*;

use crate::locomotion::SpeedTelemetry;
use crate::locomotion::limiter::format_speed;
use crate::time::AppSystems;

#[derive(Component, Default, PartialEq, Reflect)]
struct SpeedText;

pub(crate) fn plugin(app: &mut App) {
    app.add_systems(Startup, build_ui)
        .add_systems(Update, show_speed.in_set(AppSystems::Display))
        .register_type::<SpeedText>();
}

pub fn build_ui(mut commands: Commands) {
    commands.spawn((
        Name::new("Speedometer"),
        SpeedText,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            ..default()
        },
        Text::new(format_speed(0)),
        TextFont {
            font_size: 28.0,
            ..default()
        },
    ));
}

fn show_speed(
    telemetry: Single<&SpeedTelemetry>,
    mut text: Single<&mut Text, With<SpeedText>>,
) {
    let speed = format_speed(telemetry.0.speed_kph);
    if text.0 != speed {
        text.0 = speed;
    }
}

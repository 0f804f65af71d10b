//! Movement tunables.

use bevy::prelude::*;
use serde::Deserialize;

/// Keys for the four logical locomotion actions.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: KeyCode,
    pub sprint: KeyCode,
    pub crouch: KeyCode,
    /// May share a key with crouch; current speed decides which one starts.
    pub slide: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            crouch: KeyCode::ControlLeft,
            slide: KeyCode::ControlLeft,
        }
    }
}

/// Everything the locomotion controller can be tuned with.
///
/// Captured once when the controller is built. Values are not validated:
/// out-of-range numbers are used as given. Speeds are in units/second, angles
/// in degrees.
#[derive(Resource, Reflect, Debug, Clone, PartialEq, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    /// Target speed while sliding down a walkable slope.
    pub slide_speed: f32,
    /// Reserved. Accepted so configs stay forward compatible, not read.
    pub wallrun_speed: f32,

    pub ground_drag: f32,
    pub slide_drag: f32,

    pub jump_force: f32,
    /// Reserved. Jumps re-arm on every grounded frame, not on a cooldown.
    pub jump_cooldown: f32,
    /// Scales the driving force while airborne.
    pub air_multiplier: f32,

    /// Vertical scale while crouching or sliding.
    pub crouch_scale: f32,
    /// Crouch only starts below this speed.
    pub crouch_max_speed: f32,
    pub crouch_settle_impulse: f32,

    pub max_slide_time: f32,
    /// Impulse applied every physics step of a slide.
    pub slide_force: f32,
    /// Slide only starts at or above this speed.
    pub slide_min_speed: f32,
    /// When false a slide lasts until the key is released.
    pub slide_timer_enabled: bool,

    /// A target speed change larger than this is ramped instead of snapped.
    pub ramp_threshold: f32,

    pub max_slope_angle: f32,
    pub player_height: f32,
    pub ground_probe_margin: f32,
    pub slope_probe_margin: f32,

    pub bindings: KeyBindings,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 10.0,
            crouch_speed: 3.5,
            slide_speed: 30.0,
            wallrun_speed: 8.5,
            ground_drag: 4.0,
            slide_drag: 1.0,
            jump_force: 6.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.4,
            crouch_scale: 0.5,
            crouch_max_speed: 4.0,
            crouch_settle_impulse: 5.0,
            max_slide_time: 0.75,
            slide_force: 0.4,
            slide_min_speed: 4.0,
            slide_timer_enabled: true,
            ramp_threshold: 4.0,
            max_slope_angle: 40.0,
            player_height: 2.0,
            ground_probe_margin: 0.2,
            slope_probe_margin: 0.3,
            bindings: KeyBindings::default(),
        }
    }
}

impl MovementConfig {
    /// Reach of the grounded probe, measured from the body's center.
    pub fn ground_probe_length(&self) -> f32 {
        self.player_height * 0.5 + self.ground_probe_margin
    }

    /// Reach of the slope probe. Slightly longer than the ground probe.
    pub fn slope_probe_length(&self) -> f32 {
        self.player_height * 0.5 + self.slope_probe_margin
    }

    /// Human readable notes about values that are probably mistakes.
    ///
    /// Nothing here is rejected; the loader only logs these.
    pub fn suspicious_values(&self) -> Vec<String> {
        let mut notes = Vec::new();
        for (name, value) in [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("slide_speed", self.slide_speed),
            ("max_slide_time", self.max_slide_time),
        ] {
            if value < 0.0 {
                notes.push(format!("{name} is negative ({value})"));
            }
        }
        if self.player_height <= 0.0 {
            notes.push(format!(
                "player_height should be positive ({})",
                self.player_height
            ));
        }
        if !(0.0..=90.0).contains(&self.max_slope_angle) {
            notes.push(format!(
                "max_slope_angle is outside 0..=90 degrees ({})",
                self.max_slope_angle
            ));
        }
        notes
    }
}

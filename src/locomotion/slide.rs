//! Timed slide sessions.
//!
//! A slide starts on a key press while moving fast enough. It shrinks the body
//! like a crouch, kicks it forward, and then pushes it along the direction it
//! was moving in when the slide began, on every physics step, until the timer
//! runs out, the key is released or the body leaves the ground.

use std::time::Duration;

use bevy::prelude::*;

use super::body::{CharacterBody, ForceMode, set_vertical_scale};
use super::config::MovementConfig;
use super::sensor::{SlopeProbe, project_on_slope};

/// Below this vertical velocity on a walkable slope the slide follows the
/// slope instead of the locked direction.
const DESCENDING_VELOCITY: f32 = -0.1;

#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct SlideSession {
    pub timer: Timer,
    pub locked_direction: Vec3,
}

impl SlideSession {
    pub fn remaining_time(&self) -> f32 {
        self.timer.remaining_secs()
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEnd {
    TimerExpired,
    KeyReleased,
    LeftGround,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideStep {
    Continued,
    Ended(SlideEnd),
}

#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct SlideController {
    session: Option<SlideSession>,
    standing_height: f32,
}

impl SlideController {
    pub fn new(standing_height: f32) -> Self {
        Self {
            session: None,
            standing_height,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SlideSession> {
        self.session.as_ref()
    }

    pub fn can_start(&self, has_direction: bool, speed: f32, config: &MovementConfig) -> bool {
        !self.is_active() && has_direction && speed >= config.slide_min_speed
    }

    /// Starts a session locked to `direction`. Returns false when the
    /// conditions to slide are not met.
    pub fn start(
        &mut self,
        body: &mut impl CharacterBody,
        direction: Vec3,
        speed: f32,
        config: &MovementConfig,
    ) -> bool {
        if !self.can_start(direction != Vec3::ZERO, speed, config) {
            return false;
        }
        set_vertical_scale(body, config.crouch_scale);
        let forward = body.forward();
        body.apply_force(forward * speed, ForceMode::Impulse);
        self.session = Some(SlideSession {
            timer: Timer::from_seconds(config.max_slide_time.max(0.0), TimerMode::Once),
            locked_direction: direction,
        });
        true
    }

    /// One physics step of an active session.
    pub fn step(
        &mut self,
        body: &mut impl CharacterBody,
        slope: &SlopeProbe,
        dt: f32,
        config: &MovementConfig,
    ) -> Option<SlideStep> {
        let session = self.session.as_mut()?;

        let push = if !slope.on_slope || body.velocity().y > DESCENDING_VELOCITY {
            session.locked_direction.normalize_or_zero()
        } else {
            project_on_slope(session.locked_direction, slope.normal)
        };
        body.apply_force(push * config.slide_force, ForceMode::Impulse);

        if config.slide_timer_enabled {
            session.timer.tick(Duration::from_secs_f32(dt.max(0.0)));
            if session.timer.is_finished() {
                self.stop(body);
                return Some(SlideStep::Ended(SlideEnd::TimerExpired));
            }
        }
        Some(SlideStep::Continued)
    }

    /// Ends the session and restores the pre-slide height.
    pub fn stop(&mut self, body: &mut impl CharacterBody) -> Option<SlideSession> {
        let session = self.session.take()?;
        set_vertical_scale(body, self.standing_height);
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::testing::TestBody;
    use super::*;

    fn config(max_slide_time: f32) -> MovementConfig {
        MovementConfig {
            max_slide_time,
            slide_force: 2.0,
            ..default()
        }
    }

    #[test]
    fn refuses_without_direction_or_speed() {
        let config = config(3.0);
        let mut body = TestBody::on_flat_ground();
        let mut slide = SlideController::new(1.0);

        assert!(!slide.start(&mut body, Vec3::ZERO, 10.0, &config));
        assert!(!slide.start(&mut body, Vec3::NEG_Z, 3.9, &config));
        assert!(!slide.is_active());
        assert!(body.forces.is_empty());

        assert!(slide.start(&mut body, Vec3::NEG_Z, 4.0, &config));
    }

    #[test]
    fn start_locks_direction_and_kicks_forward() {
        let config = config(3.0);
        let mut body = TestBody::on_flat_ground();
        let mut slide = SlideController::new(1.0);
        let direction = Vec3::new(1.0, 0.0, -1.0);

        assert!(slide.start(&mut body, direction, 8.0, &config));
        let session = slide.session().expect("session started");
        assert_eq!(session.locked_direction, direction);
        assert_eq!(session.remaining_time(), 3.0);
        assert_eq!(body.scale.y, config.crouch_scale);
        assert_eq!(body.forces, vec![(Vec3::new(0.0, 0.0, -8.0), ForceMode::Impulse)]);
    }

    #[test]
    fn ends_after_max_slide_time() {
        let config = config(3.0);
        let mut body = TestBody::on_flat_ground();
        let mut slide = SlideController::new(1.0);
        slide.start(&mut body, Vec3::NEG_Z, 8.0, &config);
        let flat = SlopeProbe {
            on_ground: true,
            normal: Vec3::Y,
            ..default()
        };

        for _ in 0..2 {
            assert_eq!(
                slide.step(&mut body, &flat, 1.0, &config),
                Some(SlideStep::Continued)
            );
        }
        assert_eq!(
            slide.step(&mut body, &flat, 1.0, &config),
            Some(SlideStep::Ended(SlideEnd::TimerExpired))
        );
        assert!(!slide.is_active());
        assert_eq!(body.scale.y, 1.0);
        assert_eq!(slide.step(&mut body, &flat, 1.0, &config), None);
    }

    #[test]
    fn disabled_timer_slides_until_stopped() {
        let config = MovementConfig {
            slide_timer_enabled: false,
            ..config(0.5)
        };
        let mut body = TestBody::on_flat_ground();
        let mut slide = SlideController::new(1.0);
        slide.start(&mut body, Vec3::NEG_Z, 8.0, &config);

        for _ in 0..100 {
            slide.step(&mut body, &SlopeProbe::default(), 1.0, &config);
        }
        assert!(slide.is_active());
        assert_eq!(slide.session().map(SlideSession::remaining_time), Some(0.5));
        assert!(slide.stop(&mut body).is_some());
        assert_eq!(body.scale.y, 1.0);
    }

    #[test]
    fn pushes_along_locked_direction_on_flat_ground() {
        let config = config(3.0);
        let mut body = TestBody::on_flat_ground();
        let mut slide = SlideController::new(1.0);
        slide.start(&mut body, Vec3::new(0.0, 0.0, -3.0), 8.0, &config);
        body.clear_forces();

        slide.step(&mut body, &SlopeProbe::default(), 0.02, &config);
        assert_eq!(body.forces, vec![(Vec3::new(0.0, 0.0, -2.0), ForceMode::Impulse)]);
    }

    #[test]
    fn follows_the_slope_when_descending() {
        let config = config(3.0);
        let normal = Quat::from_rotation_x(20f32.to_radians()) * Vec3::Y;
        let slope = SlopeProbe {
            on_ground: true,
            on_slope: true,
            normal,
            angle: 20.0,
        };
        let mut body = TestBody {
            velocity: Vec3::new(0.0, -2.0, -5.0),
            ..TestBody::on_incline(20.0)
        };
        let mut slide = SlideController::new(1.0);
        slide.start(&mut body, Vec3::NEG_Z, 8.0, &config);
        body.clear_forces();

        slide.step(&mut body, &slope, 0.02, &config);
        let push = body.forces[0].0;
        assert!(push.dot(normal).abs() < 1e-4);
        assert!((push.length() - 2.0).abs() < 1e-4);
    }
}

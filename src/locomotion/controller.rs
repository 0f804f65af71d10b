//! The locomotion controller.
//!
//! Owns every piece of per-character movement state and exposes the two
//! entry points the host drives it with:
//!
//! - [`LocomotionController::on_frame_tick`] once per rendered frame, with that
//!   frame's input,
//! - [`LocomotionController::on_physics_tick`] zero or more times after it, once
//!   per fixed physics step, before the next frame tick.
//!
//! Calling them in any other order is not supported.

use bevy::prelude::*;

use super::body::CharacterBody;
use super::config::MovementConfig;
use super::crouch::CrouchController;
use super::force::{ForceContext, LocomotionForce, move_direction};
use super::input::InputSnapshot;
use super::jump::JumpController;
use super::limiter::limit_speed;
use super::ramp::{RampSlot, SpeedRamp};
use super::sensor::{GroundSensor, SlopeProbe};
use super::slide::{SlideController, SlideEnd, SlideStep};
use super::state::{MovementState, SpeedPlan, StateInputs, plan_speed, select_state};

/// What a frame tick decided.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub state: MovementState,
    pub speed: f32,
    pub target_speed: f32,
    /// Speedometer reading, see [`super::limiter::speed_kph`].
    pub speed_kph: i32,
}

#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct LocomotionController {
    config: MovementConfig,
    sensor: GroundSensor,
    state: MovementState,
    /// Speed the body is currently allowed to move at.
    speed: f32,
    target_speed: f32,
    last_target_speed: f32,
    ramp: RampSlot,
    jump: JumpController,
    crouch: CrouchController,
    slide: SlideController,
    grounded: bool,
    slope: SlopeProbe,
    input: InputSnapshot,
}

impl LocomotionController {
    /// `standing_height` is the body's vertical scale to return to after a
    /// crouch or slide.
    pub fn new(config: MovementConfig, standing_height: f32) -> Self {
        Self {
            sensor: GroundSensor::from_config(&config),
            config,
            state: MovementState::default(),
            speed: 0.0,
            target_speed: 0.0,
            last_target_speed: 0.0,
            ramp: RampSlot::default(),
            jump: JumpController::default(),
            crouch: CrouchController::new(standing_height),
            slide: SlideController::new(standing_height),
            grounded: false,
            slope: SlopeProbe::default(),
            input: InputSnapshot::default(),
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn slope(&self) -> SlopeProbe {
        self.slope
    }

    pub fn jump(&self) -> &JumpController {
        &self.jump
    }

    pub fn crouch(&self) -> &CrouchController {
        &self.crouch
    }

    pub fn slide(&self) -> &SlideController {
        &self.slide
    }

    pub fn ramp(&self) -> &RampSlot {
        &self.ramp
    }

    /// Slope handling applies on a walkable slope unless a jump just left it.
    fn on_walkable_slope(&self) -> bool {
        self.slope.on_slope && !self.jump.exiting_slope()
    }

    pub fn on_frame_tick(
        &mut self,
        dt: f32,
        body: &mut impl CharacterBody,
        input: &InputSnapshot,
    ) -> FrameReport {
        self.input = *input;
        self.slope = self.sensor.sense(body);
        self.grounded = self.slope.on_ground;
        if !self.grounded {
            self.stop_slide(body, SlideEnd::LeftGround);
        }

        let jumped = self.handle_actions(body);
        self.update_state(body.velocity().y);
        if let Some(speed) = self.ramp.step(dt) {
            self.speed = speed;
        }
        let speed_kph = limit_speed(body, self.speed, self.on_walkable_slope());

        if self.grounded {
            let drag = if self.slide.is_active() {
                self.config.slide_drag
            } else {
                self.config.ground_drag
            };
            body.set_drag(drag);
            if !jumped {
                self.jump.rearm();
            }
        } else {
            body.set_drag(0.0);
        }

        FrameReport {
            state: self.state,
            speed: self.speed,
            target_speed: self.target_speed,
            speed_kph,
        }
    }

    pub fn on_physics_tick(&mut self, dt: f32, body: &mut impl CharacterBody) {
        self.slope = SlopeProbe {
            on_ground: self.grounded,
            ..self.sensor.slope(body)
        };

        let sliding = self.slide.is_active();
        let direction = if sliding {
            Vec3::ZERO
        } else {
            move_direction(
                body.forward(),
                body.right(),
                self.input.horizontal,
                self.input.vertical,
            )
        };
        let ctx = ForceContext {
            grounded: self.grounded,
            sliding,
            slope: self.slope,
            exiting_slope: self.jump.exiting_slope(),
            vertical_velocity: body.velocity().y,
            speed: self.speed,
            target_speed: self.target_speed,
            air_multiplier: self.config.air_multiplier,
        };
        LocomotionForce::compute(direction, &ctx).apply(body);

        if let Some(SlideStep::Ended(reason)) =
            self.slide.step(body, &self.slope, dt, &self.config)
        {
            debug!("slide ended: {reason:?}");
        }
    }

    /// Ends an active slide from outside the controller.
    pub fn end_slide(&mut self, body: &mut impl CharacterBody) -> bool {
        self.stop_slide(body, SlideEnd::Cancelled)
    }

    fn stop_slide(&mut self, body: &mut impl CharacterBody, reason: SlideEnd) -> bool {
        let stopped = self.slide.stop(body).is_some();
        if stopped {
            debug!("slide ended: {reason:?}");
        }
        stopped
    }

    /// Jump, crouch and slide edges. Returns whether a jump fired.
    fn handle_actions(&mut self, body: &mut impl CharacterBody) -> bool {
        let input = self.input;

        let jumped = input.jump.pressed && self.jump.try_jump(body, self.config.jump_force);
        if jumped {
            debug!("jump");
        }

        if input.crouch.pressed && self.speed < self.config.crouch_max_speed {
            self.crouch.begin(
                body,
                self.config.crouch_scale,
                self.config.crouch_settle_impulse,
            );
        }
        if input.crouch.released {
            self.crouch.end(body);
        }

        if input.slide.pressed && self.grounded {
            let direction =
                move_direction(body.forward(), body.right(), input.horizontal, input.vertical);
            if self.slide.start(body, direction, self.speed, &self.config)
                && let Some(session) = self.slide.session()
            {
                debug!(
                    "slide started at speed {:.2} for {:.2}s",
                    self.speed,
                    session.remaining_time()
                );
            }
        }
        if input.slide.released {
            self.stop_slide(body, SlideEnd::KeyReleased);
        }

        jumped
    }

    fn update_state(&mut self, vertical_velocity: f32) {
        let (state, selector) = select_state(StateInputs {
            slide_active: self.slide.is_active(),
            crouch_held: self.input.crouch.held,
            sprint_held: self.input.sprint.held,
            grounded: self.grounded,
            on_slope: self.slope.on_slope,
            vertical_velocity,
        });
        self.state = state;
        self.target_speed = selector.resolve(&self.config, self.target_speed);

        match plan_speed(
            self.target_speed,
            self.last_target_speed,
            self.speed,
            self.ramp.is_running(),
            self.config.ramp_threshold,
        ) {
            SpeedPlan::Ramp { from, to } => {
                if self.ramp.start(SpeedRamp::new(from, to)).is_some() {
                    debug!("speed ramp replaced, now {from:.2} -> {to:.2}");
                } else {
                    debug!("speed ramp {from:.2} -> {to:.2}");
                }
            }
            SpeedPlan::Snap(target) => {
                self.ramp.cancel();
                self.speed = target;
            }
            SpeedPlan::Continue => {}
        }
        self.last_target_speed = self.target_speed;
    }
}

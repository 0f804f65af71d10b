//! Speed ramps.
//!
//! A ramp moves the allowed speed linearly from where it was to a new target.
//! It takes one time unit per unit of speed difference and is advanced once
//! per frame tick.

use bevy::prelude::*;

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    pub start: f32,
    pub target: f32,
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RampStep {
    Running(f32),
    /// Reached the target; the ramp should be dropped.
    Finished(f32),
}

impl RampStep {
    fn speed(self) -> f32 {
        match self {
            RampStep::Running(speed) | RampStep::Finished(speed) => speed,
        }
    }
}

impl SpeedRamp {
    pub fn new(start: f32, target: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        (self.target - self.start).abs()
    }

    pub fn step(&mut self, dt: f32) -> RampStep {
        self.elapsed += dt;
        let duration = self.duration();
        if duration == 0.0 || self.elapsed >= duration {
            return RampStep::Finished(self.target);
        }
        let t = self.elapsed / duration;
        RampStep::Running(self.start + (self.target - self.start) * t)
    }
}

/// Holds the single ramp that may be running.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct RampSlot {
    active: Option<SpeedRamp>,
}

impl RampSlot {
    /// Starts `ramp`, returning the one it replaced.
    pub fn start(&mut self, ramp: SpeedRamp) -> Option<SpeedRamp> {
        self.active.replace(ramp)
    }

    pub fn cancel(&mut self) -> Option<SpeedRamp> {
        self.active.take()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Advances the running ramp, if any, and returns the new speed.
    pub fn step(&mut self, dt: f32) -> Option<f32> {
        let ramp = self.active.as_mut()?;
        let step = ramp.step(dt);
        if let RampStep::Finished(_) = step {
            self.active = None;
        }
        Some(step.speed())
    }
}

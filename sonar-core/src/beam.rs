//! Beam sweep state machine
//!
//! The beam bounces between `-fov/2` and `+fov/2`. There are exactly two
//! states, [`SweepDirection::Forward`] and [`SweepDirection::Reverse`]. Each
//! tick moves the beam by `speed` degrees; when the unclamped result would
//! leave the field of view the angle is clamped to the boundary and the
//! direction flips. The sweep never terminates.

use serde::{Deserialize, Serialize};

/// Sweep direction, `+1` for Forward and `-1` for Reverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepDirection {
    Forward,
    Reverse,
}

impl Default for SweepDirection {
    fn default() -> Self {
        SweepDirection::Forward
    }
}

impl SweepDirection {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            SweepDirection::Forward => 1.0,
            SweepDirection::Reverse => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SweepDirection::Forward => SweepDirection::Reverse,
            SweepDirection::Reverse => SweepDirection::Forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeamSweeper {
    angle: f64,
    direction: SweepDirection,
    speed: f64,
    half_fov: f64,
}

impl BeamSweeper {
    /// A beam at the left boundary, sweeping Forward
    pub fn new(fov: f64, speed: f64) -> Self {
        let half_fov = fov / 2.0;
        BeamSweeper {
            angle: -half_fov,
            direction: SweepDirection::Forward,
            speed,
            half_fov,
        }
    }

    /// Place the beam at `angle` (clamped into the field of view)
    pub fn with_state(mut self, angle: f64, direction: SweepDirection) -> Self {
        self.angle = angle.clamp(-self.half_fov, self.half_fov);
        self.direction = direction;
        self
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn half_fov(&self) -> f64 {
        self.half_fov
    }

    /// One tick of the sweep
    pub fn advance(&mut self) {
        if self.speed == 0.0 {
            return;
        }
        let next = self.angle + self.direction.sign() * self.speed;
        if next > self.half_fov {
            self.angle = self.half_fov;
            self.direction = SweepDirection::Reverse;
        } else if next < -self.half_fov {
            self.angle = -self.half_fov;
            self.direction = SweepDirection::Forward;
        } else {
            self.angle = next;
        }
    }

    /// Change the field of view, re-clamping the current angle immediately.
    ///
    /// This is a configuration event, the beam does not advance.
    pub fn set_fov(&mut self, fov: f64) {
        self.half_fov = fov / 2.0;
        self.angle = self.angle.clamp(-self.half_fov, self.half_fov);
    }

    /// Degrees per tick, 0 freezes the beam in its current state
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Back to the left boundary, sweeping Forward
    pub fn reset(&mut self) {
        self.angle = -self.half_fov;
        self.direction = SweepDirection::Forward;
    }
}

// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Spring forces
//!
//! [`Spring`] connects two particles; [`AnchoredSpring`] connects a particle
//! to a fixed point in space. Both follow Hooke's law with a rest length.
//! Only the particle a registration names receives force — to pull both ends
//! of a particle-particle spring, register one generator per end.

use crate::forces::ForceGenerator;
use crate::set::{ParticleHandle, ParticleSet};
use glam::DVec2;
use std::any::Any;

/// A force generator connecting the target particle to another particle
///
/// The force magnitude is `k * ||d| - rest_length|` along the line between the
/// two particles, attracting toward the rest length from either side. The
/// other particle is read-only; it receives no reaction force from this
/// generator. If the other particle has been removed from the set, the spring
/// has no second end and contributes nothing.
pub struct Spring {
    /// The particle at the other end of the spring
    other: ParticleHandle,
    /// Spring constant
    spring_constant: f64,
    /// Length at which the spring exerts no force
    rest_length: f64,
}

impl Spring {
    /// Create the generator with the given opposite end, spring constant, and
    /// rest length
    pub fn new(other: ParticleHandle, spring_constant: f64, rest_length: f64) -> Self {
        Spring {
            other,
            spring_constant,
            rest_length,
        }
    }

    /// Get the handle of the particle at the other end
    pub fn other(&self) -> ParticleHandle {
        self.other
    }

    /// Get the spring constant
    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    /// Get the rest length
    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }
}

impl ForceGenerator for Spring {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, _duration: f64) {
        let Some(other_position) = particles.get(self.other).map(|p| p.position()) else {
            return;
        };
        let Some(particle) = particles.get_mut(particle) else {
            return;
        };

        let d = particle.position() - other_position;
        let magnitude = self.spring_constant * (d.length() - self.rest_length).abs();

        // Coincident ends: no direction, no force.
        let force = -d.normalize_or_zero() * magnitude;
        particle.add_force(force);
    }

    fn name(&self) -> &str {
        "spring"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A force generator connecting the target particle to a fixed anchor point
///
/// The force is `normalize(d) * (rest_length - |d|) * k` with
/// `d = position - anchor`: the particle is pulled toward the anchor when the
/// spring is stretched beyond its rest length and pushed away when compressed
/// below it.
pub struct AnchoredSpring {
    /// Fixed point the spring is attached to
    anchor: DVec2,
    /// Spring constant
    spring_constant: f64,
    /// Length at which the spring exerts no force
    rest_length: f64,
}

impl AnchoredSpring {
    /// Create the generator with the given anchor point, spring constant, and
    /// rest length
    pub fn new(anchor: DVec2, spring_constant: f64, rest_length: f64) -> Self {
        AnchoredSpring {
            anchor,
            spring_constant,
            rest_length,
        }
    }

    /// Get the anchor point
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// Get the spring constant
    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    /// Get the rest length
    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }
}

impl ForceGenerator for AnchoredSpring {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, _duration: f64) {
        let Some(particle) = particles.get_mut(particle) else {
            return;
        };

        let d = particle.position() - self.anchor;
        let magnitude = (self.rest_length - d.length()) * self.spring_constant;

        let force = d.normalize_or_zero() * magnitude;
        particle.add_force(force);
    }

    fn name(&self) -> &str {
        "anchored_spring"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

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
//! Constant gravitational force

use crate::forces::ForceGenerator;
use crate::set::{ParticleHandle, ParticleSet};
use glam::DVec2;
use std::any::Any;

/// A force generator that applies a constant gravitational acceleration
///
/// The force is `g * mass`, so every finite-mass particle experiences the same
/// acceleration `g` regardless of its mass. Infinite-mass particles are
/// skipped. One instance can be registered against any number of particles.
pub struct Gravity {
    gravity: DVec2,
}

impl Gravity {
    /// Create the generator with the given acceleration due to gravity
    pub fn new(gravity: DVec2) -> Self {
        Gravity { gravity }
    }

    /// Get the acceleration due to gravity
    pub fn gravity(&self) -> DVec2 {
        self.gravity
    }
}

impl ForceGenerator for Gravity {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, _duration: f64) {
        let Some(particle) = particles.get_mut(particle) else {
            return;
        };
        if !particle.has_finite_mass() {
            return;
        }
        let mass = particle.mass();
        particle.add_force(self.gravity * mass);
    }

    fn name(&self) -> &str {
        "gravity"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

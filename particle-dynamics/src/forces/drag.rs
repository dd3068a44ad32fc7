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
//! Velocity-dependent drag forces
//!
//! [`Drag`] applies the classic two-coefficient drag law. [`Airbrake`] wraps
//! the same law behind an on/off switch that drivers can flip between ticks.

use crate::forces::ForceGenerator;
use crate::set::{ParticleHandle, ParticleSet};
use std::any::Any;

/// A force generator that applies a drag force opposing velocity
///
/// The drag coefficient is `k1 * speed + k2 * speed²`, applied against the
/// normalized velocity. A particle at rest has no preferred direction and
/// receives no force. One instance can be registered against any number of
/// particles.
pub struct Drag {
    /// Linear (velocity) drag coefficient
    k1: f64,
    /// Quadratic (velocity squared) drag coefficient
    k2: f64,
}

impl Drag {
    /// Create the generator with the given coefficients
    pub fn new(k1: f64, k2: f64) -> Self {
        Drag { k1, k2 }
    }

    /// Get the linear drag coefficient
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// Get the quadratic drag coefficient
    pub fn k2(&self) -> f64 {
        self.k2
    }
}

impl ForceGenerator for Drag {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, _duration: f64) {
        let Some(particle) = particles.get_mut(particle) else {
            return;
        };
        let velocity = particle.velocity();

        let speed = velocity.length();
        let drag_coeff = self.k1 * speed + self.k2 * speed * speed;

        // normalize_or_zero: a resting particle gets zero force, not NaN.
        let force = -velocity.normalize_or_zero() * drag_coeff;
        particle.add_force(force);
    }

    fn name(&self) -> &str {
        "drag"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A drag generator with an activation switch
///
/// While active, contributes exactly the force [`Drag`] would with the same
/// coefficients; while inactive, contributes nothing. The switch is the only
/// mutable state and is flipped through [`Airbrake::set_active`] or
/// [`Airbrake::toggle_active`], typically via an `as_any_mut` downcast on a
/// stored generator.
pub struct Airbrake {
    drag: Drag,
    active: bool,
}

impl Airbrake {
    /// Create the generator with the given drag coefficients and initial state
    pub fn new(k1: f64, k2: f64, active: bool) -> Self {
        Airbrake {
            drag: Drag::new(k1, k2),
            active,
        }
    }

    /// Activate or deactivate the generator
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Flip the generator's activation state
    pub fn toggle_active(&mut self) {
        self.active = !self.active;
    }

    /// Check whether the generator is active
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl ForceGenerator for Airbrake {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, duration: f64) {
        if !self.active {
            return;
        }
        self.drag.update_force(particle, particles, duration);
    }

    fn name(&self) -> &str {
        "airbrake"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use glam::DVec2;

    fn particle_with_velocity(velocity: DVec2) -> (ParticleSet, ParticleHandle) {
        let mut particles = ParticleSet::new();
        let mut p = Particle::new();
        p.set_velocity(velocity);
        let handle = particles.insert(p);
        (particles, handle)
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let (mut particles, handle) = particle_with_velocity(DVec2::new(3.0, 4.0));

        // speed = 5, coeff = 2*5 + 1*25 = 35
        let drag = Drag::new(2.0, 1.0);
        drag.update_force(handle, &mut particles, 0.016);

        let force = particles.get(handle).unwrap().force_accum();
        assert!((force.x + 35.0 * 0.6).abs() < 1e-12);
        assert!((force.y + 35.0 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_drag_on_resting_particle_is_zero() {
        let (mut particles, handle) = particle_with_velocity(DVec2::ZERO);

        let drag = Drag::new(2.0, 1.0);
        drag.update_force(handle, &mut particles, 0.016);

        let force = particles.get(handle).unwrap().force_accum();
        assert_eq!(force, DVec2::ZERO);
        assert!(force.is_finite());
    }

    #[test]
    fn test_linear_only_drag() {
        let (mut particles, handle) = particle_with_velocity(DVec2::new(2.0, 0.0));

        let drag = Drag::new(0.5, 0.0);
        drag.update_force(handle, &mut particles, 0.016);

        let force = particles.get(handle).unwrap().force_accum();
        assert!((force.x + 1.0).abs() < 1e-12);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_airbrake_inactive_contributes_nothing() {
        let (mut particles, handle) = particle_with_velocity(DVec2::new(3.0, 4.0));

        let brake = Airbrake::new(2.0, 1.0, false);
        brake.update_force(handle, &mut particles, 0.016);

        assert_eq!(particles.get(handle).unwrap().force_accum(), DVec2::ZERO);
    }

    #[test]
    fn test_airbrake_active_matches_drag_exactly() {
        let (mut particles, brake_target) = particle_with_velocity(DVec2::new(3.0, 4.0));
        let mut p = Particle::new();
        p.set_velocity(DVec2::new(3.0, 4.0));
        let drag_target = particles.insert(p);

        let brake = Airbrake::new(2.0, 1.0, true);
        let drag = Drag::new(2.0, 1.0);
        brake.update_force(brake_target, &mut particles, 0.016);
        drag.update_force(drag_target, &mut particles, 0.016);

        assert_eq!(
            particles.get(brake_target).unwrap().force_accum(),
            particles.get(drag_target).unwrap().force_accum()
        );
    }

    #[test]
    fn test_airbrake_toggle() {
        let mut brake = Airbrake::new(1.0, 0.0, true);
        brake.toggle_active();
        assert!(!brake.is_active());
        brake.toggle_active();
        assert!(brake.is_active());

        brake.set_active(false);
        assert!(!brake.is_active());
    }
}

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
//! Particle state and integration
//!
//! A particle is a point mass with position, velocity, a constant per-particle
//! acceleration (e.g. a base gravity bias), and a transient force accumulator.
//! Mass is stored as its inverse so that infinite mass (an immovable particle)
//! is representable as zero. Integration is semi-implicit Euler with
//! frame-rate-independent exponential damping.

use glam::DVec2;

/// A point mass in 2D space
///
/// Force generators add into the particle's force accumulator during a
/// simulation step; the driver then calls [`Particle::integrate`], which
/// advances position and velocity and clears the accumulator.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use particle_dynamics::Particle;
///
/// let mut p = Particle::new();
/// p.set_mass(2.0);
/// p.add_force(DVec2::new(4.0, 0.0));
/// p.integrate(1.0);
/// assert!((p.velocity().x - 2.0 * 0.999).abs() < 1e-12); // a = F/m, then damping
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    /// Constant external acceleration applied every step, independent of the
    /// force accumulator.
    acceleration: DVec2,
    /// Sum of forces applied this step; cleared by `integrate`.
    force_accum: DVec2,
    /// Reciprocal of mass; zero means infinite mass (immovable).
    inverse_mass: f64,
    /// Per-second velocity retention factor in (0, 1], applied as
    /// `damping^duration`.
    damping: f64,
}

/// Default damping applied to new particles
///
/// Close enough to 1.0 to be unnoticeable per step while still draining
/// numerical energy gained through integration error.
pub const DEFAULT_DAMPING: f64 = 0.999;

impl Particle {
    /// Create a particle with identity defaults: zero vectors, unit mass,
    /// damping of [`DEFAULT_DAMPING`]
    pub fn new() -> Self {
        Particle {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            force_accum: DVec2::ZERO,
            inverse_mass: 1.0,
            damping: DEFAULT_DAMPING,
        }
    }

    /// Get the position
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Set the position
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Get the velocity
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    /// Get the constant per-particle acceleration
    pub fn acceleration(&self) -> DVec2 {
        self.acceleration
    }

    /// Set the constant per-particle acceleration
    pub fn set_acceleration(&mut self, acceleration: DVec2) {
        self.acceleration = acceleration;
    }

    /// Get the force accumulated so far this step
    pub fn force_accum(&self) -> DVec2 {
        self.force_accum
    }

    /// Set the mass of the particle
    ///
    /// Mass is stored as its inverse. To make a particle immovable, use
    /// [`Particle::set_inverse_mass`] with zero instead.
    ///
    /// # Panics
    ///
    /// Panics if `mass` is zero, negative, or not finite.
    pub fn set_mass(&mut self, mass: f64) {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "Mass must be positive and finite"
        );
        self.inverse_mass = 1.0 / mass;
    }

    /// Get the mass of the particle
    ///
    /// Returns `f64::MAX` for a particle with infinite mass.
    pub fn mass(&self) -> f64 {
        if self.inverse_mass == 0.0 {
            f64::MAX
        } else {
            1.0 / self.inverse_mass
        }
    }

    /// Set the inverse mass directly
    ///
    /// Zero represents infinite mass. No validation is performed; callers are
    /// expected to keep the value non-negative.
    pub fn set_inverse_mass(&mut self, inverse_mass: f64) {
        self.inverse_mass = inverse_mass;
    }

    /// Get the inverse mass
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// Check whether the particle has finite (non-infinite) mass
    ///
    /// Mass-scaled generators such as gravity skip particles for which this
    /// returns `false`.
    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Set the damping factor
    ///
    /// Damping is the fraction of velocity retained per second and is applied
    /// as `damping^duration` during integration, so behavior is independent of
    /// the step size.
    ///
    /// # Panics
    ///
    /// Panics if `damping` is outside (0, 1].
    pub fn set_damping(&mut self, damping: f64) {
        assert!(
            damping > 0.0 && damping <= 1.0,
            "Damping must be in (0, 1]"
        );
        self.damping = damping;
    }

    /// Get the damping factor
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Add a force to the accumulator, to be applied at the next integration
    ///
    /// Additive; generators may call this any number of times per step.
    pub fn add_force(&mut self, force: DVec2) {
        self.force_accum += force;
    }

    /// Reset the force accumulator to zero
    pub fn clear_accumulator(&mut self) {
        self.force_accum = DVec2::ZERO;
    }

    /// Advance the particle by `duration` seconds of simulated time
    ///
    /// Semi-implicit (symplectic) Euler: position is advanced with the old
    /// velocity, then velocity is advanced with the resulting acceleration and
    /// damped. This ordering is load-bearing for numerical behavior and must
    /// not be rearranged. The force accumulator is cleared afterwards.
    ///
    /// Particles with infinite mass are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is not positive (for finite-mass particles).
    pub fn integrate(&mut self, duration: f64) {
        // Infinite mass: immovable, nothing to do.
        if self.inverse_mass <= 0.0 {
            return;
        }
        assert!(duration > 0.0, "Integration duration must be positive");

        // Position from the pre-update velocity.
        self.position += self.velocity * duration;

        // Acceleration from the base bias plus accumulated forces.
        let resulting_acc = self.acceleration + self.force_accum * self.inverse_mass;

        self.velocity += resulting_acc * duration;

        // Exponential decay keeps drag independent of the step size.
        self.velocity *= self.damping.powf(duration);

        self.clear_accumulator();
    }

    /// Kinetic energy of the particle: ½·m·|v|²
    ///
    /// Returns 0.0 for particles with infinite mass.
    pub fn kinetic_energy(&self) -> f64 {
        if !self.has_finite_mass() {
            return 0.0;
        }
        0.5 * self.mass() * self.velocity.length_squared()
    }

    /// Check that all state is finite and the inverse mass is non-negative
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.force_accum.is_finite()
            && self.inverse_mass.is_finite()
            && self.inverse_mass >= 0.0
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new()
    }
}

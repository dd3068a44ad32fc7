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
//! Point-directed forces: attraction wells and uplift regions

use crate::forces::ForceGenerator;
use crate::set::{ParticleHandle, ParticleSet};
use glam::DVec2;
use std::any::Any;

/// A force generator that pulls particles toward a fixed origin
///
/// The force has constant magnitude per unit mass — `magnitude * mass` along
/// the direction from the particle to the origin — so the resulting
/// acceleration is the same for every finite-mass particle. A particle sitting
/// exactly on the origin has no preferred direction and receives no force.
/// Infinite-mass particles are skipped.
pub struct Attraction {
    magnitude: f64,
    origin: DVec2,
}

impl Attraction {
    /// Create the generator with the given force magnitude and origin
    pub fn new(magnitude: f64, origin: DVec2) -> Self {
        Attraction { magnitude, origin }
    }

    /// Get the force magnitude per unit mass
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Get the origin of the attraction
    pub fn origin(&self) -> DVec2 {
        self.origin
    }
}

impl ForceGenerator for Attraction {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, _duration: f64) {
        let Some(particle) = particles.get_mut(particle) else {
            return;
        };
        if !particle.has_finite_mass() {
            return;
        }

        let direction = (self.origin - particle.position()).normalize_or_zero();
        let mass = particle.mass();
        particle.add_force(direction * self.magnitude * mass);
    }

    fn name(&self) -> &str {
        "attraction"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A force generator that applies an uplift force inside a circular region
///
/// Particles within `range` of the origin receive `uplift * mass`; anything
/// outside the region receives nothing. The gate is binary — there is no
/// falloff toward the edge. Infinite-mass particles are skipped.
pub struct Uplift {
    /// Uplift force per unit mass
    uplift: DVec2,
    /// Center of the uplift region
    origin: DVec2,
    /// Radius within which the force applies
    range: f64,
}

impl Uplift {
    /// Create the generator with the given force, origin, and effect range
    pub fn new(uplift: DVec2, origin: DVec2, range: f64) -> Self {
        Uplift {
            uplift,
            origin,
            range,
        }
    }

    /// Get the uplift force per unit mass
    pub fn uplift(&self) -> DVec2 {
        self.uplift
    }

    /// Get the center of the uplift region
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Get the effect radius
    pub fn range(&self) -> f64 {
        self.range
    }
}

impl ForceGenerator for Uplift {
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, _duration: f64) {
        let Some(particle) = particles.get_mut(particle) else {
            return;
        };
        if !particle.has_finite_mass() {
            return;
        }

        let relative = particle.position() - self.origin;
        if relative.length() > self.range {
            return;
        }

        let mass = particle.mass();
        particle.add_force(self.uplift * mass);
    }

    fn name(&self) -> &str {
        "uplift"
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

    fn insert_at(particles: &mut ParticleSet, position: DVec2, mass: f64) -> ParticleHandle {
        let mut p = Particle::new();
        p.set_position(position);
        p.set_mass(mass);
        particles.insert(p)
    }

    #[test]
    fn test_attraction_points_toward_origin() {
        let mut particles = ParticleSet::new();
        let p = insert_at(&mut particles, DVec2::new(4.0, 0.0), 2.0);

        let well = Attraction::new(3.0, DVec2::ZERO);
        well.update_force(p, &mut particles, 0.016);

        // Direction (-1, 0), magnitude 3 * mass 2 = 6.
        let force = particles.get(p).unwrap().force_accum();
        assert!((force.x + 6.0).abs() < 1e-12);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_attraction_acceleration_is_mass_independent() {
        let mut particles = ParticleSet::new();
        let light = insert_at(&mut particles, DVec2::new(4.0, 0.0), 1.0);
        let heavy = insert_at(&mut particles, DVec2::new(4.0, 0.0), 10.0);

        let well = Attraction::new(3.0, DVec2::ZERO);
        well.update_force(light, &mut particles, 0.016);
        well.update_force(heavy, &mut particles, 0.016);

        let light = particles.get(light).unwrap();
        let heavy = particles.get(heavy).unwrap();
        let acc_light = light.force_accum() * light.inverse_mass();
        let acc_heavy = heavy.force_accum() * heavy.inverse_mass();
        assert!((acc_light - acc_heavy).length() < 1e-12);
    }

    #[test]
    fn test_attraction_on_origin_is_zero() {
        let mut particles = ParticleSet::new();
        let p = insert_at(&mut particles, DVec2::new(1.0, 1.0), 1.0);

        let well = Attraction::new(3.0, DVec2::new(1.0, 1.0));
        well.update_force(p, &mut particles, 0.016);

        let force = particles.get(p).unwrap().force_accum();
        assert_eq!(force, DVec2::ZERO);
        assert!(force.is_finite());
    }

    #[test]
    fn test_attraction_skips_infinite_mass() {
        let mut particles = ParticleSet::new();
        let mut wall = Particle::new();
        wall.set_position(DVec2::new(4.0, 0.0));
        wall.set_inverse_mass(0.0);
        let wall = particles.insert(wall);

        let well = Attraction::new(3.0, DVec2::ZERO);
        well.update_force(wall, &mut particles, 0.016);

        assert_eq!(particles.get(wall).unwrap().force_accum(), DVec2::ZERO);
    }

    #[test]
    fn test_uplift_inside_range() {
        let mut particles = ParticleSet::new();
        let p = insert_at(&mut particles, DVec2::new(1.0, 0.0), 2.0);

        let chimney = Uplift::new(DVec2::new(0.0, 5.0), DVec2::ZERO, 3.0);
        chimney.update_force(p, &mut particles, 0.016);

        let force = particles.get(p).unwrap().force_accum();
        assert!((force.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_uplift_outside_range() {
        let mut particles = ParticleSet::new();
        let p = insert_at(&mut particles, DVec2::new(5.0, 0.0), 2.0);

        let chimney = Uplift::new(DVec2::new(0.0, 5.0), DVec2::ZERO, 3.0);
        chimney.update_force(p, &mut particles, 0.016);

        assert_eq!(particles.get(p).unwrap().force_accum(), DVec2::ZERO);
    }

    #[test]
    fn test_uplift_exactly_on_boundary_applies() {
        let mut particles = ParticleSet::new();
        let p = insert_at(&mut particles, DVec2::new(3.0, 0.0), 1.0);

        // The gate is `distance > range`, so the boundary itself is in range.
        let chimney = Uplift::new(DVec2::new(0.0, 5.0), DVec2::ZERO, 3.0);
        chimney.update_force(p, &mut particles, 0.016);

        let force = particles.get(p).unwrap().force_accum();
        assert!((force.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_uplift_skips_infinite_mass() {
        let mut particles = ParticleSet::new();
        let mut wall = Particle::new();
        wall.set_inverse_mass(0.0);
        let wall = particles.insert(wall);

        let chimney = Uplift::new(DVec2::new(0.0, 5.0), DVec2::ZERO, 3.0);
        chimney.update_force(wall, &mut particles, 0.016);

        assert_eq!(particles.get(wall).unwrap().force_accum(), DVec2::ZERO);
    }
}

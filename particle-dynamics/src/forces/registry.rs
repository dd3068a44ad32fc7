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
//! Force registry
//!
//! The registry is the association table between particles and the generators
//! that affect them, plus the per-step dispatch loop. It owns neither side:
//! registrations are (particle handle, generator handle) pairs into the arenas
//! the driver owns.

use crate::forces::{GeneratorHandle, GeneratorSet};
use crate::set::{ParticleHandle, ParticleSet};

/// One force generator and the particle it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration {
    particle: ParticleHandle,
    generator: GeneratorHandle,
}

/// Registry of (particle, generator) associations with a dispatch loop
///
/// Registrations are kept in insertion order and are not deduplicated: adding
/// the same pair twice makes the generator fire twice per step for that
/// particle. The registry holds only handles; destroying a particle or
/// generator while it is still registered leaves a stale registration that
/// [`ForceRegistry::update_forces`] skips (with an optional warning) rather
/// than dereferencing.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use particle_dynamics::{Particle, ParticleSet, GeneratorSet, ForceRegistry};
/// use particle_dynamics::forces::Gravity;
///
/// let mut particles = ParticleSet::new();
/// let mut generators = GeneratorSet::new();
/// let mut registry = ForceRegistry::new();
///
/// let p = particles.insert(Particle::new());
/// let g = generators.insert(Box::new(Gravity::new(DVec2::new(0.0, -9.8))));
///
/// registry.add(p, g);
/// registry.update_forces(0.016, &mut particles, &generators);
/// assert!(particles.get(p).unwrap().force_accum().y < 0.0);
/// ```
pub struct ForceRegistry {
    registrations: Vec<Registration>,
    /// Whether to log warnings when a registration refers to a dead particle
    /// or generator handle
    pub warn_on_dead_handles: bool,
}

impl ForceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        ForceRegistry {
            registrations: Vec::new(),
            warn_on_dead_handles: true,
        }
    }

    /// Register the given generator to apply to the given particle
    ///
    /// Always succeeds; duplicate pairs are permitted and fire independently.
    pub fn add(&mut self, particle: ParticleHandle, generator: GeneratorHandle) {
        self.registrations.push(Registration { particle, generator });
    }

    /// Remove the first registration matching the given pair
    ///
    /// Matching is by handle identity of both the particle and the generator.
    /// A no-op if the pair is not registered; duplicates beyond the first
    /// match are left in place.
    pub fn remove(&mut self, particle: ParticleHandle, generator: GeneratorHandle) {
        let target = Registration { particle, generator };
        if let Some(index) = self.registrations.iter().position(|r| *r == target) {
            self.registrations.remove(index);
        }
    }

    /// Remove all registrations
    ///
    /// The particles and generators themselves are untouched; only the records
    /// of their connection are dropped.
    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    /// Get the number of registrations, counting duplicates
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check whether the registry has no registrations
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Ask every registered generator to add its force to its particle
    ///
    /// Iterates registrations in insertion order. Does not integrate and does
    /// not clear accumulators; the driver follows up with
    /// [`ParticleSet::integrate_all`] (or per-particle
    /// [`Particle::integrate`](crate::Particle::integrate) calls), which do
    /// both.
    ///
    /// Registrations whose particle or generator handle is dead are skipped.
    ///
    /// Returns the number of registrations dispatched.
    pub fn update_forces(
        &self,
        duration: f64,
        particles: &mut ParticleSet,
        generators: &GeneratorSet,
    ) -> usize {
        let mut dispatched = 0;

        for registration in &self.registrations {
            let Some(generator) = generators.get(registration.generator) else {
                if self.warn_on_dead_handles {
                    eprintln!(
                        "Warning: registration refers to dead generator {}",
                        registration.generator
                    );
                }
                continue;
            };
            if !particles.contains(registration.particle) {
                if self.warn_on_dead_handles {
                    eprintln!(
                        "Warning: registration refers to dead particle {}",
                        registration.particle
                    );
                }
                continue;
            }

            generator.update_force(registration.particle, particles, duration);
            dispatched += 1;
        }

        dispatched
    }
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::{Drag, ForceGenerator, Gravity};
    use crate::particle::Particle;
    use glam::DVec2;
    use std::any::Any;

    // Counts how often it fires by leaving a marker force on the particle.
    struct UnitForce;

    impl ForceGenerator for UnitForce {
        fn update_force(
            &self,
            particle: ParticleHandle,
            particles: &mut ParticleSet,
            _duration: f64,
        ) {
            if let Some(p) = particles.get_mut(particle) {
                p.add_force(DVec2::new(1.0, 0.0));
            }
        }

        fn name(&self) -> &str {
            "unit_force"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_add_and_dispatch() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);
        assert_eq!(registry.len(), 1);

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 1);
        assert_eq!(particles.get(p).unwrap().force_accum(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_duplicate_registration_fires_twice() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);
        registry.add(p, g);

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 2);
        assert_eq!(particles.get(p).unwrap().force_accum(), DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);
        registry.add(p, g);

        registry.remove(p, g);
        assert_eq!(registry.len(), 1);

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 1);
    }

    #[test]
    fn test_removed_pair_no_longer_fires() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);
        registry.remove(p, g);

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 0);
        assert_eq!(particles.get(p).unwrap().force_accum(), DVec2::ZERO);
    }

    #[test]
    fn test_remove_absent_pair_is_noop() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));

        registry.remove(p, g);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_matches_both_sides_of_pair() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p1 = particles.insert(Particle::new());
        let p2 = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p1, g);
        registry.add(p2, g);

        // Removing (p2, g) must not disturb (p1, g).
        registry.remove(p2, g);
        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 1);
        assert_eq!(particles.get(p1).unwrap().force_accum(), DVec2::new(1.0, 0.0));
        assert_eq!(particles.get(p2).unwrap().force_accum(), DVec2::ZERO);
    }

    #[test]
    fn test_clear_drops_registrations_not_objects() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);

        registry.clear();
        assert!(registry.is_empty());
        assert!(particles.contains(p));
        assert!(generators.contains(g));
    }

    #[test]
    fn test_dead_particle_registration_is_skipped() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();
        registry.warn_on_dead_handles = false;

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);
        particles.remove(p);

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 0);
    }

    #[test]
    fn test_dead_generator_registration_is_skipped() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();
        registry.warn_on_dead_handles = false;

        let p = particles.insert(Particle::new());
        let g = generators.insert(Box::new(UnitForce));
        registry.add(p, g);
        generators.remove(g);

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 0);
        assert_eq!(particles.get(p).unwrap().force_accum(), DVec2::ZERO);
    }

    #[test]
    fn test_dispatch_in_insertion_order() {
        // Drag reads velocity only and gravity reads mass only, so order is
        // not observable through them; use a generator pair where it is.
        struct Doubler;
        impl ForceGenerator for Doubler {
            fn update_force(
                &self,
                particle: ParticleHandle,
                particles: &mut ParticleSet,
                _duration: f64,
            ) {
                if let Some(p) = particles.get_mut(particle) {
                    let current = p.force_accum();
                    p.add_force(current);
                }
            }
            fn name(&self) -> &str {
                "doubler"
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let p = particles.insert(Particle::new());
        let unit = generators.insert(Box::new(UnitForce));
        let doubler = generators.insert(Box::new(Doubler));

        // unit then doubler: (1, 0) doubled to (2, 0).
        registry.add(p, unit);
        registry.add(p, doubler);
        registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(particles.get(p).unwrap().force_accum(), DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_one_generator_many_particles() {
        let mut particles = ParticleSet::new();
        let mut generators = GeneratorSet::new();
        let mut registry = ForceRegistry::new();

        let gravity = generators.insert(Box::new(Gravity::new(DVec2::new(0.0, -9.8))));
        let drag = generators.insert(Box::new(Drag::new(0.1, 0.01)));

        for _ in 0..4 {
            let p = particles.insert(Particle::new());
            registry.add(p, gravity);
            registry.add(p, drag);
        }

        let dispatched = registry.update_forces(0.016, &mut particles, &generators);
        assert_eq!(dispatched, 8);
        for (_, p) in particles.iter() {
            assert!((p.force_accum().y + 9.8).abs() < 1e-12);
        }
    }
}

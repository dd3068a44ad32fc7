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
//! Force generators
//!
//! A force generator is a strategy object that computes one force contribution
//! for one particle per simulation step and adds it into the particle's force
//! accumulator. Generators never touch position or velocity directly (beyond
//! reading them to derive a direction or magnitude) and never integrate.
//!
//! Concrete generators:
//!
//! - [`Gravity`]: constant acceleration scaled by mass
//! - [`Drag`]: velocity-dependent drag with linear and quadratic coefficients
//! - [`Spring`]: spring between two particles
//! - [`AnchoredSpring`]: spring between a particle and a fixed point
//! - [`Attraction`]: constant-magnitude pull toward a fixed origin
//! - [`Uplift`]: mass-scaled force inside a circular region
//! - [`Airbrake`]: drag that can be switched on and off between ticks
//!
//! Generators are owned by a [`GeneratorSet`] and referenced by handle, the
//! same arena scheme used for particles. The [`ForceRegistry`] pairs particle
//! handles with generator handles and drives the per-step dispatch.

use crate::set::{ParticleHandle, ParticleSet};
use std::any::Any;
use std::fmt;

mod attraction;
mod drag;
mod gravity;
mod registry;
mod spring;

pub use attraction::{Attraction, Uplift};
pub use drag::{Airbrake, Drag};
pub use gravity::Gravity;
pub use registry::ForceRegistry;
pub use spring::{AnchoredSpring, Spring};

/// Trait for force generators
///
/// Implementations are pure functions of their own parameters and the target
/// particle's current position and velocity plus the elapsed `duration`. They
/// contribute force exclusively through [`Particle::add_force`]; a generator
/// whose activation condition is unmet (out of range, inactive, infinite-mass
/// target for mass-scaled forces) simply contributes nothing.
///
/// [`Particle::add_force`]: crate::Particle::add_force
pub trait ForceGenerator: Send + Sync {
    /// Compute this generator's force for `particle` and add it to the
    /// particle's accumulator
    ///
    /// The whole set is passed so that generators whose force law involves
    /// other particles (springs) can read them. A stale `particle` handle is a
    /// no-op.
    fn update_force(&self, particle: ParticleHandle, particles: &mut ParticleSet, duration: f64);

    /// Get a descriptive name for this generator
    fn name(&self) -> &str;

    /// Get a reference to the generator as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get a mutable reference to the generator as `Any` for downcasting
    ///
    /// This is how drivers reach concrete mutating operations such as
    /// [`Airbrake::set_active`] on a generator stored in a [`GeneratorSet`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Handle identifying a generator in a [`GeneratorSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratorHandle {
    index: u32,
    generation: u32,
}

impl GeneratorHandle {
    /// Get the slot index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for GeneratorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator({}, gen: {})", self.index, self.generation)
    }
}

struct GeneratorSlot {
    generation: u32,
    generator: Option<Box<dyn ForceGenerator>>,
}

/// Arena that owns all force generators in a simulation
///
/// Like [`ParticleSet`], the set hands out generational handles and rejects
/// stale ones. One generator instance can be registered against any number of
/// particles.
///
/// # Examples
///
/// ```
/// use particle_dynamics::GeneratorSet;
/// use particle_dynamics::forces::{Airbrake, ForceGenerator};
///
/// let mut set = GeneratorSet::new();
/// let handle = set.insert(Box::new(Airbrake::new(0.5, 0.1, true)));
///
/// // Reach the concrete type to flip its switch between ticks.
/// let brake = set
///     .get_mut(handle)
///     .and_then(|g| g.as_any_mut().downcast_mut::<Airbrake>())
///     .unwrap();
/// brake.set_active(false);
/// ```
pub struct GeneratorSet {
    slots: Vec<GeneratorSlot>,
    free: Vec<u32>,
    live: usize,
}

impl GeneratorSet {
    /// Create an empty generator set
    pub fn new() -> Self {
        GeneratorSet {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Insert a generator, returning its handle
    pub fn insert(&mut self, generator: Box<dyn ForceGenerator>) -> GeneratorHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generator = Some(generator);
            GeneratorHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(GeneratorSlot {
                generation: 0,
                generator: Some(generator),
            });
            GeneratorHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Remove a generator, invalidating its handle
    pub fn remove(&mut self, handle: GeneratorHandle) -> Option<Box<dyn ForceGenerator>> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation || slot.generator.is_none() {
            return None;
        }
        let generator = slot.generator.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        generator
    }

    /// Get a generator by handle
    pub fn get(&self, handle: GeneratorHandle) -> Option<&dyn ForceGenerator> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.generator.as_deref()
    }

    /// Get a mutable generator by handle
    pub fn get_mut(&mut self, handle: GeneratorHandle) -> Option<&mut (dyn ForceGenerator + 'static)> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.generator.as_deref_mut()
    }

    /// Check whether a handle refers to a live generator
    pub fn contains(&self, handle: GeneratorHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Get the number of live generators
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Remove all generators, invalidating every outstanding handle
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.generator.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }
}

impl Default for GeneratorSet {
    fn default() -> Self {
        Self::new()
    }
}

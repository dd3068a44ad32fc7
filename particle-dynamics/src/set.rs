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
//! Particle ownership and handles
//!
//! Particles are owned by a [`ParticleSet`] and referred to everywhere else by
//! lightweight generational handles. Removing a particle bumps its slot's
//! generation, so handles held by the force registry or by spring generators
//! become stale rather than dangling: lookups with a stale handle return
//! `None` and callers treat the particle as gone.

use crate::particle::Particle;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Handle identifying a particle in a [`ParticleSet`]
///
/// Handles are cheap to copy and compare; equality of handles is the identity
/// relation used by the force registry when removing registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

impl ParticleHandle {
    /// Get the slot index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ParticleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({}, gen: {})", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    particle: Option<Particle>,
}

/// Arena that owns all particles in a simulation
///
/// The set hands out [`ParticleHandle`]s on insertion and invalidates them on
/// removal. Slots are reused, with the generation counter distinguishing a
/// reused slot from the particle that previously occupied it.
///
/// # Examples
///
/// ```
/// use particle_dynamics::{Particle, ParticleSet};
///
/// let mut set = ParticleSet::new();
/// let handle = set.insert(Particle::new());
/// assert!(set.contains(handle));
///
/// set.remove(handle);
/// assert!(!set.contains(handle));
/// assert!(set.get(handle).is_none());
/// ```
pub struct ParticleSet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ParticleSet {
    /// Create an empty particle set
    pub fn new() -> Self {
        ParticleSet {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Create an empty particle set with room for `capacity` particles
    pub fn with_capacity(capacity: usize) -> Self {
        ParticleSet {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Insert a particle, returning its handle
    pub fn insert(&mut self, particle: Particle) -> ParticleHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.particle = Some(particle);
            ParticleHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                particle: Some(particle),
            });
            ParticleHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Remove a particle, invalidating its handle
    ///
    /// Returns the particle if the handle was live, `None` if it was already
    /// stale. Registrations that still refer to the handle are skipped by the
    /// force registry, not cleaned up; callers should remove them eagerly.
    pub fn remove(&mut self, handle: ParticleHandle) -> Option<Particle> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation || slot.particle.is_none() {
            return None;
        }
        let particle = slot.particle.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        particle
    }

    /// Get a particle by handle
    ///
    /// Returns `None` for stale handles.
    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.particle.as_ref()
    }

    /// Get a mutable particle by handle
    ///
    /// Returns `None` for stale handles.
    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.particle.as_mut()
    }

    /// Check whether a handle refers to a live particle
    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Get the number of live particles
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Remove all particles, invalidating every outstanding handle
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.particle.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }

    /// Iterate over live particles with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.particle.as_ref().map(|p| {
                (
                    ParticleHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    p,
                )
            })
        })
    }

    /// Iterate mutably over live particles with their handles
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleHandle, &mut Particle)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.particle.as_mut().map(|p| {
                (
                    ParticleHandle {
                        index: index as u32,
                        generation,
                    },
                    p,
                )
            })
        })
    }

    /// Collect the handles of all live particles
    pub fn handles(&self) -> Vec<ParticleHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Integrate every live, finite-mass particle forward by `duration`
    ///
    /// Particles are independent, so with the `parallel` feature enabled this
    /// runs across threads; otherwise it is a plain sequential loop. Call this
    /// after [`crate::ForceRegistry::update_forces`] each tick.
    ///
    /// Returns the number of particles advanced (immovable particles are
    /// skipped and not counted).
    ///
    /// # Panics
    ///
    /// Panics if `duration` is not positive and any finite-mass particle is
    /// live.
    pub fn integrate_all(&mut self, duration: f64) -> usize {
        #[cfg(feature = "parallel")]
        {
            self.slots
                .par_iter_mut()
                .map(|slot| match slot.particle.as_mut() {
                    Some(p) if p.has_finite_mass() => {
                        p.integrate(duration);
                        1
                    }
                    _ => 0,
                })
                .sum()
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut count = 0;
            for slot in &mut self.slots {
                if let Some(p) = slot.particle.as_mut() {
                    if p.has_finite_mass() {
                        p.integrate(duration);
                        count += 1;
                    }
                }
            }
            count
        }
    }
}

impl Default for ParticleSet {
    fn default() -> Self {
        Self::new()
    }
}

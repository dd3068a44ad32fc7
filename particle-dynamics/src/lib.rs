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
//! # Particle Dynamics
//!
//! A minimal 2D particle physics core: point masses integrated forward in
//! time under a set of pluggable force generators.
//!
//! ## Features
//!
//! - **Particles**: position, velocity, acceleration, accumulated force,
//!   inverse mass, and frame-rate-independent damping
//! - **Semi-implicit Euler**: symplectic integration with exact, documented
//!   update ordering
//! - **Force Generators**: gravity, drag, springs, attraction, uplift, and
//!   airbrake as pluggable strategies behind a single-method trait
//! - **Force Registry**: ordered (particle, generator) associations with a
//!   per-step dispatch loop
//! - **Parallelization**: optional Rayon integration for per-particle
//!   integration (`parallel` feature)
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use particle_dynamics::{Particle, ParticleSet, GeneratorSet, ForceRegistry};
//! use particle_dynamics::forces::Gravity;
//!
//! let mut particles = ParticleSet::new();
//! let mut generators = GeneratorSet::new();
//! let mut registry = ForceRegistry::new();
//!
//! let ball = particles.insert(Particle::new());
//! let gravity = generators.insert(Box::new(Gravity::new(DVec2::new(0.0, -9.8))));
//! registry.add(ball, gravity);
//!
//! // One simulation tick: accumulate forces, then integrate.
//! let dt = 1.0 / 60.0;
//! registry.update_forces(dt, &mut particles, &generators);
//! particles.integrate_all(dt);
//! ```

#![warn(missing_docs)]

/// Particle state and semi-implicit Euler integration
pub mod particle;

/// Particle ownership: handles and the arena that backs them
pub mod set;

/// Force generators and the registry that dispatches them
pub mod forces;

pub use forces::{ForceGenerator, ForceRegistry, GeneratorHandle, GeneratorSet};
pub use particle::Particle;
pub use set::{ParticleHandle, ParticleSet};

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
//! Ballistic shot under gravity and drag
//!
//! Launches a projectile at 45 degrees and prints its trajectory until it
//! falls back below the launch height.

use glam::DVec2;
use particle_dynamics::forces::{Drag, Gravity};
use particle_dynamics::{ForceRegistry, GeneratorSet, Particle, ParticleSet};

fn main() {
    let mut particles = ParticleSet::new();
    let mut generators = GeneratorSet::new();
    let mut registry = ForceRegistry::new();

    let mut shell = Particle::new();
    shell.set_mass(2.0);
    shell.set_velocity(DVec2::new(30.0, 30.0));
    let shell = particles.insert(shell);

    let gravity = generators.insert(Box::new(Gravity::new(DVec2::new(0.0, -9.8))));
    let drag = generators.insert(Box::new(Drag::new(0.02, 0.001)));
    registry.add(shell, gravity);
    registry.add(shell, drag);

    println!("Ballistic shot: m=2 kg, v0=(30, 30) m/s, gravity + drag\n");
    println!("{:>6}  {:>10}  {:>10}  {:>10}", "t (s)", "x (m)", "y (m)", "speed");

    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    loop {
        registry.update_forces(dt, &mut particles, &generators);
        particles.integrate_all(dt);
        t += dt;

        let p = particles.get(shell).expect("shell was removed");
        if (t / dt).round() as u64 % 30 == 0 {
            println!(
                "{:>6.2}  {:>10.3}  {:>10.3}  {:>10.3}",
                t,
                p.position().x,
                p.position().y,
                p.velocity().length()
            );
        }
        if p.position().y < 0.0 {
            println!("\nImpact at t = {:.2} s, range = {:.2} m", t, p.position().x);
            break;
        }
    }
}

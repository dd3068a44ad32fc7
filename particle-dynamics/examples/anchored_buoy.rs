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
//! Buoy on an anchored spring with an airbrake
//!
//! A mass hangs from an anchored spring, bobbing under gravity. Halfway
//! through the run an airbrake is switched on, damping the oscillation.

use glam::DVec2;
use particle_dynamics::forces::{Airbrake, AnchoredSpring, Gravity};
use particle_dynamics::{ForceRegistry, GeneratorSet, Particle, ParticleSet};

fn main() {
    let mut particles = ParticleSet::new();
    let mut generators = GeneratorSet::new();
    let mut registry = ForceRegistry::new();

    let mut buoy = Particle::new();
    buoy.set_mass(1.0);
    buoy.set_position(DVec2::new(0.0, -3.0));
    let buoy = particles.insert(buoy);

    let gravity = generators.insert(Box::new(Gravity::new(DVec2::new(0.0, -9.8))));
    let spring = generators.insert(Box::new(AnchoredSpring::new(DVec2::ZERO, 12.0, 2.0)));
    let brake = generators.insert(Box::new(Airbrake::new(0.0, 0.4, false)));
    registry.add(buoy, gravity);
    registry.add(buoy, spring);
    registry.add(buoy, brake);

    println!("Anchored-spring buoy; airbrake engages at t = 10 s\n");

    let dt = 1.0 / 60.0;
    let steps = 20 * 60;
    for step in 1..=steps {
        if step == steps / 2 {
            generators
                .get_mut(brake)
                .and_then(|g| g.as_any_mut().downcast_mut::<Airbrake>())
                .expect("airbrake generator")
                .set_active(true);
            println!("  -- airbrake engaged --");
        }

        registry.update_forces(dt, &mut particles, &generators);
        particles.integrate_all(dt);

        if step % 60 == 0 {
            let p = particles.get(buoy).expect("buoy was removed");
            println!(
                "t = {:>5.1} s   y = {:>7.3} m   speed = {:>6.3} m/s",
                step as f64 * dt,
                p.position().y,
                p.velocity().length()
            );
        }
    }
}

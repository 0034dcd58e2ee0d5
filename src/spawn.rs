/*
 * Spawn Module
 *
 * Admits new fireflies one at a time, one per `interval` seconds, until the
 * flock is full. New fireflies start anywhere inside the cylinder, heading
 * in a random direction.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::bounds::Bounds;
use crate::firefly::FireflyId;
use crate::simulation::Simulation;
use crate::steering::random_unit_vector;
use crate::MIN_SPEED;

#[derive(Debug, Clone)]
pub struct Spawner {
    pub interval: f32,
    elapsed: f32,
}

impl Spawner {
    pub fn new(interval: f32) -> Self {
        Self { interval, elapsed: 0.0 }
    }

    // Let time pass; spawns at most one firefly per call
    pub fn tick(&mut self, dt: f32, sim: &mut Simulation) -> Option<FireflyId> {
        if sim.flock.is_full() {
            return None;
        }

        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed -= self.interval;

        let (position, velocity) = {
            let bounds = sim.bounds;
            let max_speed = sim.state.max_speed;
            let rng = sim.rng_mut();
            (random_position(&bounds, rng), random_velocity(max_speed, rng))
        };

        match sim.spawn_firefly(position, velocity) {
            Ok(id) => {
                log::debug!("spawned firefly {} at {:?}", id, position);
                Some(id)
            }
            Err(err) => {
                log::warn!("spawn rejected: {}", err);
                None
            }
        }
    }
}

// Uniform over the cylinder: sqrt keeps the disk area-uniform
pub fn random_position<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = bounds.radius * rng.gen::<f32>().sqrt();
    let y = rng.gen_range(bounds.bottom..=bounds.top);
    vec3(
        bounds.center.x + angle.cos() * distance,
        y,
        bounds.center.z + angle.sin() * distance,
    )
}

pub fn random_velocity<R: Rng + ?Sized>(max_speed: f32, rng: &mut R) -> Vec3 {
    let speed = rng.gen_range(MIN_SPEED..=max_speed.max(MIN_SPEED));
    random_unit_vector(rng) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawns_one_per_interval() {
        let params = SimulationParams { seed: Some(3), ..Default::default() };
        let mut sim = Simulation::new(&params).unwrap();
        let mut spawner = Spawner::new(0.5);

        assert_eq!(spawner.tick(0.3, &mut sim), None);
        assert_eq!(spawner.tick(0.3, &mut sim), Some(FireflyId(0)));
        assert_eq!(spawner.tick(0.3, &mut sim), None);
        assert_eq!(spawner.tick(0.3, &mut sim), Some(FireflyId(1)));
        assert_eq!(sim.flock.len(), 2);
    }

    #[test]
    fn stops_at_capacity() {
        let params = SimulationParams { max_participants: 7, seed: Some(3), ..Default::default() };
        let mut sim = Simulation::new(&params).unwrap();
        let mut spawner = Spawner::new(0.1);

        for _ in 0..100 {
            spawner.tick(0.1, &mut sim);
        }
        assert_eq!(sim.flock.len(), 7);
        assert_eq!(sim.flock.leaders().len(), 5);
        assert!(sim.flock.followers().iter().all(|f| !f.is_leader));
    }

    #[test]
    fn random_positions_are_inside_the_volume() {
        let bounds = Bounds::new(vec3(5.0, -2.0, 1.0), 40.0, 30.0, 5.0).unwrap();
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..500 {
            assert!(bounds.contains(random_position(&bounds, &mut rng)));
        }
    }

    #[test]
    fn random_velocities_respect_speed_limits() {
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..500 {
            let speed = random_velocity(15.0, &mut rng).length();
            assert!(speed >= MIN_SPEED - 1e-5 && speed <= 15.0 + 1e-4);
        }
    }
}

/*
 * Steering Module
 *
 * Computes the acceleration a firefly wants this step.
 *
 * Leaders wander: their current heading plus a much larger random unit
 * vector, rescaled to max speed.
 *
 * Followers apply the three classic flocking rules over every other
 * firefly within CHECK_RANGE:
 * 1. Separation: Move away from neighbors inside AVOID_RADIUS
 * 2. Alignment: Match the average velocity of neighbors
 * 3. Cohesion: Head for the neighbors' center, or for the assigned leader
 */

use nannou::prelude::*;
use rand::Rng;

use crate::firefly::FireflyId;
use crate::flock::Flock;
use crate::{
    ALIGNMENT_WEIGHT, AVOID_RADIUS, CHECK_RANGE, COHESION_WEIGHT, LEADER_WANDER, SEPARATION_WEIGHT,
};

/// The three follower rules, each already scaled to max speed (or zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringForces {
    pub separation: Vec3,
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub neighbors: usize,
}

impl SteeringForces {
    #[inline]
    pub fn combined(&self) -> Vec3 {
        self.separation * SEPARATION_WEIGHT + self.alignment * ALIGNMENT_WEIGHT + self.cohesion * COHESION_WEIGHT
    }
}

// Desired acceleration for the firefly `id`, reading the flock as it is right now
pub fn steer<R: Rng + ?Sized>(flock: &Flock, id: FireflyId, max_speed: f32, rng: &mut R) -> Vec3 {
    match flock.get(id) {
        Some(firefly) if firefly.is_leader => leader_wander(firefly.heading, max_speed, rng),
        Some(_) => follower_forces(flock, id, max_speed).combined(),
        None => Vec3::ZERO,
    }
}

pub fn leader_wander<R: Rng + ?Sized>(heading: Vec3, max_speed: f32, rng: &mut R) -> Vec3 {
    let wander = heading + random_unit_vector(rng) * LEADER_WANDER;
    scaled_or_zero(wander, max_speed)
}

pub fn follower_forces(flock: &Flock, id: FireflyId, max_speed: f32) -> SteeringForces {
    let fireflies = flock.as_slice();
    let this = &fireflies[id.index()];

    let check_range_sq = CHECK_RANGE * CHECK_RANGE;
    let avoid_radius_sq = AVOID_RADIUS * AVOID_RADIUS;

    let mut separation = Vec3::ZERO;
    let mut matching = Vec3::ZERO;
    let mut center = Vec3::ZERO;
    let mut neighbors = 0;

    // Single pass over every other firefly
    for (i, other) in fireflies.iter().enumerate() {
        if i == id.index() {
            continue;
        }

        let offset = other.position - this.position;
        let distance_sq = offset.length_squared();
        if distance_sq >= check_range_sq {
            continue;
        }

        neighbors += 1;
        if distance_sq <= avoid_radius_sq {
            separation -= offset;
        }
        matching += other.velocity;
        center += offset;
    }

    let separation = scaled_or_zero(separation, max_speed);

    let alignment = if neighbors > 0 {
        scaled_or_zero(matching / neighbors as f32, max_speed)
    } else {
        Vec3::ZERO
    };

    // An assigned leader overrides the local center entirely
    let leader_position = this.led_by.and_then(|leader| flock.get(leader)).map(|leader| leader.position);
    let cohesion = match leader_position {
        Some(position) => scaled_or_zero(position - this.position, max_speed),
        None if neighbors > 0 => scaled_or_zero(center / neighbors as f32, max_speed),
        None => Vec3::ZERO,
    };

    SteeringForces { separation, alignment, cohesion, neighbors }
}

// Rescale `v` to `magnitude`; a zero vector stays zero
#[inline]
fn scaled_or_zero(v: Vec3, magnitude: f32) -> Vec3 {
    let length_sq = v.length_squared();
    if length_sq > 0.0 {
        v * (magnitude / length_sq.sqrt())
    } else {
        Vec3::ZERO
    }
}

// Uniform direction by rejection sampling inside the unit ball
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = vec3(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        let length_sq = candidate.length_squared();
        if length_sq > 1.0e-6 && length_sq <= 1.0 {
            return candidate / length_sq.sqrt();
        }
    }
}

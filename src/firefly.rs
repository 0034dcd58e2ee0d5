/*
 * Firefly Module
 *
 * This module defines the Firefly struct: one flock member's kinematic and
 * social state. Movement integration, wrap-around and edge fading live here;
 * the steering that feeds `integrate` lives in the steering module.
 */

use std::fmt;

use nannou::prelude::*;

use crate::bounds::Bounds;
use crate::error::FlockError;
use crate::MIN_SPEED;

/// Index of a firefly in its flock. Fireflies are never removed, so an id
/// stays valid for the lifetime of the flock that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FireflyId(pub usize);

impl FireflyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FireflyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Firefly {
    pub position: Vec3,
    pub velocity: Vec3,
    // Unit vector the body faces, always the direction of `velocity`
    pub heading: Vec3,
    pub is_leader: bool,
    pub led_by: Option<FireflyId>,
    pub color: Hsv,
    // 0 = opaque, 1 = invisible. Cosmetic only.
    pub transparency: f32,
}

impl Firefly {
    pub fn new(position: Vec3, velocity: Vec3, is_leader: bool) -> Self {
        let heading = direction_of(velocity).unwrap_or(Vec3::X);

        Self {
            position,
            velocity,
            heading,
            is_leader,
            led_by: None,
            color: hsv(0.0, 0.0, 1.0),
            transparency: 0.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    // Apply an acceleration over `dt`, clamp the speed into [MIN_SPEED, max_speed],
    // then move. Returns false when the velocity collapsed to zero and the
    // previous heading had to stand in for its direction.
    pub fn integrate(&mut self, acceleration: Vec3, dt: f32, max_speed: f32) -> bool {
        self.velocity += acceleration * dt;

        let max_speed = max_speed.max(MIN_SPEED);
        let (direction, speed, healthy) = match direction_of(self.velocity) {
            Ok(direction) => (direction, self.velocity.length().clamp(MIN_SPEED, max_speed), true),
            Err(err) => {
                log::debug!("{}; keeping heading {:?}", err, self.heading);
                (self.heading, MIN_SPEED, false)
            }
        };

        self.velocity = direction * speed;
        self.heading = direction;
        self.position += self.velocity * dt;

        healthy
    }

    // Wrap the firefly between the top and bottom caps
    pub fn wrap_vertical(&mut self, bounds: &Bounds) {
        if self.position.y > bounds.top {
            self.position.y -= bounds.height;
        } else if self.position.y < bounds.bottom {
            self.position.y += bounds.height;
        }
    }

    // Teleport a firefly that left the cylinder wall to the opposite side.
    // Moving by a full diameter lands it inside the far wall rather than on it.
    pub fn wrap_radial(&mut self, bounds: &Bounds) {
        let offset = bounds.horizontal_offset(self.position);
        if offset.length_squared() > bounds.squared_radius {
            self.position -= offset.normalize() * bounds.radius * 2.0;
        }
    }

    pub fn apply_fade(&mut self, bounds: &Bounds) {
        self.transparency = bounds.fade_factor(self.position);
    }
}

/// Unit vector along `v`, or `DegenerateVelocity` when `v` has no direction.
pub fn direction_of(v: Vec3) -> Result<Vec3, FlockError> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Ok(v / length)
    } else {
        Err(FlockError::DegenerateVelocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(Vec3::ZERO, 40.0, 30.0, 5.0).unwrap()
    }

    #[test]
    fn integrate_clamps_to_max_speed() {
        let mut firefly = Firefly::new(Vec3::ZERO, vec3(10.0, 0.0, 0.0), false);
        firefly.integrate(vec3(1000.0, 0.0, 0.0), 1.0, 15.0);
        assert!((firefly.speed() - 15.0).abs() < 1e-4);
        assert_eq!(firefly.heading, Vec3::X);
    }

    #[test]
    fn integrate_clamps_to_min_speed() {
        let mut firefly = Firefly::new(Vec3::ZERO, vec3(0.0, 0.0, 0.05), false);
        firefly.integrate(Vec3::ZERO, 0.1, 15.0);
        assert!((firefly.speed() - MIN_SPEED).abs() < 1e-6);
        assert!((firefly.position.z - MIN_SPEED * 0.1).abs() < 1e-6);
    }

    #[test]
    fn zero_velocity_keeps_previous_heading() {
        let mut firefly = Firefly::new(Vec3::ZERO, vec3(0.0, 2.0, 0.0), false);
        let healthy = firefly.integrate(vec3(0.0, -2.0, 0.0), 1.0, 15.0);
        assert!(!healthy);
        assert_eq!(firefly.heading, Vec3::Y);
        assert!((firefly.speed() - MIN_SPEED).abs() < 1e-6);
        assert!(firefly.velocity.is_finite());
    }

    #[test]
    fn direction_of_zero_is_an_error() {
        assert_eq!(direction_of(Vec3::ZERO), Err(FlockError::DegenerateVelocity));
    }

    #[test]
    fn vertical_wrap_moves_by_one_height() {
        let b = bounds();
        let mut firefly = Firefly::new(vec3(0.0, 21.0, 0.0), Vec3::X, false);
        firefly.wrap_vertical(&b);
        assert_eq!(firefly.position.y, -19.0);

        firefly.position.y = -20.5;
        firefly.wrap_vertical(&b);
        assert_eq!(firefly.position.y, 19.5);
    }

    #[test]
    fn radial_wrap_teleports_across_the_cylinder() {
        let b = bounds();
        let mut firefly = Firefly::new(vec3(31.0, 0.0, 0.0), Vec3::X, false);
        firefly.wrap_radial(&b);
        assert!((firefly.position.x + 29.0).abs() < 1e-4);
        assert!(b.squared_horizontal_distance(firefly.position) < 31.0 * 31.0);
    }

    #[test]
    fn radial_wrap_ignores_fireflies_inside() {
        let b = bounds();
        let mut firefly = Firefly::new(vec3(29.0, 3.0, 0.0), Vec3::X, false);
        firefly.wrap_radial(&b);
        assert_eq!(firefly.position, vec3(29.0, 3.0, 0.0));
    }
}

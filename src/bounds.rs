/*
 * Bounds Module
 *
 * Immutable geometry of the cylindrical containment volume. Everything the
 * per-step wrap and fade logic needs is derived once at construction.
 * The cylinder's axis is vertical (y) and passes through `center`.
 */

use nannou::prelude::*;

use crate::error::ConfigError;
use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
    pub transition_distance: f32,
    pub squared_radius: f32,
    pub squared_radius_check_distance: f32,
    pub squared_transition_distance: f32,
    pub top: f32,
    pub bottom: f32,
    pub y_max: f32,
    pub y_min: f32,
}

impl Bounds {
    pub fn new(center: Vec3, height: f32, radius: f32, transition_distance: f32) -> Result<Self, ConfigError> {
        if !(center.is_finite() && height.is_finite() && radius.is_finite() && transition_distance.is_finite()) {
            return Err(ConfigError::InvalidBounds("all dimensions must be finite".into()));
        }
        if height <= 0.0 || radius <= 0.0 {
            return Err(ConfigError::InvalidBounds(format!(
                "height ({}) and radius ({}) must be positive",
                height, radius
            )));
        }
        if transition_distance <= 0.0 {
            return Err(ConfigError::InvalidBounds("transition distance must be positive".into()));
        }
        // The fade bands must not overlap each other or the axis
        if transition_distance >= radius || transition_distance >= height / 2.0 {
            return Err(ConfigError::InvalidBounds(format!(
                "transition distance {} must be below the radius {} and half the height {}",
                transition_distance,
                radius,
                height / 2.0
            )));
        }

        let top = center.y + height / 2.0;
        let bottom = center.y - height / 2.0;
        let inner = radius - transition_distance;

        Ok(Self {
            height,
            radius,
            center,
            transition_distance,
            squared_radius: radius * radius,
            squared_radius_check_distance: inner * inner,
            squared_transition_distance: transition_distance * transition_distance,
            top,
            bottom,
            y_max: top - transition_distance,
            y_min: bottom + transition_distance,
        })
    }

    pub fn from_params(params: &SimulationParams) -> Result<Self, ConfigError> {
        let [x, y, z] = params.volume_center;
        Self::new(vec3(x, y, z), params.volume_height, params.volume_radius, params.transition_distance)
    }

    // Offset from the cylinder axis, ignoring height
    #[inline]
    pub fn horizontal_offset(&self, position: Vec3) -> Vec3 {
        vec3(position.x - self.center.x, 0.0, position.z - self.center.z)
    }

    #[inline]
    pub fn squared_horizontal_distance(&self, position: Vec3) -> f32 {
        self.horizontal_offset(position).length_squared()
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.y >= self.bottom
            && position.y <= self.top
            && self.squared_horizontal_distance(position) <= self.squared_radius
    }

    /// How far a point has faded out near the walls: 0 is fully visible,
    /// 1 is invisible. The largest of the top, bottom and radial ramps wins.
    pub fn fade_factor(&self, position: Vec3) -> f32 {
        let mut factor: f32 = 0.0;

        if position.y > self.y_max {
            factor = factor.max((position.y - self.y_max) / self.transition_distance);
        }
        if position.y < self.y_min {
            factor = factor.max((self.y_min - position.y) / self.transition_distance);
        }

        let squared_distance = self.squared_horizontal_distance(position);
        if squared_distance > self.squared_radius_check_distance {
            factor = factor.max(
                (squared_distance - self.squared_radius_check_distance) / self.squared_transition_distance,
            );
        }

        factor.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(Vec3::ZERO, 40.0, 30.0, 5.0).unwrap()
    }

    #[test]
    fn derived_values() {
        let b = bounds();
        assert_eq!(b.top, 20.0);
        assert_eq!(b.bottom, -20.0);
        assert_eq!(b.y_max, 15.0);
        assert_eq!(b.y_min, -15.0);
        assert_eq!(b.squared_radius, 900.0);
        assert_eq!(b.squared_radius_check_distance, 625.0);
        assert_eq!(b.squared_transition_distance, 25.0);
    }

    #[test]
    fn offset_center_moves_top_and_bottom() {
        let b = Bounds::new(vec3(3.0, 10.0, -2.0), 40.0, 30.0, 5.0).unwrap();
        assert_eq!(b.top, 30.0);
        assert_eq!(b.bottom, -10.0);
        assert_eq!(b.squared_horizontal_distance(vec3(3.0, 99.0, -2.0)), 0.0);
    }

    #[test]
    fn rejects_overlapping_transition_bands() {
        assert!(Bounds::new(Vec3::ZERO, 40.0, 30.0, 30.0).is_err());
        assert!(Bounds::new(Vec3::ZERO, 8.0, 30.0, 4.0).is_err());
        assert!(Bounds::new(Vec3::ZERO, 40.0, -1.0, 0.5).is_err());
        assert!(Bounds::new(Vec3::ZERO, 40.0, 30.0, f32::NAN).is_err());
    }

    #[test]
    fn fade_is_zero_in_the_core() {
        assert_eq!(bounds().fade_factor(vec3(0.0, 0.0, 0.0)), 0.0);
        assert_eq!(bounds().fade_factor(vec3(10.0, 14.0, 0.0)), 0.0);
    }

    #[test]
    fn vertical_fade_ramps_linearly() {
        let b = bounds();
        assert!((b.fade_factor(vec3(0.0, 17.5, 0.0)) - 0.5).abs() < 1e-6);
        assert!((b.fade_factor(vec3(0.0, -16.0, 0.0)) - 0.2).abs() < 1e-6);
        assert_eq!(b.fade_factor(vec3(0.0, 25.0, 0.0)), 1.0);
    }

    #[test]
    fn radial_fade_uses_squared_distance() {
        let b = bounds();
        // 26^2 = 676, (676 - 625) / 25 > 1
        assert_eq!(b.fade_factor(vec3(26.0, 0.0, 0.0)), 1.0);
        // 25.2^2 = 635.04, (635.04 - 625) / 25 = 0.4016
        assert!((b.fade_factor(vec3(0.0, 0.0, 25.2)) - 0.4016).abs() < 1e-3);
    }

    #[test]
    fn strongest_ramp_wins() {
        let b = bounds();
        let corner = vec3(25.2, 19.0, 0.0);
        assert!((b.fade_factor(corner) - 0.8).abs() < 1e-5);
    }
}

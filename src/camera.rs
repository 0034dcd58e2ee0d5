/*
 * Camera Module
 *
 * An orbit camera around the containment volume. Dragging orbits, the mouse
 * wheel zooms. `project` maps a world point to screen space with a simple
 * perspective divide.
 */

use nannou::prelude::*;

// Closest a projected point may be to the eye before it is dropped
const NEAR_PLANE: f32 = 1.0;

pub struct Camera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub focal_length: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

/// A world point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    // Screen pixels per world unit at this depth
    pub scale: f32,
    pub depth: f32,
}

impl Camera {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            yaw: 0.4,
            pitch: 0.35,
            distance,
            zoom: 1.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
            focal_length: 600.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    pub fn project(&self, point: Vec3, window_rect: Rect) -> Option<Projected> {
        let relative = point - self.target;

        // Orbit around the vertical axis, then tilt
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let x = relative.x * cos_yaw - relative.z * sin_yaw;
        let z = relative.x * sin_yaw + relative.z * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let y = relative.y * cos_pitch - z * sin_pitch;
        let z = relative.y * sin_pitch + z * cos_pitch;

        let depth = self.distance + z;
        if depth < NEAR_PLANE {
            return None;
        }

        let scale = self.focal_length * self.zoom / depth;
        Some(Projected {
            screen: vec2(x, y) * scale + window_rect.xy(),
            scale,
            depth,
        })
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Orbit while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.yaw -= delta.x * 0.01;
                self.pitch = (self.pitch - delta.y * 0.01).clamp(-1.5, 1.5);
                self.last_cursor_pos = position;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_w_h(800.0, 600.0)
    }

    #[test]
    fn target_projects_to_window_center() {
        let camera = Camera::new(vec3(1.0, 2.0, 3.0), 100.0);
        let projected = camera.project(vec3(1.0, 2.0, 3.0), window()).unwrap();
        assert!(projected.screen.length() < 1e-4);
        assert!((projected.depth - 100.0).abs() < 1e-4);
    }

    #[test]
    fn points_behind_the_eye_are_dropped() {
        let mut camera = Camera::new(Vec3::ZERO, 10.0);
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        assert!(camera.project(vec3(0.0, 0.0, -20.0), window()).is_none());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, 10.0);
        for _ in 0..100 {
            camera.zoom(vec2(0.0, 5.0));
        }
        assert_eq!(camera.zoom, camera.max_zoom);
    }
}

/*
 * Renderer Module
 *
 * Draws the cylinder outline and every firefly as a glowing dot. Fireflies
 * are painted back to front so nearer ones overlap farther ones, and their
 * alpha follows the edge fade computed by the simulation.
 */

use nannou::prelude::*;
use std::f32::consts::TAU;

use crate::app::Model;
use crate::bounds::Bounds;
use crate::camera::Camera;
use crate::color::hue_of;
use crate::FIREFLY_SIZE;

const RING_SEGMENTS: usize = 64;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    draw_bounds(&draw, &model.camera, &model.sim.bounds, window_rect);

    let mut visible: Vec<_> = model
        .sim
        .flock
        .as_slice()
        .iter()
        .filter(|firefly| firefly.transparency < 1.0)
        .filter_map(|firefly| {
            model
                .camera
                .project(firefly.position, window_rect)
                .map(|projected| (projected, firefly))
        })
        .collect();
    visible.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

    for (projected, firefly) in visible {
        let alpha = 1.0 - firefly.transparency;
        let hue = hue_of(&firefly.color);
        let size = if firefly.is_leader { FIREFLY_SIZE * 1.5 } else { FIREFLY_SIZE };
        let radius = (size * projected.scale * 0.1).max(1.0);

        // Soft halo, then the body
        draw.ellipse()
            .xy(projected.screen)
            .radius(radius * 2.5)
            .hsva(hue, firefly.color.saturation, firefly.color.value, alpha * 0.15);
        draw.ellipse()
            .xy(projected.screen)
            .radius(radius)
            .hsva(hue, firefly.color.saturation, firefly.color.value, alpha);
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

// Top and bottom rings plus four vertical edges
fn draw_bounds(draw: &Draw, camera: &Camera, bounds: &Bounds, window_rect: Rect) {
    let ring_point = |angle: f32, y: f32| {
        vec3(
            bounds.center.x + angle.cos() * bounds.radius,
            y,
            bounds.center.z + angle.sin() * bounds.radius,
        )
    };
    let stroke = rgba(0.3, 0.3, 0.3, 1.0);

    for y in [bounds.top, bounds.bottom] {
        let points: Vec<Point2> = (0..=RING_SEGMENTS)
            .map(|i| i as f32 / RING_SEGMENTS as f32 * TAU)
            .filter_map(|angle| camera.project(ring_point(angle, y), window_rect))
            .map(|projected| projected.screen)
            .collect();
        draw.polyline().weight(1.0).points(points).color(stroke);
    }

    for i in 0..4 {
        let angle = i as f32 * TAU / 4.0;
        let top = camera.project(ring_point(angle, bounds.top), window_rect);
        let bottom = camera.project(ring_point(angle, bounds.bottom), window_rect);
        if let (Some(top), Some(bottom)) = (top, bottom) {
            draw.line().start(top.screen).end(bottom.screen).weight(1.0).color(stroke);
        }
    }
}

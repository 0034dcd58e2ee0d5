/*
 * Application Module
 *
 * This module defines the viewer's model and its update loop. Physics runs
 * at a fixed timestep: frame time accumulates and is drained in whole
 * steps, each of which first gives the spawner a chance to admit a firefly
 * and then advances the simulation.
 */

use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::simulation::Simulation;
use crate::spawn::Spawner;
use crate::ui;

// Never run more than this many physics steps per frame after a stall
const MAX_STEPS_PER_FRAME: usize = 8;

pub struct Model {
    pub sim: Simulation,
    pub spawner: Spawner,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub command_input: String,
    // Fixed timestep physics variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
}

pub fn model(app: &App) -> Model {
    let params = SimulationParams::from_env().unwrap_or_else(|err| {
        log::warn!("{}; falling back to default parameters", err);
        SimulationParams::default()
    });
    let sim = Simulation::new(&params).expect("validated parameters always build a simulation");

    let window_id = app
        .new_window()
        .title("Fireflies")
        .size(1280, 800)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to open the viewer window");
    let window = app.window(window_id).expect("viewer window disappeared after creation");
    let egui = Egui::from_window(&window);

    let camera = Camera::new(sim.bounds.center, sim.bounds.radius * 4.0);
    let spawner = Spawner::new(params.spawn_interval);
    let physics_step_size = Duration::from_secs_f32(1.0 / params.fixed_physics_fps);

    log::info!(
        "fireflies: {} leaders, up to {} participants, {:.0} Hz physics",
        params.num_leaders,
        params.max_participants,
        params.fixed_physics_fps
    );

    Model {
        sim,
        spawner,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        mouse_position: Vec2::ZERO,
        command_input: String::new(),
        physics_accumulator: Duration::ZERO,
        physics_step_size,
        last_update_time: Instant::now(),
    }
}

pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let commands = ui::update_ui(
        &mut model.egui,
        &model.sim.state,
        &mut model.params,
        &model.debug_info,
        &mut model.command_input,
    );
    for command in commands {
        model.sim.apply_command(command);
    }

    let now = Instant::now();
    let frame_time = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    if model.params.pause_simulation {
        model.physics_accumulator = Duration::ZERO;
        model.debug_info.physics_steps_per_frame = 0;
        return;
    }

    model.physics_accumulator += frame_time;
    let dt = model.physics_step_size.as_secs_f32();
    let mut steps = 0;

    while model.physics_accumulator >= model.physics_step_size {
        model.physics_accumulator -= model.physics_step_size;
        if steps == MAX_STEPS_PER_FRAME {
            continue;
        }

        model.spawner.tick(dt, &mut model.sim);
        let report = model.sim.step(dt);
        model.debug_info.record_step(&model.sim, &report);
        steps += 1;
    }

    model.debug_info.physics_steps_per_frame = steps;
}

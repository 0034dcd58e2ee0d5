/*
 * Physics Module
 *
 * This module advances the whole flock by one fixed tick:
 * 1. Advance the shared rainbow hue
 * 2. For each firefly in flock order: steer, integrate, wrap, fade, recolor
 * 3. Count down to the next leadership changeup
 *
 * Fireflies are updated in place. A firefly processed later in the tick
 * sees the already-updated state of those processed before it, so the
 * result depends on flock order. This matches how the flock has always
 * moved; a snapshot-then-apply pass would make steps order independent
 * at the cost of a copy per tick.
 */

use crate::color::{rainbow_color, wrap_hue, ColorMode};
use crate::firefly::FireflyId;
use crate::simulation::{Simulation, StepReport};
use crate::steering;

pub fn step(sim: &mut Simulation, dt: f32) -> StepReport {
    let mut report = StepReport::default();
    let state = &mut sim.state;

    state.rainbow_hue = wrap_hue(state.rainbow_hue + state.rainbow_speed * dt);
    let rainbow = match state.color_mode {
        ColorMode::Rainbow(_) => Some(rainbow_color(state.rainbow_hue)),
        _ => None,
    };

    let max_speed = state.max_speed;
    for index in 0..sim.flock.len() {
        let id = FireflyId(index);
        let acceleration = steering::steer(&sim.flock, id, max_speed, &mut sim.rng);

        let Some(firefly) = sim.flock.get_mut(id) else {
            continue;
        };
        if !firefly.integrate(acceleration, dt, max_speed) {
            report.degenerate_velocities += 1;
        }
        firefly.wrap_vertical(&sim.bounds);
        firefly.wrap_radial(&sim.bounds);
        firefly.apply_fade(&sim.bounds);

        if let Some(color) = rainbow {
            firefly.color = color;
        }
    }

    state.changeup_timer -= dt;
    if state.changeup_timer <= 0.0 {
        let picks = sim.flock.perform_changeup(state.color_mode, &mut sim.rng);
        log::debug!("leadership changeup touched {} followers", picks);
        report.changeup = Some(picks);
        state.changeup_timer = state.changeup_cooldown;
    }

    report
}

/*
 * Debug Information Module
 *
 * Per-frame figures shown in the control window.
 */

use std::time::Duration;

use crate::simulation::{Simulation, StepReport};

#[derive(Debug, Default, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub physics_steps_per_frame: usize,
    pub fireflies: usize,
    pub leaders: usize,
    pub led_followers: usize,
    pub last_changeup: Option<usize>,
    pub degenerate_velocities: usize,
}

impl DebugInfo {
    // Fold one step's report and the flock's current shape into the counters
    pub fn record_step(&mut self, sim: &Simulation, report: &StepReport) {
        self.fireflies = sim.flock.len();
        self.leaders = sim.flock.leaders().len();
        self.led_followers = sim.flock.led_count();
        if report.changeup.is_some() {
            self.last_changeup = report.changeup;
        }
        self.degenerate_velocities += report.degenerate_velocities;
    }
}

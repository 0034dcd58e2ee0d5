/*
 * Simulation Module
 *
 * Owns the flock, the containment bounds and every piece of mutable global
 * state (color mode, rainbow hue, changeup timer, speed cap). Commands and
 * the spawner mutate it between steps; `step` advances it by one tick.
 */

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bounds::Bounds;
use crate::color::{self, ColorMode, Role};
use crate::command::Command;
use crate::error::{ConfigError, Result};
use crate::firefly::FireflyId;
use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::physics;
use crate::MIN_SPEED;

#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub color_mode: ColorMode,
    // Shared hue in [0, 1) used by the rainbow mode
    pub rainbow_hue: f32,
    pub rainbow_speed: f32,
    // Seconds until the next leadership changeup
    pub changeup_timer: f32,
    pub changeup_cooldown: f32,
    pub max_speed: f32,
}

impl SimState {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            color_mode: ColorMode::Leader,
            rainbow_hue: 0.0,
            rainbow_speed: params.rainbow_speed,
            changeup_timer: params.changeup_cooldown,
            changeup_cooldown: params.changeup_cooldown,
            max_speed: params.max_speed,
        }
    }
}

/// What happened during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Number of followers picked, when a changeup ran this step.
    pub changeup: Option<usize>,
    /// Fireflies whose velocity collapsed to zero and kept their old heading.
    pub degenerate_velocities: usize,
}

pub struct Simulation {
    pub flock: Flock,
    pub bounds: Bounds,
    pub state: SimState,
    pub(crate) rng: StdRng,
}

impl Simulation {
    pub fn new(params: &SimulationParams) -> std::result::Result<Self, ConfigError> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            flock: Flock::new(params.num_leaders, params.max_participants),
            bounds: Bounds::from_params(params)?,
            state: SimState::from_params(params),
            rng,
        })
    }

    // Advance every firefly by `dt` seconds
    pub fn step(&mut self, dt: f32) -> StepReport {
        physics::step(self, dt)
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // Add a firefly with a color chosen for the active mode.
    // The first `num_leaders` fireflies spawned become the leaders.
    pub fn spawn_firefly(&mut self, position: Vec3, velocity: Vec3) -> Result<FireflyId> {
        let is_leader = self.flock.needs_leader();
        let id = self.flock.add_firefly(position, velocity, is_leader)?;

        let role = self.flock.role_of(id).unwrap_or(Role::Free);
        let new_color = color::color_for(self.state.color_mode, role, self.state.rainbow_hue, &mut self.rng);
        if let Some(firefly) = self.flock.get_mut(id) {
            firefly.color = new_color;
        }

        if self.flock.is_full() {
            log::info!("flock reached its capacity of {} fireflies", self.flock.len());
        }
        Ok(id)
    }

    // Select a color mode and recolor every firefly for it
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        if let ColorMode::Rainbow(speed) = mode {
            self.state.rainbow_speed = speed;
        }
        self.state.color_mode = mode;
        self.flock.recolor(mode, self.state.rainbow_hue, &mut self.rng);
    }

    // Set the speed cap; values that are not positive numbers are ignored
    pub fn set_max_speed(&mut self, max_speed: f32) -> bool {
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return false;
        }
        self.state.max_speed = max_speed.max(MIN_SPEED);
        true
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Color(mode) => {
                log::info!("color mode set to {:?}", mode);
                self.set_color_mode(mode);
            }
            Command::Rainbow(speed) => {
                let speed = speed.unwrap_or(self.state.rainbow_speed);
                log::info!("rainbow color mode at {} hue/s", speed);
                self.set_color_mode(ColorMode::Rainbow(speed));
            }
            Command::Speed(max_speed) => {
                if self.set_max_speed(max_speed) {
                    log::info!("max speed set to {}", self.state.max_speed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hue_of;
    use crate::error::FlockError;

    fn seeded() -> Simulation {
        let params = SimulationParams { seed: Some(17), ..Default::default() };
        Simulation::new(&params).unwrap()
    }

    fn fill(sim: &mut Simulation, count: usize) {
        for i in 0..count {
            sim.spawn_firefly(vec3(i as f32, 0.0, 0.0), Vec3::X).unwrap();
        }
    }

    #[test]
    fn rejects_invalid_params() {
        let params = SimulationParams { max_speed: -1.0, ..Default::default() };
        assert!(Simulation::new(&params).is_err());
    }

    #[test]
    fn spawn_assigns_leaders_first() {
        let mut sim = seeded();
        fill(&mut sim, 8);
        let leaders: Vec<bool> = sim.flock.as_slice().iter().map(|f| f.is_leader).collect();
        assert_eq!(leaders, vec![true, true, true, true, true, false, false, false]);
    }

    #[test]
    fn spawn_past_capacity_is_an_error() {
        let params = SimulationParams { max_participants: 6, seed: Some(1), ..Default::default() };
        let mut sim = Simulation::new(&params).unwrap();
        fill(&mut sim, 6);
        assert_eq!(sim.spawn_firefly(Vec3::ZERO, Vec3::X), Err(FlockError::Capacity { max: 6 }));
    }

    #[test]
    fn leader_mode_colors_leaders_by_index() {
        let mut sim = seeded();
        fill(&mut sim, 5);
        for (i, leader) in sim.flock.leaders().iter().enumerate() {
            assert!((hue_of(&leader.color) - i as f32 / 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn rainbow_command_without_speed_keeps_current_speed() {
        let mut sim = seeded();
        sim.apply_command(Command::Rainbow(Some(0.4)));
        sim.apply_command(Command::Color(ColorMode::Random));
        sim.apply_command(Command::Rainbow(None));
        assert_eq!(sim.state.color_mode, ColorMode::Rainbow(0.4));
        assert_eq!(sim.state.rainbow_speed, 0.4);
    }

    #[test]
    fn speed_command_ignores_nonsense() {
        let mut sim = seeded();
        sim.apply_command(Command::Speed(f32::NAN));
        sim.apply_command(Command::Speed(-3.0));
        assert_eq!(sim.state.max_speed, 15.0);
        sim.apply_command(Command::Speed(0.01));
        assert_eq!(sim.state.max_speed, MIN_SPEED);
        sim.apply_command(Command::Speed(22.0));
        assert_eq!(sim.state.max_speed, 22.0);
    }
}

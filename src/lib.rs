/*
 * Firefly Flock - Module Definitions
 *
 * This file defines the module structure for the firefly flock.
 * The simulation core (bounds, flock, steering, physics, color policy)
 * has no rendering dependencies beyond nannou's vector and color types;
 * the viewer modules (app, camera, input, renderer, ui) drive it from a window.
 */

// Re-export key components for easier access
pub use bounds::Bounds;
pub use color::ColorMode;
pub use command::Command;
pub use error::{ConfigError, FlockError, Result};
pub use firefly::{Firefly, FireflyId};
pub use flock::Flock;
pub use params::SimulationParams;
pub use simulation::{SimState, Simulation, StepReport};
pub use spawn::Spawner;

// Core modules
pub mod bounds;
pub mod color;
pub mod command;
pub mod error;
pub mod firefly;
pub mod flock;
pub mod params;
pub mod physics;
pub mod simulation;
pub mod spawn;
pub mod steering;

// Viewer modules
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;

// Flocking constants. These are fixed design values, not runtime tunables.

/// Fireflies closer than this are considered neighbors.
pub const CHECK_RANGE: f32 = 20.0;
/// Neighbors closer than this push the firefly away.
pub const AVOID_RADIUS: f32 = 5.0;
/// Lower speed clamp applied after every integration.
pub const MIN_SPEED: f32 = 0.1;

pub const SEPARATION_WEIGHT: f32 = 0.4;
pub const ALIGNMENT_WEIGHT: f32 = 0.3;
pub const COHESION_WEIGHT: f32 = 1.0;

/// Strength of the random component in a leader's wander.
pub const LEADER_WANDER: f32 = 100.0;

/// Saturation of a follower's color when it is first assigned a leader.
pub const ASSIGNED_SATURATION: f32 = 0.7;
/// Saturation of a led follower's color when the leader color mode is (re)selected.
pub const RECOLOR_SATURATION: f32 = 0.8;

/// Bounds on how many followers a single changeup touches.
pub const CHANGEUP_MIN: usize = 3;
pub const CHANGEUP_MAX: usize = 15;

// Rendering constants
pub const FIREFLY_SIZE: f32 = 4.0;

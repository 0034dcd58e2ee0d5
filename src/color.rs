/*
 * Color Policy Module
 *
 * Derives a firefly's display color from the active color mode and its
 * place in the flock. Pure functions only: the flock and the simulation
 * decide when to call them.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::{ASSIGNED_SATURATION, RECOLOR_SATURATION};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorMode {
    /// Leaders get evenly spaced hues, led followers a paler copy of their leader's.
    #[default]
    Leader,
    /// Every firefly gets its own random hue.
    Random,
    /// Every firefly shares one hue in [0, 1).
    FixedHue(f32),
    /// Every firefly shares a hue that advances by `speed` per second.
    Rainbow(f32),
}

/// Where a firefly sits in the flock, as far as coloring is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The `index`-th leader of `num_leaders`.
    Leader { index: usize, num_leaders: usize },
    /// A follower currently led by the `leader_index`-th leader.
    Led { leader_index: usize, num_leaders: usize },
    /// A follower with no leader.
    Free,
}

/// Color for a firefly under `mode`. `rainbow_hue` is only read in rainbow mode.
pub fn color_for<R: Rng + ?Sized>(mode: ColorMode, role: Role, rainbow_hue: f32, rng: &mut R) -> Hsv {
    match mode {
        ColorMode::Leader => match role {
            Role::Leader { index, num_leaders } => hsv(leader_hue(index, num_leaders), 1.0, 1.0),
            Role::Led { leader_index, num_leaders } => {
                hsv(leader_hue(leader_index, num_leaders), RECOLOR_SATURATION, 1.0)
            }
            Role::Free => random_color(rng),
        },
        ColorMode::Random => random_color(rng),
        ColorMode::FixedHue(hue) => hsv(wrap_hue(hue), 1.0, 1.0),
        ColorMode::Rainbow(_) => rainbow_color(rainbow_hue),
    }
}

/// The paler variant a follower takes on when it is assigned to `leader`.
pub fn assigned_color(leader: &Hsv) -> Hsv {
    hsv(hue_of(leader), ASSIGNED_SATURATION, 1.0)
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Hsv {
    hsv(rng.gen::<f32>(), 1.0, 1.0)
}

pub fn rainbow_color(rainbow_hue: f32) -> Hsv {
    hsv(wrap_hue(rainbow_hue), 1.0, 1.0)
}

#[inline]
pub fn leader_hue(index: usize, num_leaders: usize) -> f32 {
    index as f32 / num_leaders.max(1) as f32
}

/// Hue of a color in [0, 1).
pub fn hue_of(color: &Hsv) -> f32 {
    wrap_hue(color.hue.to_positive_degrees() / 360.0)
}

/// Fold any hue into [0, 1).
pub fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

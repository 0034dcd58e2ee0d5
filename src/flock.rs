/*
 * Flock Module
 *
 * The flock owns every firefly in insertion order. The first `num_leaders`
 * entries are always the leaders and everything after them is a follower;
 * changeups and the color policy rely on that ordering, so fireflies are
 * never removed or reordered.
 *
 * Neighbor queries are a plain scan over all fireflies. At the intended
 * scale (a few dozen fireflies) that is cheaper than maintaining an index.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::color::{self, ColorMode, Role};
use crate::error::{FlockError, Result};
use crate::firefly::{Firefly, FireflyId};
use crate::{CHANGEUP_MAX, CHANGEUP_MIN};

#[derive(Debug, Clone)]
pub struct Flock {
    fireflies: Vec<Firefly>,
    num_leaders: usize,
    max_participants: usize,
}

impl Flock {
    pub fn new(num_leaders: usize, max_participants: usize) -> Self {
        Self {
            fireflies: Vec::with_capacity(max_participants),
            num_leaders,
            max_participants,
        }
    }

    // Append a firefly. Leaders must fill the first `num_leaders` slots.
    pub fn add_firefly(&mut self, position: Vec3, velocity: Vec3, is_leader: bool) -> Result<FireflyId> {
        let index = self.fireflies.len();
        if index >= self.max_participants {
            return Err(FlockError::Capacity { max: self.max_participants });
        }
        if is_leader != (index < self.num_leaders) {
            return Err(FlockError::LeaderOutOfOrder { index });
        }

        self.fireflies.push(Firefly::new(position, velocity, is_leader));
        Ok(FireflyId(index))
    }

    /// Whether the next firefly added must be a leader.
    pub fn needs_leader(&self) -> bool {
        self.fireflies.len() < self.num_leaders
    }

    pub fn len(&self) -> usize {
        self.fireflies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireflies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.fireflies.len() >= self.max_participants
    }

    pub fn num_leaders(&self) -> usize {
        self.num_leaders
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    pub fn get(&self, id: FireflyId) -> Option<&Firefly> {
        self.fireflies.get(id.index())
    }

    pub fn get_mut(&mut self, id: FireflyId) -> Option<&mut Firefly> {
        self.fireflies.get_mut(id.index())
    }

    pub fn as_slice(&self) -> &[Firefly] {
        &self.fireflies
    }

    pub fn iter(&self) -> impl Iterator<Item = (FireflyId, &Firefly)> + '_ {
        self.fireflies.iter().enumerate().map(|(i, firefly)| (FireflyId(i), firefly))
    }

    pub fn leaders(&self) -> &[Firefly] {
        &self.fireflies[..self.num_leaders.min(self.fireflies.len())]
    }

    pub fn followers(&self) -> &[Firefly] {
        &self.fireflies[self.num_leaders.min(self.fireflies.len())..]
    }

    // Number of followers currently assigned to a leader
    pub fn led_count(&self) -> usize {
        self.followers().iter().filter(|f| f.led_by.is_some()).count()
    }

    pub fn role_of(&self, id: FireflyId) -> Option<Role> {
        let firefly = self.get(id)?;
        let num_leaders = self.num_leaders;
        Some(if firefly.is_leader {
            Role::Leader { index: id.index(), num_leaders }
        } else if let Some(leader) = firefly.led_by {
            Role::Led { leader_index: leader.index(), num_leaders }
        } else {
            Role::Free
        })
    }

    // Point a follower at a leader, or release it with `None`.
    // A led follower takes a paler copy of its leader's color; a released one
    // goes back to the mode's own color. Rainbow repaints every tick instead.
    pub fn assign_leader<R: Rng + ?Sized>(
        &mut self,
        follower: FireflyId,
        leader: Option<FireflyId>,
        mode: ColorMode,
        rng: &mut R,
    ) -> Result<()> {
        let firefly = self.get(follower).ok_or(FlockError::UnknownFirefly(follower))?;
        if firefly.is_leader {
            return Err(FlockError::NotAFollower(follower));
        }
        if let Some(leader) = leader {
            let candidate = self.get(leader).ok_or(FlockError::UnknownFirefly(leader))?;
            if !candidate.is_leader {
                return Err(FlockError::NotALeader(leader));
            }
        }

        self.set_leader(follower.index(), leader, mode, rng);
        Ok(())
    }

    fn set_leader<R: Rng + ?Sized>(&mut self, index: usize, leader: Option<FireflyId>, mode: ColorMode, rng: &mut R) {
        let new_color = match (mode, leader) {
            (ColorMode::Rainbow(_), _) => None,
            (_, Some(leader)) => Some(color::assigned_color(&self.fireflies[leader.index()].color)),
            (_, None) => Some(color::color_for(mode, Role::Free, 0.0, rng)),
        };

        let firefly = &mut self.fireflies[index];
        firefly.led_by = leader;
        if let Some(new_color) = new_color {
            firefly.color = new_color;
        }
    }

    /// Shuffle leadership among a random handful of followers. Each pick
    /// toggles: a led follower is released, a free one gets a random leader.
    /// Picks are independent, so one follower may be toggled more than once.
    /// Returns the number of picks made.
    pub fn perform_changeup<R: Rng + ?Sized>(&mut self, mode: ColorMode, rng: &mut R) -> usize {
        let eligible = self.fireflies.len().saturating_sub(self.num_leaders);
        if eligible == 0 || self.num_leaders == 0 {
            return 0;
        }

        let picks = rng.gen_range(CHANGEUP_MIN.min(eligible)..=CHANGEUP_MAX.min(eligible));
        for _ in 0..picks {
            let index = self.num_leaders + rng.gen_range(0..eligible);
            let leader = if self.fireflies[index].led_by.is_some() {
                None
            } else {
                Some(FireflyId(rng.gen_range(0..self.num_leaders)))
            };
            log::debug!("changeup: firefly #{} now led by {:?}", index, leader);
            self.set_leader(index, leader, mode, rng);
        }

        picks
    }

    // Re-derive every firefly's color for a newly selected mode
    pub fn recolor<R: Rng + ?Sized>(&mut self, mode: ColorMode, rainbow_hue: f32, rng: &mut R) {
        for index in 0..self.fireflies.len() {
            if let Some(role) = self.role_of(FireflyId(index)) {
                self.fireflies[index].color = color::color_for(mode, role, rainbow_hue, rng);
            }
        }
    }
}

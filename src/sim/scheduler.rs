//! Powerup scheduler: decides when and which powerup appears
//!
//! Spawn probabilities start uniform. Each time a powerup is drawn its
//! probability is multiplied by the decay factor and the removed mass is
//! shared evenly among the others, so recently seen powerups get rarer
//! without ever dropping to zero.

use glam::Vec2;
use rand::Rng;

use super::powerup::{Bodies, Powerup, PowerupKind, PowerupStatus};
use super::state::GameEvent;
use crate::settings::SchedulerTuning;

#[derive(Debug, Clone)]
pub struct PowerupScheduler {
    catalogue: Vec<Powerup>,
    probabilities: Vec<f32>,
    decay: f32,
    /// Index of the powerup in play (spawned or active)
    current: Option<usize>,
    ticks_since_last: u32,
    next_interval: u32,
    average_interval: u32,
    interval_variation: u32,
    spawn_min: Vec2,
    spawn_max: Vec2,
    /// Where an active powerup's icon sits
    timer_pos: Vec2,
    /// Where its countdown is shown
    countdown_pos: Vec2,
    enabled: bool,
}

impl PowerupScheduler {
    pub fn new<R: Rng + ?Sized>(
        catalogue: Vec<Powerup>,
        tuning: &SchedulerTuning,
        field: Vec2,
        rng: &mut R,
    ) -> Self {
        let n = catalogue.len();
        let probabilities = if n == 0 { Vec::new() } else { vec![1.0 / n as f32; n] };

        let mut scheduler = Self {
            catalogue,
            probabilities,
            decay: tuning.probability_decay,
            current: None,
            ticks_since_last: 0,
            next_interval: tuning.average_interval,
            average_interval: tuning.average_interval,
            interval_variation: tuning.interval_variation,
            spawn_min: field * tuning.spawn_min,
            spawn_max: field * tuning.spawn_max,
            timer_pos: Vec2::new(field.x / 2.0, field.y / 12.0),
            countdown_pos: Vec2::new(field.x / 2.0, field.y / 6.0),
            enabled: tuning.enabled,
        };
        scheduler.next_interval = scheduler.draw_interval(rng);
        scheduler
    }

    /// Scheduler over the full catalogue of powerup kinds
    pub fn standard<R: Rng + ?Sized>(tuning: &SchedulerTuning, field: Vec2, rng: &mut R) -> Self {
        let catalogue = PowerupKind::ALL
            .iter()
            .map(|&kind| Powerup::new(kind, tuning.powerup_radius))
            .collect();
        Self::new(catalogue, tuning, field, rng)
    }

    /// One tick: count toward the next spawn, or run the powerup in play
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut Bodies<'_>,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.enabled {
            return;
        }

        match self.current {
            None => {
                if self.ticks_since_last >= self.next_interval && !self.catalogue.is_empty() {
                    self.spawn(rng, events);
                } else {
                    self.ticks_since_last += 1;
                }
            }
            Some(index) => {
                if self.catalogue[index].update(bodies, events) == PowerupStatus::Finished {
                    self.current = None;
                }
            }
        }
    }

    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        let index = self.pick_index(rng.random());
        self.reduce_probability(index);

        let pos = Vec2::new(
            sample(rng, self.spawn_min.x, self.spawn_max.x).floor(),
            sample(rng, self.spawn_min.y, self.spawn_max.y).floor(),
        );
        let powerup = &mut self.catalogue[index];
        powerup.pos = pos;
        let kind = powerup.kind;

        self.current = Some(index);
        self.ticks_since_last = 0;
        self.next_interval = self.draw_interval(rng);

        log::debug!(
            "Spawned {:?} at ({}, {}), next interval {}",
            kind,
            pos.x,
            pos.y,
            self.next_interval
        );
        events.push(GameEvent::PowerupSpawned { kind });
    }

    /// Weighted pick: the first index whose cumulative probability exceeds `r`.
    /// Falls back to the last index if rounding leaves `r` past the total.
    pub fn pick_index(&self, r: f32) -> usize {
        let mut cumulative = 0.0;
        for (i, p) in self.probabilities.iter().enumerate() {
            cumulative += p;
            if r < cumulative {
                return i;
            }
        }
        self.probabilities.len().saturating_sub(1)
    }

    /// Decay the chosen probability and spread what it lost over the rest
    pub fn reduce_probability(&mut self, index: usize) {
        let n = self.probabilities.len();
        // Nothing to redistribute to
        if n < 2 || index >= n {
            return;
        }

        let lost = self.probabilities[index] * (1.0 - self.decay);
        let share = lost / (n - 1) as f32;

        self.probabilities[index] *= self.decay;
        for (i, p) in self.probabilities.iter_mut().enumerate() {
            if i != index {
                *p += share;
            }
        }
    }

    fn draw_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let variation = i64::from(self.interval_variation);
        if variation == 0 {
            return self.average_interval;
        }
        let offset = rng.random_range(-variation..variation);
        (i64::from(self.average_interval) + offset).max(0) as u32
    }

    /// The powerup in play, spawned or active
    pub fn current(&self) -> Option<&Powerup> {
        self.current.map(|i| &self.catalogue[i])
    }

    /// The spawned powerup if it is still waiting to be picked up
    pub fn pickup_pending(&self) -> Option<&Powerup> {
        self.current().filter(|p| !p.active)
    }

    /// Activate the spawned powerup (the ball touched it)
    pub fn enable_current(&mut self, bodies: &mut Bodies<'_>, events: &mut Vec<GameEvent>) -> bool {
        let timer_pos = self.timer_pos;
        match self.current {
            Some(index) => self.catalogue[index].enable(bodies, timer_pos, events),
            None => false,
        }
    }

    /// Drop the powerup in play (reverting it if active) and restart the countdown
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut Bodies<'_>,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(index) = self.current.take() {
            self.catalogue[index].disable(bodies, events);
        }
        self.ticks_since_last = 0;
        self.next_interval = self.draw_interval(rng);
    }

    pub fn probabilities(&self) -> &[f32] {
        &self.probabilities
    }

    pub fn catalogue(&self) -> &[Powerup] {
        &self.catalogue
    }

    pub fn countdown_pos(&self) -> Vec2 {
        self.countdown_pos
    }

    pub fn next_interval(&self) -> u32 {
        self.next_interval
    }
}

/// Uniform sample in [lo, hi), or `lo` for an empty range
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

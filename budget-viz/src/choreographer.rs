//! Timed ball and particle feedback for triggers.
//!
//! The choreographer is a small state machine running on the virtual clock
//! handed to [`Choreographer::advance`]:
//!
//! ```text
//! Idle --income--> SpawningBalls --last burst--> AwaitingSettle --settle--> Cleanup --> Idle
//! Idle --expense--> Idle (retarget now, eating pulse)
//! ```
//!
//! It never touches the arc state directly. Every call returns [`Cues`]
//! telling the owner when to retarget and whether the mouth is eating.
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;

use embedded_graphics::geometry::Point;
#[allow(unused_imports)]
use micromath::F32Ext;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::AnimatorConfig;
use crate::types::{Ball, ExplosionParticle, Trigger, TriggerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Phase {
    Idle,
    SpawningBalls,
    AwaitingSettle,
    Cleanup,
}

/// Instructions for the owner of the arc state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cues {
    /// Recompute targets from the latest totals and start animating.
    pub retarget: bool,
    /// New value of the eating flag, if it changed.
    pub eating: Option<bool>,
}

impl Cues {
    fn merge(&mut self, later: Cues) {
        self.retarget |= later.retarget;
        if later.eating.is_some() {
            self.eating = later.eating;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started(Cues),
    /// Waiting behind an in-flight sequence.
    Queued,
    /// Queue full; the trigger was dropped.
    Overflow,
    /// Non-positive or non-finite amount.
    Rejected,
}

#[derive(Debug, Clone, Copy)]
struct PendingBurst {
    ball_id: u32,
    due: Duration,
}

/// Number of balls an income of `amount` produces.
pub fn ball_count(amount: f32, config: &AnimatorConfig) -> usize {
    if !(amount.is_finite() && amount > 0.0) {
        return 0;
    }
    let count = (amount / config.amount_per_ball).ceil() as usize;
    count.clamp(1, config.max_balls)
}

pub struct Choreographer {
    config: AnimatorConfig,
    phase: Phase,
    balls: Vec<Ball>,
    particles: Vec<ExplosionParticle>,
    pending_bursts: Vec<PendingBurst>,
    settle_at: Option<Duration>,
    eating_until: Option<Duration>,
    queue: VecDeque<Trigger>,
    rng: SmallRng,
    next_ball_id: u32,
    next_particle_id: u32,
}

impl Choreographer {
    pub fn new(config: &AnimatorConfig) -> Self {
        Self {
            config: config.clone(),
            phase: Phase::Idle,
            balls: Vec::with_capacity(config.max_balls),
            particles: Vec::new(),
            pending_bursts: Vec::with_capacity(config.max_balls),
            settle_at: None,
            eating_until: None,
            queue: VecDeque::with_capacity(config.trigger_queue_capacity),
            rng: SmallRng::seed_from_u64(config.particle_seed),
            next_ball_id: 0,
            next_particle_id: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn particles(&self) -> &[ExplosionParticle] {
        &self.particles
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Starts `trigger` at `now`, or queues it behind the running sequence.
    pub fn submit(&mut self, trigger: Trigger, now: Duration) -> SubmitOutcome {
        if !trigger.has_valid_amount() {
            diag_warn!("choreographer rejected {} trigger with amount {}", trigger.kind, trigger.amount);
            return SubmitOutcome::Rejected;
        }
        if !self.is_idle() {
            if self.queue.len() >= self.config.trigger_queue_capacity {
                diag_warn!("trigger queue full, dropping {} of {}", trigger.kind, trigger.amount);
                return SubmitOutcome::Overflow;
            }
            self.queue.push_back(trigger);
            return SubmitOutcome::Queued;
        }
        SubmitOutcome::Started(self.start(trigger, now))
    }

    fn start(&mut self, trigger: Trigger, now: Duration) -> Cues {
        match trigger.kind {
            TriggerKind::Income => self.start_income(trigger.amount, now),
            TriggerKind::Expense => {
                self.eating_until = Some(now + self.config.eating_pulse);
                Cues {
                    retarget: true,
                    eating: Some(true),
                }
            }
        }
    }

    fn start_income(&mut self, amount: f32, now: Duration) -> Cues {
        let count = ball_count(amount, &self.config);
        diag_info!("income {} spawns {} balls", amount, count as u32);

        // The income sequence owns the mouth until cleanup.
        self.eating_until = None;
        self.balls.clear();
        self.pending_bursts.clear();
        for index in 0..count {
            let id = self.next_ball_id;
            self.next_ball_id = self.next_ball_id.wrapping_add(1);
            let scheduled_delay = self.config.ball_stagger * index as u32;
            self.balls.push(Ball {
                id,
                scheduled_delay,
                spawned_at: now,
            });
            self.pending_bursts.push(PendingBurst {
                ball_id: id,
                due: now + scheduled_delay + self.config.ball_travel,
            });
        }
        self.settle_at = Some(now + self.config.last_landing(count) + self.config.settle_delay);
        self.phase = Phase::SpawningBalls;

        Cues {
            retarget: false,
            eating: Some(true),
        }
    }

    /// Fires every continuation due at or before `now`, in time order.
    /// Particles spawn at `landing`, relative to the arc centre.
    pub fn advance(&mut self, now: Duration, landing: Point) -> Cues {
        let mut cues = Cues::default();
        while let Some(at) = self.next_due(now) {
            cues.merge(self.fire(at, landing));
        }
        let lifetime = self.config.particle_lifetime;
        self.particles.retain(|particle| !particle.is_expired(now, lifetime));
        cues
    }

    fn next_due(&self, now: Duration) -> Option<Duration> {
        self.pending_bursts
            .iter()
            .map(|burst| burst.due)
            .chain(self.settle_at)
            .chain(self.eating_until)
            .filter(|due| *due <= now)
            .min()
    }

    fn fire(&mut self, at: Duration, landing: Point) -> Cues {
        let mut cues = Cues::default();

        let mut index = 0;
        while index < self.pending_bursts.len() {
            if self.pending_bursts[index].due <= at {
                let burst = self.pending_bursts.remove(index);
                self.spawn_burst(burst, landing);
            } else {
                index += 1;
            }
        }
        if self.phase == Phase::SpawningBalls && self.pending_bursts.is_empty() {
            self.phase = Phase::AwaitingSettle;
        }

        if self.phase == Phase::AwaitingSettle && self.settle_at.is_some_and(|due| due <= at) {
            self.settle_at = None;
            self.phase = Phase::Cleanup;
            cues.merge(self.cleanup(at));
        }

        if self.eating_until.is_some_and(|due| due <= at) {
            self.eating_until = None;
            cues.merge(Cues {
                retarget: false,
                eating: Some(false),
            });
        }

        cues
    }

    fn cleanup(&mut self, at: Duration) -> Cues {
        self.balls.clear();
        self.phase = Phase::Idle;
        let mut cues = Cues {
            retarget: true,
            eating: Some(false),
        };
        if let Some(next) = self.queue.pop_front() {
            cues.merge(self.start(next, at));
        }
        cues
    }

    fn spawn_burst(&mut self, burst: PendingBurst, landing: Point) {
        let size = self.config.burst_size.max(1);
        let step = 360.0 / size as f32;
        for j in 0..size {
            let id = self.next_particle_id;
            self.next_particle_id = self.next_particle_id.wrapping_add(1);
            self.particles.push(ExplosionParticle {
                id,
                ball_id: burst.ball_id,
                angle: j as f32 * step,
                speed: self.rng.random_range(2.0..4.0),
                origin: landing,
                born_at: burst.due,
            });
        }
    }

    /// Drops every pending continuation, queued trigger and live entity.
    pub fn cancel_all(&mut self) {
        self.phase = Phase::Idle;
        self.balls.clear();
        self.particles.clear();
        self.pending_bursts.clear();
        self.settle_at = None;
        self.eating_until = None;
        self.queue.clear();
    }
}

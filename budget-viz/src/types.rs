use core::fmt;
use core::time::Duration;

use embedded_graphics::geometry::Point;

/// Income and expense totals owned by the host. Read-only to the animator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetTotals {
    pub total_income: f32,
    pub total_expense: f32,
}

impl BudgetTotals {
    pub const fn new(total_income: f32, total_expense: f32) -> Self {
        Self {
            total_income,
            total_expense,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.total_income - self.total_expense
    }
}

/// Smoothed quantities plus their targets, advanced once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub current_fill_percent: f32,
    pub current_radius: f32,
    pub target_fill_percent: f32,
    pub target_radius: f32,
    pub is_animating: bool,
    pub is_eating: bool,
}

impl AnimationState {
    /// A resting state: current equals target, nothing in motion.
    pub const fn settled(fill_percent: f32, radius: f32) -> Self {
        Self {
            current_fill_percent: fill_percent,
            current_radius: radius,
            target_fill_percent: fill_percent,
            target_radius: radius,
            is_animating: false,
            is_eating: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum TriggerKind {
    Income,
    Expense,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Income => f.write_str("income"),
            TriggerKind::Expense => f.write_str("expense"),
        }
    }
}

/// A discrete "income/expense added" event from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trigger {
    pub kind: TriggerKind,
    pub amount: f32,
    /// Host timestamp in milliseconds.
    pub occurred_at: Option<u64>,
    /// Caller-supplied identity; wins over `occurred_at` when present.
    pub id: Option<u64>,
}

impl Trigger {
    pub const fn income(amount: f32, occurred_at: u64) -> Self {
        Self {
            kind: TriggerKind::Income,
            amount,
            occurred_at: Some(occurred_at),
            id: None,
        }
    }

    pub const fn expense(amount: f32, occurred_at: u64) -> Self {
        Self {
            kind: TriggerKind::Expense,
            amount,
            occurred_at: Some(occurred_at),
            id: None,
        }
    }

    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}

/// A ball travelling into the arc's mouth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub id: u32,
    /// Delay after `spawned_at` before the ball starts moving.
    pub scheduled_delay: Duration,
    pub spawned_at: Duration,
}

impl Ball {
    /// Travel progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Duration, travel: Duration) -> f32 {
        let start = self.spawned_at + self.scheduled_delay;
        if now <= start {
            return 0.0;
        }
        if travel.is_zero() {
            return 1.0;
        }
        ((now - start).as_secs_f32() / travel.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// One fragment of the burst spawned when a ball lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParticle {
    pub id: u32,
    pub ball_id: u32,
    /// Direction in degrees, clockwise from the positive x axis.
    pub angle: f32,
    pub speed: f32,
    /// Landing point of the ball, relative to the arc centre.
    pub origin: Point,
    pub born_at: Duration,
}

impl ExplosionParticle {
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.born_at)
    }

    pub fn is_expired(&self, now: Duration, lifetime: Duration) -> bool {
        self.age(now) >= lifetime
    }
}

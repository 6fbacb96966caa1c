#![no_std]
//! Remaining-budget arc animation for embedded-graphics targets.
//!
//! The [`BudgetArcAnimator`] eats expenses and grows with income: it smooths a
//! filled circular sector toward the fill percentage derived from
//! [`BudgetTotals`], deduplicates [`Trigger`]s coming from the host, and
//! choreographs balls and particle bursts on a virtual clock the host advances
//! once per frame.
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "logging")]
use defmt_rtt as _;

macro_rules! diag_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::defmt::info!($($arg)*);
        #[cfg(feature = "std")]
        ::std::println!($($arg)*);
    }};
}

macro_rules! diag_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        ::defmt::warn!($($arg)*);
        #[cfg(feature = "std")]
        ::std::println!($($arg)*);
    }};
}

pub mod arc_value_animator;
pub mod budget_arc_animator;
pub mod budget_metrics;
pub mod choreographer;
pub mod config;
pub mod ledger;
pub mod palette;
pub mod renderer;
pub mod trigger_deduplicator;
pub mod types;

pub use arc_value_animator::ArcValueAnimator;
pub use budget_arc_animator::{AnimatorStatus, BudgetArcAnimator, TriggerOutcome};
pub use config::{AnimatorConfig, ConfigError};
pub use ledger::{BudgetLedger, BudgetSummary, LoanDirection, Transaction, TransactionKind};
pub use palette::Palette;
pub use renderer::{Frame, PacManRenderer, Renderer};
pub use types::{AnimationState, Ball, BudgetTotals, ExplosionParticle, Trigger, TriggerKind};

use core::time::Duration;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888};

use crate::arc_value_animator::ArcValueAnimator;
use crate::budget_metrics::{sanitize, targets};
use crate::choreographer::{Choreographer, Cues, Phase, SubmitOutcome};
use crate::config::{AnimatorConfig, ConfigError, MOUTH_PHASE_STEP};
use crate::renderer::{landing_point, Frame, Renderer};
use crate::trigger_deduplicator::TriggerDeduplicator;
use crate::types::{AnimationState, Ball, BudgetTotals, ExplosionParticle, Trigger};

const LOG_INTERVAL_FRAMES: u32 = 200;

/// Flags a parent UI may react to, e.g. to disable form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimatorStatus {
    pub is_animating: bool,
    pub is_eating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum TriggerOutcome {
    Started,
    /// Accepted, waiting behind the running choreography.
    Queued,
    /// Same identity as the last processed trigger.
    Duplicate,
    /// Non-positive or non-finite amount.
    Rejected,
    /// Trigger queue full.
    Overflow,
    /// No income has been reported yet.
    NotReady,
    Disposed,
}

/// The remaining-budget arc: totals and triggers in, one drawable state per
/// frame out.
///
/// The host owns the clock. Call [`BudgetArcAnimator::advance`] (or
/// [`BudgetArcAnimator::update`], which also draws) once per display refresh
/// with the elapsed time; every delayed continuation of the choreography runs
/// from there, so tests drive it with a virtual clock.
///
/// Report new totals and the trigger for the same form submission within the
/// same frame: totals reported while idle retarget the arc on the next
/// `advance`, totals reported during a choreography wait for its settle step.
pub struct BudgetArcAnimator {
    config: AnimatorConfig,
    engine: ArcValueAnimator,
    dedup: TriggerDeduplicator,
    choreographer: Choreographer,
    state: AnimationState,
    totals: BudgetTotals,
    totals_dirty: bool,
    initialized: bool,
    disposed: bool,
    now: Duration,
    mouth_phase: f32,
    reported: AnimatorStatus,
    log_counter: u32,
}

impl BudgetArcAnimator {
    pub fn new(config: AnimatorConfig, totals: BudgetTotals) -> Result<Self, ConfigError> {
        config.validate()?;

        let totals = sanitize(totals);
        let initialized = totals.total_income > 0.0;
        let (fill_percent, radius) = targets(&totals, &config);
        diag_info!(
            "BudgetArcAnimator::new income {} expense {} fill {} radius {}",
            totals.total_income,
            totals.total_expense,
            fill_percent,
            radius
        );

        Ok(Self {
            engine: ArcValueAnimator::from_config(&config),
            dedup: TriggerDeduplicator::new(),
            choreographer: Choreographer::new(&config),
            state: AnimationState::settled(fill_percent, radius),
            totals,
            totals_dirty: false,
            initialized,
            disposed: false,
            now: Duration::ZERO,
            mouth_phase: 0.0,
            reported: AnimatorStatus::default(),
            log_counter: 0,
            config,
        })
    }

    /// Reports the host's latest totals.
    ///
    /// The first totals with a positive income place the arc without
    /// animation. Afterwards the new targets are staged until the next idle
    /// frame or the end of the running choreography.
    pub fn update_totals(&mut self, totals: BudgetTotals) {
        if self.disposed {
            return;
        }
        self.totals = sanitize(totals);

        if !self.initialized {
            if self.totals.total_income > 0.0 {
                let (fill_percent, radius) = targets(&self.totals, &self.config);
                self.state.current_fill_percent = fill_percent;
                self.state.current_radius = radius;
                self.state.target_fill_percent = fill_percent;
                self.state.target_radius = radius;
                self.initialized = true;
            }
            return;
        }
        self.totals_dirty = true;
    }

    /// Hands a trigger to the deduplicator and, if new, to the choreographer.
    pub fn submit_trigger(&mut self, trigger: Trigger) -> TriggerOutcome {
        if self.disposed {
            return TriggerOutcome::Disposed;
        }
        if !self.initialized {
            return TriggerOutcome::NotReady;
        }
        if !trigger.has_valid_amount() {
            diag_warn!("ignoring {} trigger with amount {}", trigger.kind, trigger.amount);
            return TriggerOutcome::Rejected;
        }
        if self.dedup.admit(&trigger).is_none() {
            return TriggerOutcome::Duplicate;
        }

        match self.choreographer.submit(trigger, self.now) {
            SubmitOutcome::Started(cues) => {
                self.apply(cues);
                TriggerOutcome::Started
            }
            SubmitOutcome::Queued => TriggerOutcome::Queued,
            SubmitOutcome::Overflow => TriggerOutcome::Overflow,
            SubmitOutcome::Rejected => TriggerOutcome::Rejected,
        }
    }

    /// Advances the virtual clock by `dt` and runs one frame: due
    /// continuations, staged retargets, one smoothing step, mouth phase.
    ///
    /// Returns the new status when `is_animating` or `is_eating` changed
    /// since the last report.
    pub fn advance(&mut self, dt: Duration) -> Option<AnimatorStatus> {
        if self.disposed {
            return None;
        }
        self.now += dt;

        let cues = self
            .choreographer
            .advance(self.now, landing_point(self.state.current_radius));
        self.apply(cues);
        if self.totals_dirty && self.choreographer.is_idle() {
            self.retarget();
        }

        self.engine.step(&mut self.state);
        if self.state.is_eating {
            self.mouth_phase += MOUTH_PHASE_STEP;
        }

        self.log_counter = self.log_counter.wrapping_add(1);
        if self.log_counter >= LOG_INTERVAL_FRAMES {
            diag_info!(
                "arc fill {} -> {}, radius {} -> {}",
                self.state.current_fill_percent,
                self.state.target_fill_percent,
                self.state.current_radius,
                self.state.target_radius
            );
            self.log_counter = 0;
        }

        let status = self.status();
        if status != self.reported {
            self.reported = status;
            return Some(status);
        }
        None
    }

    /// Draws the current frame. Draws nothing once disposed.
    pub fn draw<D, R>(&self, fb: &mut D, renderer: &R) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        R: Renderer,
    {
        if self.disposed {
            return Ok(());
        }
        renderer.draw(fb, &self.frame())
    }

    /// [`advance`](Self::advance) followed by [`draw`](Self::draw).
    pub fn update<D, R>(
        &mut self,
        fb: &mut D,
        renderer: &R,
        dt: Duration,
    ) -> Result<Option<AnimatorStatus>, D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
        R: Renderer,
    {
        let status = self.advance(dt);
        self.draw(fb, renderer)?;
        Ok(status)
    }

    /// Tears the animator down. Pending continuations and queued triggers
    /// are dropped and every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.choreographer.cancel_all();
        self.totals_dirty = false;
        self.disposed = true;
        diag_info!("BudgetArcAnimator disposed");
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            state: &self.state,
            mouth_phase: self.mouth_phase,
            balls: self.choreographer.balls(),
            particles: self.choreographer.particles(),
            now: self.now,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn totals(&self) -> BudgetTotals {
        self.totals
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn status(&self) -> AnimatorStatus {
        AnimatorStatus {
            is_animating: self.state.is_animating,
            is_eating: self.state.is_eating,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn is_eating(&self) -> bool {
        self.state.is_eating
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn phase(&self) -> Phase {
        self.choreographer.phase()
    }

    pub fn balls(&self) -> &[Ball] {
        self.choreographer.balls()
    }

    pub fn particles(&self) -> &[ExplosionParticle] {
        self.choreographer.particles()
    }

    pub fn queued_triggers(&self) -> usize {
        self.choreographer.queued()
    }

    pub fn mouth_phase(&self) -> f32 {
        self.mouth_phase
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    fn apply(&mut self, cues: Cues) {
        if cues.retarget {
            self.retarget();
        }
        if let Some(eating) = cues.eating {
            self.state.is_eating = eating;
        }
    }

    fn retarget(&mut self) {
        let (fill_percent, radius) = targets(&self.totals, &self.config);
        self.engine.set_targets(&mut self.state, fill_percent, radius);
        self.totals_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const FRAME: Duration = Duration::from_millis(16);

    fn animator(income: f32, expense: f32) -> BudgetArcAnimator {
        BudgetArcAnimator::new(AnimatorConfig::default(), BudgetTotals::new(income, expense))
            .unwrap()
    }

    #[test]
    fn initial_totals_place_the_arc_without_animation() {
        let animator = animator(1000.0, 300.0);
        assert_abs_diff_eq!(animator.state().current_fill_percent, 70.0, epsilon = 1e-4);
        assert_eq!(animator.state().current_radius, 100.0);
        assert!(!animator.is_animating());
        assert!(animator.is_initialized());
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = AnimatorConfig {
            max_balls: 0,
            ..AnimatorConfig::default()
        };
        assert!(BudgetArcAnimator::new(config, BudgetTotals::default()).is_err());
    }

    #[test]
    fn first_income_initialises_in_place() {
        let mut animator = animator(0.0, 0.0);
        assert!(!animator.is_initialized());
        assert_eq!(
            animator.submit_trigger(Trigger::income(10.0, 1)),
            TriggerOutcome::NotReady
        );

        animator.update_totals(BudgetTotals::new(2000.0, 500.0));
        assert!(animator.is_initialized());
        assert_eq!(animator.state().current_fill_percent, 75.0);
        assert_eq!(animator.state().current_radius, 150.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn idle_totals_update_retargets_next_frame() {
        let mut animator = animator(1000.0, 300.0);
        animator.update_totals(BudgetTotals::new(1000.0, 600.0));
        assert_eq!(animator.state().target_fill_percent, 70.0);

        let status = animator.advance(FRAME);
        assert_eq!(
            status,
            Some(AnimatorStatus {
                is_animating: true,
                is_eating: false
            })
        );
        assert_abs_diff_eq!(animator.state().target_fill_percent, 40.0, epsilon = 1e-4);
    }

    #[test]
    fn duplicate_triggers_are_ignored() {
        let mut animator = animator(1000.0, 300.0);
        let trigger = Trigger::income(100.0, 42);
        assert_eq!(animator.submit_trigger(trigger), TriggerOutcome::Started);
        assert_eq!(animator.submit_trigger(trigger), TriggerOutcome::Duplicate);
        assert_eq!(animator.balls().len(), 2);
        assert_eq!(animator.queued_triggers(), 0);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut animator = animator(1000.0, 300.0);
        assert_eq!(
            animator.submit_trigger(Trigger::income(0.0, 1)),
            TriggerOutcome::Rejected
        );
        assert_eq!(
            animator.submit_trigger(Trigger::expense(-3.0, 2)),
            TriggerOutcome::Rejected
        );
        assert!(animator.balls().is_empty());
        assert!(!animator.is_eating());
    }

    #[test]
    fn mouth_phase_only_moves_while_eating() {
        let mut animator = animator(1000.0, 300.0);
        animator.advance(FRAME);
        assert_eq!(animator.mouth_phase(), 0.0);

        animator.update_totals(BudgetTotals::new(1000.0, 400.0));
        animator.submit_trigger(Trigger::expense(100.0, 7));
        animator.advance(FRAME);
        animator.advance(FRAME);
        assert_abs_diff_eq!(animator.mouth_phase(), 0.4, epsilon = 1e-5);
    }

    #[test]
    fn status_is_reported_only_on_change() {
        let mut animator = animator(1000.0, 300.0);
        animator.update_totals(BudgetTotals::new(1000.0, 500.0));
        animator.submit_trigger(Trigger::expense(200.0, 1));

        assert_eq!(
            animator.advance(FRAME),
            Some(AnimatorStatus {
                is_animating: true,
                is_eating: true
            })
        );
        assert_eq!(animator.advance(FRAME), None);
    }

    #[test]
    fn dispose_is_final() {
        let mut animator = animator(1000.0, 300.0);
        animator.dispose();
        assert!(animator.is_disposed());
        assert_eq!(
            animator.submit_trigger(Trigger::income(10.0, 1)),
            TriggerOutcome::Disposed
        );
        animator.update_totals(BudgetTotals::new(5.0, 5.0));
        assert_eq!(animator.totals(), BudgetTotals::new(1000.0, 300.0));
        assert_eq!(animator.advance(FRAME), None);
        assert_eq!(animator.now(), Duration::ZERO);
    }
}

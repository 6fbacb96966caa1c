#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::AnimatorConfig;
use crate::types::AnimationState;

/// Per-frame exponential smoothing of the arc's fill percentage and radius.
///
/// Each call to [`ArcValueAnimator::step`] consumes a fixed fraction `alpha`
/// of the remaining distance to the target. The step is frame based, not
/// wall-clock scaled, so the display refresh rate determines how quickly the
/// arc settles. Once a quantity is within `epsilon` of its target it snaps to
/// the target exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcValueAnimator {
    alpha: f32,
    epsilon: f32,
}

impl ArcValueAnimator {
    pub fn new(alpha: f32, epsilon: f32) -> Self {
        Self {
            alpha: alpha.clamp(f32::EPSILON, 1.0),
            epsilon: epsilon.max(0.0),
        }
    }

    pub fn from_config(config: &AnimatorConfig) -> Self {
        Self::new(config.smoothing_alpha, config.snap_epsilon)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Installs new targets and starts animating if either one moved the
    /// state away from rest.
    pub fn set_targets(&self, state: &mut AnimationState, fill_percent: f32, radius: f32) {
        state.target_fill_percent = fill_percent;
        state.target_radius = radius;
        state.is_animating = state.is_animating
            || state.current_fill_percent != fill_percent
            || state.current_radius != radius;
    }

    /// Advances `state` by one frame. Returns `true` when the step brought
    /// the animation to rest.
    ///
    /// A state that is not animating is left untouched.
    pub fn step(&self, state: &mut AnimationState) -> bool {
        if !state.is_animating {
            return false;
        }

        let fill_done = self.approach(&mut state.current_fill_percent, state.target_fill_percent);
        let radius_done = self.approach(&mut state.current_radius, state.target_radius);

        if fill_done && radius_done {
            state.is_animating = false;
            return true;
        }
        false
    }

    /// Moves `current` toward `target`; `true` once it sits on the target.
    fn approach(&self, current: &mut f32, target: f32) -> bool {
        let diff = target - *current;
        if diff.abs() > self.epsilon {
            *current += diff * self.alpha;
            false
        } else {
            *current = target;
            true
        }
    }
}

impl Default for ArcValueAnimator {
    fn default() -> Self {
        Self::from_config(&AnimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn moving(from_fill: f32, to_fill: f32, from_radius: f32, to_radius: f32) -> AnimationState {
        let mut state = AnimationState::settled(from_fill, from_radius);
        ArcValueAnimator::default().set_targets(&mut state, to_fill, to_radius);
        state
    }

    #[test]
    fn resting_state_is_not_touched() {
        let animator = ArcValueAnimator::default();
        let mut state = AnimationState::settled(40.0, 90.0);
        state.target_fill_percent = 80.0;
        assert!(!animator.step(&mut state));
        assert_eq!(state.current_fill_percent, 40.0);
        assert!(!state.is_animating);
    }

    #[test]
    fn set_targets_to_current_values_stays_at_rest() {
        let animator = ArcValueAnimator::default();
        let mut state = AnimationState::settled(70.0, 100.0);
        animator.set_targets(&mut state, 70.0, 100.0);
        assert!(!state.is_animating);
    }

    #[test]
    fn single_step_consumes_alpha_of_distance() {
        let animator = ArcValueAnimator::default();
        let mut state = moving(0.0, 100.0, 100.0, 150.0);
        animator.step(&mut state);
        assert_abs_diff_eq!(state.current_fill_percent, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(state.current_radius, 105.0, epsilon = 1e-4);
        assert!(state.is_animating);
    }

    #[test]
    fn distance_shrinks_monotonically_and_snaps() {
        let animator = ArcValueAnimator::default();
        let mut state = moving(0.0, 100.0, 80.0, 150.0);
        let mut previous = (state.target_fill_percent - state.current_fill_percent).abs();
        let mut bound = previous;
        let mut steps = 0;

        while state.is_animating {
            animator.step(&mut state);
            let distance = (state.target_fill_percent - state.current_fill_percent).abs();
            assert!(distance <= previous);
            bound *= 0.9;
            assert!(distance <= bound + 1e-3);
            previous = distance;
            steps += 1;
            assert!(steps < 100, "animation never settled");
        }

        assert_eq!(state.current_fill_percent, 100.0);
        assert_eq!(state.current_radius, 150.0);
    }

    #[test]
    fn small_gap_snaps_immediately() {
        let animator = ArcValueAnimator::default();
        let mut state = moving(50.0, 50.4, 100.0, 100.0);
        assert!(animator.step(&mut state));
        assert_eq!(state.current_fill_percent, 50.4);
        assert!(!state.is_animating);
    }

    #[test]
    fn stays_animating_until_both_quantities_rest() {
        let animator = ArcValueAnimator::default();
        let mut state = moving(50.0, 50.2, 100.0, 140.0);
        assert!(!animator.step(&mut state));
        assert_eq!(state.current_fill_percent, 50.2);
        assert!(state.is_animating);
    }
}

//! Derivations from [`BudgetTotals`] to arc targets.

use crate::config::AnimatorConfig;
use crate::types::BudgetTotals;

/// Replaces negative or non-finite totals with zero.
pub fn sanitize(totals: BudgetTotals) -> BudgetTotals {
    let clean = |value: f32| if value.is_finite() && value > 0.0 { value } else { 0.0 };
    let sanitized = BudgetTotals::new(clean(totals.total_income), clean(totals.total_expense));
    if sanitized != totals {
        diag_warn!(
            "budget totals clamped: income {} expense {}",
            totals.total_income,
            totals.total_expense
        );
    }
    sanitized
}

/// Remaining budget as a percentage of income, in `[0, 100]`.
/// Zero income yields zero.
pub fn fill_percent(totals: &BudgetTotals) -> f32 {
    if totals.total_income <= 0.0 {
        return 0.0;
    }
    (totals.remaining() / totals.total_income * 100.0).clamp(0.0, 100.0)
}

/// Arc radius for a given income, clamped to the configured range.
pub fn base_radius(total_income: f32, config: &AnimatorConfig) -> f32 {
    if total_income <= 0.0 {
        return config.default_radius.clamp(config.min_radius, config.max_radius);
    }
    (total_income / config.radius_income_divisor).clamp(config.min_radius, config.max_radius)
}

/// `(fill_percent, radius)` targets for the given totals.
pub fn targets(totals: &BudgetTotals, config: &AnimatorConfig) -> (f32, f32) {
    (fill_percent(totals), base_radius(totals.total_income, config))
}

use chrono::NaiveDate;

use crate::models::crew::{CrewGoal, CrewMeasurements};
use crate::services::calendar_utils::add_months;

/// Percentage of `goal` reached by `current`, rounded half-up and clamped
/// to `[0, 100]`. A missing or non-positive goal yields 0.
pub fn compute_progress_percent(current: f64, goal: Option<f64>) -> u8 {
    let Some(goal) = goal.filter(|g| *g > 0.0) else {
        return 0;
    };
    let percent = (current / goal * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Projects when `goal_amount` is reached at a steady `monthly_rate`.
///
/// Returns `today` when the goal is already met and `None` when the rate
/// cannot close the gap.
pub fn estimate_goal_date(
    current_amount: f64,
    goal_amount: f64,
    monthly_rate: f64,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if current_amount >= goal_amount {
        return Some(today);
    }
    if monthly_rate <= 0.0 || monthly_rate.is_nan() {
        return None;
    }

    let months_needed = ((goal_amount - current_amount) / monthly_rate).ceil();
    if !months_needed.is_finite() || months_needed > f64::from(u32::MAX) {
        return None;
    }
    add_months(today, months_needed as u32)
}

/// Progress for whichever measurement the crew goal tracks.
pub fn crew_goal_progress(goal: &CrewGoal, measured: &CrewMeasurements) -> u8 {
    compute_progress_percent(measured.value_for(goal.goal_type), goal.target)
}

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::models::settings::AnalyticsSettings;
use crate::models::walking::{DailyStepRecord, WalkingStats, WeeklyWalkingSummary};
use crate::services::calendar_utils::{days_before, week_end, week_start, within};
use crate::services::progress_service::compute_progress_percent;

const DAYS_PER_WEEK: u64 = 7;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn steps_to_distance_km(steps: u64, stride_length_m: f64) -> f64 {
    round_to(steps as f64 * stride_length_m / 1000.0, 2)
}

pub fn estimate_calories(steps: u64, kcal_per_step: f64) -> f64 {
    round_to(steps as f64 * kcal_per_step, 1)
}

pub fn walking_stats(steps: u64, settings: &AnalyticsSettings) -> WalkingStats {
    WalkingStats {
        steps,
        distance_km: steps_to_distance_km(steps, settings.stride_length_m),
        calories_kcal: estimate_calories(steps, settings.kcal_per_step),
    }
}

fn steps_by_day(records: &[DailyStepRecord]) -> HashMap<NaiveDate, u64> {
    let mut totals: HashMap<NaiveDate, u64> = HashMap::new();
    for record in records {
        *totals.entry(record.date).or_default() += u64::from(record.steps);
    }
    totals
}

/// Consecutive days ending today on which the step total reached
/// `daily_goal`. Several records for one day are summed.
pub fn compute_walking_streak(
    records: &[DailyStepRecord],
    daily_goal: u32,
    today: NaiveDate,
    lookback_days: u32,
) -> u32 {
    let totals = steps_by_day(records);
    let goal = u64::from(daily_goal);
    let mut streak = 0;

    for offset in 0..lookback_days {
        let Some(day) = days_before(today, offset) else {
            break;
        };
        if totals.get(&day).copied().unwrap_or(0) < goal {
            break;
        }
        streak += 1;
    }

    streak
}

/// Summary of the Monday-start week containing `day`.
pub fn weekly_summary(
    records: &[DailyStepRecord],
    day: NaiveDate,
    settings: &AnalyticsSettings,
) -> WeeklyWalkingSummary {
    let start = week_start(day);
    let end = week_end(day);
    let in_week: Vec<DailyStepRecord> = records
        .iter()
        .filter(|record| within(record.date, start, end))
        .cloned()
        .collect();

    let totals = steps_by_day(&in_week);
    let total_steps: u64 = totals.values().sum();
    let goal = u64::from(settings.daily_step_goal);
    let goal_achieved_days = (0..DAYS_PER_WEEK as i64)
        .map(|offset| start + Duration::days(offset))
        .filter(|date| totals.get(date).copied().unwrap_or(0) >= goal)
        .count() as u32;

    let weekly_goal = goal * DAYS_PER_WEEK;
    let goal_progress_percent =
        compute_progress_percent(total_steps as f64, Some(weekly_goal as f64));

    debug!(
        target: "app::walking",
        %start,
        total_steps,
        goal_achieved_days,
        "weekly walking summary"
    );

    WeeklyWalkingSummary {
        week_start: start,
        week_end: end,
        total: walking_stats(total_steps, settings),
        average_daily_steps: total_steps / DAYS_PER_WEEK,
        goal_achieved_days,
        goal_progress_percent,
    }
}

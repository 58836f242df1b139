use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStepRecord {
    pub date: NaiveDate,
    pub steps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalkingStats {
    pub steps: u64,
    pub distance_km: f64,
    pub calories_kcal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWalkingSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total: WalkingStats,
    pub average_daily_steps: u64,
    pub goal_achieved_days: u32,
    pub goal_progress_percent: u8,
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
pub const DEFAULT_STREAK_LOOKBACK_DAYS: u32 = 365;
pub const DEFAULT_STRIDE_LENGTH_M: f64 = 0.7;
pub const DEFAULT_KCAL_PER_STEP: f64 = 0.04;
pub const DEFAULT_DAILY_STEP_GOAL: u32 = 6000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSettings {
    /// IANA zone used to decide which calendar day a timestamp belongs to.
    pub timezone: String,
    pub streak_lookback_days: u32,
    pub stride_length_m: f64,
    pub kcal_per_step: f64,
    pub daily_step_goal: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            streak_lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
            stride_length_m: DEFAULT_STRIDE_LENGTH_M,
            kcal_per_step: DEFAULT_KCAL_PER_STEP,
            daily_step_goal: DEFAULT_DAILY_STEP_GOAL,
        }
    }
}

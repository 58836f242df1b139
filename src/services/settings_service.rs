use std::path::Path;
use std::sync::RwLock;

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::AnalyticsSettings;
use crate::services::calendar_utils::parse_timezone;

const MAX_LOOKBACK_DAYS: u32 = 3650;
const STRIDE_RANGE_M: (f64, f64) = (0.3, 1.5);
const KCAL_PER_STEP_RANGE: (f64, f64) = (0.01, 0.2);

#[derive(Debug, Default, Clone)]
pub struct SettingsUpdateInput {
    pub timezone: Option<String>,
    pub streak_lookback_days: Option<u32>,
    pub stride_length_m: Option<f64>,
    pub kcal_per_step: Option<f64>,
    pub daily_step_goal: Option<u32>,
}

pub struct SettingsService {
    current: RwLock<AnalyticsSettings>,
}

impl SettingsService {
    pub fn new(settings: AnalyticsSettings) -> AppResult<Self> {
        validate(&settings)?;
        Ok(Self {
            current: RwLock::new(settings),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            current: RwLock::new(AnalyticsSettings::default()),
        }
    }

    /// Reads settings from a YAML file. A missing file falls back to
    /// defaults; unspecified keys take their default values.
    pub fn from_yaml_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            warn!(
                target: "app::settings",
                path = %path.display(),
                "settings file missing, using defaults"
            );
            return Ok(Self::with_defaults());
        }
        let raw = std::fs::read_to_string(path)?;
        let service = Self::from_yaml_str(&raw)?;
        info!(target: "app::settings", path = %path.display(), "settings loaded");
        Ok(service)
    }

    pub fn from_yaml_str(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::with_defaults());
        }
        let settings: AnalyticsSettings = serde_yaml::from_str(raw)?;
        Self::new(settings)
    }

    pub fn get(&self) -> SettingsSnapshot {
        let settings = match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        SettingsSnapshot::from_validated(settings)
    }

    pub fn update(&self, input: SettingsUpdateInput) -> AppResult<AnalyticsSettings> {
        let mut next = self.get().settings;

        if let Some(timezone) = input.timezone {
            next.timezone = timezone.trim().to_string();
        }
        if let Some(days) = input.streak_lookback_days {
            next.streak_lookback_days = days;
        }
        if let Some(stride) = input.stride_length_m {
            next.stride_length_m = stride;
        }
        if let Some(kcal) = input.kcal_per_step {
            next.kcal_per_step = kcal;
        }
        if let Some(goal) = input.daily_step_goal {
            next.daily_step_goal = goal;
        }

        validate(&next)?;

        match self.current.write() {
            Ok(mut guard) => *guard = next.clone(),
            Err(poisoned) => *poisoned.into_inner() = next.clone(),
        }
        info!(target: "app::settings", timezone = %next.timezone, "settings updated");

        Ok(next)
    }

    pub fn save_yaml(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(&self.get().settings)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

/// Validated settings together with the parsed timezone.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    pub settings: AnalyticsSettings,
    pub tz: Tz,
}

impl SettingsSnapshot {
    fn from_validated(settings: AnalyticsSettings) -> Self {
        // Stored settings always passed `validate`, so the zone parses.
        let tz = parse_timezone(&settings.timezone).unwrap_or(chrono_tz::Asia::Seoul);
        Self { settings, tz }
    }
}

fn validate(settings: &AnalyticsSettings) -> AppResult<()> {
    parse_timezone(&settings.timezone)?;

    if settings.streak_lookback_days == 0 || settings.streak_lookback_days > MAX_LOOKBACK_DAYS {
        return Err(AppError::validation(format!(
            "streakLookbackDays는 1..={MAX_LOOKBACK_DAYS} 범위여야 합니다"
        )));
    }
    if !(STRIDE_RANGE_M.0..=STRIDE_RANGE_M.1).contains(&settings.stride_length_m) {
        return Err(AppError::validation("strideLengthM이 허용 범위를 벗어났습니다"));
    }
    if !(KCAL_PER_STEP_RANGE.0..=KCAL_PER_STEP_RANGE.1).contains(&settings.kcal_per_step) {
        return Err(AppError::validation("kcalPerStep이 허용 범위를 벗어났습니다"));
    }
    if settings.daily_step_goal == 0 {
        return Err(AppError::validation("dailyStepGoal은 0보다 커야 합니다"));
    }
    Ok(())
}

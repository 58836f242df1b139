use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::crew::{
    CompletionEvent, CrewGoal, CrewMeasurements, LeaderboardEntry, Member, RewardEvent,
    TimestampedCompletionEvent,
};
use crate::models::walking::{DailyStepRecord, WeeklyWalkingSummary};
use crate::services::calendar_utils::today_in;
use crate::services::settings_service::SettingsService;
use crate::services::{leaderboard_service, progress_service, streak_service, walking_service};

pub const INVITE_CODE_LENGTH: usize = 6;
/// Uppercase letters and digits without the look-alikes 0, O, 1, I and L.
const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

static INVITE_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-HJKMNP-Z2-9]{6}$").expect("invite code pattern must compile")
});

pub fn generate_invite_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let index = rng.gen_range(0..INVITE_CODE_ALPHABET.len());
            INVITE_CODE_ALPHABET[index] as char
        })
        .collect()
}

/// Canonical form of a code typed by a user: trimmed and uppercased.
pub fn normalize_invite_code(raw: &str) -> AppResult<String> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(AppError::validation("초대 코드를 입력해 주세요"));
    }
    if !INVITE_CODE_PATTERN.is_match(&normalized) {
        return Err(AppError::validation(format!(
            "초대 코드는 {INVITE_CODE_LENGTH}자리 영문 대문자와 숫자여야 합니다"
        )));
    }
    Ok(normalized)
}

/// Entry point for the presentation layer. Holds no state besides the
/// injected settings; "today" is resolved in the configured timezone.
pub struct CrewAnalyticsService {
    settings: Arc<SettingsService>,
}

impl CrewAnalyticsService {
    pub fn new(settings: Arc<SettingsService>) -> Self {
        Self { settings }
    }

    pub fn today(&self) -> NaiveDate {
        today_in(self.settings.get().tz)
    }

    pub fn compute_streak(&self, members: &[Member], completions: &[CompletionEvent]) -> u32 {
        self.compute_streak_on(members, completions, self.today())
    }

    pub fn compute_streak_on(
        &self,
        members: &[Member],
        completions: &[CompletionEvent],
        today: NaiveDate,
    ) -> u32 {
        let lookback = self.settings.get().settings.streak_lookback_days;
        let streak = streak_service::compute_streak(members, completions, today, lookback);
        debug!(target: "app::crew", %today, streak, "crew streak computed");
        streak
    }

    pub fn compute_leaderboard(
        &self,
        members: &[Member],
        completions: &[TimestampedCompletionEvent],
        rewards: &[RewardEvent],
    ) -> Vec<LeaderboardEntry> {
        let tz = self.settings.get().tz;
        leaderboard_service::compute_leaderboard(members, completions, rewards, tz)
    }

    pub fn compute_progress_percent(&self, current: f64, goal: Option<f64>) -> u8 {
        progress_service::compute_progress_percent(current, goal)
    }

    pub fn crew_goal_progress(&self, goal: &CrewGoal, measured: &CrewMeasurements) -> u8 {
        progress_service::crew_goal_progress(goal, measured)
    }

    pub fn estimate_goal_date(
        &self,
        current_amount: f64,
        goal_amount: f64,
        monthly_rate: f64,
    ) -> Option<NaiveDate> {
        self.estimate_goal_date_on(current_amount, goal_amount, monthly_rate, self.today())
    }

    pub fn estimate_goal_date_on(
        &self,
        current_amount: f64,
        goal_amount: f64,
        monthly_rate: f64,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        progress_service::estimate_goal_date(current_amount, goal_amount, monthly_rate, today)
    }

    pub fn walking_streak_on(&self, records: &[DailyStepRecord], today: NaiveDate) -> u32 {
        let settings = self.settings.get().settings;
        walking_service::compute_walking_streak(
            records,
            settings.daily_step_goal,
            today,
            settings.streak_lookback_days,
        )
    }

    pub fn weekly_walking_summary(
        &self,
        records: &[DailyStepRecord],
        day: NaiveDate,
    ) -> WeeklyWalkingSummary {
        walking_service::weekly_summary(records, day, &self.settings.get().settings)
    }

    pub fn issue_invite_code(&self) -> String {
        let code = generate_invite_code(&mut rand::thread_rng());
        info!(target: "app::crew", "invite code issued");
        code
    }
}

//! Wire shapes for rows fetched from the hosted backend.
//!
//! Rows arrive as loosely typed JSON. Each row type mirrors the column
//! names the backend returns and maps into a domain record through
//! `into_record`, rejecting values the analytics functions cannot use.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::crew::{
    CompletionEvent, Member, MemberRole, RewardEvent, TimestampedCompletionEvent,
};
use crate::models::walking::DailyStepRecord;
use crate::services::calendar_utils::{parse_day, parse_timestamp};

/// Implemented by every row type that maps into a domain record.
pub trait IntoRecord {
    type Record;

    fn into_record(self) -> AppResult<Self::Record>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMemberRow {
    pub user_id: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRow {
    pub user_id: Option<String>,
    pub completed_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimestampedCompletionRow {
    pub user_id: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardRow {
    pub user_id: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyStepRow {
    pub date: Option<String>,
    pub steps: Option<i64>,
}

fn require_user_id(value: Option<String>) -> AppResult<String> {
    match value.map(|raw| raw.trim().to_string()) {
        Some(user_id) if !user_id.is_empty() => Ok(user_id),
        _ => Err(AppError::validation("user_id가 비어 있습니다")),
    }
}

fn require_field(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| {
        AppError::validation_with_details("필수 필드 누락", json!({"field": field}))
    })
}

fn non_negative_u32(value: Option<i64>, field: &str) -> AppResult<u32> {
    let raw = value.ok_or_else(|| {
        AppError::validation_with_details("필수 필드 누락", json!({"field": field}))
    })?;
    u32::try_from(raw).map_err(|_| {
        AppError::validation_with_details(
            "허용 범위를 벗어난 값",
            json!({"field": field, "value": raw}),
        )
    })
}

impl IntoRecord for CrewMemberRow {
    type Record = Member;

    fn into_record(self) -> AppResult<Member> {
        let user_id = require_user_id(self.user_id)?;
        // Rows created before roles existed carry no role column.
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => MemberRole::Member,
            Some(raw) => MemberRole::try_from(raw).map_err(|err| AppError::validation(err))?,
        };
        Ok(Member { user_id, role })
    }
}

impl IntoRecord for CompletionRow {
    type Record = CompletionEvent;

    fn into_record(self) -> AppResult<CompletionEvent> {
        let user_id = require_user_id(self.user_id)?;
        let date = parse_day(&require_field(self.completed_date, "completed_date")?)?;
        Ok(CompletionEvent { user_id, date })
    }
}

impl IntoRecord for TimestampedCompletionRow {
    type Record = TimestampedCompletionEvent;

    fn into_record(self) -> AppResult<TimestampedCompletionEvent> {
        let user_id = require_user_id(self.user_id)?;
        let completed_at = parse_timestamp(&require_field(self.completed_at, "completed_at")?)?;
        Ok(TimestampedCompletionEvent {
            user_id,
            completed_at,
        })
    }
}

impl IntoRecord for RewardRow {
    type Record = RewardEvent;

    fn into_record(self) -> AppResult<RewardEvent> {
        let user_id = require_user_id(self.user_id)?;
        let quantity = non_negative_u32(self.quantity, "quantity")?;
        Ok(RewardEvent { user_id, quantity })
    }
}

impl IntoRecord for DailyStepRow {
    type Record = DailyStepRecord;

    fn into_record(self) -> AppResult<DailyStepRecord> {
        let date = parse_day(&require_field(self.date, "date")?)?;
        let steps = non_negative_u32(self.steps, "steps")?;
        Ok(DailyStepRecord { date, steps })
    }
}

/// Decodes a JSON array of rows and maps each one into its domain record.
/// The first invalid row aborts decoding; its index is reported in the
/// error details.
pub fn decode_rows<R>(payload: &str) -> AppResult<Vec<R::Record>>
where
    R: IntoRecord + DeserializeOwned,
{
    let rows: Vec<R> = serde_json::from_str(payload)?;
    map_rows(rows)
}

pub fn map_rows<R: IntoRecord>(rows: Vec<R>) -> AppResult<Vec<R::Record>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            row.into_record().map_err(|err| match err {
                // Already logged when the row error was built.
                AppError::Validation { message, details } => AppError::Validation {
                    message,
                    details: Some(json!({"index": index, "cause": details})),
                },
                other => other,
            })
        })
        .collect()
}

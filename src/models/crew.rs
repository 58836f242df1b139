use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Creator,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Creator => "creator",
            MemberRole::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "creator" => Ok(MemberRole::Creator),
            "member" => Ok(MemberRole::Member),
            other => Err(format!("unsupported member role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
    pub role: MemberRole,
}

impl Member {
    pub fn new(user_id: impl Into<String>, role: MemberRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

/// One member finishing the daily activity on a calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub user_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedCompletionEvent {
    pub user_id: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewardEvent {
    pub user_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub rank: u32,
    pub weekly_completions: u32,
    pub first_finishes: u32,
    pub rewards_collected: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewGoalType {
    Steps,
    Completions,
    Savings,
}

impl CrewGoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrewGoalType::Steps => "steps",
            CrewGoalType::Completions => "completions",
            CrewGoalType::Savings => "savings",
        }
    }
}

impl TryFrom<&str> for CrewGoalType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "steps" => Ok(CrewGoalType::Steps),
            "completions" => Ok(CrewGoalType::Completions),
            "savings" => Ok(CrewGoalType::Savings),
            other => Err(format!("unsupported crew goal type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrewGoal {
    pub goal_type: CrewGoalType,
    #[serde(default)]
    pub target: Option<f64>,
}

/// Current totals a crew has accumulated towards each kind of goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrewMeasurements {
    pub total_steps: f64,
    pub total_completions: f64,
    pub total_savings: f64,
}

impl CrewMeasurements {
    pub fn value_for(&self, goal_type: CrewGoalType) -> f64 {
        match goal_type {
            CrewGoalType::Steps => self.total_steps,
            CrewGoalType::Completions => self.total_completions,
            CrewGoalType::Savings => self.total_savings,
        }
    }
}

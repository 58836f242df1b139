//! Decoding backend rows into domain records at the boundary.

use chrono::{NaiveDate, TimeZone, Utc};
use haruhana_core_lib::models::crew::MemberRole;
use haruhana_core_lib::models::rows::{
    decode_rows, CompletionRow, CrewMemberRow, DailyStepRow, RewardRow, TimestampedCompletionRow,
};

#[test]
fn decodes_member_rows() {
    let payload = r#"[
        {"user_id": "u-1", "role": "creator", "joined_at": "2025-06-01T00:00:00Z"},
        {"user_id": "u-2", "role": "member"},
        {"user_id": "u-3"}
    ]"#;
    let members = decode_rows::<CrewMemberRow>(payload).expect("decode members");
    assert_eq!(members.len(), 3);
    assert_eq!(members[0].role, MemberRole::Creator);
    assert_eq!(members[2].role, MemberRole::Member);
}

#[test]
fn decodes_completion_rows() {
    let payload = r#"[{"user_id": "u-1", "completed_date": "2025-06-10"}]"#;
    let events = decode_rows::<CompletionRow>(payload).expect("decode completions");
    assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 6, 10).expect("date"));

    let payload = r#"[{"user_id": "u-1", "completed_at": "2025-06-10T07:15:00+09:00"}]"#;
    let events = decode_rows::<TimestampedCompletionRow>(payload).expect("decode timestamps");
    assert_eq!(
        events[0].completed_at,
        Utc.with_ymd_and_hms(2025, 6, 9, 22, 15, 0).single().expect("ts")
    );
}

#[test]
fn invalid_row_reports_index() {
    let payload = r#"[
        {"user_id": "u-1", "quantity": 2},
        {"user_id": "u-2", "quantity": -1}
    ]"#;
    let err = decode_rows::<RewardRow>(payload).unwrap_err();
    assert!(err.is_validation());
    let details = err.details().expect("details");
    assert_eq!(details["index"], 1);
    assert_eq!(details["cause"]["field"], "quantity");
}

#[test]
fn malformed_payloads_fail() {
    assert!(decode_rows::<DailyStepRow>("{not json").is_err());
    let err = decode_rows::<DailyStepRow>(r#"[{"date": "10/06/2025", "steps": 10}]"#).unwrap_err();
    assert!(err.is_validation());
    let no_steps = decode_rows::<DailyStepRow>(r#"[{"date": "2025-06-10"}]"#).unwrap_err();
    assert_eq!(no_steps.details().expect("details")["cause"]["field"], "steps");
    let missing = decode_rows::<CompletionRow>(r#"[{"user_id": "u-1"}]"#).unwrap_err();
    assert_eq!(missing.details().expect("details")["cause"]["field"], "completed_date");
}

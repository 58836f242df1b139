//! End-to-end checks for crew analytics: streak, leaderboard and goal
//! progress computed through `CrewAnalyticsService`.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use haruhana_core_lib::models::crew::{
    CompletionEvent, CrewGoal, CrewGoalType, CrewMeasurements, Member, MemberRole, RewardEvent,
    TimestampedCompletionEvent,
};
use haruhana_core_lib::services::settings_service::SettingsService;
use haruhana_core_lib::CrewAnalyticsService;

fn setup_service() -> CrewAnalyticsService {
    CrewAnalyticsService::new(Arc::new(SettingsService::with_defaults()))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 13).expect("valid date")
}

fn crew() -> Vec<Member> {
    vec![
        Member::new("A", MemberRole::Creator),
        Member::new("B", MemberRole::Member),
    ]
}

fn completed(user: &str, days_ago: i64) -> CompletionEvent {
    CompletionEvent {
        user_id: user.to_string(),
        date: today() - Duration::days(days_ago),
    }
}

fn finished_at(user: &str, day: u32, hour: u32) -> TimestampedCompletionEvent {
    TimestampedCompletionEvent {
        user_id: user.to_string(),
        completed_at: Utc
            .with_ymd_and_hms(2025, 6, day, hour, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[test]
fn streak_counts_full_days_until_gap() {
    let service = setup_service();
    let members = crew();

    let full: Vec<_> = (0..5)
        .flat_map(|d| [completed("A", d), completed("B", d)])
        .collect();
    assert_eq!(service.compute_streak_on(&members, &full, today()), 5);

    let gap: Vec<_> = full
        .iter()
        .filter(|e| !(e.user_id == "B" && e.date == today() - Duration::days(3)))
        .cloned()
        .collect();
    assert_eq!(service.compute_streak_on(&members, &gap, today()), 3);

    let nothing_today: Vec<_> = full
        .iter()
        .filter(|e| e.date != today())
        .cloned()
        .collect();
    assert_eq!(service.compute_streak_on(&members, &nothing_today, today()), 0);
}

#[test]
fn streak_uses_today_in_configured_zone() {
    let service = setup_service();
    let members = vec![Member::new("solo", MemberRole::Creator)];
    let streak = service.compute_streak(&members, &[]);
    assert_eq!(streak, 0);

    let log = vec![CompletionEvent {
        user_id: "solo".into(),
        date: service.today(),
    }];
    assert_eq!(service.compute_streak(&members, &log), 1);
}

#[test]
fn leaderboard_tie_keeps_input_order() {
    let service = setup_service();
    // Both members end with 3 completions, 1 first finish and 0 rewards.
    let log = vec![
        finished_at("A", 9, 1),
        finished_at("B", 9, 2),
        finished_at("A", 9, 3),
        finished_at("B", 10, 1),
        finished_at("A", 10, 2),
        finished_at("B", 10, 3),
    ];

    let board = service.compute_leaderboard(&crew(), &log, &[]);
    assert_eq!(board.len(), 2);
    for entry in &board {
        assert_eq!(entry.weekly_completions, 3);
        assert_eq!(entry.first_finishes, 1);
        assert_eq!(entry.rewards_collected, 0);
    }
    assert_eq!(board[0].user_id, "A");
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].user_id, "B");
    assert_eq!(board[1].rank, 2);
}

#[test]
fn leaderboard_is_ranked_and_repeatable() {
    let service = setup_service();
    let members = vec![
        Member::new("A", MemberRole::Creator),
        Member::new("B", MemberRole::Member),
        Member::new("C", MemberRole::Member),
        Member::new("D", MemberRole::Member),
    ];
    let log = vec![
        finished_at("C", 9, 1),
        finished_at("B", 9, 2),
        finished_at("C", 10, 4),
        finished_at("B", 10, 3),
        finished_at("A", 11, 2),
        finished_at("outsider", 11, 1),
    ];
    let rewards = vec![
        RewardEvent {
            user_id: "A".into(),
            quantity: 5,
        },
        RewardEvent {
            user_id: "C".into(),
            quantity: 1,
        },
        RewardEvent {
            user_id: "D".into(),
            quantity: 1,
        },
    ];

    let first = service.compute_leaderboard(&members, &log, &rewards);
    let second = service.compute_leaderboard(&members, &log, &rewards);
    assert_eq!(first, second);

    let order: Vec<_> = first.iter().map(|e| e.user_id.as_str()).collect();
    assert_eq!(order, ["C", "B", "A", "D"]);

    for (index, entry) in first.iter().enumerate() {
        assert_eq!(entry.rank as usize, index + 1);
    }
    for pair in first.windows(2) {
        let key = |e: &haruhana_core_lib::models::crew::LeaderboardEntry| {
            (e.weekly_completions, e.first_finishes, e.rewards_collected)
        };
        assert!(key(&pair[0]) >= key(&pair[1]));
    }
    // The outsider finished earlier on day 11, but only members can win a day.
    assert_eq!(first[2].user_id, "A");
    assert_eq!(first[2].first_finishes, 1);
}

#[test]
fn progress_and_goal_date_properties() {
    let service = setup_service();
    assert_eq!(service.compute_progress_percent(150.0, Some(100.0)), 100);
    assert_eq!(service.compute_progress_percent(10.0, None), 0);
    assert_eq!(service.compute_progress_percent(0.0, Some(100.0)), 0);

    assert_eq!(
        service.estimate_goal_date_on(100_000.0, 100_000.0, 50_000.0, today()),
        Some(today())
    );
    assert_eq!(service.estimate_goal_date_on(0.0, 100_000.0, 0.0, today()), None);
    assert_eq!(
        service.estimate_goal_date_on(40_000.0, 100_000.0, 50_000.0, today()),
        NaiveDate::from_ymd_opt(2025, 8, 13)
    );
    assert_eq!(
        service.estimate_goal_date(100_000.0, 100_000.0, 1.0),
        Some(service.today())
    );

    let goal = CrewGoal {
        goal_type: CrewGoalType::Completions,
        target: Some(40.0),
    };
    let measured = CrewMeasurements {
        total_completions: 10.0,
        ..Default::default()
    };
    assert_eq!(service.crew_goal_progress(&goal, &measured), 25);
}

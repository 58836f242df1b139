use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::crew::{CompletionEvent, Member};
use crate::services::calendar_utils::days_before;

/// Counts consecutive days, ending today inclusive, on which every member
/// in `members` completed at least once.
///
/// The same membership snapshot is applied to every day in the window.
/// Completions from users outside the snapshot never count.
pub fn compute_streak(
    members: &[Member],
    completions: &[CompletionEvent],
    today: NaiveDate,
    lookback_days: u32,
) -> u32 {
    if members.is_empty() {
        return 0;
    }

    let member_ids: HashSet<&str> = members.iter().map(|m| m.user_id.as_str()).collect();

    let mut completed_by_day: HashMap<NaiveDate, HashSet<&str>> = HashMap::new();
    for event in completions {
        if member_ids.contains(event.user_id.as_str()) {
            completed_by_day
                .entry(event.date)
                .or_default()
                .insert(event.user_id.as_str());
        }
    }

    let required = member_ids.len();
    let mut streak = 0;

    for offset in 0..lookback_days {
        let Some(day) = days_before(today, offset) else {
            break;
        };
        let finished = completed_by_day.get(&day).map_or(0, HashSet::len);
        if finished != required {
            debug!(
                target: "app::crew",
                %day,
                finished,
                required,
                "streak stopped"
            );
            break;
        }
        streak += 1;
    }

    streak
}

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::crew::{LeaderboardEntry, Member, RewardEvent, TimestampedCompletionEvent};
use crate::services::calendar_utils::local_day;

#[derive(Default, Clone, Copy)]
struct MemberTally {
    completions: u32,
    first_finishes: u32,
    rewards: u64,
}

/// Ranks crew members for the window covered by `completions`.
///
/// Ordering is completions, then first finishes, then rewards, all
/// descending. The sort is stable, so members tied on all three keep
/// their order from `members`. Every member receives a distinct rank.
pub fn compute_leaderboard(
    members: &[Member],
    completions: &[TimestampedCompletionEvent],
    rewards: &[RewardEvent],
    tz: Tz,
) -> Vec<LeaderboardEntry> {
    let mut tallies: HashMap<&str, MemberTally> = HashMap::new();

    for event in completions {
        tallies.entry(event.user_id.as_str()).or_default().completions += 1;
    }

    let member_ids: HashSet<&str> = members.iter().map(|m| m.user_id.as_str()).collect();
    for winner in first_finishers(completions, &member_ids, tz).into_values() {
        tallies.entry(winner).or_default().first_finishes += 1;
    }

    for reward in rewards {
        tallies.entry(reward.user_id.as_str()).or_default().rewards += u64::from(reward.quantity);
    }

    let mut ranked: Vec<(&Member, MemberTally)> = members
        .iter()
        .map(|member| {
            let tally = tallies
                .get(member.user_id.as_str())
                .copied()
                .unwrap_or_default();
            (member, tally)
        })
        .collect();

    ranked.sort_by(|(_, a), (_, b)| {
        b.completions
            .cmp(&a.completions)
            .then(b.first_finishes.cmp(&a.first_finishes))
            .then(b.rewards.cmp(&a.rewards))
    });

    debug!(
        target: "app::leaderboard",
        members = members.len(),
        completions = completions.len(),
        rewards = rewards.len(),
        "leaderboard computed"
    );

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (member, tally))| LeaderboardEntry {
            user_id: member.user_id.clone(),
            rank: index as u32 + 1,
            weekly_completions: tally.completions,
            first_finishes: tally.first_finishes,
            rewards_collected: tally.rewards,
        })
        .collect()
}

/// Earliest member to finish on each local calendar day. Completions by
/// users outside `member_ids` never win a day. On identical timestamps the
/// entry appearing later in `completions` wins.
fn first_finishers<'a>(
    completions: &'a [TimestampedCompletionEvent],
    member_ids: &HashSet<&str>,
    tz: Tz,
) -> HashMap<NaiveDate, &'a str> {
    let mut earliest: HashMap<NaiveDate, (DateTime<Utc>, &'a str)> = HashMap::new();

    for event in completions {
        if !member_ids.contains(event.user_id.as_str()) {
            continue;
        }
        let day = local_day(event.completed_at, tz);
        let replaces = earliest
            .get(&day)
            .map_or(true, |(best, _)| event.completed_at <= *best);
        if replaces {
            earliest.insert(day, (event.completed_at, event.user_id.as_str()));
        }
    }

    earliest
        .into_iter()
        .map(|(day, (_, user_id))| (day, user_id))
        .collect()
}

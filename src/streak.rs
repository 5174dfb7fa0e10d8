//! Day-streak helpers for the hosting app.
//!
//! The engine takes the streak as a plain number; these helpers derive it
//! from activity dates and apply the inactivity penalty with [`demote`].
//! Pure functions over `chrono::NaiveDate`; "today" is always an argument.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::profile::LearnerTier;
use crate::standing::demote;

/// When an idle learner loses one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivityPolicy {
    /// Idle days tolerated before the penalty applies.
    pub grace_days: u32,
}

impl Default for InactivityPolicy {
    fn default() -> Self {
        Self { grace_days: 3 }
    }
}

/// Consecutive active days ending today, or yesterday if today has no
/// activity yet. Duplicates and order don't matter; future dates are ignored.
pub fn current_streak(active_days: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = active_days.iter().copied().filter(|d| *d <= today).collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(y) if days.contains(&y) => y,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Whole days between the last activity and today (0 when active today).
pub fn idle_days(last_active: NaiveDate, today: NaiveDate) -> u32 {
    let d = (today - last_active).num_days();
    u32::try_from(d.max(0)).unwrap_or(u32::MAX)
}

/// Demote exactly one tier once the learner is idle past the grace period.
pub fn apply_inactivity(
    tier: LearnerTier,
    last_active: NaiveDate,
    today: NaiveDate,
    policy: InactivityPolicy,
) -> LearnerTier {
    if idle_days(last_active, today) > policy.grace_days {
        demote(tier)
    } else {
        tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn counts_back_from_today() {
        let today = d(2025, 3, 10);
        let days = [d(2025, 3, 8), d(2025, 3, 10), d(2025, 3, 9), d(2025, 3, 9)];
        assert_eq!(current_streak(&days, today), 3);
    }

    #[test]
    fn yesterday_keeps_the_streak_alive() {
        let today = d(2025, 3, 1);
        let days = [d(2025, 2, 27), d(2025, 2, 28)];
        assert_eq!(current_streak(&days, today), 2);
    }

    #[test]
    fn gap_breaks_the_streak() {
        let today = d(2025, 3, 10);
        assert_eq!(current_streak(&[d(2025, 3, 8)], today), 0);
        assert_eq!(current_streak(&[], today), 0);
        assert_eq!(current_streak(&[d(2025, 3, 11)], today), 0);
    }

    #[test]
    fn inactivity_demotes_once_after_grace() {
        let today = d(2025, 6, 20);
        let p = InactivityPolicy::default();
        assert_eq!(
            apply_inactivity(LearnerTier::Legend, d(2025, 6, 17), today, p),
            LearnerTier::Legend
        );
        assert_eq!(
            apply_inactivity(LearnerTier::Legend, d(2025, 6, 16), today, p),
            LearnerTier::Pro
        );
        assert_eq!(
            apply_inactivity(LearnerTier::Beginner, d(2024, 1, 1), today, p),
            LearnerTier::Beginner
        );
    }

    #[test]
    fn idle_days_never_negative() {
        assert_eq!(idle_days(d(2025, 1, 5), d(2025, 1, 1)), 0);
        assert_eq!(idle_days(d(2025, 1, 1), d(2025, 1, 31)), 30);
    }
}

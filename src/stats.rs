//! Usage statistics derived from session first-seen timestamps.
//!
//! Counts are recomputed from scratch on every call. All times are UTC.

use crate::session::{SessionStore, UserSession};
use chrono::{DateTime, Duration, Utc};

/// Width of the rolling "this week" window
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Width of the rolling "this month" window
pub const MONTH_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    pub total: usize,
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
}

/// Compute statistics over every user who has sent /start.
pub fn compute(store: &SessionStore, now: DateTime<Utc>) -> UsageStats {
    compute_from(&store.all_sessions(), now)
}

/// Compute statistics over an explicit session snapshot.
///
/// Sessions without a first-seen timestamp (a language picked before any
/// /start) are not counted.
pub fn compute_from(sessions: &[UserSession], now: DateTime<Utc>) -> UsageStats {
    let week = Duration::days(WEEK_WINDOW_DAYS);
    let month = Duration::days(MONTH_WINDOW_DAYS);

    sessions
        .iter()
        .filter_map(|s| s.first_seen_at)
        .fold(UsageStats::default(), |mut stats, seen| {
            let age = now - seen;
            stats.total += 1;
            if seen.date_naive() == now.date_naive() {
                stats.today += 1;
            }
            if age < week {
                stats.this_week += 1;
            }
            if age < month {
                stats.this_month += 1;
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn session(user_id: i64, first_seen_at: Option<DateTime<Utc>>) -> UserSession {
        UserSession {
            user_id,
            language: None,
            first_seen_at,
        }
    }

    fn just_after_midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 0, 30, 0).unwrap()
    }

    // ==================== Window Tests ====================

    #[test]
    fn test_empty_store() {
        let stats = compute(&SessionStore::new(), just_after_midnight());
        assert_eq!(stats, UsageStats::default());
    }

    #[test]
    fn test_mixed_ages() {
        let now = just_after_midnight();
        let sessions = vec![
            session(1, Some(now)),
            session(2, Some(now - Duration::hours(1))),
            session(3, Some(now - Duration::days(8))),
            session(4, Some(now - Duration::days(40))),
        ];

        let stats = compute_from(&sessions, now);
        assert_eq!(
            stats,
            UsageStats {
                total: 4,
                today: 1,
                this_week: 2,
                this_month: 3,
            }
        );
    }

    #[test]
    fn test_today_uses_calendar_date() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let sessions = vec![
            session(1, Some(Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap())),
            session(2, Some(Utc.with_ymd_and_hms(2024, 5, 19, 23, 59, 59).unwrap())),
        ];

        let stats = compute_from(&sessions, now);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.this_week, 2);
    }

    #[test]
    fn test_week_boundary_is_strict() {
        let now = just_after_midnight();
        let sessions = vec![
            session(1, Some(now - Duration::days(7))),
            session(2, Some(now - Duration::days(7) + Duration::seconds(1))),
        ];

        let stats = compute_from(&sessions, now);
        assert_eq!(stats.this_week, 1);
        assert_eq!(stats.this_month, 2);
    }

    #[test]
    fn test_month_boundary_is_strict() {
        let now = just_after_midnight();
        let sessions = vec![
            session(1, Some(now - Duration::days(30))),
            session(2, Some(now - Duration::days(29))),
        ];

        let stats = compute_from(&sessions, now);
        assert_eq!(stats.this_month, 1);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_sessions_without_start_are_skipped() {
        let now = just_after_midnight();
        let sessions = vec![session(1, None), session(2, Some(now))];

        let stats = compute_from(&sessions, now);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.today, 1);
    }

    #[test]
    fn test_compute_reads_store() {
        let now = just_after_midnight();
        let store = SessionStore::new();
        store.touch_first_seen(1, now);
        store.touch_first_seen(2, now - Duration::days(3));
        store.set_language(3, Language::English);

        let stats = compute(&store, now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.this_week, 2);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_counts_are_nested(ages in proptest::collection::vec(0i64..100 * 86_400, 0..50)) {
            let now = just_after_midnight();
            let sessions: Vec<_> = ages
                .iter()
                .enumerate()
                .map(|(i, secs)| session(i as i64, Some(now - Duration::seconds(*secs))))
                .collect();

            let stats = compute_from(&sessions, now);
            prop_assert_eq!(stats.total, ages.len());
            prop_assert!(stats.today <= stats.this_week);
            prop_assert!(stats.this_week <= stats.this_month);
            prop_assert!(stats.this_month <= stats.total);
        }

        #[test]
        fn prop_total_counts_distinct_starters(ids in proptest::collection::vec(0i64..20, 0..60)) {
            let now = just_after_midnight();
            let store = SessionStore::new();
            for id in &ids {
                store.touch_first_seen(*id, now);
            }

            let distinct: std::collections::HashSet<_> = ids.iter().collect();
            prop_assert_eq!(compute(&store, now).total, distinct.len());
        }
    }
}

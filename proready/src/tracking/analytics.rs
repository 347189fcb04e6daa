//! Aggregation of completed sessions into per-period analytics.

use crate::db::models::sessions::CompletedSessionRow;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reporting window for session analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    #[default]
    Week,
    Month,
}

impl Period {
    /// The earliest session date included in this window, relative to `today`.
    pub fn lower_bound(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Today => today,
            Period::Week => today.checked_sub_days(Days::new(7)).unwrap_or(today),
            Period::Month => today.checked_sub_months(Months::new(1)).unwrap_or(today),
        }
    }
}

/// Totals for one aggregation bucket (a resource or a day).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    pub total_time_minutes: i64,
    pub total_problems: i64,
    pub session_count: i64,
}

/// The full analytics response for a period.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub period: Period,
    pub total_time_minutes: i64,
    pub total_problems: i64,
    pub total_sessions: i64,
    /// Mean completed-session length in minutes; 0 when there are no sessions
    pub average_session_minutes: f64,
    pub by_resource: BTreeMap<String, BucketStats>,
    pub by_day: BTreeMap<NaiveDate, BucketStats>,
}

/// Fold completed sessions into overall, per-resource, and per-day totals.
pub fn aggregate(period: Period, rows: &[CompletedSessionRow]) -> AnalyticsSummary {
    let mut by_resource: BTreeMap<String, BucketStats> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, BucketStats> = BTreeMap::new();
    let mut total_time = 0i64;
    let mut total_problems = 0i64;

    for row in rows {
        total_time += row.duration_minutes as i64;
        total_problems += row.problems_solved as i64;

        for bucket in [
            by_resource.entry(row.resource_name.clone()).or_default(),
            by_day.entry(row.session_date).or_default(),
        ] {
            bucket.total_time_minutes += row.duration_minutes as i64;
            bucket.total_problems += row.problems_solved as i64;
            bucket.session_count += 1;
        }
    }

    let total_sessions = rows.len() as i64;
    let average_session_minutes = if total_sessions > 0 {
        total_time as f64 / total_sessions as f64
    } else {
        0.0
    };

    AnalyticsSummary {
        period,
        total_time_minutes: total_time,
        total_problems,
        total_sessions,
        average_session_minutes,
        by_resource,
        by_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(resource: &str, date: &str, minutes: i32, problems: i32) -> CompletedSessionRow {
        CompletedSessionRow {
            resource_name: resource.to_string(),
            session_date: date.parse().unwrap(),
            duration_minutes: minutes,
            problems_solved: problems,
        }
    }

    #[test]
    fn test_empty_input_yields_zeroes() {
        let summary = aggregate(Period::Week, &[]);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.total_time_minutes, 0);
        assert_eq!(summary.average_session_minutes, 0.0);
        assert!(summary.by_resource.is_empty());
        assert!(summary.by_day.is_empty());
    }

    #[test]
    fn test_totals_and_average() {
        let rows = vec![
            row("LeetCode", "2025-03-10", 30, 4),
            row("LeetCode", "2025-03-11", 45, 6),
            row("HackerRank", "2025-03-11", 15, 2),
        ];
        let summary = aggregate(Period::Week, &rows);

        assert_eq!(summary.total_time_minutes, 90);
        assert_eq!(summary.total_problems, 12);
        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.average_session_minutes, 30.0);
    }

    #[test]
    fn test_buckets_group_by_resource_and_day() {
        let rows = vec![
            row("LeetCode", "2025-03-10", 30, 4),
            row("LeetCode", "2025-03-11", 45, 6),
            row("HackerRank", "2025-03-11", 15, 2),
        ];
        let summary = aggregate(Period::Month, &rows);

        let leetcode = &summary.by_resource["LeetCode"];
        assert_eq!(leetcode.total_time_minutes, 75);
        assert_eq!(leetcode.session_count, 2);

        let day: NaiveDate = "2025-03-11".parse().unwrap();
        let eleventh = &summary.by_day[&day];
        assert_eq!(eleventh.total_time_minutes, 60);
        assert_eq!(eleventh.total_problems, 8);
        assert_eq!(eleventh.session_count, 2);
    }

    #[test]
    fn test_period_lower_bounds() {
        let today: NaiveDate = "2025-03-15".parse().unwrap();
        assert_eq!(Period::Today.lower_bound(today), today);
        assert_eq!(Period::Week.lower_bound(today), "2025-03-08".parse().unwrap());
        assert_eq!(Period::Month.lower_bound(today), "2025-02-15".parse().unwrap());
    }
}

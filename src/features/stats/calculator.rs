use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Reviews per day the dashboard treats as a full daily goal
pub const DAILY_GOAL: usize = 20;

const DEFAULT_FIRST_NAME: &str = "Estudante";

/// Percentage of correct answers, rounded. Zero when nothing was answered.
pub fn accuracy(correct: usize, wrong: usize) -> u32 {
    let total = correct + wrong;
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Consecutive study days ending today. A day without study breaks the chain,
/// so no study today means a streak of zero.
pub fn streak<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = days.into_iter().filter(|day| *day <= today).collect();

    let mut count = 0;
    for (offset, day) in unique.iter().rev().enumerate() {
        if *day == today - Duration::days(offset as i64) {
            count += 1;
        } else {
            break;
        }
    }
    count
}

pub fn revisions_today<'a, I>(studied_at: I, today: NaiveDate) -> usize
where
    I: IntoIterator<Item = &'a NaiveDateTime>,
{
    studied_at.into_iter().filter(|at| at.date() == today).count()
}

pub fn daily_goal_progress(revisions_today: usize) -> u32 {
    ((revisions_today.min(DAILY_GOAL) * 100) / DAILY_GOAL) as u32
}

pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(DEFAULT_FIRST_NAME)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub cards_generated: i64,
    pub revisions_today: usize,
    pub streak: u32,
    pub accuracy: u32,
    pub daily_goal_progress: u32,
}

impl DashboardStats {
    /// `logs` holds `(correct, studied_at)` pairs for one user.
    pub fn from_logs(cards_generated: i64, logs: &[(bool, NaiveDateTime)], today: NaiveDate) -> Self {
        let correct = logs.iter().filter(|(ok, _)| *ok).count();
        let wrong = logs.len() - correct;
        let revisions = revisions_today(logs.iter().map(|(_, at)| at), today);

        DashboardStats {
            cards_generated,
            revisions_today: revisions,
            streak: streak(logs.iter().map(|(_, at)| at.date()), today),
            accuracy: accuracy(correct, wrong),
            daily_goal_progress: daily_goal_progress(revisions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn accuracy_rounds_and_handles_zero() {
        assert_eq!(accuracy(0, 0), 0);
        assert_eq!(accuracy(1, 2), 33);
        assert_eq!(accuracy(2, 1), 67);
        assert_eq!(accuracy(1, 1), 50);
        assert_eq!(accuracy(5, 0), 100);
    }

    #[test]
    fn streak_counts_back_from_today_until_a_gap() {
        let today = day(2026, 3, 10);
        let days = vec![
            day(2026, 3, 10),
            day(2026, 3, 9),
            day(2026, 3, 9),
            day(2026, 3, 8),
            day(2026, 3, 6),
        ];
        assert_eq!(streak(days, today), 3);
    }

    #[test]
    fn streak_is_zero_without_study_today() {
        let today = day(2026, 3, 10);
        assert_eq!(streak(vec![day(2026, 3, 9), day(2026, 3, 8)], today), 0);
        assert_eq!(streak(Vec::new(), today), 0);
    }

    #[test]
    fn streak_ignores_future_days() {
        let today = day(2026, 3, 10);
        assert_eq!(streak(vec![day(2026, 3, 11), day(2026, 3, 10)], today), 1);
    }

    #[test]
    fn streak_crosses_month_boundaries() {
        let today = day(2026, 3, 1);
        assert_eq!(streak(vec![day(2026, 3, 1), day(2026, 2, 28), day(2026, 2, 27)], today), 3);
    }

    #[test]
    fn daily_goal_is_capped() {
        assert_eq!(daily_goal_progress(0), 0);
        assert_eq!(daily_goal_progress(5), 25);
        assert_eq!(daily_goal_progress(45), 100);
    }

    #[test]
    fn first_name_falls_back() {
        assert_eq!(first_name("Maria Clara Souza"), "Maria");
        assert_eq!(first_name("   "), "Estudante");
    }

    #[test]
    fn dashboard_stats_from_logs() {
        let today = day(2026, 5, 20);
        let logs = vec![
            (true, at(2026, 5, 20, 9)),
            (false, at(2026, 5, 20, 10)),
            (true, at(2026, 5, 19, 22)),
            (true, at(2026, 5, 17, 8)),
        ];
        let stats = DashboardStats::from_logs(42, &logs, today);
        assert_eq!(
            stats,
            DashboardStats {
                cards_generated: 42,
                revisions_today: 2,
                streak: 2,
                accuracy: 75,
                daily_goal_progress: 10,
            }
        );
    }
}

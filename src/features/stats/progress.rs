use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::data::models::StudyLog;
use crate::features::stats::accuracy;

/// Answers further apart than this belong to different study sessions
pub const SESSION_GAP_MINUTES: i64 = 30;

/// Ranges the progress page can show, in days
pub const PROGRESS_RANGES: [u32; 2] = [7, 30];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub reviews: usize,
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStats {
    pub cards_saved: i64,
    pub total_reviews: usize,
    pub retention: u32,
    pub sessions: usize,
    pub study_minutes: i64,
    pub activity: Vec<DailyActivity>,
}

/// One entry per day of the `days` days ending `today`, oldest first. Days
/// without reviews are present with zero counts.
pub fn daily_activity(logs: &[StudyLog], today: NaiveDate, days: u32) -> Vec<DailyActivity> {
    let first = today - Duration::days(days.saturating_sub(1) as i64);

    let mut per_day: BTreeMap<NaiveDate, (usize, usize)> = first
        .iter_days()
        .take(days as usize)
        .map(|day| (day, (0, 0)))
        .collect();

    for log in logs {
        if let Some((reviews, correct)) = per_day.get_mut(&log.studied_at.date()) {
            *reviews += 1;
            if log.correct {
                *correct += 1;
            }
        }
    }

    per_day
        .into_iter()
        .map(|(date, (reviews, correct))| DailyActivity {
            date,
            reviews,
            correct,
        })
        .collect()
}

/// Splits the answer times into sessions separated by more than
/// [`SESSION_GAP_MINUTES`]. Returns each session's `(start, end)`.
pub fn sessions(mut times: Vec<NaiveDateTime>) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    times.sort();
    let gap = Duration::minutes(SESSION_GAP_MINUTES);

    let mut sessions: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::new();
    for at in times {
        match sessions.last_mut() {
            Some((_, end)) if at - *end <= gap => *end = at,
            _ => sessions.push((at, at)),
        }
    }
    sessions
}

/// `(correct, wrong)` per deck id
pub fn deck_outcomes(logs: &[StudyLog]) -> BTreeMap<i32, (usize, usize)> {
    let mut outcomes = BTreeMap::new();
    for log in logs {
        let entry = outcomes.entry(log.deck_id).or_insert((0, 0));
        if log.correct {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }
    outcomes
}

impl ProgressStats {
    pub fn from_logs(cards_saved: i64, logs: &[StudyLog], today: NaiveDate, days: u32) -> Self {
        let correct = logs.iter().filter(|log| log.correct).count();
        let sessions = sessions(logs.iter().map(|log| log.studied_at).collect());
        let study_minutes = sessions
            .iter()
            .map(|(start, end)| (*end - *start).num_minutes())
            .sum();

        ProgressStats {
            cards_saved,
            total_reviews: logs.len(),
            retention: accuracy(correct, logs.len() - correct),
            sessions: sessions.len(),
            study_minutes,
            activity: daily_activity(logs, today, days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, d)
            .and_then(|day| day.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn log(deck_id: i32, correct: bool, studied_at: NaiveDateTime) -> StudyLog {
        StudyLog {
            log_id: 0,
            user_id: 1,
            deck_id,
            card_id: 1,
            correct,
            studied_at,
        }
    }

    #[test]
    fn activity_covers_every_day_of_the_range() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
        let logs = vec![
            log(1, true, at(10, 9, 0)),
            log(1, false, at(10, 9, 5)),
            log(1, true, at(8, 20, 0)),
            // outside the 7 day window
            log(1, true, at(2, 8, 0)),
        ];

        let activity = daily_activity(&logs, today, 7);
        assert_eq!(activity.len(), 7);
        assert_eq!(activity[0].date, NaiveDate::from_ymd_opt(2026, 6, 4).unwrap());
        assert_eq!(activity[6].date, today);
        assert_eq!((activity[6].reviews, activity[6].correct), (2, 1));
        assert_eq!((activity[4].reviews, activity[4].correct), (1, 1));
        assert_eq!(activity.iter().map(|day| day.reviews).sum::<usize>(), 3);

        assert_eq!(daily_activity(&logs, today, 30).len(), 30);
    }

    #[test]
    fn answers_split_into_sessions_on_long_gaps() {
        let found = sessions(vec![
            at(10, 9, 20),
            at(10, 9, 0),
            at(10, 9, 10),
            at(10, 14, 0),
            at(11, 8, 0),
            at(11, 8, 30),
        ]);
        assert_eq!(
            found,
            vec![
                (at(10, 9, 0), at(10, 9, 20)),
                (at(10, 14, 0), at(10, 14, 0)),
                (at(11, 8, 0), at(11, 8, 30)),
            ]
        );
        assert!(sessions(Vec::new()).is_empty());
    }

    #[test]
    fn outcomes_group_by_deck() {
        let logs = vec![
            log(1, true, at(10, 9, 0)),
            log(2, false, at(10, 9, 1)),
            log(1, false, at(10, 9, 2)),
            log(1, true, at(10, 9, 3)),
        ];
        let outcomes = deck_outcomes(&logs);
        assert_eq!(outcomes[&1], (2, 1));
        assert_eq!(outcomes[&2], (0, 1));
    }

    #[test]
    fn progress_stats_from_logs() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
        let logs = vec![
            log(1, true, at(10, 9, 0)),
            log(1, true, at(10, 9, 15)),
            log(1, false, at(9, 18, 0)),
            log(1, true, at(9, 18, 10)),
        ];

        let stats = ProgressStats::from_logs(12, &logs, today, 7);
        assert_eq!(stats.cards_saved, 12);
        assert_eq!(stats.total_reviews, 4);
        assert_eq!(stats.retention, 75);
        assert_eq!(stats.sessions, 2);
        assert_eq!(stats.study_minutes, 25);
        assert_eq!(stats.activity.len(), 7);
    }

    #[test]
    fn no_logs_gives_empty_progress() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
        let stats = ProgressStats::from_logs(0, &[], today, 30);
        assert_eq!(stats.retention, 0);
        assert_eq!(stats.sessions, 0);
        assert_eq!(stats.study_minutes, 0);
        assert!(stats.activity.iter().all(|day| day.reviews == 0));
    }
}

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::data::models::CardReview;

const INITIAL_EASE: f64 = 2.5;
const MIN_EASE: f64 = 1.3;

/// How well a card was recalled. `Again` is what a wrong quiz answer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Again,
    Hard,
    Medium,
    Easy,
}

impl Rating {
    /// SM-2 quality on the 1..=5 scale
    pub fn quality(self) -> i32 {
        match self {
            Rating::Again => 1,
            Rating::Hard => 2,
            Rating::Medium => 3,
            Rating::Easy => 5,
        }
    }

    /// Rating recorded for a quiz answer when the student gave none.
    pub fn for_answer(correct: bool, explicit: Option<Rating>) -> Rating {
        match (correct, explicit) {
            (false, _) => Rating::Again,
            (true, Some(Rating::Again)) | (true, None) => Rating::Medium,
            (true, Some(rating)) => rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub ease_factor: f64,
    pub interval_days: i32,
    pub next_review_at: NaiveDateTime,
}

/// Next schedule for a card given the previous review, if any.
pub fn schedule(previous: Option<&CardReview>, rating: Rating, now: NaiveDateTime) -> Schedule {
    let (interval_days, ease_factor) = match previous {
        Some(review) => next_parameters(rating, review.interval_days, review.ease_factor),
        None => initial_parameters(rating),
    };

    Schedule {
        ease_factor,
        interval_days,
        next_review_at: now + Duration::days(interval_days as i64),
    }
}

pub fn is_due(review: Option<&CardReview>, now: NaiveDateTime) -> bool {
    review.is_none_or(|r| r.next_review_at <= now)
}

fn initial_parameters(rating: Rating) -> (i32, f64) {
    let interval = match rating {
        Rating::Again | Rating::Hard => 1,
        Rating::Medium => 3,
        Rating::Easy => 7,
    };

    (interval, INITIAL_EASE)
}

fn next_parameters(rating: Rating, previous_interval: i32, previous_ease: f64) -> (i32, f64) {
    let quality = rating.quality();
    let ease_factor = (previous_ease + (0.1 - (5 - quality) as f64 * 0.08)).max(MIN_EASE);

    let interval = match rating {
        Rating::Again => 1,
        // 20% penalty
        Rating::Hard => ((previous_interval as f64 * 0.8) as i32).max(1),
        Rating::Medium | Rating::Easy => ((previous_interval as f64 * ease_factor).round() as i32).max(1),
    };

    (interval, ease_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn review(interval_days: i32, ease_factor: f64) -> CardReview {
        CardReview {
            review_id: 1,
            user_id: 1,
            card_id: 1,
            ease_factor,
            interval_days,
            last_rating: 3,
            reviewed_at: now() - Duration::days(interval_days as i64),
            next_review_at: now(),
        }
    }

    #[test]
    fn first_review_uses_fixed_intervals() {
        assert_eq!(schedule(None, Rating::Again, now()).interval_days, 1);
        assert_eq!(schedule(None, Rating::Hard, now()).interval_days, 1);
        assert_eq!(schedule(None, Rating::Medium, now()).interval_days, 3);

        let easy = schedule(None, Rating::Easy, now());
        assert_eq!(easy.interval_days, 7);
        assert_eq!(easy.ease_factor, 2.5);
        assert_eq!(easy.next_review_at, now() + Duration::days(7));
    }

    #[test]
    fn good_answers_grow_the_interval() {
        let prev = review(3, 2.5);
        let next = schedule(Some(&prev), Rating::Easy, now());
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(next.interval_days, 8);

        let medium = schedule(Some(&prev), Rating::Medium, now());
        assert!((medium.ease_factor - 2.44).abs() < 1e-9);
        assert_eq!(medium.interval_days, 7);
    }

    #[test]
    fn misses_reset_and_ease_has_a_floor() {
        let prev = review(20, 1.35);
        let again = schedule(Some(&prev), Rating::Again, now());
        assert_eq!(again.interval_days, 1);
        assert_eq!(again.ease_factor, MIN_EASE);

        let hard = schedule(Some(&review(10, 2.5)), Rating::Hard, now());
        assert_eq!(hard.interval_days, 8);
        assert_eq!(schedule(Some(&review(1, 2.5)), Rating::Hard, now()).interval_days, 1);
    }

    #[test]
    fn answer_rating_defaults() {
        assert_eq!(Rating::for_answer(false, Some(Rating::Easy)), Rating::Again);
        assert_eq!(Rating::for_answer(true, None), Rating::Medium);
        assert_eq!(Rating::for_answer(true, Some(Rating::Again)), Rating::Medium);
        assert_eq!(Rating::for_answer(true, Some(Rating::Hard)), Rating::Hard);
    }

    #[test]
    fn due_when_never_reviewed_or_past_due() {
        assert!(is_due(None, now()));
        let mut r = review(3, 2.5);
        r.next_review_at = now() + Duration::hours(1);
        assert!(!is_due(Some(&r), now()));
        r.next_review_at = now();
        assert!(is_due(Some(&r), now()));
    }

    #[test]
    fn rating_parses_from_lowercase_json() {
        let rating: Rating = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(rating, Rating::Easy);
    }
}

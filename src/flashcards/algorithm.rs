//! Rescheduling rules
//!
//! A reviewed card goes back into the deck with a new due date that depends
//! only on whether it was answered correctly:
//! - Correct: due again after the correct interval (one day by default)
//! - Incorrect: due again after the incorrect interval (one minute by default)
//!
//! The offset is added to the moment of review, or to the card's previous
//! due date when configured with [`RescheduleFrom::DueDate`].

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::models::Flashcard;
use crate::config::StudyConfig;

/// How the user answered a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Base timestamp the review interval is added to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RescheduleFrom {
    /// The moment the card was answered
    #[default]
    Now,
    /// The card's previous due date
    DueDate,
}

/// Calculate when a card should next be shown.
/// Saturates at the latest representable date instead of overflowing.
pub fn next_due_date(
    card: &Flashcard,
    outcome: Outcome,
    now: NaiveDateTime,
    config: &StudyConfig,
) -> NaiveDateTime {
    let base = match config.reschedule_from {
        RescheduleFrom::Now => now,
        RescheduleFrom::DueDate => card.due_date(),
    };
    interval_for(outcome, config)
        .and_then(|interval| base.checked_add_signed(interval))
        .unwrap_or_else(|| {
            log::warn!("Next due date for '{}' is out of range, clamping", card.front());
            NaiveDateTime::MAX
        })
}

/// Build the successor of `card` after a review
pub fn reschedule(
    card: &Flashcard,
    outcome: Outcome,
    now: NaiveDateTime,
    config: &StudyConfig,
) -> Flashcard {
    card.rescheduled(next_due_date(card, outcome, now, config))
}

fn interval_for(outcome: Outcome, config: &StudyConfig) -> Option<Duration> {
    let minutes = match outcome {
        Outcome::Correct => config.correct_interval_minutes,
        Outcome::Incorrect => config.incorrect_interval_minutes,
    };
    Duration::try_minutes(minutes)
}

/// Format a time span to a short human-readable string.
/// Negative spans (overdue cards) read as "now".
pub fn format_interval(span: Duration) -> String {
    let minutes = span.num_minutes();
    if minutes <= 0 {
        return "now".to_string();
    }

    let hours = span.num_hours();
    let days = span.num_days();
    if hours == 0 {
        format!("{}m", minutes)
    } else if days == 0 {
        format!("{}h", hours)
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::parse_due_date;

    fn at(text: &str) -> NaiveDateTime {
        parse_due_date(text).unwrap()
    }

    #[test]
    fn test_correct_adds_one_day_from_now() {
        let card = Flashcard::new("2020-01-01T08:00", "q", "a").unwrap();
        let now = at("2020-03-10T12:30");

        let next = reschedule(&card, Outcome::Correct, now, &StudyConfig::default());

        assert_eq!(next.due_date(), at("2020-03-11T12:30"));
        assert_eq!(next.front(), "q");
        assert_eq!(next.back(), "a");
    }

    #[test]
    fn test_incorrect_adds_one_minute_from_now() {
        let card = Flashcard::new("2020-01-01T08:00", "q", "a").unwrap();
        let now = at("2020-03-10T12:30");

        let next = reschedule(&card, Outcome::Incorrect, now, &StudyConfig::default());

        assert_eq!(next.due_date(), at("2020-03-10T12:31"));
    }

    #[test]
    fn test_reschedule_from_due_date() {
        let config = StudyConfig {
            reschedule_from: RescheduleFrom::DueDate,
            ..StudyConfig::default()
        };
        let card = Flashcard::new("2020-01-01T08:00", "q", "a").unwrap();
        let now = at("2020-03-10T12:30");

        assert_eq!(
            next_due_date(&card, Outcome::Correct, now, &config),
            at("2020-01-02T08:00")
        );
        assert_eq!(
            next_due_date(&card, Outcome::Incorrect, now, &config),
            at("2020-01-01T08:01")
        );
    }

    #[test]
    fn test_custom_intervals() {
        let config = StudyConfig {
            correct_interval_minutes: 60 * 24 * 3,
            incorrect_interval_minutes: 10,
            ..StudyConfig::default()
        };
        let card = Flashcard::new("2020-01-01T08:00", "q", "a").unwrap();
        let now = at("2020-01-01T09:00");

        assert_eq!(next_due_date(&card, Outcome::Correct, now, &config), at("2020-01-04T09:00"));
        assert_eq!(next_due_date(&card, Outcome::Incorrect, now, &config), at("2020-01-01T09:10"));
    }

    #[test]
    fn test_out_of_range_due_date_saturates() {
        let card = Flashcard::new("2020-01-01T08:00", "q", "a").unwrap();
        let now = at("2020-03-10T12:30");

        // bypasses validation, as a hand-built config can
        let huge = StudyConfig {
            correct_interval_minutes: 200_000_000_000,
            incorrect_interval_minutes: i64::MAX,
            ..StudyConfig::default()
        };
        assert_eq!(next_due_date(&card, Outcome::Correct, now, &huge), NaiveDateTime::MAX);
        assert_eq!(next_due_date(&card, Outcome::Incorrect, now, &huge), NaiveDateTime::MAX);

        let from_due = StudyConfig {
            reschedule_from: RescheduleFrom::DueDate,
            ..StudyConfig::default()
        };
        let last = Flashcard::with_due_date(NaiveDateTime::MAX, "q", "a");
        let next = reschedule(&last, Outcome::Correct, now, &from_due);
        assert_eq!(next.due_date(), NaiveDateTime::MAX);
        assert_eq!(next.front(), "q");
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::minutes(-5)), "now");
        assert_eq!(format_interval(Duration::seconds(30)), "now");
        assert_eq!(format_interval(Duration::minutes(1)), "1m");
        assert_eq!(format_interval(Duration::minutes(59)), "59m");
        assert_eq!(format_interval(Duration::hours(3)), "3h");
        assert_eq!(format_interval(Duration::days(1)), "1d");
        assert_eq!(format_interval(Duration::days(5)), "5d");
        assert_eq!(format_interval(Duration::days(14)), "2w");
        assert_eq!(format_interval(Duration::days(90)), "3mo");
        assert_eq!(format_interval(Duration::days(730)), "2y");
    }
}

//! Review sessions
//!
//! A session walks the queue front to back: every card due at the start of
//! the session is taken out, shown to the reviewer, and put back with a new
//! due date computed from the answer.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::algorithm::{reschedule, Outcome};
use super::models::Flashcard;
use super::queue::FlashcardQueue;
use crate::config::StudyConfig;

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Shows a card to the user and collects the answer
pub trait Reviewer {
    type Error;

    /// Returns `None` when the user wants to stop reviewing
    fn present(&mut self, card: &Flashcard) -> Result<Option<Outcome>, Self::Error>;
}

/// Counts for a finished session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub reviewed: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// The reviewer quit or the review limit was hit while cards were still due
    pub stopped_early: bool,
}

pub struct ReviewSession<'a, C: Clock> {
    config: &'a StudyConfig,
    clock: C,
}

impl<'a, C: Clock> ReviewSession<'a, C> {
    pub fn new(config: &'a StudyConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Review every card that is due when the session starts.
    ///
    /// If the reviewer fails, the card being shown goes back into the queue
    /// unchanged before the error is returned.
    pub fn run<R: Reviewer>(
        &self,
        queue: &mut FlashcardQueue,
        reviewer: &mut R,
    ) -> Result<SessionSummary, R::Error> {
        let cutoff = self.clock.now();
        let mut summary = SessionSummary::default();

        while queue.peek().is_some_and(|card| card.is_due(cutoff)) {
            if summary.reviewed >= self.config.max_reviews_per_session {
                log::warn!(
                    "Stopping after {} reviews, cards are still due",
                    summary.reviewed
                );
                summary.stopped_early = true;
                break;
            }

            let Some(card) = queue.extract_min() else {
                break;
            };

            let outcome = match reviewer.present(&card) {
                Ok(Some(outcome)) => outcome,
                Ok(None) => {
                    queue.insert(card);
                    summary.stopped_early = true;
                    break;
                }
                Err(e) => {
                    queue.insert(card);
                    return Err(e);
                }
            };

            let next = reschedule(&card, outcome, self.clock.now(), self.config);
            log::debug!(
                "Rescheduled '{}' from {} to {} ({:?})",
                card.front(),
                card.due_date(),
                next.due_date(),
                outcome
            );
            queue.insert(next);

            summary.reviewed += 1;
            match outcome {
                Outcome::Correct => summary.correct += 1,
                Outcome::Incorrect => summary.incorrect += 1,
            }
        }

        log::info!(
            "Review session finished: {} reviewed, {} correct, {} incorrect",
            summary.reviewed,
            summary.correct,
            summary.incorrect
        );
        Ok(summary)
    }
}

/// Number of cards due at `now`
pub fn count_due(queue: &FlashcardQueue, now: NaiveDateTime) -> usize {
    queue.iter().filter(|card| card.is_due(now)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::algorithm::RescheduleFrom;
    use crate::flashcards::models::parse_due_date;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::convert::Infallible;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    /// Clock that moves forward by a minute every time it is read
    struct TickingClock(Cell<NaiveDateTime>);

    impl Clock for TickingClock {
        fn now(&self) -> NaiveDateTime {
            let now = self.0.get();
            self.0.set(now + chrono::Duration::minutes(1));
            now
        }
    }

    struct ScriptedReviewer {
        answers: VecDeque<Option<Outcome>>,
        shown: Vec<String>,
    }

    impl ScriptedReviewer {
        fn new(answers: Vec<Option<Outcome>>) -> Self {
            Self {
                answers: answers.into(),
                shown: Vec::new(),
            }
        }
    }

    impl Reviewer for ScriptedReviewer {
        type Error = Infallible;

        fn present(&mut self, card: &Flashcard) -> Result<Option<Outcome>, Infallible> {
            self.shown.push(card.front().to_string());
            Ok(self.answers.pop_front().unwrap_or(None))
        }
    }

    struct FailingReviewer;

    impl Reviewer for FailingReviewer {
        type Error = String;

        fn present(&mut self, _card: &Flashcard) -> Result<Option<Outcome>, String> {
            Err("terminal closed".to_string())
        }
    }

    fn at(text: &str) -> NaiveDateTime {
        parse_due_date(text).unwrap()
    }

    fn sample_queue() -> FlashcardQueue {
        [
            ("2016-11-09T04:03", "card1"),
            ("2021-03-02T14:15", "card2"),
            ("2015-11-04T05:25", "card3"),
            ("2030-01-01T00:00", "future"),
        ]
        .into_iter()
        .map(|(due, front)| Flashcard::new(due, front, "back").unwrap())
        .collect()
    }

    #[test]
    fn test_reviews_due_cards_in_order() {
        let config = StudyConfig::default();
        let now = at("2024-06-01T12:00");
        let session = ReviewSession::new(&config, FixedClock(now));
        let mut queue = sample_queue();
        let mut reviewer = ScriptedReviewer::new(vec![
            Some(Outcome::Correct),
            Some(Outcome::Incorrect),
            Some(Outcome::Correct),
        ]);

        let summary = session.run(&mut queue, &mut reviewer).unwrap();

        assert_eq!(reviewer.shown, vec!["card3", "card1", "card2"]);
        assert_eq!(
            summary,
            SessionSummary { reviewed: 3, correct: 2, incorrect: 1, stopped_early: false }
        );
        assert_eq!(queue.len(), 4);

        let cards = queue.into_sorted_vec();
        assert_eq!(cards[0].front(), "card1");
        assert_eq!(cards[0].due_date(), at("2024-06-01T12:01"));
        assert_eq!(cards[1].due_date(), at("2024-06-02T12:00"));
        assert_eq!(cards[2].due_date(), at("2024-06-02T12:00"));
        assert_eq!(cards[3].front(), "future");
    }

    #[test]
    fn test_rescheduled_card_replaces_original() {
        let config = StudyConfig::default();
        let now = at("2024-06-01T12:00");
        let session = ReviewSession::new(&config, FixedClock(now));
        let original = Flashcard::new("2024-06-01T11:00", "only", "card").unwrap();
        let mut queue: FlashcardQueue = std::iter::once(original.clone()).collect();

        let mut reviewer = ScriptedReviewer::new(vec![Some(Outcome::Incorrect)]);
        session.run(&mut queue, &mut reviewer).unwrap();

        assert_eq!(queue.len(), 1);
        let remaining = queue.peek().unwrap();
        assert!(!remaining.same_card(&original));
        assert_eq!(remaining.front(), "only");
        assert_eq!(remaining.due_date(), at("2024-06-01T12:01"));
    }

    #[test]
    fn test_reschedule_uses_time_of_answer() {
        let config = StudyConfig::default();
        let session = ReviewSession::new(&config, TickingClock(Cell::new(at("2024-06-01T12:00"))));
        let mut queue: FlashcardQueue =
            std::iter::once(Flashcard::new("2024-06-01T11:00", "q", "a").unwrap()).collect();

        let mut reviewer = ScriptedReviewer::new(vec![Some(Outcome::Correct)]);
        session.run(&mut queue, &mut reviewer).unwrap();

        // cutoff read at 12:00, answer evaluated at 12:01
        assert_eq!(queue.peek().unwrap().due_date(), at("2024-06-02T12:01"));
    }

    #[test]
    fn test_nothing_due() {
        let config = StudyConfig::default();
        let session = ReviewSession::new(&config, FixedClock(at("2000-01-01T00:00")));
        let mut queue = sample_queue();
        let mut reviewer = ScriptedReviewer::new(vec![]);

        let summary = session.run(&mut queue, &mut reviewer).unwrap();

        assert_eq!(summary, SessionSummary::default());
        assert!(reviewer.shown.is_empty());
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_empty_queue() {
        let config = StudyConfig::default();
        let session = ReviewSession::new(&config, SystemClock);
        let mut queue = FlashcardQueue::new();
        let mut reviewer = ScriptedReviewer::new(vec![]);

        let summary = session.run(&mut queue, &mut reviewer).unwrap();
        assert_eq!(summary.reviewed, 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_quit_puts_card_back() {
        let config = StudyConfig::default();
        let session = ReviewSession::new(&config, FixedClock(at("2024-06-01T12:00")));
        let mut queue = sample_queue();
        let mut reviewer = ScriptedReviewer::new(vec![Some(Outcome::Correct), None]);

        let summary = session.run(&mut queue, &mut reviewer).unwrap();

        assert_eq!(summary.reviewed, 1);
        assert!(summary.stopped_early);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek().unwrap().front(), "card1");
        assert_eq!(queue.peek().unwrap().due_date(), at("2016-11-09T04:03"));
    }

    #[test]
    fn test_reviewer_error_puts_card_back() {
        let config = StudyConfig::default();
        let session = ReviewSession::new(&config, FixedClock(at("2024-06-01T12:00")));
        let mut queue = sample_queue();

        let err = session.run(&mut queue, &mut FailingReviewer).unwrap_err();

        assert_eq!(err, "terminal closed");
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek().unwrap().front(), "card3");
    }

    #[test]
    fn test_due_date_schedule_is_bounded() {
        let config = StudyConfig {
            reschedule_from: RescheduleFrom::DueDate,
            max_reviews_per_session: 5,
            ..StudyConfig::default()
        };
        let session = ReviewSession::new(&config, FixedClock(at("2024-06-01T12:00")));
        let mut queue: FlashcardQueue =
            std::iter::once(Flashcard::new("2000-01-01T00:00", "old", "card").unwrap()).collect();
        let mut reviewer = ScriptedReviewer::new(vec![Some(Outcome::Incorrect); 10]);

        let summary = session.run(&mut queue, &mut reviewer).unwrap();

        assert_eq!(summary.reviewed, 5);
        assert!(summary.stopped_early);
        assert_eq!(queue.peek().unwrap().due_date(), at("2000-01-01T00:05"));
    }

    #[test]
    fn test_count_due() {
        let queue = sample_queue();
        assert_eq!(count_due(&queue, at("2016-11-09T04:03")), 2);
        assert_eq!(count_due(&queue, at("2000-01-01T00:00")), 0);
        assert_eq!(count_due(&queue, at("2040-01-01T00:00")), 4);
    }
}

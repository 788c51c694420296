//! Data models for the flashcard system

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use thiserror::Error;

/// Field separator used when a card is rendered as a deck line
pub const FIELD_SEPARATOR: char = '\t';

/// `%.f` also matches when no fractional part is present
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Invalid due date '{input}': {source}")]
    InvalidDueDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("No flashcards in the queue")]
    EmptyQueue,
}

pub type Result<T> = std::result::Result<T, FlashcardError>;

/// A flashcard with question (front) and answer (back), due at a local time.
///
/// Cards are immutable. Rescheduling builds a new card through
/// [`Flashcard::rescheduled`]. Ordering only looks at the due date, so two
/// cards with different content but the same due date compare equal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    due_date: NaiveDateTime,
    front: String,
    back: String,
}

impl Flashcard {
    /// Parse `due_date` (e.g. `2019-11-04T13:03`, seconds and fractions optional)
    pub fn new(due_date: &str, front: impl Into<String>, back: impl Into<String>) -> Result<Self> {
        Ok(Self::with_due_date(parse_due_date(due_date)?, front, back))
    }

    pub fn with_due_date(
        due_date: NaiveDateTime,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            due_date,
            front: front.into(),
            back: back.into(),
        }
    }

    pub fn due_date(&self) -> NaiveDateTime {
        self.due_date
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    /// Check if the card is due for review at `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.due_date <= now
    }

    /// Same content, new due date
    pub fn rescheduled(&self, due_date: NaiveDateTime) -> Self {
        Self::with_due_date(due_date, self.front.clone(), self.back.clone())
    }

    /// True if `self` and `other` carry the same due date and content
    pub fn same_card(&self, other: &Flashcard) -> bool {
        self.due_date == other.due_date && self.front == other.front && self.back == other.back
    }
}

/// Parse an ISO-8601 local date-time. Minute precision is the minimum;
/// seconds and fractional seconds are accepted when present.
pub fn parse_due_date(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, SECONDS_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, MINUTES_FORMAT))
        .map_err(|source| FlashcardError::InvalidDueDate {
            input: input.to_string(),
            source,
        })
}

/// Render a due date the way it is stored in deck files: seconds are left out
/// when zero, fractional seconds only appear when non-zero.
pub fn format_due_date(due_date: NaiveDateTime) -> String {
    if due_date.second() == 0 && due_date.nanosecond() == 0 {
        due_date.format(MINUTES_FORMAT).to_string()
    } else {
        due_date.format(SECONDS_FORMAT).to_string()
    }
}

impl fmt::Display for Flashcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            format_due_date(self.due_date),
            self.front,
            self.back,
            sep = FIELD_SEPARATOR
        )
    }
}

impl PartialEq for Flashcard {
    fn eq(&self, other: &Self) -> bool {
        self.due_date == other.due_date
    }
}

impl Eq for Flashcard {}

impl PartialOrd for Flashcard {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Flashcard {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_date.cmp(&other.due_date)
    }
}

//! Flashcards ordered by next due date
//!
//! This module provides:
//! - Immutable flashcards ordered by due date
//! - A ternary min-heap that always yields the earliest due card
//! - Rescheduling rules for correct and incorrect answers
//! - Line-oriented deck files
//! - Review sessions over the due cards

pub mod algorithm;
pub mod models;
pub mod queue;
pub mod session;
pub mod storage;

pub use algorithm::{Outcome, RescheduleFrom};
pub use models::*;
pub use queue::{FlashcardQueue, TernaryHeap};
pub use session::{Clock, ReviewSession, Reviewer, SessionSummary, SystemClock};
pub use storage::{DeckFile, FlashcardStorageError, ParsePolicy};

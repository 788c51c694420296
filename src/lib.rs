//! Spaced review of flashcards ordered by due date

pub mod config;
pub mod flashcards;

pub use config::{ConfigError, StudyConfig};
pub use flashcards::{Flashcard, FlashcardError, FlashcardQueue, TernaryHeap};

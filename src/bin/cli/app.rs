use std::path::Path;

use anyhow::{Context, Result};

use flashdue_lib::config::StudyConfig;
use flashdue_lib::flashcards::{
    DeckFile, Flashcard, FlashcardQueue, ReviewSession, Reviewer, SessionSummary, SystemClock,
};

/// Shared application state for CLI commands
pub struct App {
    pub config: StudyConfig,
    pub deck: DeckFile,
    pub queue: FlashcardQueue,
}

impl App {
    /// Load the config and the deck at `deck_path`
    pub fn open(deck_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => StudyConfig::default_path().context("Failed to locate config directory")?,
        };
        let config = StudyConfig::load(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        let deck = DeckFile::new(deck_path);
        let queue = deck
            .load(config.parse_policy())
            .with_context(|| format!("Failed to load deck {}", deck_path.display()))?;

        Ok(Self { config, deck, queue })
    }

    pub fn save(&mut self) -> Result<()> {
        self.deck
            .save(&mut self.queue)
            .with_context(|| format!("Failed to save deck {}", self.deck.path().display()))
    }

    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        self.deck
            .save_to(&mut self.queue, path)
            .with_context(|| format!("Failed to save deck {}", path.display()))
    }

    /// Run one review pass over the due cards
    pub fn quiz<R>(&mut self, reviewer: &mut R) -> Result<SessionSummary>
    where
        R: Reviewer<Error = std::io::Error>,
    {
        let session = ReviewSession::new(&self.config, SystemClock);
        session
            .run(&mut self.queue, reviewer)
            .context("Review session failed")
    }

    /// Run one review pass and save the deck, even when the pass fails
    /// partway through, so answers already given are kept
    pub fn quiz_and_save<R>(&mut self, reviewer: &mut R) -> Result<SessionSummary>
    where
        R: Reviewer<Error = std::io::Error>,
    {
        let summary = self.quiz(reviewer);
        self.save()?;
        summary
    }

    /// All cards, earliest due first
    pub fn sorted_cards(&self) -> Vec<Flashcard> {
        self.queue.clone().into_sorted_vec()
    }
}

//! Storage operations for flashcard decks
//!
//! A deck is a plain text file with one card per line:
//! ```text
//! 2019-11-04T13:03<TAB>front text<TAB>back text
//! ```
//! Seconds and fractional seconds may follow the minutes. Front and back
//! text never contain a tab.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::{Flashcard, FlashcardError, FIELD_SEPARATOR};
use super::queue::FlashcardQueue;

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    Card {
        line: usize,
        #[source]
        source: FlashcardError,
    },

    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// What to do with a deck line that can't be turned into a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Fail the whole load on the first bad line
    #[default]
    Strict,
    /// Log and skip bad lines
    Skip,
}

/// Parse a single deck line. `line_number` is 1-based and only used in errors.
pub fn parse_line(line: &str, line_number: usize) -> Result<Flashcard> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != 3 {
        return Err(FlashcardStorageError::MalformedLine {
            line: line_number,
            reason: format!("expected 3 tab-separated fields, found {}", fields.len()),
        });
    }

    Flashcard::new(fields[0].trim(), fields[1].trim(), fields[2].trim()).map_err(|source| {
        FlashcardStorageError::Card {
            line: line_number,
            source,
        }
    })
}

/// Read every card from `reader` into a new queue. Blank lines are ignored.
pub fn parse_deck<R: BufRead>(reader: R, policy: ParsePolicy) -> Result<FlashcardQueue> {
    let mut queue = FlashcardQueue::new();
    let mut skipped = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line, index + 1) {
            Ok(card) => queue.insert(card),
            Err(e) if policy == ParsePolicy::Skip => {
                log::warn!("Skipping deck line: {}", e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log::debug!("Parsed {} cards ({} skipped)", queue.len(), skipped);
    Ok(queue)
}

/// Write every card to `writer` in due order.
///
/// The queue is drained to get that order and then refilled, so it holds
/// the same cards afterwards. Cards sharing a due date may come out in a
/// different order on the next drain. The queue is refilled even when a
/// write fails.
pub fn write_deck<W: Write>(queue: &mut FlashcardQueue, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    let mut restored = FlashcardQueue::with_capacity(queue.capacity());
    let mut outcome = Ok(());

    while let Some(card) = queue.extract_min() {
        if outcome.is_ok() {
            outcome = writeln!(writer, "{}", card);
        }
        restored.insert(card);
    }
    *queue = restored;

    outcome?;
    writer.flush()?;
    Ok(())
}

/// A deck stored on disk
pub struct DeckFile {
    path: PathBuf,
}

impl DeckFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the deck. A missing file is an empty deck.
    pub fn load(&self, policy: ParsePolicy) -> Result<FlashcardQueue> {
        if !self.path.exists() {
            log::info!("Deck {:?} does not exist yet, starting empty", self.path);
            return Ok(FlashcardQueue::new());
        }

        let file = fs::File::open(&self.path)?;
        let queue = parse_deck(BufReader::new(file), policy)?;
        log::info!("Loaded {} cards from {:?}", queue.len(), self.path);
        Ok(queue)
    }

    /// Save the deck, replacing the file only once every card is written
    pub fn save(&self, queue: &mut FlashcardQueue) -> Result<()> {
        self.save_to(queue, &self.path)
    }

    /// Save the deck to some other path (e.g. an export)
    pub fn save_to(&self, queue: &mut FlashcardQueue, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = temp_path_for(path);
        let file = fs::File::create(&temp_path)?;
        if let Err(e) = write_deck(queue, file) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        fs::rename(&temp_path, path)?;

        log::info!("Saved {} cards to {:?}", queue.len(), path);
        Ok(())
    }
}

/// `cards.txt` -> `cards.txt.tmp`, so distinct targets never share a temp file
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

use anyhow::{bail, Result};

use flashdue_lib::flashcards::models::{format_due_date, parse_due_date};
use flashdue_lib::flashcards::{Clock, Flashcard, SystemClock};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    front: &str,
    back: &str,
    due: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    for (name, text) in [("front", front), ("back", back)] {
        if text.contains(['\t', '\n', '\r']) {
            bail!("The {} text may not contain tabs or line breaks", name);
        }
        if text.trim().is_empty() {
            bail!("The {} text may not be empty", name);
        }
    }

    let due_date = match due {
        Some(text) => parse_due_date(text)?,
        None => SystemClock.now(),
    };
    let card = Flashcard::with_due_date(due_date, front.trim(), back.trim());
    app.queue.insert(card.clone());
    app.save()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added \"{}\" due {}", card.front(), format_due_date(card.due_date()));
            println!("  Deck now has {} cards", app.queue.len());
        }
    }

    Ok(())
}

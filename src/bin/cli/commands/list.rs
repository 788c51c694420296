use anyhow::Result;

use flashdue_lib::flashcards::algorithm::format_interval;
use flashdue_lib::flashcards::models::format_due_date;
use flashdue_lib::flashcards::session::count_due;
use flashdue_lib::flashcards::{Clock, SystemClock};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, due_only: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = SystemClock.now();
    let cards: Vec<_> = app
        .sorted_cards()
        .into_iter()
        .filter(|card| !due_only || card.is_due(now))
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = cards
                .iter()
                .map(|card| {
                    serde_json::json!({
                        "dueDate": format_due_date(card.due_date()),
                        "dueIn": format_interval(card.due_date() - now),
                        "isDue": card.is_due(now),
                        "front": card.front(),
                        "back": card.back(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards{}.", if due_only { " due" } else { "" });
                return Ok(());
            }

            let front_width = cards
                .iter()
                .map(|c| c.front().chars().count())
                .max()
                .unwrap_or(5)
                .clamp(5, 40);

            println!("{:<16} {:<5} {:<fw$} {}", "Due", "In", "Front", "Back", fw = front_width);
            for card in &cards {
                let due_in = format_interval(card.due_date() - now);
                let due_in = if card.is_due(now) {
                    paint(&format!("{:<5}", due_in), Color::YELLOW, use_color)
                } else {
                    format!("{:<5}", due_in)
                };
                println!(
                    "{:<16} {} {:<fw$} {}",
                    card.due_date().format("%Y-%m-%d %H:%M"),
                    due_in,
                    truncate(card.front(), front_width),
                    card.back(),
                    fw = front_width
                );
            }
            println!();
            println!("{} cards, {} due", app.queue.len(), count_due(&app.queue, now));
        }
    }

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

use std::io;

use anyhow::Result;

use crate::app::App;
use crate::render::terminal::TerminalReviewer;
use crate::OutputFormat;

pub fn run(app: &mut App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut reviewer = TerminalReviewer::new(stdin.lock(), io::stdout(), use_color);
    let summary = app.quiz_and_save(&mut reviewer)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            if summary.reviewed > 0 {
                println!(
                    "Reviewed {} cards ({} correct, {} incorrect).",
                    summary.reviewed, summary.correct, summary.incorrect
                );
            }
            if !summary.stopped_early {
                println!("No cards are waiting to be studied!");
            }
        }
    }

    Ok(())
}

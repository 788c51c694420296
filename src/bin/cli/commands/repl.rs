use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::app::App;
use crate::render::terminal::TerminalReviewer;
use crate::OutputFormat;

const HELP: &str = "Commands: quiz, list, save [PATH], help, exit";

/// Line-oriented command loop. Reads until `exit` or end of input.
pub fn run(app: &mut App, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    println!("Time to practice flashcards! You'll see the front of each due card,");
    println!("answer in your head, then check the back. Cards you miss come back sooner.");
    println!("{}", HELP);

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            None => continue,
            Some("quiz") => {
                let result = {
                    let mut reviewer = TerminalReviewer::new(&mut input, io::stdout(), use_color);
                    app.quiz(&mut reviewer)
                };
                match result {
                    Ok(summary) if !summary.stopped_early => {
                        println!("No cards are waiting to be studied!")
                    }
                    Ok(_) => {}
                    // answers so far stay in the deck until the next save
                    Err(e) => println!("Review stopped: {:#}", e),
                }
            }
            Some("list") => {
                super::list::run(app, false, &OutputFormat::Plain, use_color)?;
            }
            Some("save") => {
                let result = match words.next() {
                    Some(path) => app.save_to(Path::new(path)),
                    None => app.save(),
                };
                match result {
                    Ok(()) => println!("Saved {} cards.", app.queue.len()),
                    // a failed save shouldn't end the session
                    Err(e) => println!("Could not save: {:#}", e),
                }
            }
            Some("help") => println!("{}", HELP),
            Some("exit") | Some("quit") => break,
            Some(other) => println!("Unknown command '{}'. {}", other, HELP),
        }
    }

    println!("Goodbye!");
    Ok(())
}

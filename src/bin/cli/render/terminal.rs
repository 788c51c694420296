use std::io::{self, BufRead, Write};

use flashdue_lib::flashcards::{Flashcard, Outcome, Reviewer};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Reviews cards on a line-oriented terminal: front, wait for return, back,
/// then ask for the answer
pub struct TerminalReviewer<R, W> {
    input: R,
    output: W,
    use_color: bool,
}

impl<R: BufRead, W: Write> TerminalReviewer<R, W> {
    pub fn new(input: R, output: W, use_color: bool) -> Self {
        Self {
            input,
            output,
            use_color,
        }
    }

    /// Next input line without its newline, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Reviewer for TerminalReviewer<R, W> {
    type Error = io::Error;

    fn present(&mut self, card: &Flashcard) -> io::Result<Option<Outcome>> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", paint(card.front(), Color::BOLD, self.use_color))?;
        writeln!(self.output, "{}", paint("[Press return for back of card]", Color::GRAY, self.use_color))?;
        self.output.flush()?;
        if self.read_line()?.is_none() {
            return Ok(None);
        }

        writeln!(self.output, "{}", paint(card.back(), Color::CYAN, self.use_color))?;
        loop {
            writeln!(
                self.output,
                "Press 1 if you got the card correct, 2 if you got it wrong, q to stop."
            )?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match answer.trim() {
                "1" => return Ok(Some(Outcome::Correct)),
                "2" => return Ok(Some(Outcome::Incorrect)),
                "q" | "quit" => return Ok(None),
                other => writeln!(self.output, "Unrecognized answer '{}'", other)?,
            }
        }
    }
}

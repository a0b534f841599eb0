//! Line-based terminal front end

use std::io::{self, BufRead, Write};

use ak_core::{GamePhase, Prompt};

/// Reads decisions from a line source and writes text to a sink
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    pub fn say_all(&mut self, lines: impl IntoIterator<Item = String>) -> io::Result<()> {
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    /// Print `question` and read one trimmed line. `None` on end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        // bytes that are not UTF-8 become replacement characters, which no
        // prompt accepts
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Ask a yes/no question until the answer is recognised
    pub fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask(&format!("{question} (y/n): "))? else {
                return Ok(None);
            };
            match parse_yes_no(&answer) {
                Some(yes) => return Ok(Some(yes)),
                None => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Show a game prompt and read the player's decision.
    ///
    /// Returns `Ok(None)` on end of input; a line that is not a number is
    /// passed on as `Some(None)`.
    pub fn choose(&mut self, phase: GamePhase, prompt: &Prompt) -> io::Result<Option<Option<i32>>> {
        self.say("")?;
        if matches!(phase, GamePhase::ConfirmQuit | GamePhase::ConfirmBoss) {
            return Ok(self
                .confirm(&prompt.title)?
                .map(|yes| Some(if yes { 1 } else { 2 })));
        }

        self.say(&prompt.title)?;

        for (i, option) in prompt.options.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, option))?;
        }
        if prompt.allows_cancel {
            self.say("0. Cancel")?;
        }

        let Some(answer) = self.ask("Enter choice: ")? else {
            return Ok(None);
        };
        Ok(Some(answer.parse::<i32>().ok()))
    }
}

/// Map y/yes/n/no (any case) to a boolean
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

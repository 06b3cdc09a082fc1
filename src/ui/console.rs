//! Terminal presenter: stdout rendering with an optional typewriter effect,
//! stdin prompting with reprompt-on-invalid selection handling.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::engine::errors::EngineError;
use crate::ui::format::DIVIDER;
use crate::ui::Presenter;

pub struct ConsolePresenter {
    /// Per-character delay for narration and dialogue text. Zero disables
    /// the typewriter effect.
    delay: Duration,
}

impl ConsolePresenter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    fn slow_print(&self, text: &str) -> Result<(), EngineError> {
        let mut out = io::stdout().lock();
        if self.delay.is_zero() {
            writeln!(out, "{}", text)?;
            return Ok(());
        }
        for ch in text.chars() {
            write!(out, "{}", ch)?;
            out.flush()?;
            thread::sleep(self.delay);
        }
        writeln!(out)?;
        Ok(())
    }

    fn read_line(&self) -> Result<String, EngineError> {
        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Err(EngineError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )));
        }
        Ok(line.trim().to_string())
    }
}

impl Presenter for ConsolePresenter {
    fn heading(&mut self, text: &str) -> Result<(), EngineError> {
        println!("{}\n{}\n{}", DIVIDER, text, DIVIDER);
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), EngineError> {
        println!("\n{}", text);
        Ok(())
    }

    fn narration(&mut self, text: &str) -> Result<(), EngineError> {
        println!();
        self.slow_print(text)?;
        self.acknowledge()
    }

    fn dialogue(&mut self, speaker: &str, text: &str) -> Result<(), EngineError> {
        println!("\n[{}]", speaker);
        self.slow_print(&format!("\"{}\"", text))?;
        self.acknowledge()
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize, EngineError> {
        loop {
            for (i, option) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            print!("\n{}", prompt);
            io::stdout().flush()?;
            match self.read_line()?.parse::<usize>() {
                Ok(choice) if choice >= 1 && choice <= options.len() => return Ok(choice - 1),
                Ok(_) => println!("Invalid choice. Try again."),
                Err(_) => println!("Please enter a number."),
            }
        }
    }

    fn acknowledge(&mut self) -> Result<(), EngineError> {
        print!("\n(Press Enter to continue...)");
        io::stdout().flush()?;
        self.read_line()?;
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, EngineError> {
        print!("{}", prompt);
        io::stdout().flush()?;
        self.read_line()
    }
}

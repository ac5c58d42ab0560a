// src/ui.rs
//! Terminal input and output behind a trait so the interview flows can run
//! against a scripted console in tests.

use std::io::{self, Write};

use colored::Colorize;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warn,
    Error,
}

/// I/O seam for the flows. `prompt` and `prompt_multiline` return `None` on
/// end of input so callers can wind the session down instead of spinning on
/// empty reads.
pub trait Console {
    fn say(&mut self, text: &str);
    fn notify(&mut self, notice: Notice, message: &str);
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>>;
    /// Read lines until a blank one. `None` only when input ends before any
    /// content arrived.
    fn prompt_multiline(&mut self, label: &str) -> io::Result<Option<String>>;
}

/// Real stdin/stdout console.
pub struct Terminal;

impl Terminal {
    fn read_line(&self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf)? == 0 {
            return Ok(None); // EOF
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Console for Terminal {
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn notify(&mut self, notice: Notice, message: &str) {
        match notice {
            Notice::Info => println!("{} {}", "•".blue(), message),
            Notice::Warn => println!("{} {}", "!".yellow().bold(), message),
            Notice::Error => eprintln!("{} {}", "✗".red().bold(), message),
        }
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{} ", label.bold());
        io::stdout().flush()?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    fn prompt_multiline(&mut self, label: &str) -> io::Result<Option<String>> {
        println!("{} {}", label.bold(), "(finish with an empty line)".dimmed());
        let mut lines: Vec<String> = Vec::new();
        let mut closed = false;
        loop {
            match self.read_line()? {
                None => {
                    closed = true;
                    break;
                }
                Some(line) if line.trim().is_empty() => break,
                Some(line) => lines.push(line),
            }
        }
        if lines.is_empty() && closed {
            return Ok(None);
        }
        Ok(Some(lines.join("\n")))
    }
}

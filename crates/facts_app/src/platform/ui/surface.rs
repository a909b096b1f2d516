use std::io::{self, Write};

use super::render::SurfaceCommand;
use crate::platform::config::OutputFormat;

/// Where rendered results go. Injected into the app so the dispatch loop
/// never reaches for a global output.
pub trait ResultsSurface {
    fn apply(&mut self, command: SurfaceCommand) -> io::Result<()>;
}

/// Writes results to a terminal stream, skipping repeats of what is already
/// on screen.
pub struct TerminalSurface<W: Write> {
    out: W,
    format: OutputFormat,
    shown: Option<SurfaceCommand>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            shown: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultsSurface for TerminalSurface<W> {
    fn apply(&mut self, command: SurfaceCommand) -> io::Result<()> {
        if self.shown.as_ref() == Some(&command) {
            return Ok(());
        }
        match &command {
            SurfaceCommand::Clear => {}
            SurfaceCommand::ShowText(text) => {
                writeln!(self.out, "{}", format_text(self.format, text))?;
            }
            SurfaceCommand::ShowFacts(facts) => {
                writeln!(self.out, "{}", format_facts(self.format, facts))?;
            }
        }
        self.out.flush()?;
        self.shown = Some(command);
        Ok(())
    }
}

fn format_text(format: OutputFormat, text: &str) -> String {
    match format {
        OutputFormat::Text => text.to_string(),
        OutputFormat::Html => escape_html(text),
    }
}

fn format_facts(format: OutputFormat, facts: &[String]) -> String {
    match format {
        OutputFormat::Text => facts
            .iter()
            .map(|fact| format!("- {fact}"))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Html => {
            let items: String = facts
                .iter()
                .map(|fact| format!("<li>{}</li>", escape_html(fact)))
                .collect();
            format!("<ul>{items}</ul>")
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub mod json;
pub mod text;

use std::io::Write;

use crate::inference::RealClassification;
use crate::model::history::History;
use crate::session::{SystemStatus, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn format_percent(v: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, v * 100.0)
}

/// Writes session events to `out` in the selected format. Write errors are
/// returned so the caller can stop on a closed pipe.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn tick(&mut self, outcome: &TickOutcome) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Text => text::render_tick(outcome),
            OutputFormat::Json => json::render_tick(outcome)?,
        };
        writeln!(self.out, "{line}")
    }

    pub fn real_result(
        &mut self,
        result: &RealClassification,
        outcome: &TickOutcome,
    ) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Text => text::render_real_result(result, outcome),
            OutputFormat::Json => json::render_real_result(result, outcome)?,
        };
        writeln!(self.out, "{line}")
    }

    pub fn notice(&mut self, message: &str) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Text => format!("! {message}"),
            OutputFormat::Json => json::render_notice(message)?,
        };
        writeln!(self.out, "{line}")
    }

    pub fn status(&mut self, status: &SystemStatus) -> std::io::Result<()> {
        let line = match self.format {
            OutputFormat::Text => text::render_status(status),
            OutputFormat::Json => json::render_status(status)?,
        };
        writeln!(self.out, "{line}")
    }

    pub fn history(&mut self, history: &History) -> std::io::Result<()> {
        let block = match self.format {
            OutputFormat::Text => text::render_history(history),
            OutputFormat::Json => json::render_history(history)?,
        };
        writeln!(self.out, "{block}")
    }

    pub fn raw(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;

//! Per-line diagnostics and the sinks that collect them.

use log::Level;
use std::fmt;

/// A non-fatal problem found while processing input or writing a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,

    /// 1-based input line, absent for phase or report level failures.
    pub line: Option<usize>,

    /// The offending line as read.
    pub raw: Option<String>,

    pub message: String,
}

impl Diagnostic {
    /// A rejected input line.
    pub fn line(line: usize, raw: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            level: Level::Error,
            line: Some(line),
            raw: Some(raw.into()),
            message: message.into(),
        }
    }

    /// A failure not tied to a single line.
    pub fn general(message: impl Into<String>) -> Self {
        Diagnostic {
            level: Level::Error,
            line: None,
            raw: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(raw) = &self.raw {
            write!(f, ": {}", raw)?;
        }
        Ok(())
    }
}

/// Destination for diagnostics. Write-only from the analyzer's side.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        log::log!(
            target: "webshop_analyzer::diagnostics",
            diagnostic.level,
            "{}",
            diagnostic
        );
    }
}

/// Keeps diagnostics in memory.
impl DiagnosticSink for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

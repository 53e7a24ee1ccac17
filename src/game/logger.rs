//! Narration logger for game events
//!
//! The structured record of a game is the [`crate::events::EventLog`]; this
//! logger produces the human-readable play-by-play. Lines go to stdout, to
//! an in-memory capture (for tests and UI panels), or both.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// No output during the game
    Silent = 0,
    /// Game outcome and bankruptcies
    Minimal = 1,
    /// Turns, rolls, purchases and payments
    #[default]
    Normal = 2,
    /// Every move, pass and queued auction
    Verbose = 3,
}

/// How printed lines are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Where narration goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only, print nothing
    Memory,
    Both,
}

impl OutputMode {
    fn prints(self) -> bool {
        matches!(self, OutputMode::Stdout | OutputMode::Both)
    }

    fn captures(self) -> bool {
        matches!(self, OutputMode::Memory | OutputMode::Both)
    }
}

/// A captured narration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Play-by-play logger owned by the game state
///
/// Only the settings are serialized. Captured lines belong to the running
/// process and are neither saved nor cloned.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,

    #[serde(skip)]
    captured: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..Self::default()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Lines captured so far, at every level regardless of verbosity
    pub fn captured(&self) -> Vec<LogEntry> {
        self.captured.borrow().clone()
    }

    /// Drain the capture buffer
    pub fn take_captured(&mut self) -> Vec<LogEntry> {
        self.captured.get_mut().drain(..).collect()
    }

    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, message);
    }

    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message);
    }

    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message);
    }

    #[inline]
    fn emit(&self, level: VerbosityLevel, message: &str) {
        if self.output_mode.captures() {
            self.captured.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
        if !self.output_mode.prints() || level > self.verbosity {
            return;
        }
        match self.output_format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "level": level, "message": message }));
            }
            // Outcome lines flush left, play-by-play indented under them
            OutputFormat::Text if level == VerbosityLevel::Minimal => println!("{message}"),
            OutputFormat::Text => println!("  {message}"),
        }
    }
}

impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            captured: RefCell::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(logger.output_mode(), OutputMode::Stdout);
        assert!(logger.captured().is_empty());
    }

    #[test]
    fn test_capture_ignores_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.set_output_mode(OutputMode::Memory);

        logger.normal("Alice rolls 3 + 4");
        logger.minimal("Bob is bankrupt");
        logger.verbose("Boardwalk queued for auction");

        let lines = logger.take_captured();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].message, "Alice rolls 3 + 4");
        assert_eq!(lines[1].level, VerbosityLevel::Minimal);
        assert!(logger.captured().is_empty());
    }

    #[test]
    fn test_clone_and_serde_drop_capture() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.set_output_mode(OutputMode::Memory);
        logger.normal("kept");

        let copy = logger.clone();
        assert_eq!(copy.verbosity(), VerbosityLevel::Verbose);
        assert_eq!(copy.output_mode(), OutputMode::Memory);
        assert!(copy.captured().is_empty());

        let json = serde_json::to_string(&logger).unwrap();
        assert!(!json.contains("kept"));
        let restored: GameLogger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.verbosity(), VerbosityLevel::Verbose);
        assert!(restored.captured().is_empty());
    }
}

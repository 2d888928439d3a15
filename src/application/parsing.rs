//! # Command Parsing
//!
//! Classifies raw chat text into a [`Command`]. Only text starting with the trigger
//! prefix is considered at all; the remainder is either the launch keyword or a
//! number of seconds to wait.

use crate::domain::config::BotConfig;
use crate::domain::types::Command;

#[derive(Debug, Clone)]
pub struct CommandParser {
    trigger: char,
    launch_keyword: String,
    max_wait_secs: u64,
}

impl CommandParser {
    pub fn new(trigger: char, launch_keyword: impl Into<String>, max_wait_secs: u64) -> Self {
        Self {
            trigger,
            launch_keyword: launch_keyword.into(),
            max_wait_secs,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.trigger, config.launch_keyword.clone(), config.max_wait_secs)
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Whether the text starts with the trigger prefix.
    pub fn is_addressed(&self, text: &str) -> bool {
        text.starts_with(self.trigger)
    }

    pub fn parse(&self, text: &str) -> Command {
        let Some(rest) = text.trim_end().strip_prefix(self.trigger) else {
            return Command::Unrecognized;
        };

        if !self.launch_keyword.is_empty() && rest.eq_ignore_ascii_case(&self.launch_keyword) {
            return Command::LaunchInfoQuery;
        }

        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            // Digit strings too long for u64 are still "a lot of seconds".
            let seconds = rest.parse::<u64>().unwrap_or(u64::MAX);
            return Command::NumericWait(seconds.min(self.max_wait_secs));
        }

        Command::Unrecognized
    }
}

//! Sequence configuration parser
//!
//! Parses `sequences.toml` into named sequence definitions.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::sequencer::params::{Mode, TickParams};
use crate::sequencer::range::{validate_step, NormalizedRange};

/// Global configuration shared across all sequences
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Sequence used when the CLI is invoked without `--sequence`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sequence: Option<String>,
}

/// A single named sequence definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Unique name for this sequence
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Advance mode
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Range start (default 0)
    #[serde(default)]
    pub start: i64,
    /// Range end (default 6)
    #[serde(default = "default_end")]
    pub end: i64,
    /// Advance magnitude per tick (default 1)
    #[serde(default = "default_step")]
    pub step: i64,
    /// Shared state-key hint; blank means no cross-caller sharing
    #[serde(default)]
    pub group_key: String,
}

const fn default_mode() -> Mode {
    Mode::Increment
}

const fn default_end() -> i64 {
    6
}

const fn default_step() -> i64 {
    1
}

impl SequenceConfig {
    /// Build tick parameters from this definition for the given caller.
    #[must_use]
    pub fn to_params(&self, caller_id: Option<&str>) -> TickParams {
        TickParams {
            mode: self.mode,
            start: self.start,
            end: self.end,
            step: self.step,
            group_key: self.group_key.clone(),
            caller_id: caller_id.map(ToString::to_string),
            reset: false,
            reset_cycle_only: false,
        }
    }
}

/// Top-level configuration parsed from sequences.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TickseqConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Sequence definitions
    #[serde(rename = "sequence")]
    pub sequences: Vec<SequenceConfig>,
}

impl TickseqConfig {
    /// Parse a sequences.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse sequences.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse sequences.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Find a sequence by name
    #[must_use]
    pub fn get_sequence(&self, name: &str) -> Option<&SequenceConfig> {
        self.sequences.iter().find(|s| s.name == name)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        // Check for duplicate sequence names
        let mut seen = HashSet::new();
        for sequence in &self.sequences {
            if !seen.insert(&sequence.name) {
                bail!("Duplicate sequence name: '{}'", sequence.name);
            }
        }

        // Check that sequence names are non-empty
        for sequence in &self.sequences {
            if sequence.name.trim().is_empty() {
                bail!("Sequence name cannot be empty");
            }
        }

        // Surface core parameter errors at load time rather than on the
        // first tick
        for sequence in &self.sequences {
            NormalizedRange::new(sequence.start, sequence.end)
                .with_context(|| format!("in sequence '{}'", sequence.name))?;
            validate_step(sequence.step)
                .with_context(|| format!("in sequence '{}'", sequence.name))?;
        }

        // Check that default_sequence references an existing definition
        if let Some(default) = &self.global.default_sequence {
            if self.get_sequence(default).is_none() {
                bail!("default_sequence references unknown sequence '{default}'");
            }
        }

        Ok(())
    }
}

//! Tickseq - stateful cyclic integer sequencer
//!
//! CLI entry point: drives a configured sequence for a number of ticks,
//! printing bare values on stdout and a formatted run on stderr.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tickseq::cli::TickDisplay;
use tickseq::config::{SequenceConfig, TickseqConfig};
use tickseq::log::{JsonlLogger, TickRecord};
use tickseq::sequencer::{resolve_state_key, Sequencer, TickParams};

/// Stateful cyclic integer sequencer
///
/// Drives named sequences from sequences.toml tick by tick: fixed,
/// increment, decrement, or randomize over an inclusive integer range,
/// with cycle counting and shared group keys.
#[derive(Parser, Debug)]
#[command(name = "tickseq", version, about)]
struct Cli {
    /// Name of the sequence to drive (defaults to global.default_sequence)
    #[arg(long)]
    sequence: Option<String>,

    /// Number of ticks to emit
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Path to the sequences.toml configuration file
    #[arg(long, default_value = "sequences.toml")]
    config: PathBuf,

    /// Directory for log files (.tickseq by default)
    #[arg(long, default_value = ".tickseq")]
    log_dir: PathBuf,

    /// Caller identity, used as the state key when the sequence has no group key
    #[arg(long, default_value = "cli")]
    caller: String,

    /// Fully reset the counter before the first tick
    #[arg(long)]
    reset: bool,

    /// Restart cycle reporting before the first tick, leaving the value unchanged
    #[arg(long)]
    reset_cycle: bool,
}

/// Resolve which sequence to drive: the `--sequence` flag wins, then the
/// config's `default_sequence`.
fn resolve_sequence_name(requested: Option<&str>, config: &TickseqConfig) -> Result<String> {
    requested
        .map(ToString::to_string)
        .or_else(|| config.global.default_sequence.clone())
        .context("No sequence requested and no default_sequence configured")
}

/// Drive `ticks` ticks of a sequence definition through the sequencer.
///
/// The reset flags apply to the first tick only, matching a host that
/// toggles a reset switch once and then keeps ticking.
fn run_ticks(
    sequencer: &Sequencer,
    definition: &SequenceConfig,
    caller: &str,
    ticks: u32,
    reset: bool,
    reset_cycle: bool,
) -> Result<Vec<TickRecord>> {
    let base = definition.to_params(Some(caller));
    let state_key = resolve_state_key(&base.group_key, base.caller_id.as_deref());

    let mut records = Vec::with_capacity(ticks as usize);
    for n in 1..=ticks {
        let params = TickParams {
            reset: reset && n == 1,
            reset_cycle_only: reset_cycle && n == 1,
            ..base.clone()
        };
        let tick = sequencer
            .next(&params)
            .with_context(|| format!("Failed to advance sequence '{}'", definition.name))?;

        records.push(TickRecord {
            tick: n,
            sequence: definition.name.clone(),
            state_key: state_key.clone(),
            mode: definition.mode,
            value: tick.value,
            cycle: tick.cycle,
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(records)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = TickseqConfig::from_path(&cli.config)
        .with_context(|| format!("Failed to load config from '{}'", cli.config.display()))?;

    // Validate the requested sequence exists
    let name = resolve_sequence_name(cli.sequence.as_deref(), &config)?;
    let definition = config.get_sequence(&name).with_context(|| {
        format!(
            "Unknown sequence '{name}'. Available sequences: {}",
            available_sequence_names(&config)
        )
    })?;

    // Initialize
    let sequencer = Sequencer::new();
    let logger = JsonlLogger::new(&cli.log_dir).context("Failed to initialize JSONL logger")?;
    let display = TickDisplay::new(&definition.name);

    display.print_header(
        definition.mode,
        definition.start,
        definition.end,
        definition.step,
    );

    // Drive the run
    let records = run_ticks(
        &sequencer,
        definition,
        &cli.caller,
        cli.ticks,
        cli.reset,
        cli.reset_cycle,
    )?;

    let mut prev_cycle = None;
    for record in &records {
        display.render_tick(record, prev_cycle);
        prev_cycle = Some(record.cycle);

        logger
            .append(record)
            .context("Failed to write to JSONL log")?;

        // Bare values on stdout for piping
        println!("{}", record.value);
    }

    display.render_summary(&records);

    Ok(())
}

/// Format available sequence names for error messages.
fn available_sequence_names(config: &TickseqConfig) -> String {
    config
        .sequences
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickseq::sequencer::Mode;

    const TEST_CONFIG: &str = r#"
[global]
default_sequence = "frames"

[[sequence]]
name = "frames"
mode = "increment"
start = 0
end = 6
step = 1

[[sequence]]
name = "countdown"
mode = "decrement"
start = 1
end = 6
step = 2
"#;

    #[test]
    fn test_resolve_sequence_name_flag_wins() {
        let config = TickseqConfig::parse(TEST_CONFIG).unwrap();
        let name = resolve_sequence_name(Some("countdown"), &config).unwrap();
        assert_eq!(name, "countdown");
    }

    #[test]
    fn test_resolve_sequence_name_falls_back_to_default() {
        let config = TickseqConfig::parse(TEST_CONFIG).unwrap();
        let name = resolve_sequence_name(None, &config).unwrap();
        assert_eq!(name, "frames");
    }

    #[test]
    fn test_resolve_sequence_name_errors_without_default() {
        let config = TickseqConfig::parse(
            r#"
[[sequence]]
name = "frames"
"#,
        )
        .unwrap();
        assert!(resolve_sequence_name(None, &config).is_err());
    }

    #[test]
    fn test_run_ticks_emits_expected_walk() {
        let config = TickseqConfig::parse(TEST_CONFIG).unwrap();
        let definition = config.get_sequence("frames").unwrap();
        let sequencer = Sequencer::new();

        let records = run_ticks(&sequencer, definition, "cli", 8, false, false).unwrap();

        let values: Vec<i64> = records.iter().map(|r| r.value).collect();
        let cycles: Vec<u64> = records.iter().map(|r| r.cycle).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6, 0]);
        assert_eq!(cycles, vec![0, 0, 0, 0, 0, 0, 0, 1]);

        assert_eq!(records[0].tick, 1);
        assert_eq!(records[7].tick, 8);
        assert_eq!(records[0].sequence, "frames");
        assert_eq!(records[0].state_key, "cli");
        assert_eq!(records[0].mode, Mode::Increment);
    }

    #[test]
    fn test_run_ticks_reset_applies_to_first_tick_only() {
        let config = TickseqConfig::parse(TEST_CONFIG).unwrap();
        let definition = config.get_sequence("frames").unwrap();
        let sequencer = Sequencer::new();

        run_ticks(&sequencer, definition, "cli", 5, false, false).unwrap();
        let records = run_ticks(&sequencer, definition, "cli", 3, true, false).unwrap();

        let values: Vec<i64> = records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn test_available_sequence_names() {
        let config = TickseqConfig::parse(TEST_CONFIG).unwrap();
        assert_eq!(available_sequence_names(&config), "frames, countdown");
    }
}

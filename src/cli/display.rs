//! Rich CLI display for tick runs
//!
//! Renders emitted ticks as human-readable terminal output. All formatted
//! output goes to stderr so stdout remains clean for piping bare values.

use colored::Colorize;

use crate::log::TickRecord;
use crate::sequencer::Mode;

/// Display handler for a tick run
pub struct TickDisplay {
    sequence_name: String,
}

impl TickDisplay {
    /// Create a new display handler for the given sequence
    #[must_use]
    pub fn new(sequence_name: &str) -> Self {
        Self {
            sequence_name: sequence_name.to_string(),
        }
    }

    /// Print the run header at the start of execution
    pub fn print_header(&self, mode: Mode, start: i64, end: i64, step: i64) {
        eprintln!(
            "\n{} {}",
            "===".bold().cyan(),
            format!("Sequence: {}", self.sequence_name).bold().cyan()
        );
        eprintln!(
            "  {} {mode} over {start}..={end}, step {step}",
            "Mode:".dimmed()
        );
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Render a single tick to stderr. `prev_cycle` is the cycle count of
    /// the previous tick in this run, used to flag rollovers.
    pub fn render_tick(&self, record: &TickRecord, prev_cycle: Option<u64>) {
        let rollover = prev_cycle.is_some_and(|prev| record.cycle > prev);
        let marker = if rollover {
            "⟳".yellow().bold().to_string()
        } else {
            "▶".blue().to_string()
        };
        eprintln!(
            "  {marker} #{:<4} {} {}",
            record.tick,
            format!("{:>8}", record.value).bold(),
            format!("(cycle {})", record.cycle).dimmed()
        );
    }

    /// Render the post-run summary
    pub fn render_summary(&self, records: &[TickRecord]) {
        eprintln!("{}", "─".repeat(50).dimmed());

        let Some(last) = records.last() else {
            eprintln!("  {} no ticks emitted\n", "DONE".green().bold());
            return;
        };

        eprintln!("  {} {}", "DONE".green().bold(), self.sequence_name.bold());
        eprintln!(
            "  {} {} tick(s) | last value {} | cycle {} | key {}",
            "Stats:".dimmed(),
            records.len(),
            last.value,
            last.cycle,
            last.state_key
        );
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_record(tick: u32, value: i64, cycle: u64) -> TickRecord {
        TickRecord {
            tick,
            sequence: "frames".to_string(),
            state_key: "cli".to_string(),
            mode: Mode::Increment,
            value,
            cycle,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_new_display() {
        let display = TickDisplay::new("frames");
        assert_eq!(display.sequence_name, "frames");
    }

    // Rendering goes to stderr; these just exercise every path for panics.

    #[test]
    fn test_render_tick_no_panic() {
        let display = TickDisplay::new("frames");
        display.render_tick(&make_record(1, 0, 0), None);
        display.render_tick(&make_record(2, 1, 0), Some(0));
    }

    #[test]
    fn test_render_rollover_tick_no_panic() {
        let display = TickDisplay::new("frames");
        display.render_tick(&make_record(8, 0, 1), Some(0));
    }

    #[test]
    fn test_render_summary_no_panic() {
        let display = TickDisplay::new("frames");
        display.render_summary(&[make_record(1, 0, 0), make_record(2, 1, 0)]);
    }

    #[test]
    fn test_render_empty_summary_no_panic() {
        let display = TickDisplay::new("frames");
        display.render_summary(&[]);
    }

    #[test]
    fn test_header_no_panic() {
        let display = TickDisplay::new("frames");
        display.print_header(Mode::Decrement, 1, 6, 2);
    }
}

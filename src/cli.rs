// src/cli.rs

//! CLI argument parsing using `clap`.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::errors::StaggerError;

/// Command-line arguments for `stagger`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stagger",
    version,
    about = "Launch a list of commands with a fixed delay between starts.",
    long_about = None
)]
pub struct CliArgs {
    /// File containing a stream of JSON arrays, e.g. `["echo","a"] ["sleep","1"]`.
    ///
    /// Use `-` to read from standard input.
    #[arg(long, value_name = "PATH", default_value = "-")]
    pub json: String,

    /// Delay between starting one command and the next (e.g. `500ms`, `1.5s`, `1m30s`).
    #[arg(long, value_name = "DURATION", default_value = DEFAULT_DELAY, value_parser = parse_delay)]
    pub delay: Duration,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STAGGER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse the command list and print it, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Default for `--delay`.
pub const DEFAULT_DELAY: &str = "5s";

/// Nanoseconds per unit suffix. The longest matching suffix wins, so `ms` beats `m`.
const UNITS: [(&str, u128); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),
    ("\u{3bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 60 * 60 * 1_000_000_000),
];

/// Parse a duration string in the same format as Go's `time.ParseDuration`.
///
/// A duration is one or more `<number><unit>` pairs, e.g. `"5s"`, `"1.5s"`,
/// `"1m30s"`, `"100us"`. Units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
/// A bare `0` is accepted without a unit. Negative delays are rejected.
pub fn parse_delay(s: &str) -> Result<Duration, StaggerError> {
    let invalid = |msg: String| StaggerError::InvalidDelay(msg);

    let input = s.trim();
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest.starts_with('-') {
        return if rest == "-0" {
            Ok(Duration::ZERO)
        } else {
            Err(invalid(format!("'{input}' is negative")))
        };
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration string".to_string()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_num) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid(format!("'{input}' has a unit without a number")));
        }

        let (unit, scale) = UNITS
            .iter()
            .filter(|(suffix, _)| after_num.starts_with(suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .copied()
            .ok_or_else(|| {
                invalid(format!(
                    "'{input}' has a missing or unsupported unit; expected ns, us, ms, s, m, or h"
                ))
            })?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|e| invalid(format!("invalid duration number '{int_part}': {e}")))?
        };

        // Digits past nanosecond precision of the largest unit cannot matter.
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        let frac_nanos = if frac_digits.is_empty() {
            0
        } else {
            let numerator: u128 = frac_digits
                .parse()
                .map_err(|e| invalid(format!("invalid duration fraction '{frac_part}': {e}")))?;
            numerator * scale / 10u128.pow(frac_digits.len() as u32)
        };

        total = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(frac_nanos))
            .and_then(|n| n.checked_add(total))
            .filter(|n| *n <= u128::from(u64::MAX))
            .ok_or_else(|| invalid(format!("'{input}' is too large")))?;

        rest = &after_num[unit.len()..];
    }

    // Bounded by u64::MAX above.
    Ok(Duration::from_nanos(total as u64))
}

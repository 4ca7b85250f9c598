//! snapscroll - Trace replay entry point

use clap::Parser;
use snapscroll::config::loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
};
use snapscroll::config::{TouchMode, WheelMode};
use snapscroll::trace::{load_trace, replay, FrameSample};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// snapscroll - replay a recorded input trace through the scroll handlers
#[derive(Parser, Debug)]
#[command(name = "snapscroll")]
#[command(version)]
#[command(about = "Replay a JSONL wheel/touch/jump trace and print the scroll position per frame")]
pub struct Args {
    /// Path to the JSONL input trace
    pub trace: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wheel gesture policy
    #[arg(long, value_enum)]
    pub wheel_mode: Option<WheelMode>,

    /// Touch gesture policy
    #[arg(long, value_enum)]
    pub touch_mode: Option<TouchMode>,

    /// Print frame samples as JSON lines
    #[arg(long)]
    pub json: bool,
}

fn write_samples(
    out: &mut impl Write,
    samples: &[FrameSample],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !json {
        writeln!(
            out,
            "{:>8} {:>9} {:>9} {:>9} {:>4}",
            "at_ms", "position", "transient", "followed", "jump"
        )?;
    }
    for sample in samples {
        if json {
            writeln!(out, "{}", serde_json::to_string(sample)?)?;
        } else {
            writeln!(out, "{sample}")?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged)?;
        apply_cli_overrides(with_env, args.wheel_mode, args.touch_mode)
    };
    config.validate()?;

    snapscroll::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let records = load_trace(&args.trace)?;
    let samples = replay(&records, &config.scroll_config())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_samples(&mut out, &samples, args.json)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn sample(at_ms: u64, position: f64) -> FrameSample {
        FrameSample {
            at_ms,
            position,
            transient: position,
            followed: 0.0,
            jump_direction: 0,
        }
    }

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["snapscroll", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["snapscroll", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_trace_is_required() {
        let result = Args::try_parse_from(["snapscroll"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["snapscroll", "session.jsonl"]);
        assert_eq!(args.trace, PathBuf::from("session.jsonl"));
        assert_eq!(args.config, None);
        assert_eq!(args.wheel_mode, None);
        assert_eq!(args.touch_mode, None);
        assert!(!args.json);
    }

    #[test]
    fn test_mode_flags() {
        let args = Args::parse_from([
            "snapscroll",
            "--wheel-mode",
            "discrete",
            "--touch-mode",
            "swipe",
            "session.jsonl",
        ]);
        assert_eq!(args.wheel_mode, Some(WheelMode::Discrete));
        assert_eq!(args.touch_mode, Some(TouchMode::Swipe));
    }

    #[test]
    fn test_invalid_mode_rejects() {
        let result = Args::try_parse_from(["snapscroll", "--wheel-mode", "inertial", "t.jsonl"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_config_and_json_flags() {
        let args = Args::parse_from([
            "snapscroll",
            "--config",
            "/custom/config.toml",
            "--json",
            "t.jsonl",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(args.json);
    }

    #[test]
    fn test_cli_mode_overrides_config_file() {
        use snapscroll::config::ConfigFile;

        let config_file = ConfigFile {
            wheel_mode: Some(WheelMode::Discrete),
            touch_mode: Some(TouchMode::Swipe),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.wheel_mode, WheelMode::Discrete);

        let with_cli = apply_cli_overrides(merged, Some(WheelMode::Continuous), None);
        assert_eq!(with_cli.wheel_mode, WheelMode::Continuous);
        assert_eq!(with_cli.touch_mode, TouchMode::Swipe);
    }

    #[test]
    fn test_write_samples_plain_has_header() {
        let mut out = Vec::new();
        write_samples(&mut out, &[sample(0, 1.0)], false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("position"));
        assert_eq!(lines[1], sample(0, 1.0).to_string());
    }

    #[test]
    fn test_write_samples_header_aligns_with_columns() {
        let mut out = Vec::new();
        let wide = FrameSample {
            at_ms: 12_345_678,
            position: 12.5,
            transient: 12.5,
            followed: 11.25,
            jump_direction: -8,
        };
        write_samples(&mut out, &[wide], false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0].len(), lines[1].len());
        assert_eq!(column_ends(lines[0]), column_ends(lines[1]));
    }

    /// Byte offset just past each whitespace-separated field.
    fn column_ends(line: &str) -> Vec<usize> {
        line.char_indices()
            .filter(|&(i, c)| c != ' ' && line[i + 1..].chars().next().map_or(true, |n| n == ' '))
            .map(|(i, _)| i + 1)
            .collect()
    }

    #[test]
    fn test_write_samples_json_lines() {
        let mut out = Vec::new();
        write_samples(&mut out, &[sample(0, 0.0), sample(16, 1.0)], true).unwrap();
        let text = String::from_utf8(out).unwrap();

        let parsed: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1]["at_ms"], 16);
        assert_eq!(parsed[1]["position"], 1.0);
    }
}

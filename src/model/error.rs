//! Error types for snapscroll.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the replay binary
//!   - [`TraceError`] - Input trace reading and parsing failures
//!   - [`SectionCountError`] - Invalid section count supplied by a host layout
//!   - [`ConfigError`](crate::config::loader::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//!
//! # Recovery Strategy
//!
//! The scroll core itself has no runtime errors. Stale touches, empty touch
//! lists and out-of-range bounds are absorbed as no-ops inside the handlers.
//! Everything here belongs to the shell around the core: configuration,
//! logging and trace replay. Those are fatal for the binary and propagate to
//! `main`.

use crate::config::loader::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
///
/// Domain-specific errors convert to `AppError` via `From`, so the replay
/// entry point can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load or parse the configuration file.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to install the tracing subscriber.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Failed to read or parse an input trace.
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// A trace configured an invalid number of sections.
    #[error("Invalid section count: {0}")]
    Sections(#[from] SectionCountError),
}

/// Errors encountered when reading a JSONL input trace.
///
/// Line numbers are 1-based and count blank lines, so they match what an
/// editor shows.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("Failed to read trace {path}: {source}")]
    Io {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid trace record.
    #[error("Malformed trace record at line {line}: {reason}")]
    Parse {
        /// 1-based line number of the bad record.
        line: usize,
        /// Parser message.
        reason: String,
    },

    /// A record's timestamp is earlier than the previous record's.
    ///
    /// Timers are driven by record timestamps, so time may not run backwards.
    #[error("Trace record at line {line} goes back in time ({at_ms}ms < {previous_ms}ms)")]
    OutOfOrder {
        /// 1-based line number of the offending record.
        line: usize,
        /// Timestamp of the offending record.
        at_ms: u64,
        /// Timestamp of the record before it.
        previous_ms: u64,
    },
}

/// A host layout supplied a section count that cannot back a scroll range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("section count must be at least 1, got {0}")]
pub struct SectionCountError(pub usize);

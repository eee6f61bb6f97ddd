//! # ParaHuff CLI support
//!
//! Shared argument shape and exit-code mapping for the two parahuff
//! binaries, `phuff-compress` and `phuff-decompress`. Each binary is a
//! thin `clap::Parser` wrapper taking exactly `<input_path>
//! <output_path>`, since the external contract is
//! two single-purpose binaries rather than one binary with
//! subcommands.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use parahuff_core::error::ParaHuffError;

/// Shared CLI surface: an input path and an output path, nothing else.
/// No environment variables, no config files.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the input file.
    pub input: PathBuf,

    /// Path to the output file.
    pub output: PathBuf,
}

/// A `{size, elapsed}` pair reported to stdout on success, the
/// wall-clock timing and compression ratio the core itself has no
/// opinion about.
pub struct Report {
    /// Original (uncompressed) byte count.
    pub original_size: u64,
    /// Compressed byte count.
    pub compressed_size: u64,
    /// Wall-clock time spent in the core operation.
    pub elapsed: std::time::Duration,
}

impl Report {
    /// Compression ratio as a percentage of space saved, `0.0` when
    /// `original_size` is zero.
    pub fn space_savings(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
    }
}

/// Print a [`Report`] as a small labeled block to stdout.
pub fn print_report(label: &str, report: &Report) {
    println!("{label} complete");
    println!("  Original size:   {} bytes", report.original_size);
    println!("  Compressed size: {} bytes", report.compressed_size);
    println!("  Ratio:           {:.1}%", report.space_savings());
    println!("  Elapsed:         {:.3}s", report.elapsed.as_secs_f64());
}

/// Start a wall-clock timer for a core operation.
pub fn start_timer() -> Instant {
    Instant::now()
}

/// Map a [`ParaHuffError`] to a process exit code: argument/IO/resource/
/// device-launch errors all exit non-zero, distinguished by conventional
/// BSD `sysexits.h` codes for readability.
pub fn exit_code_for(err: &ParaHuffError) -> i32 {
    match err {
        ParaHuffError::InvalidArgument { .. } => 64, // EX_USAGE
        ParaHuffError::Io(_) => 74,                  // EX_IOERR
        ParaHuffError::InsufficientMemory { .. } => 75, // EX_TEMPFAIL
        ParaHuffError::DeviceLaunch { .. } => 70,    // EX_SOFTWARE
        ParaHuffError::CorruptContainer { .. } => 65, // EX_DATAERR
        ParaHuffError::Truncated { .. } => 65,        // EX_DATAERR
    }
}

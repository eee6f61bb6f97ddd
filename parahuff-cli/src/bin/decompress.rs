//! `phuff-decompress <input_path> <output_path>`
//!
//! Reads a container produced by `phuff-compress`, decodes it with
//! [`parahuff_huffman::decompress`], and writes the reconstructed
//! bytes to `output_path`. A truncated container is reported as a
//! warning to stderr, but the partial output is still written; every
//! other error kind is reported and the process exits non-zero with no
//! output file written.

use std::fs;

use clap::Parser;

use parahuff_cli::{Args, Report, exit_code_for, print_report, start_timer};
use parahuff_core::error::ParaHuffError;
use parahuff_huffman::TruncationWarning;

fn run(args: &Args) -> parahuff_core::error::Result<(Report, Option<TruncationWarning>)> {
    if !args.input.is_file() {
        return Err(ParaHuffError::invalid_argument(format!(
            "input path is not a readable file: {}",
            args.input.display()
        )));
    }

    let container = fs::read(&args.input)?;

    let start = start_timer();
    let (out, warning) = parahuff_huffman::decompress(&container)?;
    let elapsed = start.elapsed();

    fs::write(&args.output, &out)?;

    let report = Report {
        original_size: out.len() as u64,
        compressed_size: container.len() as u64,
        elapsed,
    };
    Ok((report, warning))
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok((report, warning)) => {
            if let Some(w) = warning {
                eprintln!(
                    "phuff-decompress: warning: truncated payload, decoded {} of {} expected bytes",
                    w.decoded, w.expected
                );
            }
            print_report("Decompression", &report);
        }
        Err(err) => {
            eprintln!("phuff-decompress: error: {err}");
            std::process::exit(exit_code_for(&err));
        }
    }
}

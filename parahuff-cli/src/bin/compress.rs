//! `phuff-compress <input_path> <output_path>`
//!
//! Reads `input_path`, compresses it with [`parahuff_huffman::compress`],
//! and writes the container to `output_path`. Exit code 0 on success,
//! non-zero on argument, I/O, or device-memory failure.

use std::fs;
use std::path::Path;

use clap::Parser;
use memmap2::Mmap;

use parahuff_cli::{Args, Report, exit_code_for, print_report, start_timer};
use parahuff_core::error::ParaHuffError;
use parahuff_device::HostDevice;

fn run(args: &Args) -> parahuff_core::error::Result<Report> {
    if !args.input.is_file() {
        return Err(ParaHuffError::invalid_argument(format!(
            "input path is not a readable file: {}",
            args.input.display()
        )));
    }

    // Memory-mapped for large inputs, falling back to a plain read for
    // files too small or unsuitable for mmap.
    let file = fs::File::open(&args.input)?;
    let metadata = file.metadata()?;
    let input: Vec<u8> = if metadata.len() > 0 {
        // SAFETY: the input file is not modified concurrently by this
        // process; a concurrent external writer could in principle
        // invalidate the mapping, the same caveat every mmap-based CLI
        // accepts.
        let mmap = unsafe { Mmap::map(&file)? };
        mmap.to_vec()
    } else {
        Vec::new()
    };

    if input.is_empty() {
        return Err(ParaHuffError::invalid_argument(
            "input file is empty; parahuff compresses non-empty inputs only",
        ));
    }

    let device = HostDevice;
    let start = start_timer();
    let container = parahuff_huffman::compress(&input, &device)?;
    let elapsed = start.elapsed();

    fs::write(&args.output, &container)?;

    Ok(Report {
        original_size: input.len() as u64,
        compressed_size: container.len() as u64,
        elapsed,
    })
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(report) => print_report("Compression", &report),
        Err(err) => {
            eprintln!("phuff-compress: error: {err}");
            std::process::exit(exit_code_for(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_input_is_invalid_argument() {
        let args = Args {
            input: Path::new("/nonexistent/path/for/parahuff/tests").to_path_buf(),
            output: Path::new("/tmp/parahuff-compress-test-out").to_path_buf(),
        };
        let err = run(&args).unwrap_err();
        assert!(matches!(err, ParaHuffError::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_input_is_invalid_argument() {
        let dir = std::env::temp_dir();
        let input_path = dir.join("parahuff-cli-test-empty-input");
        let output_path = dir.join("parahuff-cli-test-empty-output");
        fs::File::create(&input_path).unwrap();

        let args = Args {
            input: input_path.clone(),
            output: output_path,
        };
        let err = run(&args).unwrap_err();
        assert!(matches!(err, ParaHuffError::InvalidArgument { .. }));

        let _ = fs::remove_file(&input_path);
    }

    #[test]
    fn test_compress_round_trip_via_files() {
        let dir = std::env::temp_dir();
        let input_path = dir.join("parahuff-cli-test-input.txt");
        let output_path = dir.join("parahuff-cli-test-output.phuff");
        let mut f = fs::File::create(&input_path).unwrap();
        f.write_all(b"abracadabra").unwrap();
        drop(f);

        let args = Args {
            input: input_path.clone(),
            output: output_path.clone(),
        };
        let report = run(&args).unwrap();
        assert_eq!(report.original_size, 11);

        let container = fs::read(&output_path).unwrap();
        let (out, warning) = parahuff_huffman::decompress(&container).unwrap();
        assert_eq!(out, b"abracadabra");
        assert!(warning.is_none());

        let _ = fs::remove_file(&input_path);
        let _ = fs::remove_file(&output_path);
    }
}

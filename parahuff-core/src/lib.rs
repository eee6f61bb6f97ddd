//! # ParaHuff Core
//!
//! Primitives shared across the parahuff workspace: the error type and
//! the MSB-first bitstream reader/writer used by the container format.
//!
//! A small, dependency-light foundation that the algorithm crate and
//! the CLI both build on, without either depending on the other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod error;

pub use bitstream::{BitReader, BitWriter};
pub use error::{ParaHuffError, Result};

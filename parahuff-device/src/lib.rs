//! # ParaHuff Device
//!
//! A free-standing adapter reporting device free/total memory, the way a
//! CUDA or similar driver binding (`cudaMemGetInfo`) would report it to
//! the host before a kernel launch.
//!
//! There is no actual accelerator here — this crate's job is only to
//! answer "how much fast memory is available right now", the one fact
//! the offset planner and scenario dispatcher need from the device layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

use parahuff_core::error::{ParaHuffError, Result};
use std::fs;

/// Free/total byte counts reported by a device-memory query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    /// Bytes currently free.
    pub free: u64,
    /// Total device memory.
    pub total: u64,
}

/// A source of device memory-info, abstracted so the scenario dispatcher
/// can be driven by a real host-memory probe in production and by a
/// fixed, arbitrary budget in tests (exercising the `K>1` chunking and
/// overflow scenarios without allocating hundreds of MiB).
pub trait DeviceQuery: Send + Sync {
    /// Query current free/total memory.
    fn memory_info(&self) -> Result<MemoryInfo>;
}

/// Queries the host's available memory via `/proc/meminfo` on Linux,
/// standing in for a device driver's memory-info call. Falls back to a
/// conservative fixed estimate on platforms without `/proc/meminfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostDevice;

impl HostDevice {
    /// Fallback total/free estimate used when `/proc/meminfo` cannot be
    /// read (non-Linux hosts, sandboxed environments).
    const FALLBACK: MemoryInfo = MemoryInfo {
        free: 512 * 1024 * 1024,
        total: 1024 * 1024 * 1024,
    };

    fn read_proc_meminfo() -> Option<MemoryInfo> {
        let contents = fs::read_to_string("/proc/meminfo").ok()?;
        let mut mem_total_kb = None;
        let mut mem_available_kb = None;
        for line in contents.lines() {
            if let Some(rest) = line.strip_prefix("MemTotal:") {
                mem_total_kb = parse_kb_field(rest);
            } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
                mem_available_kb = parse_kb_field(rest);
            }
        }
        let total_kb = mem_total_kb?;
        let free_kb = mem_available_kb.unwrap_or(total_kb);
        Some(MemoryInfo {
            free: free_kb * 1024,
            total: total_kb * 1024,
        })
    }
}

fn parse_kb_field(field: &str) -> Option<u64> {
    field.trim().strip_suffix("kB")?.trim().parse().ok()
}

impl DeviceQuery for HostDevice {
    fn memory_info(&self) -> Result<MemoryInfo> {
        Ok(Self::read_proc_meminfo().unwrap_or(Self::FALLBACK))
    }
}

/// A fixed memory-info source, used to drive the scenario dispatcher
/// deterministically in tests (and by callers who already know their
/// device's budget and don't want a fresh query per call).
#[derive(Debug, Clone, Copy)]
pub struct FixedDevice {
    info: MemoryInfo,
}

impl FixedDevice {
    /// Build a fixed device reporting exactly `free`/`total` bytes.
    pub fn new(free: u64, total: u64) -> Self {
        Self {
            info: MemoryInfo { free, total },
        }
    }
}

impl DeviceQuery for FixedDevice {
    fn memory_info(&self) -> Result<MemoryInfo> {
        Ok(self.info)
    }
}

/// Safety margin subtracted from free device memory before any
/// allocation, reserved as headroom for the driver and other processes.
pub const SAFETY_MARGIN_BYTES: u64 = 10 * 1024 * 1024;

/// Minimum free memory (after `fixed`) required to proceed at all.
pub const MIN_REQUIRED_BYTES: u64 = 50 * 1024 * 1024;

/// Compute the per-kernel memory budget `M` from a device query and the
/// size of the fixed (non-scratch) structures the compressor already
/// holds: `M = free_device_mem - fixed - 10 MiB`, requiring
/// `free_device_mem - fixed >= 50 MiB`.
pub fn memory_budget(device: &dyn DeviceQuery, fixed_bytes: u64) -> Result<u64> {
    let info = device.memory_info()?;
    let available = info.free.saturating_sub(fixed_bytes);
    if available < MIN_REQUIRED_BYTES {
        return Err(ParaHuffError::insufficient_memory(
            info.free,
            fixed_bytes + MIN_REQUIRED_BYTES,
        ));
    }
    Ok(available - SAFETY_MARGIN_BYTES)
}

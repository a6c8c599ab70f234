//! Seccomp probe - checks which I/O multiplexing syscalls a sandbox permits.
//!
//! Runs `epoll_create1`, `epoll_ctl`, `epoll_wait`, `poll` and `pselect` once
//! each and reports which succeeded. Linux only.

pub mod cli;
pub mod config;
pub mod error;
#[cfg(target_os = "linux")]
pub mod probe;
pub mod utils;

pub use config::ProbeConfig;
pub use error::{ConfigError, ProbeError, Result};
#[cfg(target_os = "linux")]
pub use probe::{Check, CheckError, CheckOutcome, ProbeReport, Reporter, SyscallProber};

/// Exit status when every check passed.
pub const EXIT_ALL_PASSED: u8 = 0;

/// Exit status when at least one check failed, or the probe could not run.
pub const EXIT_CHECKS_FAILED: u8 = 2;

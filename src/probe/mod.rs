//! The five-step I/O multiplexing syscall probe.
//!
//! Each check is attempted regardless of earlier outcomes. The epoll handle
//! from the first check feeds the second and third even when creation
//! failed, so a seccomp denial can be told apart from an argument error by
//! the operator reading the errno.

pub mod epoll;
pub mod report;
pub mod syscalls;

use std::fmt;

use nix::errno::Errno;

use crate::config::ProbeConfig;
use crate::utils::get_arch;

pub use epoll::{EpollHandle, INVALID_HANDLE};
pub use report::{ProbeReport, Reporter};
pub use syscalls::{LibcSyscalls, Syscalls};

/// One of the probed syscalls, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    EpollCreate,
    EpollCtl,
    EpollWait,
    Poll,
    Pselect,
}

impl Check {
    /// All checks in the order they run.
    pub const ALL: [Check; 5] = [
        Check::EpollCreate,
        Check::EpollCtl,
        Check::EpollWait,
        Check::Poll,
        Check::Pselect,
    ];

    /// Name used in report lines, matching the libc wrapper.
    pub fn label(&self) -> &'static str {
        match self {
            Check::EpollCreate => "epoll_create1",
            Check::EpollCtl => "epoll_ctl",
            Check::EpollWait => "epoll_wait",
            Check::Poll => "poll",
            Check::Pselect => "pselect",
        }
    }

    /// Kernel syscall the libc wrapper issues on this architecture.
    ///
    /// This is the name a seccomp allow-list has to carry.
    pub fn syscall_name(&self) -> &'static str {
        match self {
            Check::EpollCreate => "epoll_create1",
            Check::EpollCtl => "epoll_ctl",
            #[cfg(target_arch = "aarch64")]
            Check::EpollWait => "epoll_pwait",
            #[cfg(not(target_arch = "aarch64"))]
            Check::EpollWait => "epoll_wait",
            #[cfg(target_arch = "aarch64")]
            Check::Poll => "ppoll",
            #[cfg(not(target_arch = "aarch64"))]
            Check::Poll => "poll",
            Check::Pselect => "pselect6",
        }
    }

    /// Stdout line for a successful call returning `value`.
    pub fn success_line(&self, value: i32) -> String {
        match self {
            Check::EpollCreate => format!("epoll_create1 OK: {}", value),
            Check::EpollCtl => "epoll_ctl OK".to_string(),
            Check::EpollWait => format!("epoll_wait OK (n={})", value),
            Check::Poll => format!("poll OK (p={})", value),
            Check::Pselect => format!("pselect OK (s={})", value),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A check whose syscall returned the failure sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckError {
    pub check: Check,
    pub errno: Errno,
}

impl fmt::Display for CheckError {
    // Same layout as perror(3): "<op>: <strerror>".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check.label(), syscalls::strerror(self.errno))
    }
}

impl std::error::Error for CheckError {}

/// Result of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: Check,
    /// The syscall's non-negative return value, or the error it reported.
    pub result: Result<i32, CheckError>,
}

impl CheckOutcome {
    fn new(check: Check, result: nix::Result<i32>) -> Self {
        match result {
            Ok(value) => {
                tracing::debug!(check = %check, syscall = check.syscall_name(), value, "check passed");
            }
            Err(errno) => {
                tracing::debug!(check = %check, syscall = check.syscall_name(), %errno, "check failed");
            }
        }

        Self {
            check,
            result: result.map_err(|errno| CheckError { check, errno }),
        }
    }

    /// Whether the syscall succeeded.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs the five checks against a [`Syscalls`] implementation.
pub struct SyscallProber<S: Syscalls = LibcSyscalls> {
    sys: S,
    config: ProbeConfig,
}

impl Default for SyscallProber<LibcSyscalls> {
    fn default() -> Self {
        Self::new(LibcSyscalls, ProbeConfig::default())
    }
}

impl<S: Syscalls> SyscallProber<S> {
    /// Create a prober.
    pub fn new(sys: S, config: ProbeConfig) -> Self {
        Self { sys, config }
    }

    #[cfg(test)]
    fn syscalls(&self) -> &S {
        &self.sys
    }

    /// Run every check in order, handing each outcome to `on_outcome` as
    /// soon as it is known.
    ///
    /// The epoll handle is closed before this returns.
    pub fn run<F>(&self, mut on_outcome: F) -> ProbeReport
    where
        F: FnMut(&CheckOutcome),
    {
        let cfg = &self.config;
        tracing::debug!(arch = get_arch(), fd = cfg.fd, "starting syscall probe");

        let mut outcomes = Vec::with_capacity(Check::ALL.len());
        let mut record = |outcome: CheckOutcome| {
            on_outcome(&outcome);
            outcomes.push(outcome);
        };

        let created = self.sys.epoll_create1(0);
        let epoll = EpollHandle::from_result(&self.sys, &created);
        record(CheckOutcome::new(Check::EpollCreate, created));

        record(CheckOutcome::new(
            Check::EpollCtl,
            self.sys.epoll_ctl_add(epoll.raw(), cfg.fd),
        ));

        record(CheckOutcome::new(
            Check::EpollWait,
            self.sys
                .epoll_wait(epoll.raw(), cfg.max_events, cfg.epoll_timeout_ms),
        ));

        record(CheckOutcome::new(
            Check::Poll,
            self.sys.poll_readable(cfg.fd, cfg.poll_timeout_ms),
        ));

        record(CheckOutcome::new(
            Check::Pselect,
            self.sys.pselect_readable(cfg.fd, cfg.pselect_timeout_ns),
        ));

        drop(epoll);

        ProbeReport::new(outcomes)
    }
}

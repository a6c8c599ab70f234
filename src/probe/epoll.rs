//! Scoped ownership of the probe's epoll handle.

use std::os::fd::RawFd;

use crate::probe::syscalls::Syscalls;

/// Handle value kept when `epoll_create1` fails.
pub const INVALID_HANDLE: RawFd = -1;

/// Epoll descriptor that is closed when dropped, valid or not.
///
/// A failed creation still yields a guard holding [`INVALID_HANDLE`], so
/// dependent checks observe what the sandbox does with a bad descriptor.
/// Closing an invalid handle fails with `EBADF`, which is ignored.
pub struct EpollHandle<'a, S: Syscalls + ?Sized> {
    fd: RawFd,
    sys: &'a S,
}

impl<'a, S: Syscalls + ?Sized> EpollHandle<'a, S> {
    /// Wrap the result of an `epoll_create1` call.
    pub fn from_result(sys: &'a S, created: &nix::Result<RawFd>) -> Self {
        Self {
            fd: created.as_ref().copied().unwrap_or(INVALID_HANDLE),
            sys,
        }
    }

    /// The raw descriptor, possibly [`INVALID_HANDLE`].
    pub fn raw(&self) -> RawFd {
        self.fd
    }
}

impl<S: Syscalls + ?Sized> Drop for EpollHandle<'_, S> {
    fn drop(&mut self) {
        if let Err(errno) = self.sys.close(self.fd) {
            tracing::debug!(fd = self.fd, %errno, "closing epoll handle failed");
        }
    }
}

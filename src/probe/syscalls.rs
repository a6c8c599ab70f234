//! Raw syscall seam used by the prober.

use std::ffi::CStr;
use std::os::fd::RawFd;
use std::ptr;

use nix::errno::Errno;

use crate::config::MAX_EVENTS_LIMIT;

/// The multiplexing primitives exercised by the probe.
///
/// Every method returns the raw syscall result with the failure sentinel
/// already mapped to an [`Errno`]. Handles are plain integers so an invalid
/// descriptor (such as `-1` from a failed `epoll_create1`) can be passed
/// through unchanged.
pub trait Syscalls {
    /// `epoll_create1(flags)`.
    fn epoll_create1(&self, flags: i32) -> nix::Result<RawFd>;

    /// `epoll_ctl(epfd, EPOLL_CTL_ADD, fd, {EPOLLIN, data.fd = fd})`.
    fn epoll_ctl_add(&self, epfd: RawFd, fd: RawFd) -> nix::Result<i32>;

    /// `epoll_wait` with `max_events` slots; returns the ready count.
    fn epoll_wait(&self, epfd: RawFd, max_events: i32, timeout_ms: i32) -> nix::Result<i32>;

    /// `poll` on a single descriptor with `POLLIN` interest.
    fn poll_readable(&self, fd: RawFd, timeout_ms: i32) -> nix::Result<i32>;

    /// `pselect` on a read set holding only `fd`, with no signal mask.
    fn pselect_readable(&self, fd: RawFd, timeout_ns: i64) -> nix::Result<i32>;

    /// `close(fd)`.
    fn close(&self, fd: RawFd) -> nix::Result<()>;
}

/// [`Syscalls`] backed by the C library.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibcSyscalls;

impl Syscalls for LibcSyscalls {
    fn epoll_create1(&self, flags: i32) -> nix::Result<RawFd> {
        Errno::result(unsafe { libc::epoll_create1(flags) })
    }

    fn epoll_ctl_add(&self, epfd: RawFd, fd: RawFd) -> nix::Result<i32> {
        let mut event = libc::epoll_event {
            events: libc::EPOLLIN as u32,
            u64: fd as u64,
        };
        Errno::result(unsafe { libc::epoll_ctl(epfd, libc::EPOLL_CTL_ADD, fd, &mut event) })
    }

    fn epoll_wait(&self, epfd: RawFd, max_events: i32, timeout_ms: i32) -> nix::Result<i32> {
        // Non-positive counts still reach the kernel, which rejects them
        // with EINVAL before touching the buffer.
        let max_events = max_events.min(MAX_EVENTS_LIMIT);
        let slots = usize::try_from(max_events).unwrap_or(0);
        let mut events = vec![libc::epoll_event { events: 0, u64: 0 }; slots];
        Errno::result(unsafe {
            libc::epoll_wait(epfd, events.as_mut_ptr(), max_events, timeout_ms)
        })
    }

    fn poll_readable(&self, fd: RawFd, timeout_ms: i32) -> nix::Result<i32> {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        Errno::result(unsafe { libc::poll(&mut pfd, 1, timeout_ms) })
    }

    fn pselect_readable(&self, fd: RawFd, timeout_ns: i64) -> nix::Result<i32> {
        // Callers keep fd below FD_SETSIZE; FD_SET past it is out of bounds.
        let mut read_set = unsafe {
            let mut set = std::mem::MaybeUninit::<libc::fd_set>::uninit();
            libc::FD_ZERO(set.as_mut_ptr());
            set.assume_init()
        };
        unsafe { libc::FD_SET(fd, &mut read_set) };

        let mut timeout: libc::timespec = unsafe { std::mem::zeroed() };
        timeout.tv_sec = (timeout_ns / 1_000_000_000) as _;
        timeout.tv_nsec = (timeout_ns % 1_000_000_000) as _;

        Errno::result(unsafe {
            libc::pselect(
                fd + 1,
                &mut read_set,
                ptr::null_mut(),
                ptr::null_mut(),
                &timeout,
                ptr::null(),
            )
        })
    }

    fn close(&self, fd: RawFd) -> nix::Result<()> {
        Errno::result(unsafe { libc::close(fd) }).map(drop)
    }
}

/// The C library's message for `errno`, as printed by perror(3).
pub fn strerror(errno: Errno) -> String {
    let mut buf = [0 as libc::c_char; 256];
    let rc = unsafe { libc::strerror_r(errno as i32, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return errno.desc().to_string();
    }
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

//! Probe configuration schema.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProbeError};

/// Highest descriptor count a `fd_set` can hold on Linux (`FD_SETSIZE`).
pub const FD_SETSIZE: i32 = 1024;

/// Upper bound on `maxEvents`; the event buffer is allocated up front.
pub const MAX_EVENTS_LIMIT: i32 = 1024;

const NANOS_PER_SEC: i64 = 1_000_000_000;

fn default_fd() -> i32 {
    0
}

fn default_timeout_ms() -> i32 {
    1
}

fn default_pselect_timeout_ns() -> i64 {
    1_000_000
}

fn default_max_events() -> i32 {
    1
}

/// Parameters for the five multiplexing checks.
///
/// The defaults register standard input for read readiness and wait at most
/// one millisecond in every blocking primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    /// Descriptor registered with epoll and watched by poll/pselect.
    #[serde(default = "default_fd")]
    pub fd: i32,

    /// Timeout passed to `epoll_wait`, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub epoll_timeout_ms: i32,

    /// Timeout passed to `poll`, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub poll_timeout_ms: i32,

    /// Timeout passed to `pselect`, in nanoseconds.
    #[serde(default = "default_pselect_timeout_ns")]
    pub pselect_timeout_ns: i64,

    /// Number of event slots handed to `epoll_wait`.
    #[serde(default = "default_max_events")]
    pub max_events: i32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            fd: default_fd(),
            epoll_timeout_ms: default_timeout_ms(),
            poll_timeout_ms: default_timeout_ms(),
            pselect_timeout_ns: default_pselect_timeout_ns(),
            max_events: default_max_events(),
        }
    }
}

impl ProbeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if !(0..FD_SETSIZE).contains(&self.fd) {
            return Err(invalid(format!(
                "fd {} is outside 0..{}",
                self.fd, FD_SETSIZE
            )));
        }

        if self.epoll_timeout_ms < 0 {
            return Err(invalid(format!(
                "epollTimeoutMs must not be negative (got {})",
                self.epoll_timeout_ms
            )));
        }

        if self.poll_timeout_ms < 0 {
            return Err(invalid(format!(
                "pollTimeoutMs must not be negative (got {})",
                self.poll_timeout_ms
            )));
        }

        // pselect rejects tv_nsec outside [0, 1e9) with EINVAL, which would
        // look like a policy denial.
        if !(0..NANOS_PER_SEC).contains(&self.pselect_timeout_ns) {
            return Err(invalid(format!(
                "pselectTimeoutNs must be in 0..{} (got {})",
                NANOS_PER_SEC, self.pselect_timeout_ns
            )));
        }

        if !(1..=MAX_EVENTS_LIMIT).contains(&self.max_events) {
            return Err(invalid(format!(
                "maxEvents must be in 1..={} (got {})",
                MAX_EVENTS_LIMIT, self.max_events
            )));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> ProbeError {
    ConfigError::ValidationError(reason).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_probe_parameters() {
        let config = ProbeConfig::default();
        assert_eq!(config.fd, 0);
        assert_eq!(config.epoll_timeout_ms, 1);
        assert_eq!(config.poll_timeout_ms, 1);
        assert_eq!(config.pselect_timeout_ns, 1_000_000);
        assert_eq!(config.max_events, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fd_bounds() {
        let mut config = ProbeConfig::default();
        config.fd = -1;
        assert!(config.validate().is_err());

        config.fd = FD_SETSIZE;
        assert!(config.validate().is_err());

        config.fd = FD_SETSIZE - 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_validation() {
        let mut config = ProbeConfig::default();
        config.epoll_timeout_ms = -1;
        assert!(config.validate().is_err());

        let mut config = ProbeConfig::default();
        config.poll_timeout_ms = -5;
        assert!(config.validate().is_err());

        let mut config = ProbeConfig::default();
        config.pselect_timeout_ns = NANOS_PER_SEC;
        assert!(config.validate().is_err());

        config.pselect_timeout_ns = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_events_validation() {
        let mut config = ProbeConfig::default();
        config.max_events = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("maxEvents"));

        config.max_events = MAX_EVENTS_LIMIT;
        assert!(config.validate().is_ok());

        config.max_events = MAX_EVENTS_LIMIT + 1;
        assert!(config.validate().is_err());

        config.max_events = 2_000_000_000;
        assert!(config.validate().is_err());
    }
}

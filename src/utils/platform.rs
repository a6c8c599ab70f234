//! Platform detection utilities.

/// Get the CPU architecture.
pub fn get_arch() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        "x64"
    }
    #[cfg(target_arch = "aarch64")]
    {
        "arm64"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "unknown"
    }
}

/// Kernel release string, e.g. `6.2.0-26-generic`.
/// Seccomp filtering of a given syscall depends on it, so it goes in debug output.
pub fn kernel_release() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/sys/kernel/osrelease")
            .ok()
            .and_then(|s| parse_release(&s))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(any(target_os = "linux", test))]
fn parse_release(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_arch() {
        let arch = get_arch();
        assert!(arch == "x64" || arch == "arm64" || arch == "unknown");
    }

    #[test]
    fn test_parse_release() {
        assert_eq!(
            parse_release("6.2.0-26-generic\n"),
            Some("6.2.0-26-generic".to_string())
        );
        assert_eq!(parse_release("  \n"), None);
        assert_eq!(parse_release(""), None);
    }

    #[test]
    fn test_kernel_release_on_linux() {
        #[cfg(target_os = "linux")]
        assert!(kernel_release().is_some());
        #[cfg(not(target_os = "linux"))]
        assert_eq!(kernel_release(), None);
    }
}

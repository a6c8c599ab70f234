//! CLI entry point for the seccomp probe.

use std::process::ExitCode;

use seccomp_probe::cli::Cli;
use seccomp_probe::config::{load_config, ProbeConfig};
use seccomp_probe::utils::{get_arch, init_debug_logging, kernel_release};
use seccomp_probe::EXIT_CHECKS_FAILED;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_debug_logging(cli.debug);

    if let Some(ref err) = cli.parse_error {
        tracing::warn!("ignoring command line ({}), using defaults", err);
    }
    if !cli.ignored.is_empty() {
        tracing::debug!(args = ?cli.ignored, "ignoring extra arguments");
    }

    let config = match cli.settings {
        Some(ref path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config from {:?}: {}", path, e);
                return ExitCode::from(EXIT_CHECKS_FAILED);
            }
        },
        None => ProbeConfig::default(),
    };

    tracing::debug!(
        arch = get_arch(),
        kernel = kernel_release().as_deref().unwrap_or("unknown"),
        "host"
    );

    match run(config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(EXIT_CHECKS_FAILED)
        }
    }
}

#[cfg(target_os = "linux")]
fn run(config: ProbeConfig) -> seccomp_probe::Result<u8> {
    use seccomp_probe::probe::LibcSyscalls;
    use seccomp_probe::{Reporter, SyscallProber};

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut reporter = Reporter::new(stdout.lock(), stderr.lock());

    let prober = SyscallProber::new(LibcSyscalls, config);
    let report = prober.run(|outcome| {
        if let Err(e) = reporter.outcome(outcome) {
            tracing::warn!(check = %outcome.check, "failed to write check result: {}", e);
        }
    });

    let denied: Vec<_> = report
        .failures()
        .map(|e| e.check.syscall_name())
        .collect();
    if !denied.is_empty() {
        tracing::debug!(?denied, "syscalls that failed");
    }

    reporter.summary(&report)?;
    Ok(report.exit_code())
}

#[cfg(not(target_os = "linux"))]
fn run(_config: ProbeConfig) -> seccomp_probe::Result<u8> {
    Err(seccomp_probe::ProbeError::UnsupportedPlatform(format!(
        "seccomp-probe only supports Linux ({})",
        get_arch()
    )))
}

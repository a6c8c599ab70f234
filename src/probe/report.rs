//! Aggregated probe results and their text rendering.

use std::io::{self, Write};

use crate::probe::{Check, CheckError, CheckOutcome};
use crate::{EXIT_ALL_PASSED, EXIT_CHECKS_FAILED};

/// Outcomes of one probe run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    outcomes: Vec<CheckOutcome>,
}

impl ProbeReport {
    pub fn new(outcomes: Vec<CheckOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Number of checks whose syscall succeeded.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Errors of the checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CheckError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == Check::ALL.len()
    }

    /// `0` when every check passed, `2` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            EXIT_ALL_PASSED
        } else {
            EXIT_CHECKS_FAILED
        }
    }
}

/// Writes outcome lines to `out` (successes) and `err` (failures).
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Print the line for a single check.
    pub fn outcome(&mut self, outcome: &CheckOutcome) -> io::Result<()> {
        match &outcome.result {
            Ok(value) => writeln!(self.out, "{}", outcome.check.success_line(*value)),
            Err(e) => {
                writeln!(self.err, "{}", e)?;
                self.err.flush()
            }
        }
    }

    /// Print the closing summary line.
    pub fn summary(&mut self, report: &ProbeReport) -> io::Result<()> {
        writeln!(self.out, "Summary: {} checks passed", report.passed())?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use nix::errno::Errno;

    use super::*;

    fn outcome(check: Check, result: Result<i32, Errno>) -> CheckOutcome {
        CheckOutcome {
            check,
            result: result.map_err(|errno| CheckError { check, errno }),
        }
    }

    fn render(report: &ProbeReport) -> (String, String) {
        let mut reporter = Reporter::new(Vec::new(), Vec::new());
        for o in report.outcomes() {
            reporter.outcome(o).unwrap();
        }
        reporter.summary(report).unwrap();
        let (out, err) = reporter.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_render_all_passed() {
        let report = ProbeReport::new(vec![
            outcome(Check::EpollCreate, Ok(3)),
            outcome(Check::EpollCtl, Ok(0)),
            outcome(Check::EpollWait, Ok(0)),
            outcome(Check::Poll, Ok(1)),
            outcome(Check::Pselect, Ok(1)),
        ]);

        let (out, err) = render(&report);
        assert_eq!(
            out,
            "epoll_create1 OK: 3\n\
             epoll_ctl OK\n\
             epoll_wait OK (n=0)\n\
             poll OK (p=1)\n\
             pselect OK (s=1)\n\
             Summary: 5 checks passed\n"
        );
        assert!(err.is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_render_with_failures() {
        let report = ProbeReport::new(vec![
            outcome(Check::EpollCreate, Ok(3)),
            outcome(Check::EpollCtl, Err(Errno::EPERM)),
            outcome(Check::EpollWait, Err(Errno::EPERM)),
            outcome(Check::Poll, Ok(0)),
            outcome(Check::Pselect, Ok(0)),
        ]);

        let (out, err) = render(&report);
        assert!(out.ends_with("Summary: 3 checks passed\n"));
        assert!(!out.contains("epoll_ctl"));

        let lines: Vec<_> = err.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("epoll_ctl: "));
        assert!(lines[1].starts_with("epoll_wait: "));
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_empty_report_fails() {
        let report = ProbeReport::new(Vec::new());
        assert_eq!(report.passed(), 0);
        assert!(!report.all_passed());
        assert_eq!(report.exit_code(), 2);
    }
}

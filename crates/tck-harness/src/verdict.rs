//! The outcome of a conformance run, with its JCK-style status codes.

use std::fmt::{Display, Formatter};

/// Status reported by a passing run, before the base offset is applied.
pub const STATUS_PASSED: i32 = 0;
/// Status reported by a failing run, before the base offset is applied.
pub const STATUS_FAILED: i32 = 2;
/// JCK-style base offset added to statuses to form process exit codes. A
/// conforming debuggee exits with exactly this code on success.
pub const STATUS_BASE: i32 = 95;

/// The final outcome of a conformance run.
///
/// Deliberately coarse: however many distinct failures a run observed, they
/// all collapse into [`Verdict::Failed`]; the individual causes only appear
/// in the diagnostic log.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verdict {
    /// Every checked condition held.
    Passed,
    /// At least one checked condition was violated.
    Failed,
}

impl Verdict {
    /// Whether this verdict is [`Verdict::Passed`].
    pub fn is_passed(self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// The raw status of this verdict (0 or 2).
    pub fn status(self) -> i32 {
        match self {
            Verdict::Passed => STATUS_PASSED,
            Verdict::Failed => STATUS_FAILED,
        }
    }

    /// The process exit code for this verdict (95 or 97).
    pub fn exit_code(self) -> i32 {
        self.status() + STATUS_BASE
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Passed => write!(f, "PASSED"),
            Verdict::Failed => write!(f, "FAILED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_carry_the_base_offset() {
        assert_eq!(Verdict::Passed.exit_code(), 95);
        assert_eq!(Verdict::Failed.exit_code(), 97);
    }

    #[test]
    fn display_matches_the_log_wording() {
        assert_eq!(Verdict::Passed.to_string(), "PASSED");
        assert_eq!(Verdict::Failed.to_string(), "FAILED");
        assert!(Verdict::Passed.is_passed());
        assert!(!Verdict::Failed.is_passed());
    }
}

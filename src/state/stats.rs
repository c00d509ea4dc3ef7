// Event payloads describing what has just finished

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

use super::{AssertionInfo, SectionInfo, TestCaseInfo, TestRunInfo};

/// Pass/fail tally for assertions or test cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub passed: u64,
    pub failed: u64,
    /// Failures in tests marked as allowed to fail
    #[serde(default)]
    pub failed_but_ok: u64,
    #[serde(default)]
    pub skipped: u64,
}

impl Counts {
    pub fn total(&self) -> u64 {
        self.passed + self.failed + self.failed_but_ok + self.skipped
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.failed_but_ok == 0 && self.skipped == 0
    }

    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

impl Add for Counts {
    type Output = Counts;

    fn add(self, other: Counts) -> Counts {
        Counts {
            passed: self.passed + other.passed,
            failed: self.failed + other.failed,
            failed_but_ok: self.failed_but_ok + other.failed_but_ok,
            skipped: self.skipped + other.skipped,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Counts) {
        *self = *self + other;
    }
}

impl Sub for Counts {
    type Output = Counts;

    fn sub(self, other: Counts) -> Counts {
        Counts {
            passed: self.passed.saturating_sub(other.passed),
            failed: self.failed.saturating_sub(other.failed),
            failed_but_ok: self.failed_but_ok.saturating_sub(other.failed_but_ok),
            skipped: self.skipped.saturating_sub(other.skipped),
        }
    }
}

/// Assertion and test case tallies together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub assertions: Counts,
    pub test_cases: Counts,
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            assertions: self.assertions + other.assertions,
            test_cases: self.test_cases + other.test_cases,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Totals) {
        *self = *self + other;
    }
}

impl Sub for Totals {
    type Output = Totals;

    fn sub(self, other: Totals) -> Totals {
        Totals {
            assertions: self.assertions - other.assertions,
            test_cases: self.test_cases - other.test_cases,
        }
    }
}

/// How a single assertion turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionOutcome {
    Passed,
    Failed,
    /// Failed by throwing/panicking rather than by a false expression
    Errored,
    Skipped,
    Info,
    Warning,
}

impl AssertionOutcome {
    pub fn is_ok(self) -> bool {
        !matches!(self, Self::Failed | Self::Errored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionStats {
    pub info: AssertionInfo,
    pub outcome: AssertionOutcome,
    /// Expression with operand values substituted, when available
    #[serde(default)]
    pub expanded: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStats {
    pub info: SectionInfo,
    pub assertions: Counts,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub missing_assertions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseStats {
    pub info: TestCaseInfo,
    pub totals: Totals,
    #[serde(default)]
    pub std_out: String,
    #[serde(default)]
    pub std_err: String,
    #[serde(default)]
    pub aborting: bool,
}

impl TestCaseStats {
    pub fn passed(&self) -> bool {
        self.totals.assertions.all_ok() && self.totals.test_cases.failed == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunStats {
    pub info: TestRunInfo,
    pub totals: Totals,
    #[serde(default)]
    pub aborting: bool,
}

// Capability flags a sink asks the test engine for

use serde::Serialize;
use std::ops::{BitOr, BitOrAssign};

/// What a sink needs from whoever drives it.
///
/// Flags only ever get switched on: combining two sets of preferences is a
/// field-wise OR, and `Default` (all false) is its identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReporterPreferences {
    /// Captured stdout/stderr of tests should be handed to the sink
    pub should_redirect_std_out: bool,
    /// Passing assertions should be reported, not only failures
    pub should_report_all_assertions: bool,
}

impl ReporterPreferences {
    /// Merge any number of preferences into one
    pub fn combine_all(prefs: impl IntoIterator<Item = ReporterPreferences>) -> Self {
        prefs.into_iter().fold(Self::default(), |acc, p| acc | p)
    }
}

impl BitOr for ReporterPreferences {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self {
            should_redirect_std_out: self.should_redirect_std_out || other.should_redirect_std_out,
            should_report_all_assertions: self.should_report_all_assertions
                || other.should_report_all_assertions,
        }
    }
}

impl BitOrAssign for ReporterPreferences {
    fn bitor_assign(&mut self, other: Self) {
        *self = *self | other;
    }
}

impl FromIterator<ReporterPreferences> for ReporterPreferences {
    fn from_iter<I: IntoIterator<Item = ReporterPreferences>>(iter: I) -> Self {
        Self::combine_all(iter)
    }
}

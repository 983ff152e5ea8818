//! Fixed engineering-productivity figures shown on the productivity page.
//!
//! These are display constants; they are not regenerated on refresh.

/// Merged pull requests per week, team versus automation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputWeek {
    pub week: &'static str,
    pub team: u64,
    pub automated: u64,
}

/// One phase of the pull request cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePhase {
    pub phase: &'static str,
    /// Human-readable median duration.
    pub duration: &'static str,
    /// Share of the total cycle, in percent.
    pub share: u64,
}

/// Pull requests merged in one week, by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrMix {
    pub week: &'static str,
    pub features: u64,
    pub bug_fixes: u64,
    pub quality: u64,
    pub security: u64,
}

impl PrMix {
    pub fn total(&self) -> u64 {
        self.features + self.bug_fixes + self.quality + self.security
    }
}

/// A finding raised by background code scanning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanFinding {
    pub title: &'static str,
    pub kind: &'static str,
    pub severity: &'static str,
}

#[rustfmt::skip]
pub const THROUGHPUT: [ThroughputWeek; 4] = [
    ThroughputWeek { week: "Jun 2", team: 5, automated: 8 },
    ThroughputWeek { week: "Jun 9", team: 8, automated: 10 },
    ThroughputWeek { week: "Jun 16", team: 12, automated: 15 },
    ThroughputWeek { week: "Jun 23", team: 15, automated: 18 },
];

#[rustfmt::skip]
pub const CYCLE_TIME: [CyclePhase; 4] = [
    CyclePhase { phase: "Coding", duration: "1d 7h", share: 42 },
    CyclePhase { phase: "Pickup", duration: "5h 3m", share: 7 },
    CyclePhase { phase: "Review", duration: "2d 9h", share: 22 },
    CyclePhase { phase: "Deploy", duration: "1d 1h", share: 3 },
];

#[rustfmt::skip]
pub const PR_MIX: [PrMix; 4] = [
    PrMix { week: "Week 1", features: 20, bug_fixes: 15, quality: 10, security: 5 },
    PrMix { week: "Week 2", features: 25, bug_fixes: 12, quality: 15, security: 8 },
    PrMix { week: "Week 3", features: 30, bug_fixes: 18, quality: 12, security: 10 },
    PrMix { week: "Week 4", features: 28, bug_fixes: 20, quality: 18, security: 12 },
];

#[rustfmt::skip]
pub const SCAN_FINDINGS: [ScanFinding; 4] = [
    ScanFinding { title: "Sensitive fields returned by API", kind: "Security", severity: "Critical" },
    ScanFinding { title: "Off-by-one error in calc.py", kind: "Bug", severity: "High" },
    ScanFinding { title: "Quadratic loop on large inputs", kind: "Perf", severity: "Medium" },
    ScanFinding { title: "Low test coverage for auth.py", kind: "Test", severity: "Low" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_is_growing() {
        assert!(THROUGHPUT.windows(2).all(|w| w[0].team <= w[1].team));
    }

    #[test]
    fn pr_mix_totals() {
        assert_eq!(PR_MIX[0].total(), 50);
        assert_eq!(PR_MIX[3].total(), 78);
    }
}

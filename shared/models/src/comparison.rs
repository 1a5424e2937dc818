//! Verdict types produced by the comparison engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Met / not-met determination for one (vendor, requirement) pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VerdictStatus {
    #[serde(rename = "Met")]
    Met,
    #[serde(rename = "Not Met")]
    NotMet,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Met => "Met",
            Self::NotMet => "Not Met",
        }
    }

    pub fn is_met(&self) -> bool {
        matches!(self, Self::Met)
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor-level aggregate of its requirement verdicts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OverallStatus {
    #[serde(rename = "Met All Requirements")]
    MetAll,
    #[serde(rename = "Partially Met")]
    PartiallyMet,
    #[serde(rename = "Did Not Meet")]
    DidNotMeet,
    #[serde(rename = "No Requirements Defined")]
    NoRequirementsDefined,
}

impl OverallStatus {
    /// Classifies a vendor from how many of `total` requirements it met.
    pub fn from_counts(met_count: usize, total: usize) -> Self {
        if total == 0 {
            Self::NoRequirementsDefined
        } else if met_count == total {
            Self::MetAll
        } else if met_count > 0 {
            Self::PartiallyMet
        } else {
            Self::DidNotMeet
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetAll => "Met All Requirements",
            Self::PartiallyMet => "Partially Met",
            Self::DidNotMeet => "Did Not Meet",
            Self::NoRequirementsDefined => "No Requirements Defined",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for a single requirement against one vendor offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementVerdict {
    pub requirement: String,
    pub status: VerdictStatus,
    pub explanation: String,
    pub evidence: String,
}

/// Full comparison result for one vendor.
///
/// `detailed_comparison` holds one verdict per extracted requirement, in
/// extraction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VendorComparison {
    pub vendor_name: String,
    pub overall_status: OverallStatus,
    pub detailed_comparison: Vec<RequirementVerdict>,
    pub additional_features: Vec<String>,
}

impl VendorComparison {
    pub fn met_count(&self) -> usize {
        self.detailed_comparison
            .iter()
            .filter(|verdict| verdict.status.is_met())
            .count()
    }

    /// Looks up the verdict for a requirement text; when the text was
    /// extracted more than once the last verdict wins.
    pub fn verdict_for(&self, requirement: &str) -> Option<&RequirementVerdict> {
        self.detailed_comparison
            .iter()
            .rev()
            .find(|verdict| verdict.requirement == requirement)
    }
}

//! # Specmatch Core Domain Models
//! 
//! Data carried through one comparison run: requirements extracted from a
//! technical specification, vendor offers read from the vendor table, and
//! the per-requirement verdicts the comparison engine produces for each vendor.
//! 
//! ## Key Models
//! 
//! - **RequirementEntry**: one trimmed, non-blank specification line
//! - **VendorRecord**: vendor name plus free-text offer
//! - **RequirementVerdict**: Met / Not Met with explanation and evidence snippet
//! - **VendorComparison**: all verdicts for a vendor plus its overall status
//! 
//! All models are created per run and never persisted.

pub mod requirement;
pub mod vendor;
pub mod comparison;

pub use requirement::*;
pub use vendor::*;
pub use comparison::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_entry_has_empty_details() {
        let entry = RequirementEntry::new("RAM: 16GB");
        assert_eq!(entry.requirement, "RAM: 16GB");
        assert!(entry.details.is_empty());
    }

    #[test]
    fn test_vendor_default_name() {
        assert_eq!(VendorRecord::default_name(1), "Vendor 1");
        assert_eq!(VendorRecord::default_name(12), "Vendor 12");
    }

    #[test]
    fn test_overall_status_rules() {
        assert_eq!(OverallStatus::from_counts(0, 0), OverallStatus::NoRequirementsDefined);
        assert_eq!(OverallStatus::from_counts(3, 3), OverallStatus::MetAll);
        assert_eq!(OverallStatus::from_counts(1, 3), OverallStatus::PartiallyMet);
        assert_eq!(OverallStatus::from_counts(0, 3), OverallStatus::DidNotMeet);
    }

    #[test]
    fn test_status_display_strings() {
        assert_eq!(OverallStatus::MetAll.to_string(), "Met All Requirements");
        assert_eq!(OverallStatus::DidNotMeet.to_string(), "Did Not Meet");
        assert_eq!(VerdictStatus::NotMet.to_string(), "Not Met");
    }

    #[test]
    fn test_status_serializes_as_display_string() {
        let json = serde_json::to_string(&OverallStatus::PartiallyMet).unwrap();
        assert_eq!(json, "\"Partially Met\"");

        let status: VerdictStatus = serde_json::from_str("\"Not Met\"").unwrap();
        assert_eq!(status, VerdictStatus::NotMet);
    }

    #[test]
    fn test_verdict_lookup_and_met_count() {
        let comparison = VendorComparison {
            vendor_name: "Acme".to_string(),
            overall_status: OverallStatus::PartiallyMet,
            detailed_comparison: vec![
                RequirementVerdict {
                    requirement: "RAM".to_string(),
                    status: VerdictStatus::Met,
                    explanation: "Found in offer.".to_string(),
                    evidence: "RAM installed...".to_string(),
                },
                RequirementVerdict {
                    requirement: "SSD".to_string(),
                    status: VerdictStatus::NotMet,
                    explanation: "Not found in offer.".to_string(),
                    evidence: String::new(),
                },
            ],
            additional_features: Vec::new(),
        };

        assert_eq!(comparison.met_count(), 1);
        assert_eq!(comparison.verdict_for("SSD").map(|v| v.status), Some(VerdictStatus::NotMet));
        assert!(comparison.verdict_for("GPU").is_none());
    }

    #[test]
    fn test_verdict_for_repeated_requirement_returns_last() {
        let verdict = |status, evidence: &str| RequirementVerdict {
            requirement: "RAM".to_string(),
            status,
            explanation: String::new(),
            evidence: evidence.to_string(),
        };
        let comparison = VendorComparison {
            vendor_name: "Acme".to_string(),
            overall_status: OverallStatus::PartiallyMet,
            detailed_comparison: vec![
                verdict(VerdictStatus::Met, "RAM first..."),
                verdict(VerdictStatus::NotMet, ""),
            ],
            additional_features: Vec::new(),
        };

        assert_eq!(comparison.verdict_for("RAM").map(|v| v.status), Some(VerdictStatus::NotMet));
    }
}

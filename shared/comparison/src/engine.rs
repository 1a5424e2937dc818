//! Comparison Engine
//! 
//! Evaluates every requirement against every vendor offer with
//! case-insensitive substring matching and aggregates a per-vendor status.
//! Pure and synchronous: no I/O, no shared state.

use specmatch_models::{
    OverallStatus, RequirementEntry, RequirementVerdict, VendorComparison, VendorRecord, VerdictStatus,
};
use specmatch_utils::{SpecMatchError, SpecMatchResult};
use tracing::{debug, info};

use crate::requirements::extract_requirements;

pub const FOUND_EXPLANATION: &str = "Found in offer.";
pub const NOT_FOUND_EXPLANATION: &str = "Not found in offer.";

/// Characters of offer text kept after the matched requirement
pub const EVIDENCE_TRAILING_CHARS: usize = 20;
pub const EVIDENCE_SUFFIX: &str = "...";

/// Extracts requirements from the specification text and compares every vendor.
pub fn run_comparison(spec_text: &str, vendors: &[VendorRecord]) -> SpecMatchResult<Vec<VendorComparison>> {
    if vendors.is_empty() {
        return Err(SpecMatchError::EmptyVendorTable);
    }
    
    let requirements = extract_requirements(spec_text)?;
    let results = compare_vendors(&requirements, vendors);
    
    info!(
        requirements = requirements.len(),
        vendors = results.len(),
        "Comparison completed"
    );
    Ok(results)
}

/// One comparison per vendor, in input order
pub fn compare_vendors(requirements: &[RequirementEntry], vendors: &[VendorRecord]) -> Vec<VendorComparison> {
    vendors
        .iter()
        .map(|vendor| compare_vendor(requirements, vendor))
        .collect()
}

pub fn compare_vendor(requirements: &[RequirementEntry], vendor: &VendorRecord) -> VendorComparison {
    let offer_lower = vendor.offer_text.to_lowercase();
    
    let detailed_comparison: Vec<RequirementVerdict> = requirements
        .iter()
        .map(|entry| evaluate_requirement(&entry.requirement, &vendor.offer_text, &offer_lower))
        .collect();
    
    let met_count = detailed_comparison
        .iter()
        .filter(|verdict| verdict.status.is_met())
        .count();
    let overall_status = OverallStatus::from_counts(met_count, requirements.len());
    
    debug!(
        vendor = %vendor.name,
        met = met_count,
        total = requirements.len(),
        status = %overall_status,
        "Evaluated vendor"
    );
    
    VendorComparison {
        vendor_name: vendor.name.clone(),
        overall_status,
        detailed_comparison,
        additional_features: Vec::new(),
    }
}

fn evaluate_requirement(requirement: &str, offer_text: &str, offer_lower: &str) -> RequirementVerdict {
    let requirement_lower = requirement.to_lowercase();
    
    match find_char_index(offer_lower, &requirement_lower) {
        Some(start) => RequirementVerdict {
            requirement: requirement.to_string(),
            status: VerdictStatus::Met,
            explanation: FOUND_EXPLANATION.to_string(),
            evidence: evidence_snippet(offer_text, start, requirement_lower.chars().count()),
        },
        None => RequirementVerdict {
            requirement: requirement.to_string(),
            status: VerdictStatus::NotMet,
            explanation: NOT_FOUND_EXPLANATION.to_string(),
            evidence: String::new(),
        },
    }
}

/// Character index of the first occurrence of `needle` in `haystack`
fn find_char_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_pos| haystack[..byte_pos].chars().count())
}

/// Snippet of the original-case offer starting at character `start`,
/// `match_len + 20` characters long (shorter at the end of the text),
/// followed by `...`.
pub fn evidence_snippet(offer_text: &str, start: usize, match_len: usize) -> String {
    let mut snippet: String = offer_text
        .chars()
        .skip(start)
        .take(match_len + EVIDENCE_TRAILING_CHARS)
        .collect();
    snippet.push_str(EVIDENCE_SUFFIX);
    snippet
}

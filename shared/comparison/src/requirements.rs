//! Requirement extraction
//! 
//! Every non-blank line of the specification text is one requirement.

use specmatch_models::RequirementEntry;
use specmatch_utils::{SpecMatchError, SpecMatchResult};
use tracing::debug;

/// Splits specification text into trimmed, non-blank requirement lines in
/// document order. Duplicate lines are kept.
pub fn extract_requirements(spec_text: &str) -> SpecMatchResult<Vec<RequirementEntry>> {
    let requirements: Vec<RequirementEntry> = spec_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RequirementEntry::new)
        .collect();
    
    if requirements.is_empty() {
        return Err(SpecMatchError::EmptyRequirements);
    }
    
    debug!(count = requirements.len(), "Extracted requirements");
    Ok(requirements)
}

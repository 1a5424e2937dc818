//! Property-based tests for the comparison pipeline

use proptest::prelude::*;
use specmatch_models::{OverallStatus, VendorRecord, VerdictStatus};

use crate::engine::{compare_vendor, compare_vendors, EVIDENCE_SUFFIX, EVIDENCE_TRAILING_CHARS};
use crate::report::{build_report_table, sorted_requirements};
use crate::requirements::extract_requirements;

prop_compose! {
    fn arb_requirement_line()(text in "[A-Za-z0-9:]{1,6}( [A-Za-z0-9:]{1,6}){0,3}") -> String {
        text
    }
}

prop_compose! {
    fn arb_vendor()(
        name in "[A-Z][a-z]{2,10}",
        offer in "[A-Za-z0-9 :,]{0,60}"
    ) -> VendorRecord {
        VendorRecord::new(name, offer)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// One entry per non-blank line, order preserved, details empty
    #[test]
    fn prop_requirement_per_line(
        lines in prop::collection::vec(arb_requirement_line(), 1..12),
        padding in prop::collection::vec("[ \t]{0,3}", 12),
        blank_every in 2usize..5,
    ) {
        let mut text = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i % blank_every == 0 {
                text.push_str("   \n");
            }
            text.push_str(&padding[i]);
            text.push_str(line);
            text.push_str(&padding[i]);
            text.push('\n');
        }
        
        let entries = extract_requirements(&text).unwrap();
        prop_assert_eq!(entries.len(), lines.len());
        for (entry, line) in entries.iter().zip(&lines) {
            prop_assert_eq!(&entry.requirement, line);
            prop_assert!(entry.details.is_empty());
        }
    }

    /// Verdict count and order follow the requirements for every vendor
    #[test]
    fn prop_verdicts_follow_requirements(
        lines in prop::collection::vec(arb_requirement_line(), 1..8),
        vendors in prop::collection::vec(arb_vendor(), 1..5),
    ) {
        let requirements = extract_requirements(&lines.join("\n")).unwrap();
        let results = compare_vendors(&requirements, &vendors);
        
        prop_assert_eq!(results.len(), vendors.len());
        for (result, vendor) in results.iter().zip(&vendors) {
            prop_assert_eq!(&result.vendor_name, &vendor.name);
            prop_assert_eq!(result.detailed_comparison.len(), requirements.len());
            for (verdict, entry) in result.detailed_comparison.iter().zip(&requirements) {
                prop_assert_eq!(&verdict.requirement, &entry.requirement);
            }
        }
    }

    /// Met exactly when the lowercased requirement occurs in the lowercased offer
    #[test]
    fn prop_case_insensitive_containment(
        prefix in "[a-z ]{0,10}",
        needle in "[A-Za-z]{1,8}",
        suffix in "[a-z ]{0,30}",
        upper in any::<bool>(),
    ) {
        let shown = if upper { needle.to_uppercase() } else { needle.to_lowercase() };
        let offer = format!("{}{}{}", prefix, shown, suffix);
        let result = compare_vendor(
            &extract_requirements(&needle).unwrap(),
            &VendorRecord::new("V", offer.clone()),
        );
        
        let verdict = &result.detailed_comparison[0];
        prop_assert_eq!(verdict.status, VerdictStatus::Met);
        prop_assert!(verdict.evidence.ends_with(EVIDENCE_SUFFIX));
        
        let snippet = &verdict.evidence[..verdict.evidence.len() - EVIDENCE_SUFFIX.len()];
        prop_assert!(snippet.len() <= needle.len() + EVIDENCE_TRAILING_CHARS);
        prop_assert!(offer.contains(snippet));
        prop_assert!(snippet.to_lowercase().starts_with(&needle.to_lowercase()));
    }

    /// Overall status is a function of met count and requirement count
    #[test]
    fn prop_overall_status_rule(
        lines in prop::collection::vec(arb_requirement_line(), 1..8),
        vendor in arb_vendor(),
    ) {
        let requirements = extract_requirements(&lines.join("\n")).unwrap();
        let result = compare_vendor(&requirements, &vendor);
        let met = result.met_count();
        
        let expected = if met == requirements.len() {
            OverallStatus::MetAll
        } else if met > 0 {
            OverallStatus::PartiallyMet
        } else {
            OverallStatus::DidNotMeet
        };
        prop_assert_eq!(result.overall_status, expected);
    }

    /// Same inputs, same verdicts
    #[test]
    fn prop_comparison_is_deterministic(
        lines in prop::collection::vec(arb_requirement_line(), 1..8),
        vendors in prop::collection::vec(arb_vendor(), 1..4),
    ) {
        let requirements = extract_requirements(&lines.join("\n")).unwrap();
        prop_assert_eq!(
            compare_vendors(&requirements, &vendors),
            compare_vendors(&requirements, &vendors)
        );
    }

    /// Requirement columns are the sorted union across vendors, even when
    /// vendors were compared against different requirement sets
    #[test]
    fn prop_report_columns_are_sorted_union(
        first in prop::collection::vec(arb_requirement_line(), 1..6),
        second in prop::collection::vec(arb_requirement_line(), 1..6),
        vendor in arb_vendor(),
    ) {
        let a = compare_vendor(&extract_requirements(&first.join("\n")).unwrap(), &vendor);
        let b = compare_vendor(&extract_requirements(&second.join("\n")).unwrap(), &vendor);
        let results = vec![a, b];
        
        let mut expected: Vec<String> = first.iter().chain(&second).cloned().collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(sorted_requirements(&results), expected.clone());
        
        let table = build_report_table("P", &results);
        prop_assert_eq!(table.headers.len(), 4 + 3 * expected.len());
        for (i, requirement) in expected.iter().enumerate() {
            prop_assert_eq!(&table.headers[4 + 3 * i], &format!("{} - Status", requirement));
        }
        for row in &table.rows {
            prop_assert_eq!(row.len(), table.headers.len());
        }
    }
}

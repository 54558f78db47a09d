use std::collections::HashSet;

use serde::Serialize;

use crate::diagnostic::{DiagnosticResult, FaultCode, ScanType};

/// Before/after view of one vehicle across a repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub before: DiagnosticResult,
    pub after: DiagnosticResult,
    pub resolved_codes: Vec<String>,
    pub persisting_codes: Vec<String>,
    pub new_codes: Vec<String>,
    pub health_improvement: i32,
}

/// Whether `before` and `after` form an initial/post-repair pair for the
/// same VIN.
pub fn is_comparable(before: &DiagnosticResult, after: &DiagnosticResult) -> bool {
    before.vin() == after.vin()
        && before.scan_type() == ScanType::Initial
        && after.scan_type() == ScanType::PostRepair
}

pub fn compare(before: &DiagnosticResult, after: &DiagnosticResult) -> Option<ComparisonResult> {
    if !is_comparable(before, after) {
        return None;
    }

    let before_codes = unique_codes(before.errors());
    let after_codes = unique_codes(after.errors());
    let before_set: HashSet<&str> = before_codes.iter().copied().collect();
    let after_set: HashSet<&str> = after_codes.iter().copied().collect();

    let resolved_codes = before_codes
        .iter()
        .filter(|c| !after_set.contains(*c))
        .map(|c| c.to_string())
        .collect();
    let persisting_codes = before_codes
        .iter()
        .filter(|c| after_set.contains(*c))
        .map(|c| c.to_string())
        .collect();
    let new_codes = after_codes
        .iter()
        .filter(|c| !before_set.contains(*c))
        .map(|c| c.to_string())
        .collect();

    Some(ComparisonResult {
        before: before.clone(),
        after: after.clone(),
        resolved_codes,
        persisting_codes,
        new_codes,
        health_improvement: after.health_score() as i32 - before.health_score() as i32,
    })
}

fn unique_codes(errors: &[FaultCode]) -> Vec<&str> {
    let mut seen = HashSet::new();
    errors
        .iter()
        .map(|e| e.code.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

use crate::report_query::domain::VulnerabilityRecord;
use serde_json::Value;

/// VulnerabilityShape policy for reading vulnerabilities across report versions
///
/// Report versions disagree on both the container and the field names:
///
/// Container:
/// 1. flat list: `vulnerabilities: [V]`
/// 2. scan report: `vulnerabilities: { Results: [{ Vulnerabilities: [V] }] }`
///
/// Fields (first present wins):
/// - identifier: `VulnerabilityID`, then `cve`
/// - severity: `Severity`, then `severity`
/// - component: `component`
///
/// All version skew is resolved here; callers only see flat sequences of
/// [`VulnerabilityRecord`].
pub struct VulnerabilityShape;

impl VulnerabilityShape {
    const RESULTS_FIELD: &'static str = "Results";
    const NESTED_VULNERABILITIES_FIELD: &'static str = "Vulnerabilities";
    const ID_FIELDS: [&'static str; 2] = ["VulnerabilityID", "cve"];
    const SEVERITY_FIELDS: [&'static str; 2] = ["Severity", "severity"];
    const COMPONENT_FIELD: &'static str = "component";

    /// Flattens the raw `vulnerabilities` value into one ordered sequence
    ///
    /// # Arguments
    /// * `source` - The root `vulnerabilities` value, if present
    ///
    /// # Returns
    /// Entries in document order: a flat list is returned as-is, the nested
    /// shape is concatenated result by result. Anything else is empty.
    pub fn flatten(source: Option<&Value>) -> Vec<&Value> {
        match source {
            Some(Value::Array(entries)) => entries.iter().collect(),
            Some(Value::Object(report)) => report
                .get(Self::RESULTS_FIELD)
                .and_then(Value::as_array)
                .map(|results| {
                    results
                        .iter()
                        .filter_map(|result| {
                            result
                                .get(Self::NESTED_VULNERABILITIES_FIELD)
                                .and_then(Value::as_array)
                        })
                        .flatten()
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Maps one raw entry to its canonical record
    pub fn normalize(raw: &Value) -> VulnerabilityRecord<'_> {
        VulnerabilityRecord::new(
            Self::first_str(raw, &Self::ID_FIELDS),
            Self::first_str(raw, &Self::SEVERITY_FIELDS),
            raw.get(Self::COMPONENT_FIELD).and_then(Value::as_str),
            raw,
        )
    }

    /// Flattens and normalizes in one step
    pub fn records(source: Option<&Value>) -> Vec<VulnerabilityRecord<'_>> {
        Self::flatten(source)
            .into_iter()
            .map(Self::normalize)
            .collect()
    }

    fn first_str<'a>(raw: &'a Value, fields: &[&str]) -> Option<&'a str> {
        fields
            .iter()
            .find_map(|field| raw.get(*field).and_then(Value::as_str))
    }
}

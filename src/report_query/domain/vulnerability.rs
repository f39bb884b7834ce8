use serde_json::Value;

/// Canonical view of one vulnerability entry, whatever report version it
/// came from.
///
/// Lookups and filters work on the canonical fields; `raw` is what gets
/// returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VulnerabilityRecord<'a> {
    id: Option<&'a str>,
    severity: Option<&'a str>,
    component: Option<&'a str>,
    raw: &'a Value,
}

impl<'a> VulnerabilityRecord<'a> {
    pub fn new(
        id: Option<&'a str>,
        severity: Option<&'a str>,
        component: Option<&'a str>,
        raw: &'a Value,
    ) -> Self {
        Self {
            id,
            severity,
            component,
            raw,
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.id
    }

    pub fn severity(&self) -> Option<&'a str> {
        self.severity
    }

    pub fn component(&self) -> Option<&'a str> {
        self.component
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// Case-insensitive severity comparison
    pub fn has_severity(&self, level: &str) -> bool {
        self.severity
            .is_some_and(|severity| severity.to_lowercase() == level.to_lowercase())
    }
}

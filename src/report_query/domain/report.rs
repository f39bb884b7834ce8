use serde_json::Value;

const KBOM_FIELD: &str = "kbom";
const COMPONENTS_FIELD: &str = "components";
const DEPENDENCIES_FIELD: &str = "dependencies";
const METADATA_FIELD: &str = "metadata";
const TOOLS_FIELD: &str = "tools";
const SCHEMA_FIELD: &str = "$schema";
const VULNERABILITIES_FIELD: &str = "vulnerabilities";
const NAME_FIELD: &str = "name";

/// A parsed KBOM report document.
///
/// The document stays an untyped JSON value so that every projection is
/// serialized back exactly as it was stored; this wrapper only knows where
/// the interesting sub-structures live. `null` is treated the same as an
/// absent field.
#[derive(Debug, Clone, PartialEq)]
pub struct KbomReport {
    document: Value,
}

impl KbomReport {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn into_document(self) -> Value {
        self.document
    }

    fn kbom_field(&self, field: &str) -> Option<&Value> {
        present(self.document.get(KBOM_FIELD)?.get(field))
    }

    /// Components listed under `kbom.components`, empty if the list is
    /// missing or not an array
    pub fn components(&self) -> &[Value] {
        self.kbom_field(COMPONENTS_FIELD)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.kbom_field(METADATA_FIELD)
    }

    /// `kbom.metadata.tools`
    pub fn tools(&self) -> Option<&Value> {
        present(self.metadata()?.get(TOOLS_FIELD))
    }

    /// The top-level `kbom.dependencies` block, not a component's list
    pub fn top_level_dependencies(&self) -> Option<&Value> {
        self.kbom_field(DEPENDENCIES_FIELD)
    }

    pub fn schema(&self) -> Option<&Value> {
        self.kbom_field(SCHEMA_FIELD)
    }

    /// The raw root-level `vulnerabilities` value, in whichever shape the
    /// report version uses
    pub fn vulnerability_source(&self) -> Option<&Value> {
        present(self.document.get(VULNERABILITIES_FIELD))
    }
}

/// Name of a component or dependency entry
pub fn entry_name(entry: &Value) -> Option<&str> {
    entry.get(NAME_FIELD).and_then(Value::as_str)
}

/// Dependencies of a component entry, empty if it has none
pub fn entry_dependencies(entry: &Value) -> &[Value] {
    entry
        .get(DEPENDENCIES_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

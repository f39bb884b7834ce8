use crate::report_query::domain::report::{entry_dependencies, entry_name};
use crate::report_query::domain::{KbomReport, Route};
use crate::report_query::policies::VulnerabilityShape;
use crate::shared::error::QueryError;
use serde_json::Value;

/// ReportProjector service for extracting sub-structures from a report
///
/// This service contains the pure lookup and filter logic behind every
/// route. It has no I/O dependencies and never mutates the report.
pub struct ReportProjector;

impl ReportProjector {
    /// Answers a classified route against a report
    ///
    /// # Returns
    /// The JSON payload for a 200 response. Filters that match nothing
    /// produce an empty array rather than an error.
    ///
    /// # Errors
    /// Returns `QueryError::NotFound` when the requested entity or section
    /// is absent. A missing component is reported before a missing
    /// dependency.
    pub fn project(report: KbomReport, route: &Route) -> Result<Value, QueryError> {
        match route {
            Route::FullReport => Ok(report.into_document()),
            Route::Component { component } => Self::find_component(&report, component)
                .cloned()
                .ok_or_else(|| QueryError::component_not_found(component)),
            Route::Dependency {
                component,
                resource,
            } => {
                let component_entry = Self::find_component(&report, component)
                    .ok_or_else(|| QueryError::component_not_found(component))?;
                Self::find_dependency(component_entry, resource)
                    .cloned()
                    .ok_or_else(|| QueryError::resource_not_found(resource, component))
            }
            Route::Metadata => Self::section(report.metadata(), "Metadata"),
            Route::TopLevelDependencies => {
                Self::section(report.top_level_dependencies(), "Dependencies")
            }
            Route::Tools => Self::section(report.tools(), "Tools"),
            Route::Schema => Self::section(report.schema(), "Schema"),
            Route::AllVulnerabilities => Ok(Self::to_array(Self::extract_vulnerabilities(
                &report,
            ))),
            Route::VulnerabilityById { id } | Route::VulnerabilityByCve { cve: id } => {
                Self::find_vulnerability_by_id(&report, id)
                    .cloned()
                    .ok_or_else(|| QueryError::vulnerability_not_found(id))
            }
            Route::VulnerabilitiesBySeverity { level } => {
                Ok(Self::to_array(Self::filter_by_severity(&report, level)))
            }
            Route::VulnerabilitiesByComponent { component } => {
                Ok(Self::to_array(Self::filter_by_component(&report, component)))
            }
        }
    }

    /// First component whose `name` equals `name`
    pub fn find_component<'a>(report: &'a KbomReport, name: &str) -> Option<&'a Value> {
        report
            .components()
            .iter()
            .find(|component| entry_name(component) == Some(name))
    }

    /// First dependency of `component` whose `name` equals `name`
    pub fn find_dependency<'a>(component: &'a Value, name: &str) -> Option<&'a Value> {
        entry_dependencies(component)
            .iter()
            .find(|dependency| entry_name(dependency) == Some(name))
    }

    /// All vulnerabilities as one flat, ordered sequence
    pub fn extract_vulnerabilities(report: &KbomReport) -> Vec<&Value> {
        VulnerabilityShape::flatten(report.vulnerability_source())
    }

    /// First vulnerability whose identifier equals `id`
    pub fn find_vulnerability_by_id<'a>(report: &'a KbomReport, id: &str) -> Option<&'a Value> {
        VulnerabilityShape::records(report.vulnerability_source())
            .into_iter()
            .find(|record| record.id() == Some(id))
            .map(|record| record.raw())
    }

    /// Vulnerabilities whose severity equals `level`, ignoring case
    pub fn filter_by_severity<'a>(report: &'a KbomReport, level: &str) -> Vec<&'a Value> {
        VulnerabilityShape::records(report.vulnerability_source())
            .into_iter()
            .filter(|record| record.has_severity(level))
            .map(|record| record.raw())
            .collect()
    }

    /// Vulnerabilities whose `component` equals `name`
    pub fn filter_by_component<'a>(report: &'a KbomReport, name: &str) -> Vec<&'a Value> {
        VulnerabilityShape::records(report.vulnerability_source())
            .into_iter()
            .filter(|record| record.component() == Some(name))
            .map(|record| record.raw())
            .collect()
    }

    fn section(value: Option<&Value>, section: &str) -> Result<Value, QueryError> {
        value
            .cloned()
            .ok_or_else(|| QueryError::section_not_found(section))
    }

    fn to_array(values: Vec<&Value>) -> Value {
        Value::Array(values.into_iter().cloned().collect())
    }
}

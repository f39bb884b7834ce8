use std::fmt;

/// A classified request, one variant per recognized path pattern.
///
/// Parameters are stored percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/bom`
    FullReport,
    /// `/bom/{component}`
    Component { component: String },
    /// `/bom/{component}/{resource}`
    Dependency { component: String, resource: String },
    /// `/bom/metadata`
    Metadata,
    /// `/bom/dependencies`
    TopLevelDependencies,
    /// `/bom/tools`
    Tools,
    /// `/bom/schema`
    Schema,
    /// `/vulnerabilities`
    AllVulnerabilities,
    /// `/vulnerabilities/{id}`
    VulnerabilityById { id: String },
    /// `/vulnerabilities/cve/{cve}` (legacy)
    VulnerabilityByCve { cve: String },
    /// `/vulnerabilities/severity/{level}`
    VulnerabilitiesBySeverity { level: String },
    /// `/vulnerabilities/component/{component}` (legacy)
    VulnerabilitiesByComponent { component: String },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::FullReport => write!(f, "/bom"),
            Route::Component { component } => write!(f, "/bom/{}", component),
            Route::Dependency {
                component,
                resource,
            } => write!(f, "/bom/{}/{}", component, resource),
            Route::Metadata => write!(f, "/bom/metadata"),
            Route::TopLevelDependencies => write!(f, "/bom/dependencies"),
            Route::Tools => write!(f, "/bom/tools"),
            Route::Schema => write!(f, "/bom/schema"),
            Route::AllVulnerabilities => write!(f, "/vulnerabilities"),
            Route::VulnerabilityById { id } => write!(f, "/vulnerabilities/{}", id),
            Route::VulnerabilityByCve { cve } => write!(f, "/vulnerabilities/cve/{}", cve),
            Route::VulnerabilitiesBySeverity { level } => {
                write!(f, "/vulnerabilities/severity/{}", level)
            }
            Route::VulnerabilitiesByComponent { component } => {
                write!(f, "/vulnerabilities/component/{}", component)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_display() {
        assert_eq!(Route::FullReport.to_string(), "/bom");
        assert_eq!(
            Route::Dependency {
                component: "etcd".to_string(),
                resource: "grpc".to_string(),
            }
            .to_string(),
            "/bom/etcd/grpc"
        );
        assert_eq!(
            Route::VulnerabilitiesBySeverity {
                level: "high".to_string()
            }
            .to_string(),
            "/vulnerabilities/severity/high"
        );
    }
}

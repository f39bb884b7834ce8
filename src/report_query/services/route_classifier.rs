use crate::report_query::domain::Route;
use crate::shared::error::QueryError;

/// One segment of a route pattern
#[derive(Debug, Clone, Copy)]
enum Segment {
    /// Must equal the given text exactly
    Literal(&'static str),
    /// Any non-empty segment
    Param,
    /// Any non-empty segment except the listed literals
    ParamExcept(&'static [&'static str]),
}

impl Segment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(literal) => segment == *literal,
            Segment::Param => !segment.is_empty(),
            Segment::ParamExcept(reserved) => !segment.is_empty() && !reserved.contains(&segment),
        }
    }

    fn is_param(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }
}

/// A pattern plus the constructor invoked with its parameter values in order
struct RoutePattern {
    segments: &'static [Segment],
    build: fn(&[String]) -> Route,
}

use Segment::{Literal, Param, ParamExcept};

const VULNERABILITY_LITERALS: &[&str] = &["cve", "severity", "component"];

/// The route table. Evaluated top to bottom, first match wins, so literal
/// patterns must precede the parameterized patterns they overlap with.
const ROUTES: &[RoutePattern] = &[
    RoutePattern {
        segments: &[],
        build: |_| Route::FullReport,
    },
    RoutePattern {
        segments: &[Literal("bom")],
        build: |_| Route::FullReport,
    },
    RoutePattern {
        segments: &[Literal("bom"), Literal("metadata")],
        build: |_| Route::Metadata,
    },
    RoutePattern {
        segments: &[Literal("bom"), Literal("dependencies")],
        build: |_| Route::TopLevelDependencies,
    },
    RoutePattern {
        segments: &[Literal("bom"), Literal("tools")],
        build: |_| Route::Tools,
    },
    RoutePattern {
        segments: &[Literal("bom"), Literal("schema")],
        build: |_| Route::Schema,
    },
    RoutePattern {
        segments: &[Literal("bom"), Param],
        build: |p| Route::Component {
            component: p[0].clone(),
        },
    },
    RoutePattern {
        segments: &[Literal("bom"), Param, Param],
        build: |p| Route::Dependency {
            component: p[0].clone(),
            resource: p[1].clone(),
        },
    },
    RoutePattern {
        segments: &[Literal("vulnerabilities")],
        build: |_| Route::AllVulnerabilities,
    },
    RoutePattern {
        segments: &[Literal("vulnerabilities"), Literal("cve"), Param],
        build: |p| Route::VulnerabilityByCve { cve: p[0].clone() },
    },
    RoutePattern {
        segments: &[Literal("vulnerabilities"), Literal("severity"), Param],
        build: |p| Route::VulnerabilitiesBySeverity {
            level: p[0].clone(),
        },
    },
    RoutePattern {
        segments: &[Literal("vulnerabilities"), Literal("component"), Param],
        build: |p| Route::VulnerabilitiesByComponent {
            component: p[0].clone(),
        },
    },
    RoutePattern {
        segments: &[Literal("vulnerabilities"), ParamExcept(VULNERABILITY_LITERALS)],
        build: |p| Route::VulnerabilityById { id: p[0].clone() },
    },
];

/// RouteClassifier service for mapping request paths onto [`Route`]s
///
/// Pure and deterministic: the same path always yields the same route or
/// the same rejection.
pub struct RouteClassifier;

impl RouteClassifier {
    /// Classifies a raw request path
    ///
    /// The path is normalized first: any query string is dropped, leading
    /// and trailing slashes are stripped, the remainder is split on `/` and
    /// every segment is percent-decoded.
    ///
    /// # Errors
    /// Returns `QueryError::BadRoute` if a segment is not valid
    /// percent-encoded UTF-8 or no pattern matches.
    pub fn classify(path: &str) -> Result<Route, QueryError> {
        let segments = Self::normalize(path).ok_or_else(|| Self::bad_route(path))?;

        ROUTES
            .iter()
            .find(|pattern| Self::matches(pattern, &segments))
            .map(|pattern| {
                let params: Vec<String> = pattern
                    .segments
                    .iter()
                    .zip(segments.iter())
                    .filter(|(pattern_segment, _)| pattern_segment.is_param())
                    .map(|(_, segment)| segment.clone())
                    .collect();
                (pattern.build)(&params)
            })
            .ok_or_else(|| Self::bad_route(path))
    }

    /// Splits a path into decoded segments. `None` if decoding fails.
    fn normalize(path: &str) -> Option<Vec<String>> {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(Vec::new());
        }

        trimmed
            .split('/')
            .map(|segment| {
                urlencoding::decode(segment)
                    .ok()
                    .map(|decoded| decoded.into_owned())
            })
            .collect()
    }

    fn matches(pattern: &RoutePattern, segments: &[String]) -> bool {
        pattern.segments.len() == segments.len()
            && pattern
                .segments
                .iter()
                .zip(segments)
                .all(|(pattern_segment, segment)| pattern_segment.matches(segment))
    }

    fn bad_route(path: &str) -> QueryError {
        QueryError::BadRoute {
            path: path.to_string(),
        }
    }
}

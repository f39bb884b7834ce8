mod report_projector;
mod route_classifier;

pub use report_projector::ReportProjector;
pub use route_classifier::RouteClassifier;

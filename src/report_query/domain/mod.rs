pub mod report;
pub mod route;
pub mod vulnerability;

pub use report::KbomReport;
pub use route::Route;
pub use vulnerability::VulnerabilityRecord;

/// Use cases module containing application business logic orchestration
mod query_report;

pub use query_report::QueryReportUseCase;

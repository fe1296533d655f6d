//! Service layer containing command-line orchestration.

mod report;

pub use report::ReportService;

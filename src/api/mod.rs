//! REST interface to the trip attribution reports

pub mod handlers;
pub mod service;

pub use service::ReportService;

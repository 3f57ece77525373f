pub mod fetch_service;
pub mod merge_service;
pub mod pacing;
pub mod report_service;

pub mod chart_data;
pub mod report_data;
pub mod report_request;

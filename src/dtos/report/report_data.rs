use serde::Serialize;

use crate::dtos::document::document_response::DocumentResponse;
use crate::dtos::report::report_request::CustomReportRequest;

/// One calendar date: totals plus the day's documents and type breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportData {
    pub date: String,
    pub date_display: String,
    pub total_documents: usize,
    pub sent_documents: usize,
    pub received_documents: usize,
    pub documents: Vec<DocumentResponse>,
    pub type_breakdown: Vec<TypeStatistics>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportData {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_documents: usize,
    pub sent_documents: usize,
    pub received_documents: usize,
    /// Exactly one entry per day of the month, zero-filled.
    pub daily_breakdown: Vec<DailyStatistics>,
    pub type_breakdown: Vec<TypeStatistics>,
    pub sender_breakdown: Vec<SenderStatistics>,
    pub daily_average: f64,
    pub highest_day: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatistics {
    pub date: String,
    pub day: u32,
    pub total_documents: usize,
    pub sent_documents: usize,
    pub received_documents: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReportData {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_documents: usize,
    pub sent_documents: usize,
    pub received_documents: usize,
    pub pending_documents: usize,
    pub sent_percentage: f64,
    pub received_percentage: f64,
    pub pending_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderStatistics {
    pub sender_name: String,
    pub document_count: usize,
    pub sent_count: usize,
    pub received_count: usize,
    pub last_document_date: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStatistics {
    pub fax_type: String,
    pub fax_type_name: String,
    pub document_count: usize,
    pub percentage: f64,
    pub badge_class: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReportData {
    pub report_title: String,
    pub generated_date: String,
    pub parameters: CustomReportRequest,
    pub documents: Vec<DocumentResponse>,
    pub summary: ReportSummary,
    pub type_breakdown: Vec<TypeStatistics>,
    pub sender_breakdown: Vec<SenderStatistics>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_documents: usize,
    pub sent_documents: usize,
    pub received_documents: usize,
    pub pending_documents: usize,
    pub sent_percentage: f64,
    pub received_percentage: f64,
    pub pending_percentage: f64,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
    pub unique_senders: usize,
    pub unique_recipients: usize,
}

/// Dashboard payload combining the headline numbers with today's and this
/// month's reports. Sub-report failures degrade to empty sections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewData {
    pub total_documents: u64,
    pub sent_documents: u64,
    pub received_documents: u64,
    pub today_report: Option<DailyReportData>,
    pub current_month_report: Option<MonthlyReportData>,
    pub status_report: Option<StatusReportData>,
    pub top_senders: Vec<SenderStatistics>,
    pub type_breakdown: Vec<TypeStatistics>,
}

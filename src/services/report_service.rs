use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::dtos::document::document_response::DocumentResponse;
use crate::dtos::report::{
    chart_data::{ChartData, ChartDataset},
    report_data::{
        CustomReportData, DailyReportData, DailyStatistics, MonthlyReportData, OverviewData,
        ReportSummary, SenderStatistics, StatusReportData, TypeStatistics,
    },
    report_request::{ChartType, CustomReportRequest},
};
use crate::models::{constants, document_model::Document, service_result::ServiceResult};
use crate::services::document_service::DocumentService;
use crate::services::error::{into_service_result, ServiceError};

/// In-memory aggregation over the full document set. Each report pulls
/// every record through the document service and groups/counts it here;
/// nothing is cached.
#[derive(Clone)]
pub struct ReportService {
    documents: DocumentService,
}

impl ReportService {
    pub fn new(documents: DocumentService) -> Self {
        ReportService { documents }
    }

    async fn fetch_all(&self) -> Result<Vec<Document>, ServiceError> {
        let result = self.documents.get_all().await;
        if result.success {
            Ok(result.data.unwrap_or_default())
        } else {
            Err(ServiceError::Validation("فشل في جلب البيانات".to_string()))
        }
    }

    pub async fn daily_report(&self, date: NaiveDate) -> ServiceResult<DailyReportData> {
        let outcome = async {
            let documents = self.fetch_all().await?;
            let report = build_daily_report(&documents, date);
            let message = format!("تم إنشاء التقرير اليومي لتاريخ {}", date.format("%Y/%m/%d"));
            Ok((report, message))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء التقرير اليومي")
    }

    pub async fn monthly_report(&self, year: i32, month: u32) -> ServiceResult<MonthlyReportData> {
        let outcome = async {
            if days_in_month(year, month) == 0 {
                return Err(ServiceError::Validation(
                    "قيمة الشهر غير صحيحة".to_string(),
                ));
            }
            let documents = self.fetch_all().await?;
            let report = build_monthly_report(&documents, year, month);
            let message = format!(
                "تم إنشاء التقرير الشهري لشهر {} {}",
                report.month_name, year
            );
            Ok((report, message))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء التقرير الشهري")
    }

    pub async fn status_report(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ServiceResult<StatusReportData> {
        let outcome = async {
            let documents = self.fetch_all().await?;
            let report = build_status_report(&documents, start_date, end_date);
            Ok((report, "تم إنشاء تقرير الحالات".to_string()))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء تقرير الحالات")
    }

    pub async fn sender_statistics(&self) -> ServiceResult<Vec<SenderStatistics>> {
        let outcome = async {
            let documents = self.fetch_all().await?;
            Ok((
                sender_stats(&documents),
                "تم إنشاء إحصائيات المرسلين".to_string(),
            ))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء إحصائيات المرسلين")
    }

    pub async fn type_statistics(&self) -> ServiceResult<Vec<TypeStatistics>> {
        let outcome = async {
            let documents = self.fetch_all().await?;
            Ok((
                type_stats(&documents),
                "تم إنشاء إحصائيات الأنواع".to_string(),
            ))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء إحصائيات الأنواع")
    }

    pub async fn custom_report(
        &self,
        request: CustomReportRequest,
    ) -> ServiceResult<CustomReportData> {
        let outcome = async {
            let documents = self.fetch_all().await?;
            let filtered = apply_custom_filters(documents, &request);

            let report = CustomReportData {
                report_title: report_title(&request),
                generated_date: Utc::now().format("%Y-%m-%d %H:%M").to_string(),
                parameters: request,
                summary: report_summary(&filtered),
                type_breakdown: type_stats(&filtered),
                sender_breakdown: sender_stats(&filtered),
                documents: filtered
                    .iter()
                    .map(DocumentResponse::filter_document)
                    .collect(),
            };
            Ok((report, "تم إنشاء التقرير المخصص بنجاح".to_string()))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء التقرير المخصص")
    }

    pub async fn chart_data(
        &self,
        chart_type: ChartType,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ServiceResult<ChartData> {
        let outcome = async {
            let documents = self.fetch_all().await?;
            let documents = filter_by_range(documents, start_date, end_date);

            let chart = match chart_type {
                ChartType::StatusDistribution => status_distribution_chart(&documents),
                ChartType::TypeDistribution => type_distribution_chart(&documents),
                ChartType::SenderDistribution => sender_distribution_chart(&documents),
                ChartType::DailyTrend => daily_trend_chart(&documents, start_date, end_date),
                ChartType::MonthlyTrend => monthly_trend_chart(&documents),
            };
            Ok((chart, "تم إنشاء بيانات الرسم البياني".to_string()))
        }
        .await;
        into_service_result(outcome, "حدث خطأ في إنشاء بيانات الرسم البياني")
    }

    /// Dashboard payload; a failing sub-report degrades to an empty
    /// section instead of failing the whole overview.
    pub async fn overview(&self) -> OverviewData {
        let today = Utc::now().date_naive();
        let statistics = self.documents.statistics().await.data.unwrap_or_default();

        let today_report = self.daily_report(today).await.data;
        let current_month_report = self.monthly_report(today.year(), today.month()).await.data;
        let status_report = self.status_report(None, None).await.data;
        let mut top_senders = self.sender_statistics().await.data.unwrap_or_default();
        top_senders.truncate(5);
        let type_breakdown = self.type_statistics().await.data.unwrap_or_default();

        OverviewData {
            total_documents: statistics.total,
            sent_documents: statistics.sent,
            received_documents: statistics.received,
            today_report,
            current_month_report,
            status_report,
            top_senders,
            type_breakdown,
        }
    }

    pub async fn export_pdf(
        &self,
        _report_type: &str,
        _parameters: &str,
    ) -> ServiceResult<Vec<u8>> {
        // TODO(export): wire a PDF renderer once one is picked.
        ServiceResult::fail("تصدير PDF غير متاح حالياً")
    }

    pub async fn export_excel(
        &self,
        _report_type: &str,
        _parameters: &str,
    ) -> ServiceResult<Vec<u8>> {
        ServiceResult::fail("تصدير Excel غير متاح حالياً")
    }
}

/// `part / total` as a percentage rounded to one decimal; 0 for an empty
/// total.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> i64 {
    let start = NaiveDate::from_ymd_opt(year, month, 1);
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 0,
    }
}

fn count_status(documents: &[Document], status: &str) -> usize {
    documents.iter().filter(|d| d.has_status(status)).count()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn build_daily_report(documents: &[Document], date: NaiveDate) -> DailyReportData {
    let day_docs: Vec<Document> = documents
        .iter()
        .filter(|d| d.date_created.date_naive() == date)
        .cloned()
        .collect();

    DailyReportData {
        date: date.format("%Y-%m-%d").to_string(),
        date_display: date.format("%d/%m/%Y").to_string(),
        total_documents: day_docs.len(),
        sent_documents: count_status(&day_docs, "sent"),
        received_documents: count_status(&day_docs, "received"),
        type_breakdown: type_stats(&day_docs),
        documents: day_docs
            .iter()
            .map(DocumentResponse::filter_document)
            .collect(),
    }
}

fn build_monthly_report(documents: &[Document], year: i32, month: u32) -> MonthlyReportData {
    let monthly_docs: Vec<Document> = documents
        .iter()
        .filter(|d| d.date_created.year() == year && d.date_created.month() == month)
        .cloned()
        .collect();

    let daily_breakdown = daily_breakdown(&monthly_docs, year, month);
    let highest_day = daily_breakdown
        .iter()
        .map(|d| d.total_documents)
        .max()
        .unwrap_or(0);
    let days = days_in_month(year, month);
    let daily_average = if monthly_docs.is_empty() || days == 0 {
        0.0
    } else {
        round1(monthly_docs.len() as f64 / days as f64)
    };

    MonthlyReportData {
        year,
        month,
        month_name: constants::month_name(month).to_string(),
        total_documents: monthly_docs.len(),
        sent_documents: count_status(&monthly_docs, "sent"),
        received_documents: count_status(&monthly_docs, "received"),
        daily_breakdown,
        type_breakdown: type_stats(&monthly_docs),
        sender_breakdown: sender_stats(&monthly_docs),
        daily_average,
        highest_day,
    }
}

fn build_status_report(
    documents: &[Document],
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> StatusReportData {
    let in_range: Vec<&Document> = documents
        .iter()
        .filter(|d| match (start_date, end_date) {
            (Some(start), Some(end)) => {
                let date = d.date_created.date_naive();
                date >= start && date <= end
            }
            _ => true,
        })
        .collect();

    let total = in_range.len();
    let sent = in_range.iter().filter(|d| d.has_status("sent")).count();
    let received = in_range.iter().filter(|d| d.has_status("received")).count();
    let pending = total.saturating_sub(sent).saturating_sub(received);

    StatusReportData {
        start_date: start_date.map(|d| d.format("%Y-%m-%d").to_string()),
        end_date: end_date.map(|d| d.format("%Y-%m-%d").to_string()),
        total_documents: total,
        sent_documents: sent,
        received_documents: received,
        pending_documents: pending,
        sent_percentage: percentage(sent, total),
        received_percentage: percentage(received, total),
        pending_percentage: percentage(pending, total),
    }
}

/// Per-sender counts and share of the whole set; documents without a
/// sender are excluded from the grouping but still count in the base.
pub(crate) fn sender_stats(documents: &[Document]) -> Vec<SenderStatistics> {
    let total = documents.len();
    let mut groups: HashMap<&str, Vec<&Document>> = HashMap::new();
    for document in documents {
        if let Some(sender) = document.sender.as_deref().filter(|s| !s.is_empty()) {
            groups.entry(sender).or_default().push(document);
        }
    }

    let mut stats: Vec<SenderStatistics> = groups
        .into_iter()
        .map(|(sender, group)| SenderStatistics {
            sender_name: sender.to_string(),
            document_count: group.len(),
            sent_count: group.iter().filter(|d| d.has_status("sent")).count(),
            received_count: group.iter().filter(|d| d.has_status("received")).count(),
            last_document_date: group
                .iter()
                .map(|d| d.date_created)
                .max()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            percentage: percentage(group.len(), total),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.document_count
            .cmp(&a.document_count)
            .then_with(|| a.sender_name.cmp(&b.sender_name))
    });
    stats
}

pub(crate) fn type_stats(documents: &[Document]) -> Vec<TypeStatistics> {
    let total = documents.len();
    let mut groups: HashMap<&str, usize> = HashMap::new();
    for document in documents {
        if let Some(fax_type) = document.fax_type.as_deref().filter(|t| !t.is_empty()) {
            *groups.entry(fax_type).or_default() += 1;
        }
    }

    let mut stats: Vec<TypeStatistics> = groups
        .into_iter()
        .map(|(fax_type, count)| TypeStatistics {
            fax_type: fax_type.to_string(),
            fax_type_name: constants::fax_type_name(fax_type).to_string(),
            document_count: count,
            percentage: percentage(count, total),
            badge_class: constants::fax_type_badge(fax_type).to_string(),
        })
        .collect();

    stats.sort_by(|a, b| {
        b.document_count
            .cmp(&a.document_count)
            .then_with(|| a.fax_type.cmp(&b.fax_type))
    });
    stats
}

/// One entry per day of the month, zero-filled for days with no activity.
pub(crate) fn daily_breakdown(
    documents: &[Document],
    year: i32,
    month: u32,
) -> Vec<DailyStatistics> {
    let days = days_in_month(year, month);
    let mut breakdown = Vec::with_capacity(days as usize);

    for day in 1..=days as u32 {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let day_docs: Vec<&Document> = documents
            .iter()
            .filter(|d| d.date_created.date_naive() == date)
            .collect();

        breakdown.push(DailyStatistics {
            date: date.format("%Y-%m-%d").to_string(),
            day,
            total_documents: day_docs.len(),
            sent_documents: day_docs.iter().filter(|d| d.has_status("sent")).count(),
            received_documents: day_docs.iter().filter(|d| d.has_status("received")).count(),
        });
    }
    breakdown
}

pub(crate) fn report_summary(documents: &[Document]) -> ReportSummary {
    let total = documents.len();
    let sent = count_status(documents, "sent");
    let received = count_status(documents, "received");
    let pending = total.saturating_sub(sent).saturating_sub(received);

    let unique = |values: Vec<Option<&str>>| {
        values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .collect::<HashSet<_>>()
            .len()
    };

    ReportSummary {
        total_documents: total,
        sent_documents: sent,
        received_documents: received,
        pending_documents: pending,
        sent_percentage: percentage(sent, total),
        received_percentage: percentage(received, total),
        pending_percentage: percentage(pending, total),
        earliest_date: documents
            .iter()
            .map(|d| d.date_created)
            .min()
            .map(|d| d.format("%Y-%m-%d").to_string()),
        latest_date: documents
            .iter()
            .map(|d| d.date_created)
            .max()
            .map(|d| d.format("%Y-%m-%d").to_string()),
        unique_senders: unique(documents.iter().map(|d| d.sender.as_deref()).collect()),
        unique_recipients: unique(documents.iter().map(|d| d.recipient.as_deref()).collect()),
    }
}

pub(crate) fn apply_custom_filters(
    documents: Vec<Document>,
    request: &CustomReportRequest,
) -> Vec<Document> {
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase)
    };
    let status = non_empty(&request.status);
    let fax_type = non_empty(&request.fax_type);
    let sender = non_empty(&request.sender);
    let recipient = non_empty(&request.recipient);

    documents
        .into_iter()
        .filter(|d| {
            let date = d.date_created.date_naive();
            if request.start_date.is_some_and(|start| date < start) {
                return false;
            }
            if request.end_date.is_some_and(|end| date > end) {
                return false;
            }
            if let Some(status) = &status {
                if d.status.as_deref().map(str::to_lowercase).as_deref() != Some(status) {
                    return false;
                }
            }
            if let Some(fax_type) = &fax_type {
                if d.fax_type.as_deref().map(str::to_lowercase).as_deref() != Some(fax_type) {
                    return false;
                }
            }
            if let Some(sender) = &sender {
                let matches = d
                    .sender
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(sender.as_str()));
                if !matches {
                    return false;
                }
            }
            if let Some(recipient) = &recipient {
                let matches = d
                    .recipient
                    .as_deref()
                    .is_some_and(|r| r.to_lowercase().contains(recipient.as_str()));
                if !matches {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn report_title(request: &CustomReportRequest) -> String {
    let mut title = "تقرير مخصص".to_string();
    match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => {
            title.push_str(&format!(
                " من {} إلى {}",
                start.format("%Y/%m/%d"),
                end.format("%Y/%m/%d")
            ));
        }
        (Some(start), None) => title.push_str(&format!(" من {}", start.format("%Y/%m/%d"))),
        (None, Some(end)) => title.push_str(&format!(" حتى {}", end.format("%Y/%m/%d"))),
        (None, None) => {}
    }
    title
}

fn filter_by_range(
    documents: Vec<Document>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<Document> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => documents
            .into_iter()
            .filter(|d| {
                let date = d.date_created.date_naive();
                date >= start && date <= end
            })
            .collect(),
        _ => documents,
    }
}

fn status_distribution_chart(documents: &[Document]) -> ChartData {
    let sent = count_status(documents, "sent");
    let received = count_status(documents, "received");
    let pending = documents
        .len()
        .saturating_sub(sent)
        .saturating_sub(received);

    ChartData {
        chart_type: "pie".to_string(),
        title: "توزيع الحالات".to_string(),
        labels: vec![
            constants::status_name("sent").to_string(),
            constants::status_name("received").to_string(),
            constants::status_name("pending").to_string(),
        ],
        datasets: vec![ChartDataset {
            label: "الحالات".to_string(),
            data: vec![sent as f64, received as f64, pending as f64],
            background_colors: Some(vec![
                "#28a745".to_string(),
                "#17a2b8".to_string(),
                "#ffc107".to_string(),
            ]),
            border_colors: Some(vec![
                "#1e7e34".to_string(),
                "#138496".to_string(),
                "#e0a800".to_string(),
            ]),
            ..ChartDataset::default()
        }],
    }
}

fn type_distribution_chart(documents: &[Document]) -> ChartData {
    let mut stats = type_stats(documents);
    stats.truncate(8);

    ChartData {
        chart_type: "doughnut".to_string(),
        title: "توزيع أنواع الفاكسات".to_string(),
        labels: stats.iter().map(|t| t.fax_type_name.clone()).collect(),
        datasets: vec![ChartDataset {
            label: "الأنواع".to_string(),
            data: stats.iter().map(|t| t.document_count as f64).collect(),
            background_colors: Some(
                stats
                    .iter()
                    .map(|t| constants::badge_color(&t.badge_class).to_string())
                    .collect(),
            ),
            ..ChartDataset::default()
        }],
    }
}

fn sender_distribution_chart(documents: &[Document]) -> ChartData {
    let mut stats = sender_stats(documents);
    stats.truncate(10);

    ChartData {
        chart_type: "bar".to_string(),
        title: "أكثر المرسلين نشاطاً".to_string(),
        labels: stats.iter().map(|s| s.sender_name.clone()).collect(),
        datasets: vec![ChartDataset {
            label: "عدد الفاكسات".to_string(),
            data: stats.iter().map(|s| s.document_count as f64).collect(),
            background_color: Some("#007bff".to_string()),
            border_color: Some("#0056b3".to_string()),
            ..ChartDataset::default()
        }],
    }
}

fn daily_trend_chart(
    documents: &[Document],
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ChartData {
    let today = Utc::now().date_naive();
    let observed_min = documents.iter().map(|d| d.date_created.date_naive()).min();
    let observed_max = documents.iter().map(|d| d.date_created.date_naive()).max();
    let start = start_date.or(observed_min).unwrap_or(today);
    let end = end_date.or(observed_max).unwrap_or(today).max(start);

    let mut labels = Vec::new();
    let mut data = Vec::new();
    let mut date = start;
    while date <= end {
        let count = documents
            .iter()
            .filter(|d| d.date_created.date_naive() == date)
            .count();
        labels.push(date.format("%m/%d").to_string());
        data.push(count as f64);
        date += Duration::days(1);
    }

    ChartData {
        chart_type: "line".to_string(),
        title: "الاتجاه اليومي للفاكسات".to_string(),
        labels,
        datasets: vec![ChartDataset {
            label: "عدد الفاكسات".to_string(),
            data,
            background_color: Some("#007bff".to_string()),
            border_color: Some("#0056b3".to_string()),
            ..ChartDataset::default()
        }],
    }
}

fn monthly_trend_chart(documents: &[Document]) -> ChartData {
    let mut monthly: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for document in documents {
        let key = (document.date_created.year(), document.date_created.month());
        *monthly.entry(key).or_default() += 1;
    }

    ChartData {
        chart_type: "line".to_string(),
        title: "الاتجاه الشهري للفاكسات".to_string(),
        labels: monthly
            .keys()
            .map(|(year, month)| format!("{}/{:02}", year, month))
            .collect(),
        datasets: vec![ChartDataset {
            label: "عدد الفاكسات".to_string(),
            data: monthly.values().map(|&count| count as f64).collect(),
            background_color: Some("#28a745".to_string()),
            border_color: Some("#1e7e34".to_string()),
            ..ChartDataset::default()
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::oid::ObjectId;

    fn doc(
        date: (i32, u32, u32),
        status: &str,
        sender: &str,
        fax_type: &str,
    ) -> Document {
        let (y, m, d) = date;
        let created = Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap();
        Document {
            _id: ObjectId::new(),
            name: "فاكس".to_string(),
            fax_number: None,
            sender: if sender.is_empty() {
                None
            } else {
                Some(sender.to_string())
            },
            recipient: Some("الإدارة".to_string()),
            status: if status.is_empty() {
                None
            } else {
                Some(status.to_string())
            },
            fax_type: if fax_type.is_empty() {
                None
            } else {
                Some(fax_type.to_string())
            },
            number_of_pages: None,
            notes: None,
            file_path: None,
            file_url: None,
            file_size: None,
            date_created: created,
            upload_date: created,
            is_important: false,
            commitment_date: None,
        }
    }

    #[test]
    fn percentage_rounds_to_one_decimal_and_handles_zero_total() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn days_in_month_handles_leap_years_and_bad_months() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 13), 0);
        assert_eq!(days_in_month(2025, 0), 0);
    }

    #[test]
    fn status_report_pending_is_the_remainder_and_percentages_sum() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2025, 8, 2), "received", "ب", ""),
            doc((2025, 8, 3), "sent", "أ", ""),
            doc((2025, 8, 4), "draft", "ج", ""),
        ];
        let report = build_status_report(&docs, None, None);
        assert_eq!(report.total_documents, 4);
        assert_eq!(report.sent_documents, 2);
        assert_eq!(report.received_documents, 1);
        assert_eq!(report.pending_documents, 1);

        let sum =
            report.sent_percentage + report.received_percentage + report.pending_percentage;
        assert!((sum - 100.0).abs() < 0.2, "percentages summed to {}", sum);
    }

    #[test]
    fn status_report_on_empty_set_is_all_zero() {
        let report = build_status_report(&[], None, None);
        assert_eq!(report.total_documents, 0);
        assert_eq!(report.sent_percentage, 0.0);
        assert_eq!(report.received_percentage, 0.0);
        assert_eq!(report.pending_percentage, 0.0);
    }

    #[test]
    fn status_report_date_range_is_inclusive() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2025, 8, 10), "sent", "أ", ""),
            doc((2025, 8, 20), "sent", "أ", ""),
        ];
        let report = build_status_report(
            &docs,
            NaiveDate::from_ymd_opt(2025, 8, 1),
            NaiveDate::from_ymd_opt(2025, 8, 10),
        );
        assert_eq!(report.total_documents, 2);
    }

    #[test]
    fn monthly_breakdown_has_one_zero_filled_entry_per_day() {
        let docs = vec![
            doc((2025, 9, 3), "sent", "أ", ""),
            doc((2025, 9, 3), "received", "ب", ""),
        ];
        let breakdown = daily_breakdown(&docs, 2025, 9);
        assert_eq!(breakdown.len(), 30);
        assert_eq!(breakdown[2].total_documents, 2);
        assert_eq!(breakdown[2].sent_documents, 1);
        assert!(breakdown
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .all(|(_, d)| d.total_documents == 0));
        assert_eq!(breakdown[0].day, 1);
        assert_eq!(breakdown[29].day, 30);
    }

    #[test]
    fn monthly_report_matches_the_worked_example() {
        // Three documents in one month, statuses sent/received/sent.
        let docs = vec![
            doc((2025, 8, 5), "sent", "مكتب أ", "officer_affairs"),
            doc((2025, 8, 10), "received", "مكتب ب", "officer_affairs"),
            doc((2025, 8, 15), "sent", "مكتب أ", "systems_research"),
        ];
        let report = build_monthly_report(&docs, 2025, 8);

        assert_eq!(report.total_documents, 3);
        assert_eq!(report.sent_documents, 2);
        assert_eq!(report.received_documents, 1);
        assert_eq!(report.daily_average, round1(3.0 / 31.0));
        assert_eq!(report.highest_day, 1);
        assert_eq!(report.month_name, "أغسطس");

        // Percentages are on a base of 3.
        let officer = report
            .type_breakdown
            .iter()
            .find(|t| t.fax_type == "officer_affairs")
            .unwrap();
        assert_eq!(officer.document_count, 2);
        assert_eq!(officer.percentage, 66.7);

        let top_sender = &report.sender_breakdown[0];
        assert_eq!(top_sender.sender_name, "مكتب أ");
        assert_eq!(top_sender.percentage, 66.7);
    }

    #[test]
    fn monthly_report_on_empty_month_is_zeroed_but_full_length() {
        let report = build_monthly_report(&[], 2025, 2);
        assert_eq!(report.total_documents, 0);
        assert_eq!(report.daily_average, 0.0);
        assert_eq!(report.highest_day, 0);
        assert_eq!(report.daily_breakdown.len(), 28);
    }

    #[test]
    fn sender_stats_sort_descending_and_skip_missing_senders() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2025, 8, 2), "sent", "أ", ""),
            doc((2025, 8, 3), "received", "ب", ""),
            doc((2025, 8, 4), "sent", "", ""),
        ];
        let stats = sender_stats(&docs);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].sender_name, "أ");
        assert_eq!(stats[0].document_count, 2);
        assert_eq!(stats[0].sent_count, 2);
        assert_eq!(stats[0].last_document_date, "2025-08-02");
        // Base includes the sender-less document.
        assert_eq!(stats[0].percentage, 50.0);
        assert_eq!(stats[1].received_count, 1);
    }

    #[test]
    fn type_stats_carry_display_names_and_badges() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", "military_secretariat"),
            doc((2025, 8, 2), "sent", "أ", "military_secretariat"),
            doc((2025, 8, 3), "sent", "أ", "information_warfare"),
        ];
        let stats = type_stats(&docs);
        assert_eq!(stats[0].fax_type, "military_secretariat");
        assert_eq!(stats[0].fax_type_name, "فرع السكرتارية العسكرية");
        assert_eq!(stats[0].badge_class, "bg-dark");
        assert_eq!(stats[0].percentage, 66.7);
        assert_eq!(stats[1].document_count, 1);
    }

    #[test]
    fn daily_report_filters_to_the_requested_date() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", "officer_affairs"),
            doc((2025, 8, 2), "received", "ب", "officer_affairs"),
        ];
        let report = build_daily_report(&docs, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(report.total_documents, 1);
        assert_eq!(report.sent_documents, 1);
        assert_eq!(report.received_documents, 0);
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.type_breakdown.len(), 1);
        assert_eq!(report.date, "2025-08-01");
    }

    #[test]
    fn custom_filters_compose_with_and_semantics() {
        let docs = vec![
            doc((2025, 7, 1), "sent", "مكتب العمليات", ""),
            doc((2025, 8, 1), "SENT", "مكتب العمليات", ""),
            doc((2025, 8, 2), "sent", "فرع آخر", ""),
            doc((2025, 9, 1), "sent", "مكتب العمليات", ""),
        ];

        let request = CustomReportRequest {
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 31),
            status: Some("sent".to_string()),
            sender: Some("العمليات".to_string()),
            ..CustomReportRequest::default()
        };
        let filtered = apply_custom_filters(docs, &request);
        // Status match is case-insensitive, sender is a substring match.
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].status.as_deref(), Some("SENT"));
    }

    #[test]
    fn custom_filters_ignore_blank_values() {
        let docs = vec![doc((2025, 8, 1), "sent", "أ", "")];
        let request = CustomReportRequest {
            status: Some("  ".to_string()),
            sender: Some(String::new()),
            ..CustomReportRequest::default()
        };
        assert_eq!(apply_custom_filters(docs, &request).len(), 1);
    }

    #[test]
    fn summary_counts_unique_parties_and_date_bounds() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2025, 8, 5), "received", "ب", ""),
            doc((2025, 8, 9), "sent", "أ", ""),
        ];
        let summary = report_summary(&docs);
        assert_eq!(summary.unique_senders, 2);
        assert_eq!(summary.unique_recipients, 1);
        assert_eq!(summary.earliest_date.as_deref(), Some("2025-08-01"));
        assert_eq!(summary.latest_date.as_deref(), Some("2025-08-09"));
        assert_eq!(summary.pending_documents, 0);
    }

    #[test]
    fn report_title_reflects_the_date_range() {
        let mut request = CustomReportRequest::default();
        assert_eq!(report_title(&request), "تقرير مخصص");

        request.start_date = NaiveDate::from_ymd_opt(2025, 8, 1);
        assert_eq!(report_title(&request), "تقرير مخصص من 2025/08/01");

        request.end_date = NaiveDate::from_ymd_opt(2025, 8, 31);
        assert_eq!(
            report_title(&request),
            "تقرير مخصص من 2025/08/01 إلى 2025/08/31"
        );
    }

    #[test]
    fn status_chart_carries_the_three_status_series() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2025, 8, 2), "received", "ب", ""),
            doc((2025, 8, 3), "pending", "ج", ""),
            doc((2025, 8, 4), "sent", "أ", ""),
        ];
        let chart = status_distribution_chart(&docs);
        assert_eq!(chart.chart_type, "pie");
        assert_eq!(chart.labels.len(), 3);
        assert_eq!(chart.datasets[0].data, vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn daily_trend_zero_fills_the_whole_range() {
        let docs = vec![
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2025, 8, 4), "sent", "أ", ""),
        ];
        let chart = daily_trend_chart(&docs, None, None);
        assert_eq!(chart.labels.len(), 4);
        assert_eq!(chart.datasets[0].data, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn daily_trend_on_empty_set_defaults_to_a_single_day() {
        let chart = daily_trend_chart(&[], None, None);
        assert_eq!(chart.labels.len(), 1);
        assert_eq!(chart.datasets[0].data, vec![0.0]);
    }

    #[test]
    fn monthly_trend_orders_periods_chronologically() {
        let docs = vec![
            doc((2025, 9, 1), "sent", "أ", ""),
            doc((2025, 8, 1), "sent", "أ", ""),
            doc((2024, 12, 1), "sent", "أ", ""),
            doc((2025, 8, 15), "sent", "أ", ""),
        ];
        let chart = monthly_trend_chart(&docs);
        assert_eq!(chart.labels, vec!["2024/12", "2025/08", "2025/09"]);
        assert_eq!(chart.datasets[0].data, vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn type_chart_caps_at_eight_slices() {
        let codes = [
            "planning_training_operations",
            "needs_technical_affairs",
            "intelligence_modern_systems",
            "systems_research",
            "command_control_mechanisms",
            "organization_management",
            "military_secretariat",
            "officer_affairs",
            "information_warfare",
            "development_technical_security",
        ];
        let docs: Vec<Document> = codes
            .iter()
            .map(|code| doc((2025, 8, 1), "sent", "أ", code))
            .collect();
        let chart = type_distribution_chart(&docs);
        assert_eq!(chart.labels.len(), 8);
        assert_eq!(
            chart.datasets[0]
                .background_colors
                .as_ref()
                .unwrap()
                .len(),
            8
        );
    }
}

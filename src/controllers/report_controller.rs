use actix_web::{
    get, post,
    web::{self, Data, Json, Query},
    HttpResponse,
};

use crate::dtos::report::report_request::{
    ChartDataRequest, CustomReportRequest, DailyReportRequest, ExportQuery, MonthlyReportRequest,
    StatusReportRequest,
};
use crate::services::report_service::ReportService;

#[post("/daily")]
async fn daily_report(
    service: Data<ReportService>,
    body: Json<DailyReportRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(service.daily_report(body.date).await)
}

#[post("/monthly")]
async fn monthly_report(
    service: Data<ReportService>,
    body: Json<MonthlyReportRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(service.monthly_report(body.year, body.month).await)
}

#[post("/status")]
async fn status_report(
    service: Data<ReportService>,
    body: Json<StatusReportRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(service.status_report(body.start_date, body.end_date).await)
}

#[get("/senders")]
async fn sender_statistics(service: Data<ReportService>) -> HttpResponse {
    HttpResponse::Ok().json(service.sender_statistics().await)
}

#[get("/types")]
async fn type_statistics(service: Data<ReportService>) -> HttpResponse {
    HttpResponse::Ok().json(service.type_statistics().await)
}

#[post("/custom")]
async fn custom_report(
    service: Data<ReportService>,
    body: Json<CustomReportRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(service.custom_report(body.into_inner()).await)
}

#[post("/chart")]
async fn chart_data(service: Data<ReportService>, body: Json<ChartDataRequest>) -> HttpResponse {
    HttpResponse::Ok().json(
        service
            .chart_data(body.chart_type, body.start_date, body.end_date)
            .await,
    )
}

#[get("/overview")]
async fn overview(service: Data<ReportService>) -> HttpResponse {
    HttpResponse::Ok().json(service.overview().await)
}

#[get("/export/pdf")]
async fn export_pdf(service: Data<ReportService>, query: Query<ExportQuery>) -> HttpResponse {
    let result = service
        .export_pdf(&query.report_type, &query.parameters)
        .await;
    HttpResponse::BadRequest().json(result)
}

#[get("/export/excel")]
async fn export_excel(service: Data<ReportService>, query: Query<ExportQuery>) -> HttpResponse {
    let result = service
        .export_excel(&query.report_type, &query.parameters)
        .await;
    HttpResponse::BadRequest().json(result)
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(daily_report);
    cfg.service(monthly_report);
    cfg.service(status_report);
    cfg.service(sender_statistics);
    cfg.service(type_statistics);
    cfg.service(custom_report);
    cfg.service(chart_data);
    cfg.service(overview);
    cfg.service(export_pdf);
    cfg.service(export_excel);
}

//! REST API endpoints for résumé analysis

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::error::ApiError;
use crate::model::{AnalysisResult, SeniorityLevel, Strictness};
use crate::service::report::{self, ReportFormat};
use crate::service::{AnalysisRequest, AnalysisService};

/// Request body for résumé analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Raw résumé text (file parsing happens upstream)
    pub text: String,
    /// Declared seniority level (intern|junior|mid|senior|lead);
    /// detected from the text when absent
    pub seniority: Option<String>,
    /// Detection strictness (low|medium|high), default medium
    pub strictness: Option<String>,
    /// Probe external links during evidence validation (slower)
    #[serde(default)]
    pub deep_analysis: bool,
}

/// Query parameters for report export
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportParams {
    /// Report format: html, json, csv or checklist
    pub format: Option<String>,
}

/// Analyze a résumé
#[utoipa::path(
    post,
    path = "/v1/analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalysisResult),
        (status = 400, description = "Invalid seniority or strictness value"),
        (status = 422, description = "Document cannot yield claims (too short, unstructured, or non-substantive)"),
        (status = 503, description = "Extraction backend not configured")
    ),
    tag = "analysis"
)]
#[post("/v1/analysis")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let seniority = body
        .seniority
        .as_deref()
        .map(str::parse::<SeniorityLevel>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let strictness = body
        .strictness
        .as_deref()
        .map(str::parse::<Strictness>)
        .transpose()
        .map_err(ApiError::BadRequest)?
        .unwrap_or_default();

    let request = AnalysisRequest {
        text: body.text,
        seniority,
        strictness,
        deep_analysis: body.deep_analysis,
    };

    let result = service.analyze_resume(&request).await?;

    tracing::info!(
        final_score = result.final_score,
        risk = ?result.risk_assessment,
        flags = result.red_flags.len(),
        "Analysis request served"
    );

    Ok(HttpResponse::Ok().json(result))
}

/// Export a previously returned analysis as a report
#[utoipa::path(
    post,
    path = "/v1/analysis/export",
    params(ExportParams),
    request_body = AnalysisResult,
    responses(
        (status = 200, description = "Report rendered"),
        (status = 400, description = "Unsupported format")
    ),
    tag = "analysis"
)]
#[post("/v1/analysis/export")]
pub async fn export(
    query: web::Query<ExportParams>,
    body: web::Json<AnalysisResult>,
) -> Result<HttpResponse, ApiError> {
    let format: ReportFormat = query
        .format
        .as_deref()
        .unwrap_or("html")
        .parse()
        .map_err(ApiError::from)?;

    let rendered = report::render(&body.into_inner(), format)?;

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .body(rendered))
}

/// OpenAPI documentation for the analysis surface
#[derive(OpenApi)]
#[openapi(
    paths(analyze, export, crate::api::health::liveness, crate::api::health::readiness),
    components(schemas(AnalyzeRequest, AnalysisResult)),
    tags(
        (name = "analysis", description = "Resume claim analysis"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(export);
}

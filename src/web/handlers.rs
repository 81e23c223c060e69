use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::error::ProjectionError;
use crate::io::{self, ChartData};
use crate::models::{ProjectionInputs, Technology};

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(ProjectionError);

impl From<ProjectionError> for WebError {
    fn from(e: ProjectionError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            ProjectionError::ValidationError(_)
            | ProjectionError::ParseError(_)
            | ProjectionError::InvalidWindow(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Flat query-string form of [`ProjectionInputs`]; absent fields keep
/// their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectionQuery {
    lead_acid_price: Option<f64>,
    lead_acid_lifespan: Option<u32>,
    maintenance_interval: Option<f64>,
    maintenance_cost: Option<f64>,
    salvage_value: Option<f64>,
    lithium_price: Option<f64>,
    lithium_lifespan: Option<u32>,
    efficiency_factor: Option<f64>,
    electricity_price: Option<f64>,
    usage_kwh: Option<f64>,
    display_years: Option<u32>,
    start_date: Option<NaiveDate>,
    format: Option<String>,
}

impl ProjectionQuery {
    fn to_inputs(&self) -> ProjectionInputs {
        let mut inputs = ProjectionInputs::default();
        let la = &mut inputs.lead_acid;
        if let Some(v) = self.lead_acid_price {
            la.price_usd = v;
        }
        if let Some(v) = self.lead_acid_lifespan {
            la.lifespan_years = v;
        }
        if let Some(v) = self.maintenance_interval {
            la.maintenance_interval_years = v;
        }
        if let Some(v) = self.maintenance_cost {
            la.maintenance_cost_try = v;
        }
        if let Some(v) = self.salvage_value {
            la.salvage_value_usd = v;
        }
        let li = &mut inputs.lithium;
        if let Some(v) = self.lithium_price {
            li.price_usd = v;
        }
        if let Some(v) = self.lithium_lifespan {
            li.lifespan_years = v;
        }
        if let Some(v) = self.efficiency_factor {
            li.efficiency_factor = v;
        }
        if let Some(v) = self.electricity_price {
            inputs.electricity.price_try_per_kwh = v;
        }
        if let Some(v) = self.usage_kwh {
            inputs.electricity.usage_kwh_per_month = v;
        }
        if let Some(v) = self.display_years {
            inputs.display_years = v;
        }
        inputs
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn analyze(&self, state: &AppState) -> Result<Analyzer, WebError> {
        let inputs = self.to_inputs();
        let analyzer = Analyzer::new(inputs, state.config.clone(), self.start_date())?;
        Ok(analyzer)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn projection(
    state: web::Data<AppState>,
    query: web::Query<ProjectionQuery>,
) -> Result<HttpResponse, WebError> {
    let analyzer = query.analyze(&state)?;
    let window = analyzer.inputs().display_window()?;
    Ok(HttpResponse::Ok().json(ChartData::from_projection(analyzer.projection(), &window)))
}

pub async fn summary(
    state: web::Data<AppState>,
    query: web::Query<ProjectionQuery>,
) -> Result<HttpResponse, WebError> {
    let analyzer = query.analyze(&state)?;
    Ok(HttpResponse::Ok().json(analyzer.summary()?))
}

pub async fn ledger(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ProjectionQuery>,
) -> Result<HttpResponse, WebError> {
    let technology: Technology = path.into_inner().parse()?;
    let analyzer = query.analyze(&state)?;
    Ok(HttpResponse::Ok().json(analyzer.projection().ledger(technology)))
}

pub async fn export(
    state: web::Data<AppState>,
    query: web::Query<ProjectionQuery>,
) -> Result<HttpResponse, WebError> {
    let fmt = query.format.as_deref().unwrap_or("csv");
    let (content_type, ext) = match fmt {
        "csv" => ("text/csv", "csv"),
        "json" => ("application/json", "json"),
        _ => {
            return Ok(HttpResponse::BadRequest().json(ErrorBody {
                error: "Bad Request".to_string(),
                details: format!("Unsupported export format: {fmt}. Use csv or json."),
            }))
        }
    };

    let analyzer = query.analyze(&state)?;
    let window = analyzer.inputs().display_window()?;
    let projection = analyzer.projection();
    let data = if ext == "csv" {
        io::write_csv_to_bytes(projection, &window)?
    } else {
        io::write_json_to_string(projection, &window, true)?.into_bytes()
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            "Content-Disposition",
            format!(
                "attachment; filename=\"battery_projection_{}.{ext}\"",
                projection.start_date
            ),
        ))
        .body(data))
}

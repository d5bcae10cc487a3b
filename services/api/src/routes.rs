use crate::infra::AppState;
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use econ_risk::error::AppError;
use econ_risk::fred::{FetchError, IndicatorReading};
use econ_risk::indicators::{classify, IndicatorKey, RiskTier};
use econ_risk::portfolio::{
    apply_stress, current_economic_state, economic_risk_impact, exposure_by_industry,
    exposure_by_region, portfolio_metrics, portfolio_summary, sample_book, sample_segments,
    EconomicState, GroupExposure, PortfolioMetrics, PortfolioSegment, PortfolioSummary,
    RiskScenario, SegmentRiskImpact,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use tokio::task::JoinSet;
use tracing::warn;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/indicators", get(indicators_endpoint))
        .route("/api/indicators/:id", get(indicator_detail_endpoint))
        .route("/api/portfolio/scenarios", get(scenarios_endpoint))
        .route("/api/portfolio/metrics", get(portfolio_metrics_endpoint))
        .route("/api/portfolio/exposure", get(portfolio_exposure_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// One indicator's row in the dashboard payload. A failed or missing fetch
/// degrades to a null value at normal risk with the error message attached.
#[derive(Debug, Serialize)]
pub(crate) struct IndicatorReport {
    pub(crate) indicator: IndicatorKey,
    pub(crate) name: &'static str,
    pub(crate) value: Option<f64>,
    pub(crate) date: String,
    pub(crate) risk_level: RiskTier,
    pub(crate) unit: &'static str,
    pub(crate) impact: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) warning_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) critical_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl IndicatorReport {
    fn from_reading(reading: IndicatorReading) -> Self {
        let definition = reading.indicator.definition();
        Self {
            indicator: reading.indicator,
            name: definition.name,
            value: reading.value,
            date: reading.observation_date,
            risk_level: classify(reading.indicator, reading.value),
            unit: definition.unit,
            impact: definition.impact,
            warning_level: None,
            critical_level: None,
            error: None,
        }
    }

    fn unavailable(key: IndicatorKey, message: String) -> Self {
        let definition = key.definition();
        Self {
            indicator: key,
            name: definition.name,
            value: None,
            date: String::new(),
            risk_level: RiskTier::Normal,
            unit: definition.unit,
            impact: definition.impact,
            warning_level: None,
            critical_level: None,
            error: Some(message),
        }
    }

    fn with_levels(mut self) -> Self {
        let definition = self.indicator.definition();
        self.warning_level = Some(definition.warning_level);
        self.critical_level = Some(definition.critical_level);
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct IndicatorsResponse {
    pub(crate) success: bool,
    pub(crate) data: Vec<IndicatorReport>,
    pub(crate) timestamp: DateTime<Utc>,
}

/// Fetches every indicator concurrently. Fetches complete in any order and
/// fail independently; a failure degrades that row without touching the rest.
pub(crate) async fn indicators_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<IndicatorsResponse> {
    let mut tasks = JoinSet::new();
    for key in IndicatorKey::ordered() {
        let client = state.fred.clone();
        tasks.spawn(async move { (key, client.latest_value(key).await) });
    }

    let reports = collect_reports(tasks).await;

    Json(IndicatorsResponse {
        success: true,
        data: reports,
        timestamp: Utc::now(),
    })
}

/// Drains one fetch task per monitored indicator into dashboard rows, in the
/// canonical indicator order. A key whose task never reported, panicked
/// included, still gets a degraded row rather than vanishing from the payload.
async fn collect_reports(
    mut tasks: JoinSet<(IndicatorKey, Result<IndicatorReading, FetchError>)>,
) -> Vec<IndicatorReport> {
    let mut reports = Vec::with_capacity(IndicatorKey::ordered().len());
    let mut pending: HashSet<IndicatorKey> = IndicatorKey::ordered().into_iter().collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((key, Ok(reading))) => {
                pending.remove(&key);
                reports.push(IndicatorReport::from_reading(reading));
            }
            Ok((key, Err(err))) => {
                pending.remove(&key);
                warn!(indicator = key.series_id(), error = %err, "indicator fetch failed");
                reports.push(IndicatorReport::unavailable(key, err.to_string()));
            }
            Err(err) => warn!(error = %err, "indicator fetch task did not complete"),
        }
    }

    for key in pending {
        reports.push(IndicatorReport::unavailable(
            key,
            "indicator fetch did not complete".to_string(),
        ));
    }
    reports.sort_by_key(|report| report.indicator);
    reports
}

#[derive(Debug, Serialize)]
pub(crate) struct IndicatorDetailResponse {
    pub(crate) success: bool,
    pub(crate) data: IndicatorReport,
    pub(crate) timestamp: DateTime<Utc>,
}

pub(crate) fn resolve_indicator(id: &str) -> Result<IndicatorKey, AppError> {
    IndicatorKey::parse(id).ok_or_else(|| AppError::UnknownIndicator(id.to_string()))
}

pub(crate) async fn indicator_detail_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IndicatorDetailResponse>, AppError> {
    let key = resolve_indicator(&id)?;
    let reading = state.fred.latest_value(key).await?;
    let report = IndicatorReport::from_reading(reading).with_levels();

    Ok(Json(IndicatorDetailResponse {
        success: true,
        data: report,
        timestamp: Utc::now(),
    }))
}

#[derive(Debug, Serialize)]
pub(crate) struct ScenariosResponse {
    pub(crate) success: bool,
    pub(crate) data: Vec<RiskScenario>,
    pub(crate) timestamp: DateTime<Utc>,
}

pub(crate) async fn scenarios_endpoint() -> Json<ScenariosResponse> {
    Json(ScenariosResponse {
        success: true,
        data: RiskScenario::catalog().to_vec(),
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StressQuery {
    #[serde(default)]
    pub(crate) scenario: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StressReport {
    pub(crate) scenario: RiskScenario,
    pub(crate) metrics: PortfolioMetrics,
    pub(crate) by_region: HashMap<&'static str, GroupExposure>,
    pub(crate) by_industry: HashMap<&'static str, GroupExposure>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PortfolioMetricsResponse {
    pub(crate) success: bool,
    pub(crate) data: StressReport,
    pub(crate) timestamp: DateTime<Utc>,
}

pub(crate) async fn portfolio_metrics_endpoint(
    Query(query): Query<StressQuery>,
) -> Result<Json<PortfolioMetricsResponse>, AppError> {
    let scenario = match query.scenario.as_deref() {
        Some(id) => {
            RiskScenario::find(id).ok_or_else(|| AppError::UnknownScenario(id.to_string()))?
        }
        None => RiskScenario::base(),
    };

    let book = sample_book();
    let stressed = apply_stress(&book, &scenario);

    Ok(Json(PortfolioMetricsResponse {
        success: true,
        data: StressReport {
            scenario,
            metrics: portfolio_metrics(&stressed),
            by_region: exposure_by_region(&stressed),
            by_industry: exposure_by_industry(&stressed),
        },
        timestamp: Utc::now(),
    }))
}

#[derive(Debug, Serialize)]
pub(crate) struct SegmentExposure {
    pub(crate) segment: PortfolioSegment,
    pub(crate) risk_impact: SegmentRiskImpact,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExposureReport {
    pub(crate) summary: PortfolioSummary,
    pub(crate) segments: Vec<SegmentExposure>,
    pub(crate) economic_state: EconomicState,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExposureResponse {
    pub(crate) success: bool,
    pub(crate) data: ExposureReport,
    pub(crate) timestamp: DateTime<Utc>,
}

pub(crate) async fn portfolio_exposure_endpoint() -> Json<ExposureResponse> {
    let state = current_economic_state();
    let segments = sample_segments();
    let summary = portfolio_summary(&segments);

    let segments = segments
        .into_iter()
        .map(|segment| {
            let risk_impact = economic_risk_impact(&segment, &state);
            SegmentExposure {
                segment,
                risk_impact,
            }
        })
        .collect();

    Json(ExposureResponse {
        success: true,
        data: ExposureReport {
            summary,
            segments,
            economic_state: state,
        },
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum_prometheus::PrometheusMetricLayer;
    use econ_risk::config::FredConfig;
    use econ_risk::fred::FredClient;
    use metrics_exporter_prometheus::PrometheusHandle;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, OnceLock};
    use std::time::Duration;
    use tower::ServiceExt;

    // The prometheus recorder is process-global and can only be installed once.
    fn metrics_handle() -> Arc<PrometheusHandle> {
        static HANDLE: OnceLock<Arc<PrometheusHandle>> = OnceLock::new();
        HANDLE
            .get_or_init(|| {
                let (_, handle) = PrometheusMetricLayer::pair();
                Arc::new(handle)
            })
            .clone()
    }

    fn test_state() -> AppState {
        let config = FredConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:0".to_string(),
            timeout: Duration::from_secs(1),
        };
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: metrics_handle(),
            fred: Arc::new(FredClient::new(&config).expect("client builds")),
        }
    }

    #[tokio::test]
    async fn unknown_indicator_id_maps_to_bad_request() {
        let app = router().layer(Extension(test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/indicators/VIX")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_and_ready_respond_ok() {
        let state = test_state();
        for path in ["/health", "/ready"] {
            let app = router().layer(Extension(state.clone()));
            let response = app
                .oneshot(
                    Request::builder()
                        .uri(path)
                        .body(Body::empty())
                        .expect("request builds"),
                )
                .await
                .expect("router responds");
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_degrades_every_row() {
        let Json(body) = indicators_endpoint(Extension(test_state())).await;

        assert!(body.success);
        let keys: Vec<_> = body.data.iter().map(|report| report.indicator).collect();
        assert_eq!(keys, IndicatorKey::ordered().to_vec());
        for report in &body.data {
            assert_eq!(report.value, None, "{} kept a value", report.indicator);
            assert_eq!(report.risk_level, RiskTier::Normal);
            assert!(
                report.error.is_some(),
                "{} row carries no error message",
                report.indicator
            );
        }
    }

    #[tokio::test]
    async fn a_panicked_fetch_task_still_yields_a_degraded_row() {
        let mut tasks = JoinSet::new();
        for key in IndicatorKey::ordered() {
            tasks.spawn(async move {
                if key == IndicatorKey::Dff {
                    panic!("fetch task lost");
                }
                let reading = IndicatorReading {
                    indicator: key,
                    value: Some(1.0),
                    observation_date: "2026-08-01".to_string(),
                };
                (key, Ok::<_, FetchError>(reading))
            });
        }

        let reports = collect_reports(tasks).await;

        assert_eq!(reports.len(), IndicatorKey::ordered().len());
        let dff = reports
            .iter()
            .find(|report| report.indicator == IndicatorKey::Dff)
            .expect("row survives the lost task");
        assert_eq!(dff.value, None);
        assert!(dff.error.is_some());
    }

    #[test]
    fn indicator_ids_resolve_case_insensitively() {
        assert_eq!(
            resolve_indicator("umcsent").expect("known id"),
            IndicatorKey::Umcsent
        );
        let err = resolve_indicator("VIX").expect_err("unknown id");
        assert!(matches!(err, AppError::UnknownIndicator(id) if id == "VIX"));
    }

    #[tokio::test]
    async fn portfolio_metrics_defaults_to_the_base_case() {
        let Json(body) = portfolio_metrics_endpoint(Query(StressQuery::default()))
            .await
            .expect("base case builds");

        assert!(body.success);
        assert_eq!(body.data.scenario.id, "BASE");
        assert_eq!(body.data.metrics.total_loans, 8);
        assert!(body.data.metrics.portfolio_pd > 0.0);
    }

    #[tokio::test]
    async fn stress_query_scales_portfolio_pd() {
        let base = portfolio_metrics_endpoint(Query(StressQuery::default()))
            .await
            .expect("base case builds")
            .0;
        let severe = portfolio_metrics_endpoint(Query(StressQuery {
            scenario: Some("severe_recession".to_string()),
        }))
        .await
        .expect("severe case builds")
        .0;

        assert_eq!(severe.data.scenario.id, "SEVERE_RECESSION");
        assert!(severe.data.metrics.portfolio_pd > base.data.metrics.portfolio_pd);
        assert_eq!(
            severe.data.metrics.total_outstanding,
            base.data.metrics.total_outstanding
        );
    }

    #[tokio::test]
    async fn unknown_scenario_is_a_client_error() {
        let err = portfolio_metrics_endpoint(Query(StressQuery {
            scenario: Some("MELTDOWN".to_string()),
        }))
        .await
        .expect_err("unknown scenario rejected");
        assert!(matches!(err, AppError::UnknownScenario(id) if id == "MELTDOWN"));
    }

    #[tokio::test]
    async fn exposure_endpoint_reports_every_segment() {
        let Json(body) = portfolio_exposure_endpoint().await;

        assert!(body.success);
        assert_eq!(body.data.segments.len(), 6);
        assert!(body.data.summary.total_portfolio_value > 0.0);
        for entry in &body.data.segments {
            assert!(entry.risk_impact.projected_loss <= 0.25 * entry.segment.total_value + 1e-6);
        }
    }

    #[tokio::test]
    async fn scenario_catalog_is_served_in_full() {
        let Json(body) = scenarios_endpoint().await;
        assert_eq!(body.data.len(), 5);
        assert!(body.data.iter().any(|s| s.id == "BASE"));
    }
}

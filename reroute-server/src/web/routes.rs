//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{DelayMap, Station};
use crate::gateway::GatewayError;
use crate::planner::{Comparison, PlanError, PlannerConfig, RouteRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

const NO_ROUTE_MESSAGE: &str = "No route available between the selected stations.";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/network/refresh", post(refresh_network))
        .route("/route/plan", post(plan_route))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Response {
    let snapshot = match state.network.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "failed to load network for index page");
            let page = ErrorTemplate {
                title: "Network unavailable".to_string(),
                message: "The station network could not be loaded. Please try again later."
                    .to_string(),
                details: Some(e.to_string()),
            };
            let html = page
                .render()
                .unwrap_or_else(|e| format!("Template error: {}", e));
            return (StatusCode::BAD_GATEWAY, Html(html)).into_response();
        }
    };

    let stations = snapshot.stations.iter().map(Station::to_string).collect();
    Html(
        IndexTemplate::new(stations, &state.config)
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Result<Json<StationsResponse>, AppError> {
    let snapshot = state.network.snapshot().await?;
    Ok(Json(StationsResponse::from_snapshot(&snapshot)))
}

/// Refetch the network from its store.
async fn refresh_network(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = state.network.refresh().await?;
    Ok(Json(RefreshResponse::from_snapshot(&snapshot)))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Validate a planning request and turn it into domain types.
pub fn parse_request(
    req: &PlanRouteRequest,
    config: &PlannerConfig,
) -> Result<RouteRequest, AppError> {
    let start = Station::parse(&req.start).map_err(|e| AppError::BadRequest {
        message: format!("Invalid start station: {e}"),
    })?;
    let end = Station::parse(&req.end).map_err(|e| AppError::BadRequest {
        message: format!("Invalid destination station: {e}"),
    })?;

    if start == end {
        return Err(AppError::BadRequest {
            message: "Please select different start and destination stations.".to_string(),
        });
    }

    let mut delays = DelayMap::new();
    for (name, &minutes) in &req.delays {
        let station = Station::parse(name).map_err(|e| AppError::BadRequest {
            message: format!("Invalid delayed station: {e}"),
        })?;
        if !config.accepts(minutes) {
            return Err(AppError::BadRequest {
                message: format!(
                    "Delay at {station} is {minutes} min; the maximum is {} min",
                    config.max_delay_mins
                ),
            });
        }
        delays.set(station, minutes);
    }

    Ok(RouteRequest::new(start, end, delays))
}

/// Plan a route with the submitted delays.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = parse_request(&req, &state.config)?;
    let snapshot = state.network.snapshot().await?;
    let plan = request.plan(&snapshot.edges)?;

    info!(
        start = %request.start,
        end = %request.end,
        delayed = request.delays.len(),
        found = plan.comparison.route().is_some(),
        "route planned"
    );

    let comparison = match &plan.comparison {
        Comparison::Route(comparison) => comparison,
        Comparison::NoRouteAvailable => {
            return if accepts_html(&headers) {
                let html = NoRouteTemplate {
                    message: NO_ROUTE_MESSAGE.to_string(),
                }
                .render()
                .map_err(|e| AppError::Internal {
                    message: format!("Template error: {}", e),
                })?;
                Ok(Html(html).into_response())
            } else {
                Ok(Json(PlanRouteResponse::NoRoute {
                    message: NO_ROUTE_MESSAGE.to_string(),
                })
                .into_response())
            };
        }
    };

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = RouteResultTemplate {
            route: RouteView::from_comparison(comparison),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        let result =
            RouteResult::from_comparison(comparison, &plan.graphs.adjusted, &request.delays.marked());

        Ok(Json(PlanRouteResponse::Ok(result)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::UnknownStation(_) => AppError::BadRequest {
                message: format!("{e}; the station list may be out of date"),
            },
            PlanError::NoPathFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    use crate::gateway::{CacheConfig, CachedNetwork, FixtureStore, NetworkSource};

    // Nothing leaves Z, so Z cannot reach X.
    const NETWORK: &str = r#"{"edges": [
        {"from": "X", "to": "Y", "time": 10},
        {"from": "Y", "to": "Z", "time": 10},
        {"from": "X", "to": "Z", "time": 30}
    ]}"#;

    fn app() -> Router {
        let store = FixtureStore::from_json(NETWORK).unwrap();
        let network = CachedNetwork::new(NetworkSource::Fixture(store), &CacheConfig::default());
        let state = AppState::new(network, PlannerConfig::default());
        create_router(state, Path::new("static"))
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_plan(body: &str, accept: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder()
            .method("POST")
            .uri("/route/plan")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }
        send(request.body(Body::from(body.to_string())).unwrap()).await
    }

    fn json(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    fn request(start: &str, end: &str, delays: &[(&str, u32)]) -> PlanRouteRequest {
        PlanRouteRequest {
            start: start.to_string(),
            end: end.to_string(),
            delays: delays
                .iter()
                .map(|(s, m)| (s.to_string(), *m))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn bad_request_message(result: Result<RouteRequest, AppError>) -> String {
        match result {
            Err(AppError::BadRequest { message }) => message,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn parse_valid_request() {
        let req = request("Lugo", "Vigo-Guixar", &[("Ourense", 15), ("Monforte de Lemos", 0)]);
        let parsed = parse_request(&req, &PlannerConfig::default()).unwrap();

        assert_eq!(parsed.start.as_str(), "Lugo");
        assert_eq!(parsed.end.as_str(), "Vigo-Guixar");
        assert_eq!(parsed.delays.len(), 2);
        assert_eq!(parsed.delays.get(&Station::parse("Ourense").unwrap()), 15);
        assert!(
            parsed
                .delays
                .is_marked(&Station::parse("Monforte de Lemos").unwrap())
        );
    }

    #[test]
    fn same_start_and_end_rejected() {
        let req = request("Lugo", " Lugo ", &[]);
        let message = bad_request_message(parse_request(&req, &PlannerConfig::default()));
        assert!(message.contains("different"));
    }

    #[test]
    fn blank_station_rejected() {
        let req = request("", "Vigo", &[]);
        let message = bad_request_message(parse_request(&req, &PlannerConfig::default()));
        assert!(message.starts_with("Invalid start station"));

        let req = request("Lugo", "Vigo", &[(" ", 5)]);
        let message = bad_request_message(parse_request(&req, &PlannerConfig::default()));
        assert!(message.starts_with("Invalid delayed station"));
    }

    #[test]
    fn delay_above_maximum_rejected() {
        let req = request("Lugo", "Vigo", &[("Ourense", 61)]);
        let message = bad_request_message(parse_request(&req, &PlannerConfig::default()));
        assert_eq!(message, "Delay at Ourense is 61 min; the maximum is 60 min");

        let relaxed = PlannerConfig::new(120, 5, 5);
        assert!(parse_request(&req, &relaxed).is_ok());
    }

    #[test]
    fn accepts_html_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "text/html".parse().unwrap());
        assert!(accepts_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!accepts_html(&headers));
    }

    #[tokio::test]
    async fn plan_returns_json_route() {
        let (status, body) =
            post_plan(r#"{"start": "X", "end": "Z", "delays": {"Y": 15}}"#, None).await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["total_minutes"], 30.0);
        assert_eq!(body["baseline_minutes"], 20.0);
        assert_eq!(body["avoided_delays"], serde_json::json!(["Y"]));
        assert_eq!(body["stops"][1]["station"], "Z");
    }

    #[tokio::test]
    async fn plan_returns_html_fragment() {
        let (status, body) = post_plan(
            r#"{"start": "X", "end": "Z", "delays": {"Y": 15}}"#,
            Some("text/html"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("30 min"));
        assert!(body.contains("delays at Y"));
        assert!(serde_json::from_str::<Value>(&body).is_err());
    }

    #[tokio::test]
    async fn other_accept_gets_json() {
        let (status, body) =
            post_plan(r#"{"start": "X", "end": "Z"}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["total_minutes"], 20.0);
    }

    #[tokio::test]
    async fn unreachable_destination_is_no_route() {
        let (status, body) = post_plan(r#"{"start": "Z", "end": "X"}"#, None).await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["status"], "no_route");
        assert_eq!(body["message"], NO_ROUTE_MESSAGE);

        let (status, body) = post_plan(r#"{"start": "Z", "end": "X"}"#, Some("text/html")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(NO_ROUTE_MESSAGE));
    }

    #[tokio::test]
    async fn unknown_station_is_bad_request() {
        let (status, body) = post_plan(r#"{"start": "Ferrol", "end": "Z"}"#, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error = json(&body)["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("unknown station: Ferrol"));
    }

    #[tokio::test]
    async fn invalid_body_is_bad_request() {
        let (status, body) = post_plan("{not json", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json(&body)["error"].as_str().unwrap().starts_with("Invalid JSON"));

        let (status, body) = post_plan(r#"{"start": "X", "end": "X"}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json(&body)["error"].as_str().unwrap().contains("different"));

        let (status, _) =
            post_plan(r#"{"start": "X", "end": "Z", "delays": {"Y": 90}}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_and_station_list() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        let (status, body) =
            send(Request::get("/api/stations").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["stations"], serde_json::json!(["X", "Y", "Z"]));
    }

    #[tokio::test]
    async fn refresh_reports_counts() {
        let request = Request::post("/api/network/refresh")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["stations"], 3);
        assert_eq!(body["edges"], 3);
    }

    #[test]
    fn plan_errors_map_to_status() {
        let unknown = PlanError::UnknownStation(Station::parse("Ferrol").unwrap());
        let response = AppError::from(unknown).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let gateway = GatewayError::Unauthorized;
        let response = AppError::from(gateway).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

// HTTP request handlers
use crate::application::shell::ShellError;
use crate::domain::locale::Locale;
use crate::domain::telemetry::TimeSeriesPoint;
use crate::infrastructure::chunked_json::stream_from_broadcast;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Shell(#[from] ShellError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Shell(ShellError::UnknownDashboard(_)) => StatusCode::NOT_FOUND,
            ApiError::Shell(ShellError::EmptyCustomUrl) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!("Request rejected: {}", self);
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub id: String,
    #[serde(default)]
    pub series: Option<Vec<TimeSeriesPoint>>,
}

#[derive(Deserialize)]
pub struct CustomUrlRequest {
    pub url: String,
}

#[derive(Deserialize)]
pub struct LocaleRequest {
    pub locale: Locale,
}

#[derive(Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Serialize)]
struct SidebarState {
    sidebar_open: bool,
}

#[derive(Serialize)]
struct FrameState {
    mount_key: u64,
}

async fn respond<T: Serialize>(headers: &HeaderMap, data: &T, status: StatusCode) -> Response {
    match json_response(data, status, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full shell view for the current locale
pub async fn get_shell(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.shell_service.view(), StatusCode::OK).await
}

pub async fn list_dashboards(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.shell_service.dashboards(), StatusCode::OK).await
}

/// Activate a registry dashboard and start its initial summary
pub async fn select_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRequest>,
) -> Result<Response, ApiError> {
    let snapshot = state
        .shell_service
        .select_dashboard(&request.id, request.series)?;
    Ok(respond(&headers, &snapshot, StatusCode::ACCEPTED).await)
}

pub async fn load_custom_url(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomUrlRequest>,
) -> Result<Response, ApiError> {
    let snapshot = state.shell_service.load_custom_url(&request.url)?;
    Ok(respond(&headers, &snapshot, StatusCode::ACCEPTED).await)
}

pub async fn toggle_sidebar(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let sidebar_open = state.shell_service.toggle_sidebar();
    respond(&headers, &SidebarState { sidebar_open }, StatusCode::OK).await
}

pub async fn set_locale(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocaleRequest>,
) -> Response {
    let view = state.shell_service.set_locale(request.locale);
    respond(&headers, &view, StatusCode::OK).await
}

pub async fn reload_frame(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let mount_key = state.shell_service.reload_frame();
    respond(&headers, &FrameState { mount_key }, StatusCode::OK).await
}

/// The user reports a blank frame; the view then offers the fallbacks
pub async fn report_frame_failure(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    state.shell_service.report_frame_failure();
    respond(&headers, &state.shell_service.view(), StatusCode::OK).await
}

pub async fn get_conversation(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, &state.shell_service.conversation(), StatusCode::OK).await
}

/// 202 when the question was accepted, 409 while busy or for blank text
pub async fn post_message(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Response {
    let accepted = state.shell_service.send_message(&request.text);
    let status = if accepted {
        StatusCode::ACCEPTED
    } else {
        StatusCode::CONFLICT
    };
    respond(&headers, &state.shell_service.conversation(), status).await
}

/// Live conversation snapshots (progressive panel updates)
pub async fn stream_conversation(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.shell_service.subscribe();
    let initial = state.shell_service.conversation();
    stream_from_broadcast(initial, rx, accepts_brotli(&headers))
}

// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::analysis_client::AnalysisClient;
use crate::application::conversation_controller::ConversationController;
use crate::application::dashboard_registry::DashboardRegistry;
use crate::application::shell::Shell;
use crate::application::shell_service::ShellService;
use crate::infrastructure::config::{load_api_key, load_dashboards_config, load_shell_config};
use crate::infrastructure::gemini_client::GeminiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_conversation, get_shell, health_check, list_dashboards, load_custom_url, post_message,
    reload_frame, report_frame_failure, select_dashboard, set_locale, stream_conversation,
    toggle_sidebar,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let shell_config = load_shell_config()?;
    let dashboards_config = load_dashboards_config()?;
    let api_key = load_api_key();
    if api_key.is_none() {
        tracing::warn!("No API key in environment; analysis will report it as missing");
    }

    // Create the text generator (infrastructure layer)
    let generator = Arc::new(GeminiClient::new(
        shell_config.analysis.endpoint.clone(),
        api_key,
        shell_config.analysis.request_timeout_secs.map(Duration::from_secs),
    )?);

    // Create services (application layer)
    let registry = DashboardRegistry::new(dashboards_config.dashboards)?;
    let locale = shell_config.shell.default_locale;
    let client = AnalysisClient::new(generator, shell_config.analysis.model.clone());
    let controller = Arc::new(ConversationController::new(client, locale));
    let shell_service = ShellService::new(Shell::new(registry, locale), controller);
    shell_service.start();

    // Create application state
    let state = Arc::new(AppState { shell_service });

    // Build router (presentation layer)
    // Compression is handled in the response builders
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/shell", get(get_shell))
        .route("/shell/select", post(select_dashboard))
        .route("/shell/custom-url", post(load_custom_url))
        .route("/shell/sidebar/toggle", post(toggle_sidebar))
        .route("/shell/locale", post(set_locale))
        .route("/shell/frame/reload", post(reload_frame))
        .route("/shell/frame/failed", post(report_frame_failure))
        .route("/dashboards", get(list_dashboards))
        .route("/conversation", get(get_conversation))
        .route("/conversation/messages", post(post_message))
        .route("/conversation/stream", get(stream_conversation))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = shell_config.server.bind.parse()?;
    tracing::info!("Starting geo-dashboard-shell on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

// Shell service - Wires shell selections to the conversation controller
use crate::application::conversation_controller::{
    ConversationController, ConversationSnapshot, PendingAnalysis,
};
use crate::application::dashboard_registry::DashboardSummary;
use crate::application::shell::{Shell, ShellError, ShellView};
use crate::domain::locale::Locale;
use crate::domain::telemetry::TimeSeriesPoint;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct ShellService {
    shell: Arc<Mutex<Shell>>,
    controller: Arc<ConversationController>,
}

impl ShellService {
    pub fn new(shell: Shell, controller: Arc<ConversationController>) -> Self {
        controller.set_locale(shell.locale());
        Self {
            shell: Arc::new(Mutex::new(shell)),
            controller,
        }
    }

    /// Run the initial summary for the dashboard active at startup
    pub fn start(&self) -> ConversationSnapshot {
        let pending = {
            let shell = self.shell.lock();
            self.controller.begin_subject_change(shell.subject_change())
        };
        self.launch(pending)
    }

    pub fn view(&self) -> ShellView {
        self.shell.lock().view()
    }

    pub fn dashboards(&self) -> Vec<DashboardSummary> {
        let shell = self.shell.lock();
        shell.registry().summaries(shell.locale())
    }

    pub fn select_dashboard(
        &self,
        id: &str,
        series: Option<Vec<TimeSeriesPoint>>,
    ) -> Result<ConversationSnapshot, ShellError> {
        // The conversation is reset under the shell lock so that concurrent
        // selections reach the controller in the order the shell applied them
        let pending = {
            let mut shell = self.shell.lock();
            if let Some(series) = series {
                shell.set_series(series);
            }
            let change = shell.select_dashboard(id)?;
            self.controller.begin_subject_change(change)
        };
        Ok(self.launch(pending))
    }

    pub fn load_custom_url(&self, url: &str) -> Result<ConversationSnapshot, ShellError> {
        let pending = {
            let mut shell = self.shell.lock();
            shell.set_custom_url(url);
            let change = shell.apply_custom_url()?;
            self.controller.begin_subject_change(change)
        };
        Ok(self.launch(pending))
    }

    pub fn toggle_sidebar(&self) -> bool {
        self.shell.lock().toggle_sidebar()
    }

    pub fn set_locale(&self, locale: Locale) -> ShellView {
        let mut shell = self.shell.lock();
        shell.set_locale(locale);
        self.controller.set_locale(locale);
        tracing::info!("Locale switched to {}", locale);
        shell.view()
    }

    pub fn reload_frame(&self) -> u64 {
        self.shell.lock().reload_frame()
    }

    pub fn report_frame_failure(&self) {
        self.shell.lock().report_frame_failure();
    }

    pub fn conversation(&self) -> ConversationSnapshot {
        self.controller.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationSnapshot> {
        self.controller.subscribe()
    }

    /// Returns `false` when the message was rejected
    pub fn send_message(&self, text: &str) -> bool {
        match self.controller.begin_user_message(text) {
            Some(pending) => {
                self.spawn(pending);
                true
            }
            None => false,
        }
    }

    /// Snapshot taken before the request is spawned, so it still shows the
    /// placeholder
    fn launch(&self, pending: PendingAnalysis) -> ConversationSnapshot {
        let snapshot = self.controller.snapshot();
        self.spawn(pending);
        snapshot
    }

    fn spawn(&self, pending: PendingAnalysis) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            controller.run(pending).await;
        });
    }
}

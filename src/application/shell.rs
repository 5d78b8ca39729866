// Shell - Top-level UI state: active dashboard, sidebar, locale, frame
use crate::application::conversation_controller::{Subject, SubjectChange};
use crate::application::dashboard_registry::{DashboardRegistry, DashboardSummary};
use crate::application::frame_viewer::{FrameView, FrameViewer};
use crate::domain::dashboard::DashboardEntry;
use crate::domain::locale::Locale;
use crate::domain::telemetry::TimeSeriesPoint;
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShellError {
    #[error("unknown dashboard: {0}")]
    UnknownDashboard(String),

    #[error("custom dashboard URL is empty")]
    EmptyCustomUrl,
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarEntry {
    #[serde(flatten)]
    pub dashboard: DashboardSummary,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelLabels {
    pub title: String,
    pub processing: String,
    pub question_placeholder: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub locale: Locale,
    pub sidebar_open: bool,
    pub brand_title: String,
    pub brand_subtitle: String,
    pub footer_tagline: String,
    pub maps_heading: String,
    pub add_external_map: String,
    pub load_map: String,
    pub custom_url: String,
    pub dashboards: Vec<SidebarEntry>,
    pub active: DashboardSummary,
    pub frame: FrameView,
    pub panel: PanelLabels,
}

#[derive(Debug, Clone)]
pub struct Shell {
    registry: DashboardRegistry,
    active: DashboardEntry,
    sidebar_open: bool,
    locale: Locale,
    custom_url: String,
    viewer: FrameViewer,
    series: Vec<TimeSeriesPoint>,
}

impl Shell {
    pub fn new(registry: DashboardRegistry, locale: Locale) -> Self {
        let active = registry.default_entry().clone();
        let mut viewer = FrameViewer::new();
        viewer.set_target(active.target_url(), active.category);

        Self {
            registry,
            active,
            sidebar_open: true,
            locale,
            custom_url: String::new(),
            viewer,
            series: Vec::new(),
        }
    }

    pub fn registry(&self) -> &DashboardRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn active(&self) -> &DashboardEntry {
        &self.active
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[cfg(test)]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[cfg(test)]
    pub fn custom_url(&self) -> &str {
        &self.custom_url
    }

    #[cfg(test)]
    pub fn viewer(&self) -> &FrameViewer {
        &self.viewer
    }

    /// Context for the next analysis request. Does not restart the
    /// conversation on its own.
    pub fn set_series(&mut self, series: Vec<TimeSeriesPoint>) {
        self.series = series;
    }

    /// The conversation subject matching the active dashboard
    pub fn subject_change(&self) -> SubjectChange {
        SubjectChange {
            subject: Subject {
                id: self.active.id.clone(),
                title: self.active.title.clone(),
                category: self.active.category,
            },
            series: self.series.clone(),
        }
    }

    pub fn select_dashboard(&mut self, id: &str) -> Result<SubjectChange, ShellError> {
        let entry = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| ShellError::UnknownDashboard(id.to_string()))?;

        self.custom_url.clear();
        Ok(self.activate(entry))
    }

    /// Update the URL draft typed into the sidebar
    pub fn set_custom_url(&mut self, text: &str) {
        self.custom_url = text.to_string();
    }

    pub fn apply_custom_url(&mut self) -> Result<SubjectChange, ShellError> {
        let entry = DashboardEntry::custom(&self.custom_url).ok_or(ShellError::EmptyCustomUrl)?;
        Ok(self.activate(entry))
    }

    fn activate(&mut self, entry: DashboardEntry) -> SubjectChange {
        tracing::info!("Activating dashboard {} ({})", entry.id, entry.url);
        self.viewer.set_target(entry.target_url(), entry.category);
        self.active = entry;
        self.subject_change()
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    /// Changes wording only. The active dashboard is left alone.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn reload_frame(&mut self) -> u64 {
        self.viewer.reload();
        self.viewer.mount_key()
    }

    pub fn report_frame_failure(&mut self) {
        self.viewer.report_load_failure();
    }

    pub fn view(&self) -> ShellView {
        let strings = self.locale.strings();
        let dashboards = self
            .registry
            .entries()
            .iter()
            .map(|entry| SidebarEntry {
                dashboard: DashboardSummary::from_entry(entry, self.locale),
                active: entry.id == self.active.id && self.custom_url.is_empty(),
            })
            .collect();

        ShellView {
            locale: self.locale,
            sidebar_open: self.sidebar_open,
            brand_title: strings.brand_title.to_string(),
            brand_subtitle: strings.brand_subtitle.to_string(),
            footer_tagline: strings.footer_tagline.to_string(),
            maps_heading: strings.maps_heading.to_string(),
            add_external_map: strings.add_external_map.to_string(),
            load_map: strings.load_map.to_string(),
            custom_url: self.custom_url.clone(),
            dashboards,
            active: DashboardSummary::from_entry(&self.active, self.locale),
            frame: self.viewer.view(self.locale),
            panel: PanelLabels {
                title: strings.panel_title.to_string(),
                processing: strings.processing.to_string(),
                question_placeholder: strings.question_placeholder.to_string(),
                error: strings.panel_error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{Category, LocalizedText};

    fn registry() -> DashboardRegistry {
        let entry = |id: &str, title: &str, category: Category, url: &str| DashboardEntry {
            id: id.to_string(),
            title: LocalizedText::same(title),
            description: LocalizedText::same("desc"),
            icon: "fa-map".to_string(),
            category,
            url: url.to_string(),
        };
        DashboardRegistry::new(vec![
            entry("command_center", "Command Center", Category::Custom, "https://gee.example/cc"),
            entry("water", "Water Watch", Category::Water, "https://gee.example/water"),
            entry("offline", "Offline Map", Category::LandCover, ""),
        ])
        .unwrap()
    }

    #[test]
    fn test_starts_on_first_dashboard() {
        let shell = Shell::new(registry(), Locale::Id);
        assert_eq!(shell.active().id, "command_center");
        assert!(shell.sidebar_open());
        assert_eq!(shell.viewer().mount_key(), 1);
        assert_eq!(shell.viewer().target(), Some("https://gee.example/cc"));
    }

    #[test]
    fn test_select_dashboard() {
        let mut shell = Shell::new(registry(), Locale::En);
        shell.set_custom_url("https://draft.example");

        let change = shell.select_dashboard("water").unwrap();

        assert_eq!(change.subject.id, "water");
        assert_eq!(change.subject.name(Locale::En), "Water Watch");
        assert_eq!(change.subject.category, Category::Water);
        assert_eq!(shell.custom_url(), "");
        assert_eq!(shell.viewer().target(), Some("https://gee.example/water"));
        assert_eq!(shell.viewer().mount_key(), 2);
    }

    #[test]
    fn test_select_unknown_dashboard() {
        let mut shell = Shell::new(registry(), Locale::En);
        assert_eq!(
            shell.select_dashboard("nope").unwrap_err(),
            ShellError::UnknownDashboard("nope".to_string())
        );
        assert_eq!(shell.active().id, "command_center");
    }

    #[test]
    fn test_dashboard_without_url_is_simulated() {
        let mut shell = Shell::new(registry(), Locale::En);
        shell.select_dashboard("offline").unwrap();
        assert!(matches!(shell.view().frame, FrameView::Simulated { .. }));
    }

    #[test]
    fn test_apply_custom_url() {
        let mut shell = Shell::new(registry(), Locale::En);
        assert_eq!(shell.apply_custom_url().unwrap_err(), ShellError::EmptyCustomUrl);

        shell.set_custom_url("https://mine.example/view");
        let change = shell.apply_custom_url().unwrap();

        assert_eq!(change.subject.name(Locale::En), "Custom Dashboard");
        assert_eq!(change.subject.name(Locale::Id), "Dashboard Kustom");
        assert_eq!(change.subject.category, Category::Custom);
        assert!(shell.active().is_custom());

        let view = shell.view();
        assert!(view.dashboards.iter().all(|d| !d.active));
    }

    #[test]
    fn test_locale_switch_keeps_active_dashboard() {
        let mut shell = Shell::new(registry(), Locale::En);
        shell.select_dashboard("water").unwrap();

        shell.set_locale(Locale::Id);

        assert_eq!(shell.active().id, "water");
        let view = shell.view();
        assert_eq!(view.maps_heading, "Peta");
        assert_eq!(view.active.category, "Sumber Daya Air");
        assert!(view.dashboards[1].active);
    }

    #[test]
    fn test_toggle_sidebar_and_reload() {
        let mut shell = Shell::new(registry(), Locale::En);
        assert!(!shell.toggle_sidebar());
        assert!(shell.toggle_sidebar());
        assert_eq!(shell.reload_frame(), 2);
    }

    #[test]
    fn test_subject_carries_series() {
        let mut shell = Shell::new(registry(), Locale::En);
        shell.set_series(vec![TimeSeriesPoint::new("2024-01", 0.42)]);
        let change = shell.select_dashboard("water").unwrap();
        assert_eq!(change.series.len(), 1);
    }
}

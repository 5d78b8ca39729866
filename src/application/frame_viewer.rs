// Frame viewer - Embedded dashboard or simulated map fallback
use crate::domain::dashboard::Category;
use crate::domain::locale::Locale;
use serde::Serialize;

pub const SIMULATION_BACKGROUND: &str = "https://picsum.photos/1200/800?grayscale";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayTint {
    Green,
    Blue,
    Red,
}

impl OverlayTint {
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::LandCover | Category::VegetationIndex => Some(OverlayTint::Green),
            Category::Water => Some(OverlayTint::Blue),
            Category::Urban => Some(OverlayTint::Red),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrameView {
    Embedded {
        url: String,
        /// Changes whenever the frame must be recreated
        mount_key: u64,
        open_external_url: String,
        load_failed: bool,
        not_loading_label: String,
        reload_label: String,
        open_label: String,
        loading_hint: String,
        blank_hint: String,
    },
    Simulated {
        background_image: String,
        overlay: Option<OverlayTint>,
        show_grid: bool,
        highlight_region: bool,
        scale_label: String,
    },
}

/// Tracks which URL the frame shows and when it has to be remounted.
///
/// Embedded content is cross-origin, so load success is never observed.
/// `report_load_failure` only records what the user told us.
#[derive(Debug, Clone)]
pub struct FrameViewer {
    target: Option<String>,
    category: Category,
    mount_key: u64,
    load_failed: bool,
}

impl FrameViewer {
    pub fn new() -> Self {
        Self {
            target: None,
            category: Category::Custom,
            mount_key: 0,
            load_failed: false,
        }
    }

    pub fn mount_key(&self) -> u64 {
        self.mount_key
    }

    #[cfg(test)]
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    #[cfg(test)]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Returns `true` when the frame was remounted
    pub fn set_target(&mut self, url: Option<&str>, category: Category) -> bool {
        self.category = category;

        let url = url.map(str::trim).filter(|u| !u.is_empty());
        if self.target.as_deref() == url && self.mount_key > 0 {
            return false;
        }

        self.target = url.map(str::to_string);
        self.remount();
        tracing::debug!("Frame target set to {:?} (key {})", self.target, self.mount_key);
        true
    }

    pub fn reload(&mut self) {
        self.remount();
    }

    pub fn report_load_failure(&mut self) {
        if self.target.is_some() {
            self.load_failed = true;
        }
    }

    fn remount(&mut self) {
        self.mount_key += 1;
        self.load_failed = false;
    }

    pub fn view(&self, locale: Locale) -> FrameView {
        let strings = locale.strings();

        match &self.target {
            Some(url) => FrameView::Embedded {
                url: url.clone(),
                mount_key: self.mount_key,
                open_external_url: url.clone(),
                load_failed: self.load_failed,
                not_loading_label: strings.not_loading.to_string(),
                reload_label: strings.reload_frame.to_string(),
                open_label: strings.open_in_new_tab.to_string(),
                loading_hint: strings.loading_dashboard.to_string(),
                blank_hint: strings.blank_hint.to_string(),
            },
            None => {
                // Satellite imagery shows the bare base image
                let data_layer = self.category != Category::SatelliteImagery;
                FrameView::Simulated {
                    background_image: SIMULATION_BACKGROUND.to_string(),
                    overlay: OverlayTint::for_category(self.category),
                    show_grid: data_layer,
                    highlight_region: data_layer && self.category.is_vegetation(),
                    scale_label: strings.simulation_scale.to_string(),
                }
            }
        }
    }
}

impl Default for FrameViewer {
    fn default() -> Self {
        Self::new()
    }
}

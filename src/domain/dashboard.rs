// Dashboard domain model
use super::locale::Locale;
use serde::{Deserialize, Serialize};

pub const CUSTOM_DASHBOARD_ID: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LandCover,
    CoffeeAudit,
    Custom,
    VegetationIndex,
    Water,
    Urban,
    SatelliteImagery,
}

impl Category {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Category::LandCover, Locale::En) => "Land Cover & Vegetation",
            (Category::LandCover, Locale::Id) => "Tutupan Lahan & Vegetasi",
            (Category::CoffeeAudit, Locale::En) => "Coffee Plantation Audit",
            (Category::CoffeeAudit, Locale::Id) => "Audit Perkebunan Kopi",
            (Category::Custom, Locale::En) => "Custom Analysis",
            (Category::Custom, Locale::Id) => "Analisis Kustom",
            (Category::VegetationIndex, Locale::En) => "Vegetation Health (NDVI)",
            (Category::VegetationIndex, Locale::Id) => "Kesehatan Vegetasi (NDVI)",
            (Category::Water, Locale::En) => "Water Resources",
            (Category::Water, Locale::Id) => "Sumber Daya Air",
            (Category::Urban, Locale::En) => "Urban Development",
            (Category::Urban, Locale::Id) => "Pembangunan Perkotaan",
            (Category::SatelliteImagery, Locale::En) => "Satellite Imagery",
            (Category::SatelliteImagery, Locale::Id) => "Citra Satelit",
        }
    }

    pub fn is_vegetation(&self) -> bool {
        matches!(self, Category::LandCover | Category::VegetationIndex)
    }
}

/// Text with an English form and an optional Indonesian form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub id: Option<String>,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, id: Option<&str>) -> Self {
        Self {
            en: en.into(),
            id: id.map(str::to_string),
        }
    }

    #[cfg(test)]
    pub fn same(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            id: None,
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Id => self.id.as_deref().unwrap_or(&self.en),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub icon: String,
    pub category: Category,
    pub url: String,
}

impl DashboardEntry {
    /// Session-only entry for a URL typed in by the user.
    /// Returns `None` for blank input.
    pub fn custom(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        Some(Self {
            id: CUSTOM_DASHBOARD_ID.to_string(),
            title: LocalizedText::new("Custom Dashboard", Some("Dashboard Kustom")),
            description: LocalizedText::new("User provided GEE URL", Some("URL GEE dari pengguna")),
            icon: "fa-link".to_string(),
            category: Category::Custom,
            url: url.to_string(),
        })
    }

    #[cfg(test)]
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_DASHBOARD_ID
    }

    /// The frame viewer falls back to simulation mode when this is `None`
    pub fn target_url(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }
}

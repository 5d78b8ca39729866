// Locale and fixed user-visible strings
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Bahasa Indonesia, the primary locale
    #[default]
    Id,
    En,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }

    pub fn strings(&self) -> &'static UiStrings {
        match self {
            Locale::Id => &ID_STRINGS,
            Locale::En => &EN_STRINGS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Locale::Id),
            "en" => Ok(Locale::En),
            other => Err(UnsupportedLocale(other.to_string())),
        }
    }
}

/// Every fixed string shown to the user or sent to the analysis service
#[derive(Debug, Serialize)]
pub struct UiStrings {
    // Analysis panel
    pub panel_title: &'static str,
    pub analyzing: &'static str,
    pub processing: &'static str,
    pub question_placeholder: &'static str,
    pub panel_error: &'static str,

    // Analysis fallbacks
    pub missing_api_key: &'static str,
    pub no_analysis: &'static str,
    pub analysis_failed: &'static str,

    // Frame viewer
    pub not_loading: &'static str,
    pub reload_frame: &'static str,
    pub open_in_new_tab: &'static str,
    pub loading_dashboard: &'static str,
    pub blank_hint: &'static str,
    pub simulation_scale: &'static str,

    // Sidebar
    pub maps_heading: &'static str,
    pub add_external_map: &'static str,
    pub load_map: &'static str,
    pub brand_title: &'static str,
    pub brand_subtitle: &'static str,
    pub footer_tagline: &'static str,
}

static ID_STRINGS: UiStrings = UiStrings {
    panel_title: "Wawasan Gemini AI",
    analyzing: "Menganalisis data...",
    processing: "Memproses wawasan...",
    question_placeholder: "Tanyakan sesuatu tentang wilayah ini...",
    panel_error: "Gagal menganalisis data.",

    missing_api_key: "Kunci API tidak ditemukan. Harap konfigurasi process.env.API_KEY.",
    no_analysis: "Tidak ada analisis yang tersedia.",
    analysis_failed: "Terjadi kesalahan saat menganalisis data geospasial.",

    not_loading: "Dashboard tidak termuat?",
    reload_frame: "Muat Ulang Bingkai",
    open_in_new_tab: "Buka di Tab Baru",
    loading_dashboard: "Memuat Google Earth Engine...",
    blank_hint: "Jika layar tetap kosong, gunakan tombol \"Buka di Tab Baru\" di atas.",
    simulation_scale: "Skala: 1:50.000 (Simulasi)",

    maps_heading: "Peta",
    add_external_map: "Tambah Peta Eksternal",
    load_map: "Muat Peta",
    brand_title: "South Solok",
    brand_subtitle: "Data Initiative",
    footer_tagline: "Platform Kecerdasan Spasial",
};

static EN_STRINGS: UiStrings = UiStrings {
    panel_title: "Gemini AI Insights",
    analyzing: "Analyzing data...",
    processing: "Processing insights...",
    question_placeholder: "Ask something about this region...",
    panel_error: "Analysis failed.",

    missing_api_key: "API Key not found. Please configure process.env.API_KEY.",
    no_analysis: "No analysis available.",
    analysis_failed: "An error occurred while analyzing geospatial data.",

    not_loading: "Dashboard not loading?",
    reload_frame: "Reload Frame",
    open_in_new_tab: "Open in New Tab",
    loading_dashboard: "Loading Google Earth Engine...",
    blank_hint: "If the screen remains blank, please use the \"Open in New Tab\" button above.",
    simulation_scale: "Scale: 1:50,000 (Simulation)",

    maps_heading: "Maps",
    add_external_map: "Add External Map",
    load_map: "Load Map",
    brand_title: "South Solok",
    brand_subtitle: "Data Initiative",
    footer_tagline: "Spatial Intelligence Platform",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Id);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_default_is_primary() {
        assert_eq!(Locale::default(), Locale::Id);
    }

    #[test]
    fn test_strings_differ_per_locale() {
        assert_ne!(Locale::Id.strings().no_analysis, Locale::En.strings().no_analysis);
        assert_eq!(Locale::En.strings().no_analysis, "No analysis available.");
    }
}

// Fixed, ordered list of selectable dashboards
use crate::domain::dashboard::DashboardEntry;
use crate::domain::locale::Locale;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("dashboard registry is empty")]
    Empty,

    #[error("duplicate dashboard id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone)]
pub struct DashboardRegistry {
    entries: Vec<DashboardEntry>,
}

/// Registry entry rendered for one locale
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub url: String,
}

impl DashboardSummary {
    pub fn from_entry(entry: &DashboardEntry, locale: Locale) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.get(locale).to_string(),
            description: entry.description.get(locale).to_string(),
            icon: entry.icon.clone(),
            category: entry.category.label(locale).to_string(),
            url: entry.url.clone(),
        }
    }
}

impl DashboardRegistry {
    pub fn new(entries: Vec<DashboardEntry>) -> Result<Self, RegistryError> {
        if entries.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(RegistryError::DuplicateId(entry.id.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DashboardEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DashboardEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The entry selected at startup
    pub fn default_entry(&self) -> &DashboardEntry {
        &self.entries[0]
    }

    pub fn summaries(&self, locale: Locale) -> Vec<DashboardSummary> {
        self.entries
            .iter()
            .map(|e| DashboardSummary::from_entry(e, locale))
            .collect()
    }
}

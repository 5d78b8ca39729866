// Analysis client - Localized prompt construction around the text generator
use crate::application::text_generator::{GenerationRequest, TextGenerator};
use crate::domain::dashboard::Category;
use crate::domain::locale::Locale;
use crate::domain::telemetry::TimeSeriesPoint;
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub subject: String,
    pub category: Category,
    pub series: Vec<TimeSeriesPoint>,
    /// `None` asks for an executive summary
    pub question: Option<String>,
    pub locale: Locale,
}

#[derive(Clone)]
pub struct AnalysisClient {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl AnalysisClient {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Always yields displayable text. Missing credentials, empty output
    /// and generator errors are turned into localized fallback strings.
    pub async fn analyze(&self, request: &AnalysisRequest) -> String {
        let strings = request.locale.strings();

        if !self.generator.has_credentials() {
            tracing::warn!("Analysis skipped for {}: no API key configured", request.subject);
            return strings.missing_api_key.to_string();
        }

        let generation = GenerationRequest {
            model: self.model.clone(),
            prompt: build_prompt(request),
            system_instruction: Some(system_instruction(request.locale).to_string()),
        };

        tracing::debug!(
            "Requesting analysis for {} ({} points, follow-up: {})",
            request.subject,
            request.series.len(),
            request.question.is_some()
        );

        match self.generator.generate(generation).await {
            Ok(text) if text.trim().is_empty() => strings.no_analysis.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Analysis request for {} failed: {}", request.subject, e);
                strings.analysis_failed.to_string()
            }
        }
    }
}

/// One `label: value` line per point, values with two decimals
pub fn format_series(series: &[TimeSeriesPoint]) -> String {
    series
        .iter()
        .map(|p| format!("{}: {:.2}", p.label, p.value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn system_instruction(locale: Locale) -> &'static str {
    match locale {
        Locale::Id => {
            "Anda adalah pakar Analis Geospasial. Berikan analisis dalam Bahasa Indonesia yang profesional, teknis, dan padat."
        }
        Locale::En => {
            "You are a Geospatial Analysis expert. Provide professional, technical, and concise analysis in English."
        }
    }
}

pub fn build_prompt(request: &AnalysisRequest) -> String {
    let series = format_series(&request.series);
    let layer = request.category.label(request.locale);
    let question = request
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    match request.locale {
        Locale::Id => {
            let task = match question {
                Some(q) => format!("Pertanyaan Pengguna: {}", q),
                None => "Tugas: Berikan ringkasan eksekutif tentang tren lahan, anomali data, dan rekomendasi strategis.".to_string(),
            };
            format!(
                "Konteks:\n- Wilayah: {}\n- Lapisan Analisis: {}\n- Deret Data:\n{}\n\n{}\n\nPENTING: Berikan respons HANYA dalam Bahasa Indonesia.",
                request.subject, layer, series, task
            )
        }
        Locale::En => {
            let task = match question {
                Some(q) => format!("User Question: {}", q),
                None => "Task: Provide an executive summary of land trends, data anomalies, and strategic recommendations.".to_string(),
            };
            format!(
                "Context:\n- Region: {}\n- Analysis Layer: {}\n- Data Series:\n{}\n\n{}\n\nIMPORTANT: Provide the response ONLY in English.",
                request.subject, layer, series, task
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeGenerator;

    fn request(locale: Locale, question: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            subject: "Region A".to_string(),
            category: Category::Custom,
            series: vec![
                TimeSeriesPoint::new("2024-01", 1.5),
                TimeSeriesPoint::new("2024-02", 2.0),
            ],
            question: question.map(str::to_string),
            locale,
        }
    }

    #[tokio::test]
    async fn test_single_call_with_formatted_series() {
        let generator = Arc::new(FakeGenerator::replying("Trend is rising."));
        let client = AnalysisClient::new(generator.clone(), DEFAULT_MODEL);

        let text = client.analyze(&request(Locale::En, None)).await;

        assert_eq!(text, "Trend is rising.");
        let calls = generator.requests();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("2024-01: 1.50"));
        assert!(calls[0].prompt.contains("2024-02: 2.00"));
        assert!(calls[0].prompt.contains("- Region: Region A"));
        assert!(calls[0].prompt.contains("executive summary"));
        assert_eq!(calls[0].model, DEFAULT_MODEL);
        assert_eq!(calls[0].system_instruction.as_deref(), Some(system_instruction(Locale::En)));
    }

    #[tokio::test]
    async fn test_missing_credentials_skips_call() {
        let generator = Arc::new(FakeGenerator::without_credentials());
        let client = AnalysisClient::new(generator.clone(), DEFAULT_MODEL);

        let text = client.analyze(&request(Locale::Id, None)).await;

        assert_eq!(text, Locale::Id.strings().missing_api_key);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_error_returns_localized_failure() {
        let generator = Arc::new(FakeGenerator::failing("quota exceeded"));
        let client = AnalysisClient::new(generator.clone(), DEFAULT_MODEL);

        let text = client.analyze(&request(Locale::En, None)).await;

        assert_eq!(text, "An error occurred while analyzing geospatial data.");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_output_returns_no_analysis() {
        let generator = Arc::new(FakeGenerator::replying("  \n"));
        let client = AnalysisClient::new(generator, DEFAULT_MODEL);

        let text = client.analyze(&request(Locale::Id, None)).await;

        assert_eq!(text, "Tidak ada analisis yang tersedia.");
    }

    #[test]
    fn test_prompt_with_question() {
        let prompt = build_prompt(&request(Locale::En, Some("Why the jump in February?")));
        assert!(prompt.contains("User Question: Why the jump in February?"));
        assert!(!prompt.contains("executive summary"));
        assert!(prompt.contains("- Analysis Layer: Custom Analysis"));
    }

    #[test]
    fn test_prompt_is_localized() {
        let prompt = build_prompt(&request(Locale::Id, None));
        assert!(prompt.starts_with("Konteks:"));
        assert!(prompt.contains("- Wilayah: Region A"));
        assert!(prompt.contains("- Lapisan Analisis: Analisis Kustom"));
        assert!(prompt.contains("HANYA dalam Bahasa Indonesia"));
    }

    #[test]
    fn test_format_empty_series() {
        assert_eq!(format_series(&[]), "");
    }
}

// Gemini REST client implementing the text generator seam
use crate::application::text_generator::{GenerationError, GenerationRequest, TextGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when there is none
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn build_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint,
            urlencoding::encode(model),
            urlencoding::encode(api_key)
        )
    }

    fn build_body(request: GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), request.prompt)],
            system_instruction: request
                .system_instruction
                .map(|instruction| Content::text(None, instruction)),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Other("no API key configured".to_string()))?;

        let url = self.build_url(&request.model, api_key);
        tracing::debug!("Calling generateContent with model {}", request.model);

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .json(&Self::build_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let data = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        Ok(data.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(
            "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            api_key.map(str::to_string),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(!client(Some("  ")).has_credentials());
        assert!(!client(None).has_credentials());
        assert!(client(Some("abc")).has_credentials());
    }

    #[test]
    fn test_build_url() {
        let url = client(Some("k")).build_url("gemini-3-flash-preview", "a b");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent?key=a%20b"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GeminiClient::build_body(GenerationRequest {
            model: "m".to_string(),
            prompt: "Context: ...".to_string(),
            system_instruction: Some("Be concise".to_string()),
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Context: ...");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Be concise");
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"world"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_text(), "Hello world");

        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.into_text(), "");
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let result = client(None)
            .generate(GenerationRequest {
                model: "m".to_string(),
                prompt: "p".to_string(),
                system_instruction: None,
            })
            .await;
        assert!(matches!(result, Err(GenerationError::Other(_))));
    }
}

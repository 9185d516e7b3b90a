/// Gemini client for skin condition analysis
///
/// One POST to `generateContent` with the image inlined and a response
/// schema pinning the four report fields. The model is asked for JSON
/// directly, so the text part of the first candidate parses straight
/// into an `AnalysisReport`.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisRequest;
use crate::config::Config;
use crate::state::data::AnalysisReport;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const PROMPT: &str = "You are a dermatology assistant. Analyze the skin condition shown in \
    this photo. Identify the single most likely condition and respond with JSON matching the \
    provided schema: conditionName is a short name for the condition, description is a 2-3 \
    sentence plain-language explanation, symptoms lists common symptoms of the condition, and \
    suggestions lists practical care steps, ending with a reminder to consult a dermatologist. \
    This is informational guidance, not a medical diagnosis.";

/// Any way the collaborator call can go wrong. Callers do not branch on
/// the variant; the UI shows one generic message either way and the
/// detail is only logged.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// The analysis collaborator. Cheap to clone; `reqwest::Client` is an
/// `Arc` internally, so each spawned call shares the connection pool.
#[derive(Clone)]
pub struct Analyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// One round trip: image in, structured report out. No retries, no
    /// timeout beyond reqwest's defaults; each user click is one attempt.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );

        println!("📤 Sending analysis request to Gemini ({})...", self.model);

        let response = self
            .client
            .post(&url)
            .json(&request_payload(&request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AnalysisError::Api { status, body });
        }

        parse_report(&body)
    }
}

/// Build the generateContent payload: the prompt, the inlined image, and
/// a response schema so the model returns the report fields as JSON.
fn request_payload(request: &AnalysisRequest) -> serde_json::Value {
    json!({
        "contents": [{
            "parts": [
                { "text": PROMPT },
                {
                    "inline_data": {
                        "mime_type": request.mime_type,
                        "data": request.image_data,
                    }
                }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "conditionName": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "symptoms": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } },
                },
                "required": ["conditionName", "description", "symptoms", "suggestions"],
            }
        }
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Parse a generateContent body into a report.
///
/// A response with no candidate text (safety refusal, empty answer) and
/// a report with empty symptom or suggestion lists both count as
/// malformed; the contract promises non-empty lists.
fn parse_report(body: &str) -> Result<AnalysisReport, AnalysisError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::Malformed(format!("invalid response JSON: {}", e)))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| AnalysisError::Malformed("no candidate text in response".to_string()))?;

    let report: AnalysisReport = serde_json::from_str(&text)
        .map_err(|e| AnalysisError::Malformed(format!("candidate text is not a report: {}", e)))?;

    if report.symptoms.is_empty() || report.suggestions.is_empty() {
        return Err(AnalysisError::Malformed(
            "report is missing symptoms or suggestions".to_string(),
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini_body(report_json: &str) -> String {
        serde_json::to_string(&json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": report_json }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_well_formed_report() {
        let body = gemini_body(
            r#"{
                "conditionName": "Psoriasis",
                "description": "A chronic condition causing rapid skin cell buildup.",
                "symptoms": ["Scaly patches", "Itching", "Dry skin"],
                "suggestions": ["Keep skin moisturized", "See a dermatologist"]
            }"#,
        );

        let report = parse_report(&body).unwrap();
        assert_eq!(report.condition_name, "Psoriasis");
        assert_eq!(report.symptoms.len(), 3);
        assert_eq!(report.suggestions[1], "See a dermatologist");
    }

    #[test]
    fn test_parse_rejects_empty_candidates() {
        let body = r#"{"candidates": []}"#;
        assert!(matches!(
            parse_report(body),
            Err(AnalysisError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_json_candidate_text() {
        let body = gemini_body("I cannot analyze this image.");
        assert!(matches!(
            parse_report(&body),
            Err(AnalysisError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_lists() {
        let body = gemini_body(
            r#"{
                "conditionName": "Unknown",
                "description": "Could not determine.",
                "symptoms": [],
                "suggestions": []
            }"#,
        );
        assert!(matches!(
            parse_report(&body),
            Err(AnalysisError::Malformed(_))
        ));
    }

    #[test]
    fn test_payload_inlines_image_and_schema() {
        let request = AnalysisRequest {
            image_data: "aGVsbG8=".to_string(),
            mime_type: "image/webp".to_string(),
        };

        let payload = request_payload(&request);
        assert_eq!(
            payload["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/webp"
        );
        assert_eq!(
            payload["contents"][0]["parts"][1]["inline_data"]["data"],
            "aGVsbG8="
        );
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}

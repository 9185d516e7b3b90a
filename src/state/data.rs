/// Shared data structures for the application state
///
/// These structs represent the data that flows between the upload layer,
/// the analysis lifecycle, and the UI layer.

use serde::{Deserialize, Serialize};

/// A user-supplied photo, normalized by the upload controller.
///
/// Created only after the shared validation predicate has accepted the
/// file; both input channels (picker and drag-drop) produce this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    /// Raw file content
    pub bytes: Vec<u8>,
    /// Sniffed MIME type (e.g. "image/png")
    pub mime_type: String,
    /// Base64 payload of `bytes` (no data-URL prefix)
    pub encoded_data: String,
}

impl SelectedImage {
    /// Render as a `data:<mime>;base64,<payload>` URL.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.encoded_data)
    }
}

/// The structured result of one successful analysis call.
///
/// Immutable once received. Wire names are camelCase because the response
/// schema sent to Gemini pins those field names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Short name of the most likely condition
    pub condition_name: String,
    /// Plain-language description of the condition
    pub description: String,
    /// Common symptoms, in the order the model listed them
    pub symptoms: Vec<String>,
    /// Care suggestions and next steps, in order
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_format() {
        let image = SelectedImage {
            bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
            encoded_data: "AQID".to_string(),
        };
        assert_eq!(image.data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_report_wire_names_are_camel_case() {
        let json = r#"{
            "conditionName": "Eczema",
            "description": "Dry, inflamed skin.",
            "symptoms": ["Itching", "Redness"],
            "suggestions": ["Moisturize daily"]
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.condition_name, "Eczema");
        assert_eq!(report.symptoms.len(), 2);

        // Serializing back must keep the same field names
        let round = serde_json::to_string(&report).unwrap();
        assert!(round.contains("conditionName"));
        assert!(!round.contains("condition_name"));
    }
}

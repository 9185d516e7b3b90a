/// Analysis collaborator module
///
/// The external AI service is reached through one call contract:
/// `Analyzer::analyze(AnalysisRequest) -> AnalysisReport`. Everything
/// Gemini-specific (endpoint, payload shape, response parsing) stays
/// inside client.rs.

pub mod client;

pub use client::{AnalysisError, Analyzer};

use crate::state::data::SelectedImage;

/// The payload of one outbound call. Ephemeral; built from the held
/// image right before the call and never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Base64-encoded image content
    pub image_data: String,
    /// MIME type of the encoded image
    pub mime_type: String,
}

impl AnalysisRequest {
    pub fn from_image(image: &SelectedImage) -> Self {
        Self {
            image_data: image.encoded_data.clone(),
            mime_type: image.mime_type.clone(),
        }
    }
}

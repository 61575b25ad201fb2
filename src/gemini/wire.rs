//! Serde payload types for the generativelanguage REST endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload carried inside a response part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<ImagenInstance>,
    pub parameters: ImagenParameters,
}

#[derive(Debug, Serialize)]
pub struct ImagenInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenParameters {
    pub sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    pub output_mime_type: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_content_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::Text {
                    text: "gold shield".to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "gold shield");
        assert_eq!(
            value["generationConfig"]["responseModalities"],
            json!(["TEXT", "IMAGE"])
        );
        assert!(value["contents"][0].get("role").is_none());
    }

    #[test]
    fn test_parse_inline_data_part() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                }
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let parts = &response.candidates[0].content.parts;
        assert!(matches!(parts[0], Part::Text { .. }));
        match &parts[1] {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                assert_eq!(inline_data.data, "aGVsbG8=");
            }
            other => panic!("expected inline data part, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn test_predict_request_shape() {
        let request = PredictRequest {
            instances: vec![ImagenInstance {
                prompt: "hero banner".to_string(),
            }],
            parameters: ImagenParameters {
                sample_count: 1,
                aspect_ratio: Some("16:9".to_string()),
                output_mime_type: "image/png".to_string(),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["instances"][0]["prompt"], "hero banner");
        assert_eq!(value["parameters"]["sampleCount"], 1);
        assert_eq!(value["parameters"]["aspectRatio"], "16:9");
        assert_eq!(value["parameters"]["outputMimeType"], "image/png");
    }

    #[test]
    fn test_parse_predictions() {
        let body = json!({
            "predictions": [
                { "bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/png" },
                { "bytesBase64Encoded": "d29ybGQ=" }
            ]
        });

        let response: PredictResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.predictions.len(), 2);
        assert_eq!(response.predictions[0].bytes_base64_encoded, "aGVsbG8=");
        assert_eq!(
            response.predictions[0].mime_type.as_deref(),
            Some("image/png")
        );
        assert!(response.predictions[1].mime_type.is_none());
    }
}

pub mod implementation;

use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

static GENERATE_CONTENT: &str = "generateContent";

pub trait TextGeneration {
    fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> impl std::future::Future<
        Output = anyhow::Result<GenerateContentResponse>,
    > + Send;
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one user message.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    pub fn text(&self) -> anyhow::Result<String> {
        let Some(candidate) = self.candidates.first() else {
            bail!(
                "no candidates in response, block reason: {:?}",
                self.prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.as_deref())
            );
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        ensure!(
            !text.is_empty(),
            "candidate has no text, finish reason: {:?}",
            candidate.finish_reason
        );

        Ok(text)
    }
}

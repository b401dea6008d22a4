use anyhow::Context;

use crate::models::Models;

use super::{
    GenerateContentRequest, GenerateContentResponse, TextGeneration,
    GENERATE_CONTENT,
};

impl TextGeneration for Models {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let body = serde_json::to_string(&request)
            .context("failed to serialize request")?;

        let text = self.string_response(body, GENERATE_CONTENT).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}

use anyhow::{ensure, Context};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Client,
};
use tracing::debug;

pub mod text_generation;

#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    model: String,
    client: Client,
}

impl Models {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
    ) -> anyhow::Result<Self> {
        let mut key =
            HeaderValue::from_str(api_key).context("invalid api key")?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/json"),
        );
        headers.insert("x-goog-api-key", key);

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            base_url: format!(
                "{}/v1beta/models",
                base_url.trim_end_matches('/')
            ),
            model: model.to_string(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn string_response<R: Into<Body>>(
        &self,
        request: R,
        method: &str,
    ) -> anyhow::Result<String> {
        let url = format!("{}/{}:{}", self.base_url, self.model, method);
        debug!(task = "call model", url = url.as_str());

        let response = self.client.post(url).body(request).send().await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }
}

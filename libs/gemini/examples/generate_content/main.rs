use gemini::models::{
    text_generation::{GenerateContentRequest, TextGeneration},
    Models,
};
use settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    let models = Models::new(
        &settings.gemini.api_key,
        &settings.gemini.model,
        &settings.gemini.base_url,
    )?;

    let result = models
        .generate_content(GenerateContentRequest::from_text(
            "Reply with a one-line greeting.",
        ))
        .await?;

    println!("{}", result.text()?);

    Ok(())
}

use anyhow::Context;
use entity::{prelude::*, prompt_analysis::TaskType};
use gemini::models::text_generation::{
    GenerateContentRequest, TextGeneration,
};
use tracing::debug;

use super::parser;

/// Grades a prompt with the language model and rewrites it.
#[derive(Clone, Debug)]
pub struct PromptAnalysisAgent<T> {
    client: T,
}

impl<T> PromptAnalysisAgent<T>
where
    T: TextGeneration + Sync,
{
    pub fn new(client: T) -> Self {
        Self { client }
    }

    /// Fails only when the model call fails. A reply that cannot be parsed
    /// yields the fallback analysis instead.
    pub async fn analyze(
        &self,
        prompt: &str,
        task_type: TaskType,
        context: Option<&str>,
    ) -> anyhow::Result<AnalysisEntity> {
        let instruction = instruction(prompt, task_type, context);

        let response = self
            .client
            .generate_content(GenerateContentRequest::from_text(instruction))
            .await
            .context("failed to generate content")?;
        let text = response.text()?;

        debug!(task = "analyze prompt", %task_type, response = text.as_str());

        Ok(parser::parse(&text, prompt))
    }
}

fn instruction(
    prompt: &str,
    task_type: TaskType,
    context: Option<&str>,
) -> String {
    let context = context
        .filter(|context| !context.trim().is_empty())
        .map(|context| format!("\nAdditional Context: {}", context))
        .unwrap_or_default();

    format!(
        r#"You are an expert prompt engineering assistant. Evaluate the prompt below and rewrite it.

Original Prompt: "{prompt}"
Task Type: {task_type}{context}

RULES:
1. A vague, generic or empty-of-substance prompt gets a LOW score (0-4).
2. The enhanced prompt MUST be materially better than the original: add concrete details, structure, examples and clear expectations.
3. Never answer with placeholder text or a generic "ready to help" message.
4. The enhanced prompt must be actionable and ready to use as-is.

Answer with JSON in exactly this shape:

{{
  "score": <number from 0 to 10>,
  "metrics": {{
    "clarity": "<Low|Medium|High>",
    "context": "<Low|Medium|High>",
    "specificity": "<Low|Medium|High>"
  }},
  "strengths": ["<strength>", "<strength>", "<strength>"],
  "corrections": ["<suggestion>", "<suggestion>", "<suggestion>"],
  "enhanced_prompt": "<a substantially improved rewrite stating the objective and expected outcome, requirements and constraints, the target audience when relevant, the output format, examples or background, and best practices for this task type>"
}}

Criteria:
- clarity: is the prompt easy to understand? Low when vague or confusing.
- context: does it give enough background? Low when background is missing.
- specificity: are requirements and expectations well defined? Low when generic.
- score: overall quality from 0 to 10.
  0-3: very poor, vague or nonsensical
  4-5: basic but lacking detail
  6-7: good foundation, needs refinement
  8-9: excellent and well structured
  10: perfect, production ready

Respond with the JSON only, no additional text."#
    )
}

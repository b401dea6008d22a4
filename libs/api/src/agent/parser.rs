use std::sync::OnceLock;

use anyhow::{anyhow, bail, ensure, Context};
use entity::{
    prelude::*,
    prompt_analysis::{Metrics, MAX_FEEDBACK_ITEMS},
};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

static FALLBACK_STRENGTH: &str = "Prompt received and processed";
static FALLBACK_CORRECTION: &str = "Unable to analyze - please try again";

const FALLBACK_SCORE: f64 = 5.0;
const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 10.0;

#[derive(Deserialize)]
struct Reply {
    score: Value,
    metrics: Metrics,
    strengths: Vec<String>,
    corrections: Vec<String>,
    enhanced_prompt: String,
}

/// Turns the model's raw reply into an analysis.
///
/// Never fails: any reply that does not carry a valid analysis is logged and
/// replaced by [`fallback`].
pub fn parse(raw_text: &str, original_prompt: &str) -> AnalysisEntity {
    match try_parse(raw_text) {
        Ok(analysis) => analysis,
        Err(e) => {
            error!(
                task = "parse analysis",
                err = format!("{:#}", e),
                response = raw_text
            );
            fallback(original_prompt)
        }
    }
}

pub fn fallback(original_prompt: &str) -> AnalysisEntity {
    AnalysisEntity {
        score: FALLBACK_SCORE,
        metrics: Metrics::default(),
        strengths: vec![FALLBACK_STRENGTH.to_string()],
        corrections: vec![FALLBACK_CORRECTION.to_string()],
        enhanced_prompt: original_prompt.to_string(),
    }
}

fn try_parse(raw_text: &str) -> anyhow::Result<AnalysisEntity> {
    let reply = serde_json::from_str::<Reply>(extract_json(raw_text))
        .context("failed to parse reply")?;

    ensure!(
        !reply.enhanced_prompt.trim().is_empty(),
        "enhanced_prompt is empty"
    );

    let mut strengths = reply.strengths;
    strengths.truncate(MAX_FEEDBACK_ITEMS);
    let mut corrections = reply.corrections;
    corrections.truncate(MAX_FEEDBACK_ITEMS);

    Ok(AnalysisEntity {
        score: score(&reply.score)?,
        metrics: reply.metrics,
        strengths,
        corrections,
        enhanced_prompt: reply.enhanced_prompt,
    })
}

/// Fenced block first, then the outermost braces, then the whole text.
fn extract_json(raw_text: &str) -> &str {
    static FENCED: OnceLock<Regex> = OnceLock::new();
    static BRACES: OnceLock<Regex> = OnceLock::new();

    let fenced = FENCED.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```")
            .expect("fenced json pattern")
    });
    if let Some(json) = fenced.captures(raw_text).and_then(|c| c.get(1)) {
        return json.as_str();
    }

    let braces = BRACES
        .get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("braces pattern"));
    if let Some(json) = braces.find(raw_text) {
        return json.as_str();
    }

    raw_text
}

fn score(value: &Value) -> anyhow::Result<f64> {
    let score = match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| anyhow!("score is not a float: {}", number))?,
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .with_context(|| format!("score is not a number: {}", text))?,
        other => bail!("score is not a number: {}", other),
    };

    ensure!(score.is_finite(), "score is not finite: {}", score);

    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        warn!(task = "parse analysis", score = score, "score out of range, clamped");
    }

    Ok(score.clamp(MIN_SCORE, MAX_SCORE))
}

#[cfg(test)]
mod test {
    use entity::prompt_analysis::MetricsLevel;

    use super::{fallback, parse};

    static PROMPT: &str = "Write a blog post about AI";

    fn reply(score: &str, clarity: &str) -> String {
        format!(
            r#"{{
  "score": {score},
  "metrics": {{ "clarity": "{clarity}", "context": "Low", "specificity": "High" }},
  "strengths": ["Clear topic"],
  "corrections": ["Name the audience", "Give a length"],
  "enhanced_prompt": "Write a 1,200-word blog post for product managers explaining how AI assistants change sprint planning."
}}"#
        )
    }

    #[test]
    fn test_fenced_json() {
        // Arrange
        let raw = format!(
            "Here is my evaluation:\n```json\n{}\n```\nGood luck!",
            reply("7.5", "High")
        );

        // Act
        let analysis = parse(&raw, PROMPT);

        // Assert
        assert_eq!(analysis.score, 7.5);
        assert_eq!(analysis.metrics.clarity, MetricsLevel::High);
        assert_eq!(analysis.metrics.context, MetricsLevel::Low);
        assert_eq!(analysis.metrics.specificity, MetricsLevel::High);
        assert_eq!(analysis.strengths, vec!["Clear topic"]);
        assert_eq!(
            analysis.corrections,
            vec!["Name the audience", "Give a length"]
        );
        assert!(analysis.enhanced_prompt.starts_with("Write a 1,200-word"));
    }

    #[test]
    fn test_untagged_fence() {
        let raw = format!("```\n{}\n```", reply("2", "Low"));

        let analysis = parse(&raw, PROMPT);

        assert_eq!(analysis.score, 2.0);
        assert_eq!(analysis.metrics.clarity, MetricsLevel::Low);
    }

    #[test]
    fn test_bare_json_inside_prose() {
        let raw = format!("Sure! {} Hope this helps.", reply("9", "Medium"));

        let analysis = parse(&raw, PROMPT);

        assert_eq!(analysis.score, 9.0);
        assert_eq!(analysis.metrics.clarity, MetricsLevel::Medium);
    }

    #[test]
    fn test_lists_are_truncated_in_order() {
        // Arrange
        let raw = r#"```json
{
  "score": 8,
  "metrics": { "clarity": "High", "context": "High", "specificity": "High" },
  "strengths": ["s1", "s2", "s3", "s4", "s5", "s6", "s7"],
  "corrections": ["c1", "c2", "c3", "c4", "c5", "c6"],
  "enhanced_prompt": "A better prompt"
}
```"#;

        // Act
        let analysis = parse(raw, PROMPT);

        // Assert
        assert_eq!(analysis.strengths, vec!["s1", "s2", "s3", "s4", "s5"]);
        assert_eq!(analysis.corrections, vec!["c1", "c2", "c3", "c4", "c5"]);
    }

    #[test]
    fn test_numeric_string_score() {
        let analysis = parse(&reply("\"6.5\"", "High"), PROMPT);

        assert_eq!(analysis.score, 6.5);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        assert_eq!(parse(&reply("12", "High"), PROMPT).score, 10.0);
        assert_eq!(parse(&reply("-3", "High"), PROMPT).score, 0.0);
    }

    #[test]
    fn test_no_json_falls_back() {
        let analysis = parse("The model is overloaded, try later.", PROMPT);

        assert_eq!(analysis, fallback(PROMPT));
        assert_eq!(analysis.score, 5.0);
        assert_eq!(analysis.metrics.clarity, MetricsLevel::Medium);
        assert_eq!(analysis.metrics.context, MetricsLevel::Medium);
        assert_eq!(analysis.metrics.specificity, MetricsLevel::Medium);
        assert_eq!(analysis.strengths, vec!["Prompt received and processed"]);
        assert_eq!(
            analysis.corrections,
            vec!["Unable to analyze - please try again"]
        );
        assert_eq!(analysis.enhanced_prompt, PROMPT);
    }

    #[test]
    fn test_invalid_metric_falls_back() {
        let analysis = parse(&reply("8", "VeryHigh"), PROMPT);

        assert_eq!(analysis, fallback(PROMPT));
    }

    #[test]
    fn test_invalid_replies_fall_back() {
        let cases = [
            // truncated json
            r#"{"score": 8, "metrics": {"clarity": "High""#.to_string(),
            // missing enhanced_prompt
            r#"{"score": 8, "metrics": {"clarity": "High", "context": "High", "specificity": "High"}, "strengths": [], "corrections": []}"#.to_string(),
            // missing metric
            r#"{"score": 8, "metrics": {"clarity": "High", "context": "High"}, "strengths": [], "corrections": [], "enhanced_prompt": "x"}"#.to_string(),
            // missing score
            r#"{"metrics": {"clarity": "High", "context": "High", "specificity": "High"}, "strengths": [], "corrections": [], "enhanced_prompt": "x"}"#.to_string(),
            // strengths is not a list
            r#"{"score": 8, "metrics": {"clarity": "High", "context": "High", "specificity": "High"}, "strengths": "good", "corrections": [], "enhanced_prompt": "x"}"#.to_string(),
            // blank enhanced prompt
            r#"{"score": 8, "metrics": {"clarity": "High", "context": "High", "specificity": "High"}, "strengths": [], "corrections": [], "enhanced_prompt": "  "}"#.to_string(),
            reply("\"high\"", "High"),
            reply("null", "High"),
            String::new(),
        ];

        for raw in cases {
            assert_eq!(parse(&raw, PROMPT), fallback(PROMPT), "{}", raw);
        }
    }
}

use entity::prompt_analysis::TaskType;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::response::FieldError;

pub const PROMPT_MIN_CHARS: usize = 10;
pub const PROMPT_MAX_CHARS: usize = 5000;
pub const CONTEXT_MAX_CHARS: usize = 1000;

#[derive(Deserialize, ToSchema, Debug)]
#[schema(example = json!({
    "prompt": "Write a blog post about AI",
    "task_type": "creative",
    "context": "For a tech-savvy audience"
}))]
pub struct AnalyzeRequest {
    /// The prompt to analyze
    #[schema(min_length = 10, max_length = 5000)]
    pub prompt: String,
    /// Type of task
    #[serde(default)]
    pub task_type: TaskType,
    /// Additional context
    #[schema(max_length = 1000)]
    pub context: Option<String>,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let prompt_chars = self.prompt.chars().count();
        if prompt_chars < PROMPT_MIN_CHARS {
            errors.push(FieldError::new(
                "body",
                "prompt",
                format!(
                    "String should have at least {} characters",
                    PROMPT_MIN_CHARS
                ),
            ));
        } else if prompt_chars > PROMPT_MAX_CHARS {
            errors.push(FieldError::new(
                "body",
                "prompt",
                format!(
                    "String should have at most {} characters",
                    PROMPT_MAX_CHARS
                ),
            ));
        }

        let context_chars = self
            .context
            .as_deref()
            .map(|context| context.chars().count())
            .unwrap_or_default();
        if context_chars > CONTEXT_MAX_CHARS {
            errors.push(FieldError::new(
                "body",
                "context",
                format!(
                    "String should have at most {} characters",
                    CONTEXT_MAX_CHARS
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Blank context is treated as absent.
    pub fn context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .filter(|context| !context.trim().is_empty())
    }
}

#[cfg(test)]
mod test {
    use entity::prompt_analysis::TaskType;

    use super::AnalyzeRequest;

    fn request(prompt: &str, context: Option<&str>) -> AnalyzeRequest {
        AnalyzeRequest {
            prompt: prompt.to_string(),
            task_type: TaskType::General,
            context: context.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_task_type() {
        let body = r#"{ "prompt": "Write a blog post about AI" }"#;

        let request = serde_json::from_str::<AnalyzeRequest>(body).unwrap();

        assert_eq!(request.task_type, TaskType::General);
        assert!(request.context.is_none());
    }

    #[test]
    fn test_prompt_length_bounds() {
        assert!(request("hi", None).validate().is_err());
        assert!(request("0123456789", None).validate().is_ok());
        assert!(request(&"a".repeat(5000), None).validate().is_ok());
        assert!(request(&"a".repeat(5001), None).validate().is_err());
    }

    #[test]
    fn test_prompt_length_counts_chars() {
        // ten characters, thirty bytes
        assert!(request("日本語の文章を書いて", None).validate().is_ok());
    }

    #[test]
    fn test_context_too_long() {
        let errors = request("Write a blog post about AI", Some(&"c".repeat(1001)))
            .validate()
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, vec!["body", "context"]);
    }

    #[test]
    fn test_blank_context_is_absent() {
        assert_eq!(request("Write a blog post", Some("  ")).context(), None);
        assert_eq!(request("Write a blog post", Some("HR")).context(), Some("HR"));
    }
}

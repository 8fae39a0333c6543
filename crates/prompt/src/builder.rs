//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use docqa_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Renders the template with Handlebars (no HTML escaping) and carries the
/// definition's system message through unchanged.
///
/// # Example
/// ```no_run
/// use docqa_prompt::{build_prompt, PromptDefinition};
/// use std::collections::HashMap;
///
/// # fn example(def: PromptDefinition) -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "Who signed the contract?".to_string());
///
/// let built = build_prompt(&def, vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let rendered = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        definition.system.clone(),
        rendered,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{builtin_prompt, GROUNDED_PROMPT_ID};

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("message".to_string(), "Hello, world!".to_string());

        let result = render_template("Message: {{message}}", &vars).unwrap();
        assert_eq!(result, "Message: Hello, world!");
    }

    #[test]
    fn test_render_does_not_escape() {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "a < b && \"quoted\"".to_string());

        let result = render_template("{{context}}", &vars).unwrap();
        assert_eq!(result, "a < b && \"quoted\"");
    }

    #[test]
    fn test_build_grounded_prompt() {
        let def = builtin_prompt(GROUNDED_PROMPT_ID).unwrap();
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "[1]\nThe fee is 20 EUR.".to_string());
        vars.insert("question".to_string(), "How much is the fee?".to_string());

        let built = build_prompt(&def, vars).unwrap();
        assert!(built.user.starts_with("Answer ONLY"));
        assert!(built.user.contains("[1]\nThe fee is 20 EUR."));
        assert!(built.user.ends_with("Question: How much is the fee?\nAnswer:"));
        assert_eq!(built.metadata.source_prompt_id, GROUNDED_PROMPT_ID);
        assert!(built.system.is_none());
    }

    #[test]
    fn test_invalid_template() {
        let vars = HashMap::new();
        let result = render_template("{{#if}}", &vars);
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Question: {{missing}}", &vars);
        // Handlebars renders missing variables as empty string
        assert_eq!(result.unwrap(), "Question: ");
    }
}

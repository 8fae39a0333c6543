//! Built-in prompt definitions.
//!
//! Workspaces may override any of these with `.docqa/prompts/<id>.yml`.

use crate::types::PromptDefinition;

/// Grounded answer over retrieved document excerpts.
///
/// Variables: `context` (numbered excerpts), `question`.
pub const GROUNDED_PROMPT_ID: &str = "rag.grounded";

/// Direct chat without retrieval.
///
/// Variables: `message`.
pub const CHAT_PROMPT_ID: &str = "chat.default";

const GROUNDED_TEMPLATE: &str = "Answer ONLY with information from the excerpts below. \
If the answer is not in them, say explicitly that it is not in the document.
{{context}}

Question: {{question}}
Answer:";

/// Ids of every built-in prompt.
pub fn builtin_ids() -> Vec<&'static str> {
    vec![CHAT_PROMPT_ID, GROUNDED_PROMPT_ID]
}

/// Look up a built-in prompt by id.
pub fn builtin_prompt(id: &str) -> Option<PromptDefinition> {
    match id {
        GROUNDED_PROMPT_ID => Some(PromptDefinition {
            id: GROUNDED_PROMPT_ID.to_string(),
            title: "Grounded document answer".to_string(),
            api_version: "1.0".to_string(),
            system: None,
            template: GROUNDED_TEMPLATE.to_string(),
        }),
        CHAT_PROMPT_ID => Some(PromptDefinition {
            id: CHAT_PROMPT_ID.to_string(),
            title: "Direct chat".to_string(),
            api_version: "1.0".to_string(),
            system: None,
            template: "{{message}}".to_string(),
        }),
        _ => None,
    }
}

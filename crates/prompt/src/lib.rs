//! Prompt system for DocQA.
//!
//! This crate provides structured prompt management with:
//! - Built-in prompt definitions (grounded document answers, direct chat)
//! - YAML overrides per workspace
//! - Handlebars template rendering

pub mod builder;
pub mod builtin;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use builtin::{builtin_prompt, CHAT_PROMPT_ID, GROUNDED_PROMPT_ID};
pub use loader::{list_prompts, load_prompt};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};

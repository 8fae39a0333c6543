//! Prompts command handler.

use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use docqa_prompt::{list_prompts, load_prompt};

/// List available prompts, built in and workspace overrides
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let ids = list_prompts(&config.workspace)?;

        let mut prompts = Vec::with_capacity(ids.len());
        for id in &ids {
            let definition = load_prompt(&config.workspace, id)?;
            prompts.push(definition);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&prompts)?);
        } else {
            for prompt in &prompts {
                println!("{:<20} {}", prompt.id, prompt.title);
            }
        }

        Ok(())
    }
}

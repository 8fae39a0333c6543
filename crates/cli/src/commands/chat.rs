//! Chat command handler.
//!
//! Sends one message straight to the chat model, without any document.

use super::chat_client;
use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use docqa_llm::{chat, ChatParams};

/// Chat with the model directly
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Message to send
    pub message: String,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Maximum tokens in response (1-4096)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Temperature for response generation (0.0-1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let params = ChatParams {
            message: self.message.clone(),
            system: self.system.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        // Fail on bad input before demanding credentials.
        params.validate()?;

        let client = chat_client(config)?;
        let answer = chat(client.as_ref(), &config.model, &params).await?;

        if self.json {
            let output = serde_json::json!({
                "answer": answer,
                "model": config.model,
                "provider": config.provider,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}

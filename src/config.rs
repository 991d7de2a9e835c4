use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use derive_more::Display;

use crate::cli::Cli;
use crate::core::{GeminiClient, GenerationProvider, OpenAiClient, Pipeline, YouTubeTranscripts};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
pub enum Provider {
    #[display("Gemini")]
    Gemini,
    #[value(name = "openai")]
    #[display("OpenAI")]
    OpenAi,
}

impl Provider {
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GOOGLE_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// Pull `KEY=value` pairs from a `.env` file in the working directory (or a parent)
/// into the environment so the `env` fallbacks on [`Cli`] can see them.
/// Variables that are already set keep their values.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Settings read once at start-up and never changed afterwards.
#[derive(Clone)]
pub struct Config {
    pub provider: Provider,
    api_key: Option<String>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let api_key = match cli.provider {
            Provider::Gemini => cli.google_api_key.clone(),
            Provider::OpenAi => cli.openai_api_key.clone(),
        };
        Self {
            provider: cli.provider,
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// The key is not validated here; a missing one surfaces as a provider error.
    pub fn generator(&self) -> Arc<dyn GenerationProvider> {
        if !self.has_api_key() {
            tracing::warn!(
                "{} is not set; summary requests will be rejected by {}",
                self.provider.api_key_var(),
                self.provider
            );
        }

        let key = self.api_key.clone().unwrap_or_default();
        match self.provider {
            Provider::Gemini => Arc::new(GeminiClient::new(key)),
            Provider::OpenAi => Arc::new(OpenAiClient::new(key)),
        }
    }

    pub fn pipeline(&self) -> Result<Pipeline> {
        let transcripts = YouTubeTranscripts::new()?;
        Ok(Pipeline::new(Arc::new(transcripts), self.generator()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

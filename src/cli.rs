use clap::{Parser, Subcommand};

use crate::config::Provider;

#[derive(Parser)]
#[command(name = "tubesum")]
#[command(about = "YouTube Transcript to Detailed Notes Converter")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Generation backend used for summaries
    #[arg(long, value_enum, default_value_t = Provider::Gemini, global = true)]
    pub provider: Provider,

    /// API key for Gemini
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    pub google_api_key: Option<String>,

    /// API key for OpenAI (only read with --provider openai)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Fetch the transcript and print detailed notes
    Summarize {
        /// YouTube video URL (watch?v= or youtu.be/)
        url: String,

        /// Print a JSON object instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Print the transcript text without summarizing
    Transcript {
        /// YouTube video URL (watch?v= or youtu.be/)
        url: String,

        /// Print the video id and transcript text as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the video identifier and thumbnail URL
    Id {
        /// YouTube video URL (watch?v= or youtu.be/)
        url: String,
    },

    /// Open TUI interface
    Tui,
}

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::responses::{
        CreateResponseArgs, EasyInputMessageArgs, InputItem, InputParam, OutputItem,
        OutputMessageContent, Role,
    },
};
use async_trait::async_trait;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Instruction placed in front of the transcript text.
pub const SUMMARY_PROMPT: &str = "You are a YouTube video summarizer. You will take the transcript text\n\
and summarize the entire video by providing the key points within 250 words. \n\
Please provide the summary of the text given here: ";

/// Heading shown above every rendered summary.
pub const NOTES_HEADING: &str = "🧾 Detailed Notes:";

pub const GEMINI_MODEL: &str = "models/gemini-1.5-pro-latest";
pub const OPENAI_MODEL: &str = "gpt-5.2";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Display, From)]
pub enum GenerationError {
    #[from]
    #[display("generation request failed: {_0}")]
    Http(reqwest::Error),

    #[display("generation provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[display("generation provider returned no text")]
    EmptyResponse,

    #[from]
    #[display("OpenAI request failed: {_0}")]
    OpenAi(OpenAIError),
}

impl std::error::Error for GenerationError {}

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Pinned model identifier used for every request.
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Send `instruction_prefix + text` as one prompt and hand back the reply untouched.
pub async fn summarize(
    generator: &dyn GenerationProvider,
    text: &str,
    instruction_prefix: &str,
) -> Result<String, GenerationError> {
    let prompt = format!("{instruction_prefix}{text}");
    tracing::info!(
        model = generator.model(),
        prompt_chars = prompt.len(),
        "requesting summary"
    );
    generator.generate(&prompt).await
}

// Gemini generateContent wire types

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl<'a> GenerateContentRequest<'a> {
    fn single_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Google Gemini over its REST `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn model(&self) -> &str {
        GEMINI_MODEL
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(format!("{GEMINI_API_BASE}/{GEMINI_MODEL}:generateContent"))
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::single_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.into_text().ok_or(GenerationError::EmptyResponse)?;
        tracing::debug!(chars = text.len(), "gemini response received");
        Ok(text)
    }
}

/// OpenAI Responses API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: async_openai::Client<OpenAIConfig>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.into());
        Self {
            client: async_openai::Client::with_config(config),
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAiClient {
    fn model(&self) -> &str {
        OPENAI_MODEL
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = CreateResponseArgs::default()
            .model(OPENAI_MODEL)
            .input(InputParam::Items(vec![InputItem::EasyMessage(
                EasyInputMessageArgs::default()
                    .role(Role::User)
                    .content(prompt)
                    .build()?,
            )]))
            .build()?;

        let response = self.client.responses().create(request).await?;

        let mut content = String::new();
        let mut saw_text = false;
        for output in response.output {
            if let OutputItem::Message(out) = output {
                for c in out.content {
                    match c {
                        OutputMessageContent::OutputText(text) => {
                            saw_text = true;
                            content.push_str(&text.text);
                        }
                        other => tracing::warn!("unexpected content type: {other:?}"),
                    }
                }
            }
        }

        if !saw_text {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(content)
    }
}

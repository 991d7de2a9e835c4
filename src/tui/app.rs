use crate::core::{GenerationError, Notice, Pipeline, TranscriptDetails, TranscriptError};
use crate::error::Result;
use crate::tui::components::{InputField, ProgressBar, SummaryViewer};
use crate::tui::events::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Input,
    Fetching { url: String },
    Ready { details: TranscriptDetails },
    Summarizing { details: TranscriptDetails },
    Summary { details: TranscriptDetails },
}

/// Results reported back by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    TranscriptFetched(std::result::Result<TranscriptDetails, TranscriptError>),
    SummaryGenerated(std::result::Result<String, GenerationError>),
}

pub struct App {
    pub state: AppState,
    pub should_quit: bool,

    pub url_input: InputField,
    /// Outcome of the last failed transcript request.
    pub notice: Option<Notice>,
    /// Last generation failure, shown in the status area.
    pub failure: Option<String>,

    pub progress_bar: ProgressBar,
    pub viewer: Option<SummaryViewer>,
    pub viewer_height: u16,

    pub pipeline: Pipeline,

    processing_tx: mpsc::UnboundedSender<AppMessage>,
    processing_rx: mpsc::UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(pipeline: Pipeline) -> Self {
        let (processing_tx, processing_rx) = mpsc::unbounded_channel();
        let mut url_input = InputField::new(
            "🔗 Enter YouTube Video Link",
            "https://www.youtube.com/watch?v=... or https://youtu.be/...",
        );
        url_input.focused = true;

        Self {
            state: AppState::Input,
            should_quit: false,
            url_input,
            notice: None,
            failure: None,
            progress_bar: ProgressBar::new(),
            viewer: None,
            viewer_height: 0,
            pipeline,
            processing_tx,
            processing_rx,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        self.drain_messages();

        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(text) => {
                if self.state == AppState::Input {
                    self.url_input.insert_str(&text);
                }
            }
            AppEvent::Tick => self.handle_tick(),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Input => self.handle_input_key(key),
            AppState::Ready { .. } => self.handle_ready_key(key),
            AppState::Summary { .. } => self.handle_summary_key(key),
            // Requests run to completion once started.
            AppState::Fetching { .. } | AppState::Summarizing { .. } => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.start_fetch(),
            _ => {
                self.url_input.handle_key(key);
            }
        }
    }

    fn handle_ready_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('g') => {
                if let AppState::Ready { details } = &self.state {
                    let details = details.clone();
                    self.start_summary(details);
                }
            }
            KeyCode::Esc | KeyCode::Char('e') => self.edit_url(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                let state = std::mem::replace(&mut self.state, AppState::Input);
                if let AppState::Summary { details } = state {
                    self.state = AppState::Ready { details };
                }
            }
            KeyCode::Char('n') => {
                self.url_input.clear();
                self.edit_url();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {
                if let Some(viewer) = &mut self.viewer {
                    viewer.handle_key(key, self.viewer_height as usize);
                }
            }
        }
    }

    fn edit_url(&mut self) {
        self.state = AppState::Input;
        self.url_input.focused = true;
        self.url_input.cursor = self.url_input.value.chars().count();
    }

    fn handle_tick(&mut self) {
        self.progress_bar.tick();
    }

    /// Apply whatever the background tasks have reported so far.
    fn drain_messages(&mut self) {
        let mut messages = Vec::new();
        while let Ok(message) = self.processing_rx.try_recv() {
            messages.push(message);
        }
        for message in messages {
            self.apply_message(message);
        }
    }

    fn start_fetch(&mut self) {
        if self.url_input.value.is_empty() {
            return;
        }

        let url = self.url_input.value.clone();
        self.notice = None;
        self.failure = None;
        self.viewer = None;
        self.url_input.focused = false;

        self.progress_bar.reset();
        self.progress_bar.set_progress(0.3);
        self.progress_bar.set_message("Fetching transcript...");
        self.progress_bar.add_log(format!("Requesting transcript for {url}"));
        self.state = AppState::Fetching { url: url.clone() };

        let pipeline = self.pipeline.clone();
        let tx = self.processing_tx.clone();
        tokio::spawn(async move {
            let outcome = pipeline.extract_transcript_details(&url).await;
            let _ = tx.send(AppMessage::TranscriptFetched(outcome));
        });
    }

    fn start_summary(&mut self, details: TranscriptDetails) {
        if !details.is_summarizable() {
            return;
        }

        self.failure = None;
        self.progress_bar.reset();
        self.progress_bar.set_progress(0.5);
        self.progress_bar.set_message(format!(
            "Summarizing video using {}...",
            self.pipeline.model()
        ));
        self.progress_bar
            .add_log(format!("Sending {} words", details.word_count()));
        self.state = AppState::Summarizing {
            details: details.clone(),
        };

        let pipeline = self.pipeline.clone();
        let tx = self.processing_tx.clone();
        tokio::spawn(async move {
            let outcome = pipeline.summarize(&details).await;
            let _ = tx.send(AppMessage::SummaryGenerated(outcome));
        });
    }

    pub fn apply_message(&mut self, message: AppMessage) {
        let state = std::mem::replace(&mut self.state, AppState::Input);

        match (state, message) {
            (AppState::Fetching { .. }, AppMessage::TranscriptFetched(Ok(details))) => {
                self.progress_bar.set_progress(1.0);
                self.state = AppState::Ready { details };
            }
            (AppState::Fetching { url }, AppMessage::TranscriptFetched(Err(err))) => {
                tracing::warn!(%url, "transcript request halted: {err}");
                self.notice = Some(err.notice());
                self.edit_url();
            }
            (AppState::Summarizing { details }, AppMessage::SummaryGenerated(Ok(summary))) => {
                let title = format!("{} | {}", details.video_id, self.pipeline.model());
                self.viewer = Some(SummaryViewer::new(&summary, title));
                self.state = AppState::Summary { details };
            }
            (AppState::Summarizing { details }, AppMessage::SummaryGenerated(Err(err))) => {
                tracing::error!("summary generation failed: {err}");
                self.failure = Some(err.to_string());
                self.state = AppState::Ready { details };
            }
            (state, message) => {
                tracing::debug!(?message, "ignoring message for state {state:?}");
                self.state = state;
            }
        }
    }
}

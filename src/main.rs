mod cli;
mod config;
mod core;
mod error;
mod tui;

use crate::cli::{Cli, Commands};
use crate::config::{Config, load_env_file};
use crate::core::{
    NOTES_HEADING, Notice, Severity, TranscriptDetails, TranscriptError, VideoId,
    extract_identifier,
};
use crate::error::Result;
use crate::tui::{App, EventHandler, Tui, init as tui_init, restore as tui_restore, ui};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "tubesum.log";

#[derive(Serialize)]
struct SummaryReport<'a> {
    video_id: &'a VideoId,
    thumbnail_url: String,
    summary: &'a str,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let env_file = load_env_file();
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(interactive)?;
    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let config = Config::from_cli(&cli);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Id { url }) => run_cli_id(&url),
        Some(Commands::Transcript { url, json }) => run_cli_transcript(&config, &url, json).await,
        Some(Commands::Summarize { url, json }) => run_cli_summarize(&config, &url, json).await,
        Some(Commands::Tui) | None => {
            run_tui(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr for commands and to a temp file while the TUI owns the screen.
fn init_tracing(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "tubesum=info".into());

    if interactive {
        let file = File::create(std::env::temp_dir().join(LOG_FILE))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn print_notice(notice: &Notice) {
    let label = match notice.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    eprintln!("{label}: {}", notice.message);
}

fn run_cli_id(url: &str) -> Result<ExitCode> {
    let video_id = match extract_identifier(url) {
        Ok(video_id) => video_id,
        Err(err) => {
            print_notice(&TranscriptError::from(err).notice());
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("Video ID:  {video_id}");
    println!("Thumbnail: {}", video_id.thumbnail_url());
    Ok(ExitCode::SUCCESS)
}

async fn fetch_details(config: &Config, url: &str) -> Result<Option<TranscriptDetails>> {
    let pipeline = config.pipeline()?;
    match pipeline.extract_transcript_details(url).await {
        Ok(details) => Ok(Some(details)),
        Err(err) => {
            print_notice(&err.notice());
            Ok(None)
        }
    }
}

async fn run_cli_transcript(config: &Config, url: &str, json: bool) -> Result<ExitCode> {
    let Some(details) = fetch_details(config, url).await? else {
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        println!("{}", details.transcript);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_cli_summarize(config: &Config, url: &str, json: bool) -> Result<ExitCode> {
    let pipeline = config.pipeline()?;
    let details = match pipeline.extract_transcript_details(url).await {
        Ok(details) => details,
        Err(err) => {
            print_notice(&err.notice());
            return Ok(ExitCode::FAILURE);
        }
    };

    if !details.is_summarizable() {
        print_notice(&Notice {
            severity: Severity::Warning,
            message: "The transcript is empty; there is nothing to summarize.".to_string(),
        });
        return Ok(ExitCode::FAILURE);
    }

    eprintln!("Summarizing video using {}...", pipeline.model());
    // Generation failures are not handled here; they end the process with the error.
    let summary = pipeline.summarize(&details).await?;

    if json {
        let report = SummaryReport {
            video_id: &details.video_id,
            thumbnail_url: details.thumbnail_url(),
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Thumbnail: {}", details.thumbnail_url());
        println!();
        println!("## {NOTES_HEADING}");
        println!();
        println!("{summary}");
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_tui(config: &Config) -> Result<()> {
    let pipeline = config.pipeline()?;

    let mut terminal = tui_init()?;
    let mut app = App::new(pipeline);
    let event_handler = EventHandler::new();

    let outcome = event_loop(&mut terminal, &mut app, &event_handler);

    tui_restore()?;
    outcome
}

fn event_loop(terminal: &mut Tui, app: &mut App, event_handler: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let event = event_handler.next_event()?;
        app.handle_event(event)?;

        if app.should_quit {
            return Ok(());
        }
    }
}

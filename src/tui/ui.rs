use crate::core::{Notice, Severity, TranscriptDetails};
use crate::tui::app::{App, AppState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const TITLE: &str = "🎥 YouTube Transcript → ✍️ Detailed Notes Converter";

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Body
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new(TITLE)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    app.viewer_height = chunks[1].height;

    let help = match &app.state {
        AppState::Input => {
            draw_input(f, app, chunks[1]);
            "[Enter] Fetch transcript  [Ctrl+U] Clear  [Esc] Exit"
        }
        AppState::Fetching { url } => {
            app.progress_bar.render(f, chunks[1], &format!("URL: {url}"));
            "Fetching transcript..."
        }
        AppState::Ready { details } => {
            draw_ready(f, app, details, chunks[1]);
            "[Enter/g] Get Detailed Notes  [e] Edit link  [q] Exit"
        }
        AppState::Summarizing { details } => {
            app.progress_bar
                .render(f, chunks[1], &format!("Video ID: {}", details.video_id));
            "Summarizing..."
        }
        AppState::Summary { .. } => {
            if let Some(viewer) = &app.viewer {
                viewer.render(f, chunks[1]);
            }
            "[↑↓] Scroll  [PgUp/PgDn] Page  [b] Back  [n] New link  [q] Exit"
        }
    };

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Min(1),    // Notice
        ])
        .split(area);

    app.url_input.render(f, chunks[0]);

    if let Some(notice) = &app.notice {
        f.render_widget(notice_paragraph(notice), chunks[1]);
    }
}

fn draw_ready(f: &mut Frame, app: &App, details: &TranscriptDetails, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Length(6), // Video details
            Constraint::Length(3), // Trigger
            Constraint::Min(1),    // Failure
        ])
        .split(area);

    app.url_input.render(f, chunks[0]);

    let label = Style::default().fg(Color::Gray);
    let info = vec![
        Line::from(vec![
            Span::styled("Video ID:   ", label),
            Span::raw(details.video_id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Thumbnail:  ", label),
            Span::styled(details.thumbnail_url(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Transcript: ", label),
            Span::raw(format!("{} words", details.word_count())),
        ]),
        Line::from(vec![
            Span::styled("Model:      ", label),
            Span::raw(app.pipeline.model().to_string()),
        ]),
    ];
    let info = Paragraph::new(info).block(Block::default().borders(Borders::ALL).title("Video"));
    f.render_widget(info, chunks[1]);

    let (button, style) = if details.is_summarizable() {
        (
            "[ 📝 Get Detailed Notes ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "[ 📝 Get Detailed Notes ] (transcript is empty)",
            Style::default().fg(Color::DarkGray),
        )
    };
    let trigger = Paragraph::new(Line::from(Span::styled(button, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(trigger, chunks[2]);

    if let Some(failure) = &app.failure {
        let notice = Notice {
            severity: Severity::Error,
            message: failure.clone(),
        };
        f.render_widget(notice_paragraph(&notice), chunks[3]);
    }
}

fn notice_paragraph(notice: &Notice) -> Paragraph<'static> {
    let (icon, color, title) = match notice.severity {
        Severity::Error => ("❌", Color::Red, "Error"),
        Severity::Warning => ("⚠️", Color::Yellow, "Warning"),
    };

    Paragraph::new(format!("{icon} {}", notice.message))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title))
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub struct ProgressBar {
    pub progress: f64,
    pub message: String,
    pub logs: Vec<String>,
    pub max_logs: usize,
    ticks: usize,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            message: String::new(),
            logs: Vec::new(),
            max_logs: 10,
            ticks: 0,
        }
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn add_log(&mut self, log: impl AsRef<str>) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{timestamp}] {}", log.as_ref()));

        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.ticks % SPINNER_FRAMES.len()]
    }

    pub fn render(&self, f: &mut Frame, area: Rect, subject: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Subject
                Constraint::Length(3), // Gauge
                Constraint::Length(3), // Status
                Constraint::Min(1),    // Logs
            ])
            .split(area);

        let subject_paragraph =
            Paragraph::new(subject.to_string()).style(Style::default().fg(Color::White));
        f.render_widget(subject_paragraph, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Green))
            .percent((self.progress * 100.0) as u16);
        f.render_widget(gauge, chunks[1]);

        let status_paragraph = Paragraph::new(format!("{} {}", self.spinner(), self.message))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(status_paragraph, chunks[2]);

        let log_lines: Vec<Line> = self
            .logs
            .iter()
            .map(|log| Line::from(Span::raw(log)))
            .collect();

        let logs_paragraph =
            Paragraph::new(log_lines).block(Block::default().borders(Borders::ALL).title("Log"));
        f.render_widget(logs_paragraph, chunks[3]);
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.message.clear();
        self.logs.clear();
        self.ticks = 0;
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

use crate::core::NOTES_HEADING;
use crossterm::event::{KeyCode, KeyEvent};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Scrollable view of a generated summary rendered from Markdown.
pub struct SummaryViewer {
    pub lines: Vec<Line<'static>>,
    pub scroll: usize,
    pub title: String,
}

impl SummaryViewer {
    pub fn new(summary: &str, title: String) -> Self {
        let mut lines = vec![
            Line::styled(
                NOTES_HEADING,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        lines.extend(markdown_lines(summary));

        Self {
            lines,
            scroll: 0,
            title,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, area_height: usize) -> bool {
        let page_size = area_height.saturating_sub(2).max(1);
        let max_scroll = self.lines.len().saturating_sub(page_size);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(max_scroll);
                true
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(page_size);
                true
            }
            KeyCode::PageDown => {
                self.scroll = (self.scroll + page_size).min(max_scroll);
                true
            }
            KeyCode::Home => {
                self.scroll = 0;
                true
            }
            KeyCode::End => {
                self.scroll = max_scroll;
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let total_lines = self.lines.len();
        let visible_lines = area.height.saturating_sub(2) as usize;
        let scroll_info = if total_lines > visible_lines {
            format!(
                " (lines {}-{} of {})",
                self.scroll + 1,
                (self.scroll + visible_lines).min(total_lines),
                total_lines
            )
        } else {
            String::new()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{}{scroll_info}", self.title));

        let paragraph = Paragraph::new(self.lines.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));

        f.render_widget(paragraph, area);
    }
}

/// Turn Markdown into styled terminal lines.
pub fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let bullet = Style::default().fg(Color::Green);
    let code = Style::default().fg(Color::Cyan);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut styles = vec![Style::default()];
    // One entry per open list; `Some(n)` is the next number of an ordered list.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;

    fn flush(lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>) {
        if !current.is_empty() {
            lines.push(Line::from(std::mem::take(current)));
        }
    }

    fn top(styles: &[Style]) -> Style {
        styles.last().copied().unwrap_or_default()
    }

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                flush(&mut lines, &mut current);
                styles.push(heading);
            }
            Event::End(TagEnd::Heading(_)) => {
                styles.pop();
                flush(&mut lines, &mut current);
                lines.push(Line::default());
            }
            Event::End(TagEnd::Paragraph) => {
                flush(&mut lines, &mut current);
                if lists.is_empty() {
                    lines.push(Line::default());
                }
            }
            Event::Start(Tag::Strong) => {
                let style = top(&styles).add_modifier(Modifier::BOLD);
                styles.push(style);
            }
            Event::Start(Tag::Emphasis) => {
                let style = top(&styles).add_modifier(Modifier::ITALIC);
                styles.push(style);
            }
            Event::End(TagEnd::Strong | TagEnd::Emphasis) => {
                styles.pop();
            }
            Event::Start(Tag::List(start)) => {
                flush(&mut lines, &mut current);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    lines.push(Line::default());
                }
            }
            Event::Start(Tag::Item) => {
                flush(&mut lines, &mut current);
                let indent = "  ".repeat(lists.len().saturating_sub(1));
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                current.push(Span::styled(format!("{indent}{marker}"), bullet));
            }
            Event::End(TagEnd::Item) => flush(&mut lines, &mut current),
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut lines, &mut current);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(Line::default());
            }
            Event::Text(t) if in_code_block => {
                for line in t.lines() {
                    lines.push(Line::styled(format!("    {line}"), code));
                }
            }
            Event::Text(t) => current.push(Span::styled(t.into_string(), top(&styles))),
            Event::Code(t) => current.push(Span::styled(t.into_string(), code)),
            Event::SoftBreak => current.push(Span::raw(" ")),
            Event::HardBreak => flush(&mut lines, &mut current),
            Event::Rule => {
                flush(&mut lines, &mut current);
                lines.push(Line::styled("─".repeat(24), Style::default().fg(Color::DarkGray)));
                lines.push(Line::default());
            }
            _ => {}
        }
    }
    flush(&mut lines, &mut current);

    while lines.last().is_some_and(|line| line.spans.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn plain_lines(text: &str) -> Vec<String> {
        markdown_lines(text).iter().map(plain).collect()
    }

    #[test]
    fn headings_are_bold_without_hashes() {
        let lines = markdown_lines("## Key points\nBody text");
        assert_eq!(plain(&lines[0]), "Key points");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(plain(&lines[1]), "");
        assert_eq!(plain(&lines[2]), "Body text");
    }

    #[test]
    fn bullet_and_numbered_lists() {
        assert_eq!(
            plain_lines("* first\n* second\n\n1. one\n2. two"),
            ["• first", "• second", "", "1. one", "2. two"]
        );
    }

    #[test]
    fn nested_lists_are_indented() {
        assert_eq!(plain_lines("- outer\n  - inner"), ["• outer", "  • inner"]);
    }

    #[test]
    fn soft_breaks_join_with_space() {
        assert_eq!(plain_lines("one\ntwo"), ["one two"]);
    }

    #[test]
    fn emphasis_keeps_text() {
        let lines = markdown_lines("a **bold** and *soft* word");
        assert_eq!(plain(&lines[0]), "a bold and soft word");
        let bold = &lines[0].spans[1];
        assert_eq!(bold.content.as_ref(), "bold");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_and_block_code() {
        assert_eq!(
            plain_lines("use `cargo`\n\n```\nfn main() {}\n```"),
            ["use cargo", "", "    fn main() {}"]
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(plain_lines("The video explains borrowing."), ["The video explains borrowing."]);
    }

    #[test]
    fn viewer_starts_with_heading_and_clamps_scroll() {
        let mut viewer = SummaryViewer::new("line\n\nline\n\nline", "abc123".into());
        assert_eq!(plain(&viewer.lines[0]), NOTES_HEADING);

        let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
        viewer.handle_key(end, 4);
        assert_eq!(viewer.scroll, viewer.lines.len() - 2);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        viewer.handle_key(down, 4);
        assert_eq!(viewer.scroll, viewer.lines.len() - 2);

        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        viewer.handle_key(home, 4);
        assert_eq!(viewer.scroll, 0);
    }
}

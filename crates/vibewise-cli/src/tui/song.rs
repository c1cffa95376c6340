use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::App;

/// Render the playback screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Video panel
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_video(frame, app, chunks[1]);
    render_help(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("\u{1f3ac} Now Playing")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_video(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line<'_>> = match &app.video_link {
        Some(link) => {
            let mut lines = Vec::new();
            // Show which track the link belongs to when it is still in the
            // current result set.
            if let Some(record) = app
                .results
                .iter()
                .find(|record| record.link.as_deref() == Some(link))
            {
                lines.push(Line::from(Span::styled(
                    format!("  {} \u{2014} {}", record.song, record.artist),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                if let Some(cover) = &record.cover {
                    lines.push(Line::from(format!("  cover: {cover}")));
                }
                lines.push(Line::from(" "));
            }
            lines.push(Line::from(vec![
                Span::raw("  watch: "),
                Span::styled(link.clone(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(" "));
            lines.push(Line::from(Span::styled(
                "  Open the link in your player of choice.",
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
        None => vec![Line::from(Span::styled(
            "  No video selected.",
            Style::default().fg(Color::Yellow),
        ))],
    };

    let video = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Video"));
    frame.render_widget(video, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("  b/Esc Back to Set Vibe  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

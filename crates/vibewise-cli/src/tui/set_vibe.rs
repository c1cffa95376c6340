use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::App;

/// Render the search screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Query input
            Constraint::Length(3), // Suggestions
            Constraint::Min(5),    // Result grid
            Constraint::Length(3), // Warning / help bar
        ])
        .split(area);

    render_title(frame, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_suggestions(frame, app, chunks[2]);
    render_results(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("\u{1f3b6} VibeWise | Discover Your Next Favorite Song")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.input.is_empty() {
        Line::from(Span::styled(
            "Song or Artist Name...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("{}_", app.input))
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Set Your Vibe"),
    );
    frame.render_widget(input, area);
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.suggestions.is_empty() {
        Line::from(Span::styled(" ", Style::default()))
    } else {
        let mut spans = vec![Span::styled(
            "Did you mean: ",
            Style::default().fg(Color::DarkGray),
        )];
        for (i, suggestion) in app.suggestions.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if app.suggestion_idx == Some(i) {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            spans.push(Span::styled(suggestion.clone(), style));
        }
        Line::from(spans)
    };

    let suggestions = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(suggestions, area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Song").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Artist"),
        Cell::from("Cover"),
        Cell::from("Video"),
    ])
    .height(1);

    let rows: Vec<Row> = app
        .results
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(record.song.clone()),
                Cell::from(record.artist.clone()),
                // Missing assets render as a placeholder dash.
                Cell::from(if record.cover.is_some() { "art" } else { "-" }),
                Cell::from(if record.link.is_some() { "yes" } else { "-" }),
            ])
            .style(style)
        })
        .collect();

    let title = if let Some(status) = &app.status {
        status.clone()
    } else if app.results.is_empty() {
        "Results".to_string()
    } else {
        format!("Results [{}]", app.results.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = match &app.warning {
        Some(warning) => Paragraph::new(warning.clone())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL)),
        None => Paragraph::new(
            "  Tab Suggest  Enter Recommend  \u{2191}/\u{2193} Select  ^w Watch  ^s Song  Esc Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL)),
    };
    frame.render_widget(footer, area);
}

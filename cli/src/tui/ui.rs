//! Dashboard rendering.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::app::{App, Mode};

pub fn draw(f: &mut Frame, app: &App) {
    let footer_height = if app.show_help { 5 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Body
            Constraint::Length(footer_height), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    draw_table(f, app, body[0]);
    draw_detail(f, app, body[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.mode == Mode::Search {
        format!("Portscope | Search: {}_", app.search)
    } else if !app.search.is_empty() {
        format!(
            "Portscope | {} listeners [filter: {}]",
            app.filtered.len(),
            app.search
        )
    } else {
        format!("Portscope | {} listeners", app.filtered.len())
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(header, area);
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["PORT", "PID", "COMMAND", "PROTO", "USER", "STATE"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = app.filtered.iter().map(|r| {
        let cells = vec![
            Cell::from(r.port.to_string()).style(Style::default().fg(Color::Green).bold()),
            Cell::from(r.pid.to_string()),
            Cell::from(truncate(&r.command, 20)),
            Cell::from(r.protocol.as_str()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(truncate(&r.user, 12)),
            Cell::from(r.state.clone()).style(Style::default().fg(Color::DarkGray)),
        ];
        Row::new(cells)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(20),
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Listening Ports "),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !app.filtered.is_empty() {
        state.select(Some(app.selected));
    }

    f.render_stateful_widget(table, area, &mut state);
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_record() {
        Some(r) => vec![
            detail_line("Command", &r.command, Color::White),
            detail_line("PID", &r.pid.to_string(), Color::Yellow),
            detail_line("Port", &r.port.to_string(), Color::Green),
            detail_line("Protocol", r.protocol.as_str(), Color::Gray),
            detail_line("User", &r.user, Color::White),
            detail_line("State", &r.state, Color::Gray),
        ],
        None => vec![Line::from(Span::styled(
            "No process selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let detail = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Details "),
    );

    f.render_widget(detail, area);
}

fn detail_line(label: &str, value: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            Style::default().fg(Color::Magenta).bold(),
        ),
        Span::styled(value.to_string(), Style::default().fg(color)),
    ])
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.mode {
        Mode::Search => "Type to search | Enter: done | Esc: cancel",
        Mode::ConfirmKill { .. } => "y: confirm | any other key: cancel",
        Mode::Normal => {
            "j/k: navigate | x: kill | X: force kill | /: search | r: refresh | ?: help | q: quit"
        }
    };

    // The confirm prompt wins, then the error banner, then transient status.
    let (message, style) = if let (Mode::ConfirmKill { .. }, Some(status)) = (app.mode, &app.status)
    {
        (Some(status.clone()), Style::default().fg(Color::Red).bold())
    } else if let Some(error) = &app.error {
        (
            Some(format!("Error: {error}")),
            Style::default().fg(Color::Red).bold(),
        )
    } else {
        (
            app.status.clone(),
            Style::default().fg(Color::Green),
        )
    };

    let mut spans = Vec::new();
    if let Some(message) = message {
        spans.push(Span::styled(message, style));
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::styled(help, Style::default().fg(Color::DarkGray)));

    let mut lines = vec![Line::from(spans)];

    if app.show_help {
        lines.push(Line::from(Span::styled(
            "esc: clear filter | enter: leave search | ctrl-c: quit",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "Kills send SIGTERM; force kills send SIGKILL. The table refreshes after each kill.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let footer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(footer, area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}

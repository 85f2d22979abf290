//! Frame layout and panel rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::types::Role;
use crate::render::text::details_lines;
use crate::session::state::{RegionView, Session};
use crate::ui::state::{Focus, LogCategory, PageUI};

pub const LOG_PANEL_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, ui: &PageUI, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Inputs
            Constraint::Min(8),    // Details and moves
            Constraint::Length(4), // Results
            Constraint::Length(LOG_PANEL_HEIGHT),
            Constraint::Length(1), // Footer
        ])
        .split(frame.size());

    render_inputs(frame, chunks[0], ui);
    render_body(frame, chunks[1], ui, session);
    render_results(frame, chunks[2], session);
    render_log(frame, chunks[3], ui);
    render_footer(frame, chunks[4]);

    if let Some(message) = &session.alert {
        render_alert(frame, message);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_inputs(frame: &mut Frame, area: Rect, ui: &PageUI) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (role, chunk) in Role::ALL.into_iter().zip(chunks.iter()) {
        let focused = ui.focus.role() == Some(role);
        let mut text = ui.input(role).to_string();
        if focused {
            text.push('_');
        }
        let title = match role {
            Role::Attacker => "Attacker",
            Role::Defender => "Defender",
        };
        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(title),
        );
        frame.render_widget(input, *chunk);
    }
}

fn render_body(frame: &mut Frame, area: Rect, ui: &PageUI, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_details(frame, chunks[0], session.view(Role::Attacker), "Attacker Details");
    render_details(frame, chunks[1], session.view(Role::Defender), "Defender Details");
    render_moves(frame, chunks[2], ui, session);
}

fn render_details(frame: &mut Frame, area: Rect, view: &RegionView, title: &str) {
    let lines: Vec<Line> = match view {
        RegionView::Empty => vec![Line::from(Span::styled(
            "Type a name to look it up",
            Style::default().fg(Color::DarkGray),
        ))],
        RegionView::Details(summary) => details_lines(summary)
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    Line::from(Span::styled(
                        line,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(line)
                }
            })
            .collect(),
        RegionView::Error(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

fn render_moves(frame: &mut Frame, area: Rect, ui: &PageUI, session: &Session) {
    let options = session.move_options();
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let selected = i > 0 && session.selected_move.as_deref() == Some(name.as_str());
            let style = if i == 0 {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::LightGreen)
            } else {
                Style::default()
            };
            ListItem::new(name.clone()).style(style)
        })
        .collect();

    let focused = ui.focus == Focus::Moves;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(format!("Moves ({})", session.moves.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(ui.move_cursor.min(options.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_results(frame: &mut Frame, area: Rect, session: &Session) {
    let lines: Vec<Line> = [&session.damage_line, &session.roll_line]
        .into_iter()
        .flatten()
        .map(|line| Line::from(line.clone()))
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Result"));
    frame.render_widget(paragraph, area);
}

fn render_log(frame: &mut Frame, area: Rect, ui: &PageUI) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = ui
        .activity_log
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let color = match entry.category {
                LogCategory::Input => Color::White,
                LogCategory::Calculation => Color::LightGreen,
                LogCategory::System => Color::DarkGray,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4} ", entry.seq), Style::default().fg(Color::DarkGray)),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Activity"));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("Tab: switch field | Up/Down: move list | Enter: select | Esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 20, frame.size());
    let popup = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Alert"),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Area of the given percentage size centered in `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

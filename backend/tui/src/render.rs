//! TUI Rendering
//!
//! Translates `AppState` and the view-model snapshots into Ratatui widgets
//! and draws them to the terminal frame.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use ontodash_core::{cell_text, row_keys, Collection};
use ontodash_routing::View;
use ontodash_views::{ApiStatus, CollectionTable, DashboardState, Phase, QueryState};

use crate::app::AppState;

const DASHBOARD_HELP: &str = "Tab: query  ←/→: collection  r: reload  Esc: quit";
const QUERY_HELP: &str = "Tab: dashboard  Enter: ask  ↑/↓: suggestions  Ctrl-L: clear  Esc: quit";

/// Everything a frame needs, borrowed from the runner's snapshots.
pub struct Screen<'a> {
    pub dashboard: &'a DashboardState,
    pub query: &'a QueryState,
    pub suggestions: &'a [&'a str],
}

/// Main draw function.
pub fn draw_ui(f: &mut Frame, state: &AppState, screen: &Screen<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // View tabs
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Help
        ])
        .split(f.size());

    let titles = [View::Dashboard, View::Query].map(|v| v.title());
    let selected = if state.view == View::Dashboard { 0 } else { 1 };
    let tabs = Tabs::new(titles.to_vec())
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("ontodash · API {}", screen.dashboard.api_status.label())),
        );
    f.render_widget(tabs, chunks[0]);

    match state.view {
        View::Dashboard => draw_dashboard(f, chunks[1], state, screen.dashboard),
        View::Query => draw_query(f, chunks[1], state, screen),
    }

    let help = match state.view {
        View::Dashboard => DASHBOARD_HELP,
        View::Query => QUERY_HELP,
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_dashboard(f: &mut Frame, area: Rect, state: &AppState, dashboard: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats
            Constraint::Length(3), // Collection tabs
            Constraint::Min(3),    // Table
        ])
        .split(area);

    let status_color = match dashboard.api_status {
        ApiStatus::Connected => Color::Green,
        ApiStatus::Disconnected => Color::Red,
        ApiStatus::Checking => Color::Yellow,
    };
    let mut summary = vec![
        Span::raw(format!(
            "Classes: {}   Properties: {}   Individuals: {}   ",
            dashboard.stats.classes, dashboard.stats.properties, dashboard.stats.individuals
        )),
        Span::styled(
            dashboard.api_status.label(),
            Style::default().fg(status_color),
        ),
    ];
    if dashboard.loading || dashboard.phase == Phase::Loading {
        summary.push(Span::raw("   loading..."));
    }
    f.render_widget(
        Paragraph::new(Line::from(summary))
            .block(Block::default().title("Ontology").borders(Borders::ALL)),
        chunks[0],
    );

    let titles: Vec<String> = Collection::ALL
        .iter()
        .skip(1)
        .map(|c| format!("{} ({})", c.label(), dashboard.len_of(*c)))
        .collect();
    let current = state.current_collection();
    let mut tabs = Tabs::new(titles)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    // Stats has no tab of its own; it is the summary above.
    if current != Collection::Stats {
        tabs = tabs.select(state.collection.saturating_sub(1));
    }
    f.render_widget(tabs, chunks[1]);

    let mut title = current.label().to_string();
    if let Some(err) = dashboard.last_errors.get(&current) {
        title = format!("{title} · last fetch failed: {err}");
    }
    draw_table(f, chunks[2], &title, &dashboard.table(current));
}

fn draw_query(f: &mut Frame, area: Rect, state: &AppState, screen: &Screen<'_>) {
    let query = screen.query;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                   // Input
            Constraint::Length(screen.suggestions.len() as u16 + 2), // Suggestions
            Constraint::Length(5),                                   // Messages
            Constraint::Min(3),                                      // Results
        ])
        .split(area);

    let input_title = if query.loading {
        "Question (asking...)"
    } else {
        "Question (Enter to ask)"
    };
    f.render_widget(
        Paragraph::new(query.question.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title(input_title).borders(Borders::ALL)),
        chunks[0],
    );

    let items: Vec<ListItem> = screen
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if state.suggestion == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(*s).style(style)
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().title("Suggestions").borders(Borders::ALL)),
        chunks[1],
    );

    let mut lines = Vec::new();
    if !query.error.is_empty() {
        for part in query.error.lines() {
            lines.push(Line::styled(part.to_string(), Style::default().fg(Color::Red)));
        }
    }
    if !query.success_message.is_empty() {
        let text = if query.crud_action.is_empty() {
            query.success_message.clone()
        } else {
            format!("[{}] {}", query.crud_action, query.success_message)
        };
        lines.push(Line::styled(text, Style::default().fg(Color::Green)));
    }
    if !query.sparql.is_empty() {
        lines.push(Line::styled(
            query.sparql.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Messages").borders(Borders::ALL)),
        chunks[2],
    );

    let keys = row_keys(&query.results);
    let rows: Vec<Vec<String>> = query
        .results
        .iter()
        .map(|row| keys.iter().map(|k| cell_text(row.get(k))).collect())
        .collect();
    let title = format!("Results ({})", query.results.len());
    draw_keyed_table(f, chunks[3], &title, &keys, &rows);
}

fn draw_table(f: &mut Frame, area: Rect, title: &str, table: &CollectionTable) {
    let headers: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();
    draw_keyed_table(f, area, title, &headers, &table.rows);
}

fn draw_keyed_table(f: &mut Frame, area: Rect, title: &str, headers: &[String], rows: &[Vec<String>]) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if headers.is_empty() || rows.is_empty() {
        f.render_widget(
            Paragraph::new("No data").style(Style::default().fg(Color::DarkGray)).block(block),
            area,
        );
        return;
    }

    let widths = vec![Constraint::Ratio(1, headers.len() as u32); headers.len()];
    let header = Row::new(headers.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));
    let body = rows.iter().map(|r| Row::new(r.clone()));
    f.render_widget(Table::new(body, widths).header(header).block(block), area);
}

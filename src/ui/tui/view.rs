// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::app::TableApp;
use crate::report::{ReportTable, ERROR_COLUMN};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Column width cap in the interactive table
const MAX_COLUMN_WIDTH: usize = 40;

pub fn render(f: &mut Frame, app: &mut TableApp, table: &ReportTable, title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    app.set_viewport_height(chunks[0].height);
    render_table(f, chunks[0], app, table, title);
    render_footer(f, chunks[1], app);
}

fn render_table(f: &mut Frame, area: Rect, app: &TableApp, table: &ReportTable, title: &str) {
    let error_idx = table.columns.iter().position(|c| c == ERROR_COLUMN);

    let header = Row::new(table.columns.iter().map(|c| Cell::from(c.as_str()))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = table.rows.iter().map(|row| {
        let failed = error_idx
            .and_then(|i| row.get(i))
            .is_some_and(|cell| !cell.is_empty());
        let style = if failed {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        Row::new(row.iter().map(|cell| Cell::from(cell.lines().next().unwrap_or("")))).style(style)
    });

    let widths = column_widths(table);
    let widget = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(widget, area, &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, app: &TableApp) {
    let text = if app.show_help {
        " j/k ↑/↓ move  PgUp/PgDn page  g/G first/last  q quit "
    } else {
        " ? help  q quit "
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.position()), Style::default().fg(Color::Yellow)),
        Span::styled(text, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Content-sized widths, capped so one long cell cannot hide the rest.
fn column_widths(table: &ReportTable) -> Vec<Constraint> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let widest = table
                .rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.lines().next().unwrap_or("").width())
                .max()
                .unwrap_or(0)
                .max(column.width())
                .min(MAX_COLUMN_WIDTH);
            Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
        })
        .collect()
}

pub fn render_size_error(f: &mut Frame, min_width: u16, min_height: u16) {
    let message = vec![
        Line::from(Span::styled(
            "Terminal too small!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Minimum size: {min_width}x{min_height}")),
        Line::from(format!(
            "Current size: {}x{}",
            f.area().width,
            f.area().height
        )),
        Line::from("Resize, or press 'q' to quit"),
    ];

    let paragraph = Paragraph::new(message)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center);

    f.render_widget(paragraph, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn table() -> ReportTable {
        ReportTable {
            columns: vec!["Host".into(), "Model".into(), "Error".into()],
            rows: vec![
                vec!["ws-01".into(), "OptiPlex".into(), "".into()],
                vec!["ws-02".into(), "".into(), "timeout: timed out after 30s".into()],
            ],
        }
    }

    #[test]
    fn test_column_widths_capped() {
        let mut t = table();
        t.rows[0][1] = "x".repeat(100);
        let widths = column_widths(&t);
        assert_eq!(widths[0], Constraint::Length(5));
        assert_eq!(widths[1], Constraint::Length(40));
    }

    #[test]
    fn test_render_to_test_backend() {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        let mut app = TableApp::new(2);
        let t = table();
        terminal.draw(|f| render(f, &mut app, &t, "Results")).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("ws-01"));
        assert!(content.contains("Results"));
        assert!(content.contains("1/2"));
        assert_eq!(app.page_size, 8);
    }
}

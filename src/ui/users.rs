use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, InputMode, ListView};
use crate::model::Field;

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title("Registered Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    match app.list_view() {
        ListView::Empty => {
            let lines = vec![
                Line::raw(""),
                Line::from(Span::styled("No users found.", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))),
                Line::raw(""),
                Line::raw(format!(
                    "Press {} to add a user.",
                    app.keymap.keys_for(crate::app::keymap::KeyAction::NewUser).join(" or ")
                )),
            ];
            f.render_widget(Paragraph::new(lines).style(Style::default().fg(app.theme.text)).block(block), area);
            return;
        }
        ListView::NoMatches => {
            let p = Paragraph::new("No users match your search criteria.")
                .style(Style::default().fg(app.theme.muted))
                .block(block);
            f.render_widget(p, area);
            return;
        }
        ListView::Rows => {}
    }

    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    let start = (app.selected_user_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.visible.len());

    let rows: Vec<Row> = app
        .visible_users()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(i, u)| {
            let style = if i == app.selected_user_index {
                Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text)
            };
            Row::new(vec![
                Cell::from(u.fields.name.clone()),
                Cell::from(u.fields.cnic.clone()),
                Cell::from(u.fields.phone.clone()),
                Cell::from(u.fields.university.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Percentage(30), Constraint::Length(17), Constraint::Length(14), Constraint::Percentage(40)];
    let header = Row::new(vec!["NAME", "CNIC", "PHONE", "UNIVERSITY"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

/// One-line search prompt above the table.
pub fn render_search_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.input_mode == InputMode::Search;
    let text = if app.search_query.is_empty() && !active {
        Span::styled("Search by name, CNIC, university... (/)", Style::default().fg(app.theme.muted))
    } else {
        let cursor = if active { "_" } else { "" };
        Span::styled(format!("{}{cursor}", app.search_query), Style::default().fg(app.theme.text))
    };
    let border = if active { app.theme.accent } else { app.theme.border };
    let p = Paragraph::new(Line::from(text))
        .block(Block::default().title("Search").borders(Borders::ALL).border_style(Style::default().fg(border)));
    f.render_widget(p, area);
}

/// Summary of the selected row, shown beside the table.
pub fn render_selection_preview(f: &mut Frame, area: Rect, app: &AppState) {
    let body = match app.selected_user() {
        Some(u) => Field::ALL
            .iter()
            .map(|field| format!("{}: {}", field.detail_label(), u.fields.get(*field)))
            .collect::<Vec<_>>()
            .join("\n"),
        None => String::new(),
    };
    let p = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.text))
        .block(Block::default().title("Preview").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(p, area);
}

pub fn render_user_detail(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(user) = app.detail.as_ref() else {
        return;
    };
    let label_style = Style::default().fg(app.theme.muted);
    let mut lines = vec![
        Line::from(Span::styled(
            user.name().to_string(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("ID: {}", user.id), label_style)),
        Line::raw(""),
    ];
    for field in Field::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>18}: ", field.detail_label()), label_style),
            Span::styled(user.fields.get(field).to_string(), Style::default().fg(app.theme.text)),
        ]));
    }
    lines.push(Line::raw(""));
    let km = &app.keymap;
    lines.push(Line::from(Span::styled(
        format!(
            "{} edit   {} delete   {} back to users",
            km.keys_for(crate::app::keymap::KeyAction::EditSelection).join("/"),
            km.keys_for(crate::app::keymap::KeyAction::DeleteSelection).join("/"),
            km.keys_for(crate::app::keymap::KeyAction::Back).join("/"),
        ),
        label_style,
    )));
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("User Details").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(p, area);
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::app::form::{SUBMIT_ROW, UserForm};
use crate::model::Field;

pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, form: &UserForm) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::with_capacity(Field::ALL.len() * 2 + 3);
    for (idx, field) in Field::ALL.iter().enumerate() {
        let active = idx == form.selected;
        let marker = if active { "▶ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", field.label()),
            Style::default().fg(if active { theme.title } else { theme.muted }),
        )));
        let value = form.fields.get(*field);
        let value_span = if value.is_empty() && !active {
            Span::styled(format!("    {}", field.placeholder()), Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC))
        } else {
            let cursor = if active { "_" } else { "" };
            Span::styled(format!("    {value}{cursor}"), Style::default().fg(theme.text))
        };
        lines.push(Line::from(value_span));
    }
    lines.push(Line::raw(""));
    let on_button = form.selected == SUBMIT_ROW;
    let button_style = if on_button {
        Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent)
    };
    lines.push(Line::from(Span::styled(format!("  [ {} ]", form.submit_label()), button_style)));

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(p, area);
}

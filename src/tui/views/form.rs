use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::credentials::models::Field;
use crate::tui::app::App;
use crate::tui::theme::Theme;

const FIELDS: [Field; 4] = [Field::Website, Field::Email, Field::Username, Field::Password];

fn field_line<'a>(label: &'a str, value: String, focused: bool, theme: &'a Theme) -> Paragraph<'a> {
    let marker = if focused { "▶" } else { " " };
    let text = format!("{marker} {label:<9} {value}");
    let style = if focused {
        theme.selection_style()
    } else {
        theme.normal_style()
    };
    Paragraph::new(text).style(style)
}

pub fn render_form(f: &mut Frame, app: &App, store_label: &str) {
    let theme = Theme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // store
            Constraint::Min(6),    // form
            Constraint::Length(1), // footer/toast
        ])
        .split(f.area());

    f.render_widget(
        Paragraph::new("Password Manager").style(theme.title_style()),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(store_label.to_string()).style(theme.muted_style()),
        chunks[1],
    );

    let block = Block::default().borders(Borders::ALL).title("Entry");
    let inner_area = block.inner(chunks[2]);
    f.render_widget(block, chunks[2]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner_area);

    for (i, field) in FIELDS.iter().enumerate() {
        let value = match field {
            Field::Password => app.password_display(),
            other => app.form.field(*other).to_string(),
        };
        let para = field_line(field.label(), value, app.focus == *field, &theme);
        f.render_widget(para, rows[i]);
    }

    let footer = app.toast_message().unwrap_or(
        "Tab=next  ^G=generate  ^F=search  ^R=reveal  Enter=save  Esc=quit",
    );
    f.render_widget(Paragraph::new(footer).style(theme.toast_style()), chunks[3]);
}

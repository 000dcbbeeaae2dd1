use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::credentials::notice::Notice;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn render_confirm(f: &mut Frame, app: &App) {
    let theme = Theme::default();
    let Some(record) = app.pending() else {
        return;
    };
    let notice = Notice::ConfirmSave(record.clone());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let body = Paragraph::new(notice.message())
        .block(Block::default().borders(Borders::ALL).title(notice.title()))
        .wrap(Wrap { trim: false })
        .style(theme.normal_style());
    f.render_widget(body, chunks[0]);
    f.render_widget(
        Paragraph::new("y=save  n/Esc=cancel").style(theme.toast_style()),
        chunks[1],
    );
}

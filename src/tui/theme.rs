use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug)]
pub struct Theme {
    pub text: Color,
    pub heading: Color,
    pub warning: Color,
    pub hint: Color,
    pub focus: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            heading: Color::Red,
            warning: Color::Yellow,
            hint: Color::DarkGray,
            focus: Color::LightRed,
        }
    }
}

impl Theme {
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.heading).add_modifier(Modifier::BOLD)
    }
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.text)
    }
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.hint)
    }
    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
    }
    pub fn toast_style(&self) -> Style {
        Style::default().fg(self.warning)
    }
}

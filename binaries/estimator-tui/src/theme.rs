//! Colors and styles

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub border_active: Color,
    pub text_muted: Color,
    pub chart_line: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(22, 24, 30),
            fg: Color::Rgb(220, 222, 228),
            primary: Color::Rgb(97, 175, 239),
            accent: Color::Rgb(229, 192, 123),
            success: Color::Rgb(152, 195, 121),
            warning: Color::Rgb(229, 192, 123),
            error: Color::Rgb(224, 108, 117),
            border: Color::Rgb(76, 82, 99),
            border_active: Color::Rgb(97, 175, 239),
            text_muted: Color::Rgb(127, 132, 142),
            chart_line: Color::Rgb(86, 182, 194),
        }
    }
}

impl ThemePalette {
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border_style(&self, active: bool) -> Style {
        Style::default().fg(if active { self.border_active } else { self.border })
    }

    pub fn focused_style(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn shortcut_key(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

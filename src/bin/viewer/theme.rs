//! Theme for the player UI
//!
//! Two layers. [PresentationStyles] holds the concrete styles grouped by role;
//! [Theme] exposes methods named after the UI element they style, so that code
//! colours and panel chrome can be tweaked without touching the renderer.

use ratatui::style::{Color, Modifier, Style};
use strata::TokenKind;

/// Concrete style values
#[derive(Debug, Clone)]
pub struct PresentationStyles {
    pub keyword: Style,
    pub string: Style,
    pub comment: Style,
    pub function: Style,
    pub number: Style,
    pub operator: Style,
    pub variable: Style,
    pub markup: Style,
    pub attribute: Style,
    pub normal: Style,
    pub label: Style,
    pub error: Style,
    pub title: Style,
    pub panel_bg: Style,
}

#[derive(Debug, Clone)]
pub struct Theme {
    presentation: PresentationStyles,
}

impl Theme {
    /// Style for a token of the given kind in the code pane
    pub fn token(&self, kind: TokenKind) -> Style {
        let p = &self.presentation;
        match kind {
            TokenKind::Keyword => p.keyword,
            TokenKind::String => p.string,
            TokenKind::Comment => p.comment,
            TokenKind::Function => p.function,
            TokenKind::Number => p.number,
            TokenKind::Operator => p.operator,
            TokenKind::Variable => p.variable,
            TokenKind::Tag => p.markup,
            TokenKind::Attribute => p.attribute,
            TokenKind::Text => p.normal,
        }
    }

    /// The token currently being typed
    pub fn token_in_progress(&self, kind: TokenKind) -> Style {
        self.token(kind).add_modifier(Modifier::UNDERLINED)
    }

    pub fn typing_cursor(&self) -> Style {
        self.presentation.normal.add_modifier(Modifier::SLOW_BLINK)
    }

    pub fn title_bar(&self) -> Style {
        self.presentation.title
    }

    pub fn info_panel(&self) -> Style {
        self.presentation.panel_bg
    }

    pub fn info_panel_label(&self) -> Style {
        self.presentation.label
    }

    pub fn status_error(&self) -> Style {
        self.presentation.error
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            presentation: PresentationStyles {
                keyword: Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
                string: Style::default().fg(Color::Green),
                comment: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                function: Style::default().fg(Color::Blue),
                number: Style::default().fg(Color::Yellow),
                operator: Style::default().fg(Color::Cyan),
                variable: Style::default().fg(Color::LightRed),
                markup: Style::default().fg(Color::Gray),
                attribute: Style::default().fg(Color::LightYellow),
                normal: Style::default().fg(Color::White),
                label: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                title: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                panel_bg: Style::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_tokens_use_normal_style() {
        let theme = Theme::default();
        assert_eq!(theme.token(TokenKind::Text), Style::default().fg(Color::White));
    }

    #[test]
    fn test_in_progress_is_underlined() {
        let theme = Theme::default();
        let style = theme.token_in_progress(TokenKind::String);
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(style.fg, Some(Color::Green));
    }
}

//! UI rendering logic
//!
//! Handles layout and rendering of the player using Ratatui.
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Code pane (responsive height, scrolled to keep the typing position visible)
//! - Info panel (7 lines, fixed)

use super::app::App;
use super::theme::Theme;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use strata::reveal::RevealedToken;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 40;
/// Height of the info panel
const INFO_PANEL_HEIGHT: u16 = 7;
/// Drawn after the last visible character
const TYPING_CURSOR: &str = "▌";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        render_error_too_narrow(frame, size, &theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                 // Title bar
            Constraint::Min(3),                    // Code pane
            Constraint::Length(INFO_PANEL_HEIGHT), // Info panel
        ])
        .split(size);

    render_title_bar(frame, chunks[0], app, &theme);
    render_code_pane(frame, chunks[1], app, &theme);
    render_info_panel(frame, chunks[2], app, &theme);
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect, theme: &Theme) {
    let msg = format!(
        "Terminal too narrow: {} < {} chars",
        area.width, MIN_TERMINAL_WIDTH
    );
    frame.render_widget(Paragraph::new(msg).style(theme.status_error()), area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = if app.player.is_playing() {
        "playing"
    } else if app.player.is_finished() {
        "finished"
    } else {
        "paused"
    };
    let title = format!("strata:: {} [{}]", app.player.current_layer().id, state);
    frame.render_widget(Paragraph::new(title).style(theme.title_bar()), area);
}

fn render_code_pane(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Code ({})", app.player.language()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = code_lines(app.tokens(), theme);
    let scroll = lines.len().saturating_sub(inner.height as usize);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// Split revealed tokens into styled lines, ending with the typing cursor
pub fn code_lines(tokens: &[RevealedToken], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for token in tokens.iter().filter(|t| !t.is_hidden()) {
        let style = if token.in_progress {
            theme.token_in_progress(token.kind)
        } else {
            theme.token(token.kind)
        };
        let mut pieces = token.value.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
            if pieces.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }

    current.push(Span::styled(TYPING_CURSOR, theme.typing_cursor()));
    lines.push(Line::from(current));
    lines
}

fn render_info_panel(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let player = &app.player;
    let layer = player.current_layer();
    let label = theme.info_panel_label();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Layer: ", label),
            Span::raw(format!(
                "{}/{} {}",
                player.current_index() + 1,
                player.layers().len(),
                layer.id
            )),
            Span::styled("  Speed: ", label),
            Span::raw(format!("{}ms/char", player.speed_ms())),
        ]),
        Line::from(vec![
            Span::styled("Progress: ", label),
            Span::raw(format!(
                "{}% of layer, {}/{} chars",
                (player.layer_progress() * 100.0).round() as u32,
                player.typed_chars(),
                player.total_chars()
            )),
        ]),
        Line::from(layer.description.clone().unwrap_or_default()),
    ];

    match &app.status {
        Some(status) => lines.push(Line::from(Span::styled(status.clone(), theme.status_error()))),
        None => lines.push(Line::from(
            "space play/pause  r reset  n/p next/prev  1-9 jump  +/- speed  q quit",
        )),
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Info"))
        .style(theme.info_panel());
    frame.render_widget(paragraph, area);
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::style::ThemeColors;

/// Centers an overlay of at most `width` x `height` inside `area`.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clears the background and draws the bordered, titled container.
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, colors: &ThemeColors) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.selection))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(colors.selection)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Renders a standard overlay container and returns its layout. The last
/// inner row holds the key hints.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    config: &OverlayConfig<'_>,
    colors: &ThemeColors,
) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    render_overlay_container(frame, popup, config.title, colors);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, colors);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );

    OverlayLayout { popup, body }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Keeps the end of `text` so the cursor side stays visible.
pub fn truncate_start(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let skip = count - (max_chars - 1);
    std::iter::once('…').chain(text.chars().skip(skip)).collect()
}

/// Renders a filter line: "> <text>█".
pub fn render_input_line(frame: &mut Frame, area: Rect, value: &str, colors: &ThemeColors) {
    let prompt = "> ";
    let max_text_width = area.width.saturating_sub(prompt.len() as u16 + 1) as usize;

    let spans = vec![
        Span::styled(prompt, Style::default().fg(colors.muted)),
        Span::styled(
            truncate_start(value, max_text_width),
            Style::default().fg(colors.selection),
        ),
        Span::styled("█", Style::default().fg(colors.selection)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], colors: &ThemeColors) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(colors.muted)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(colors.selection)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(colors.muted),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16, colors: &ThemeColors) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(colors.muted),
        ))),
        separator_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(calculate_overlay_area(area, 60, 20), Rect::new(20, 10, 60, 20));

        let small = Rect::new(0, 0, 30, 10);
        let popup = calculate_overlay_area(small, 60, 20);
        assert_eq!((popup.width, popup.height), (26, 8));
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        assert_eq!(truncate_start("neural", 10), "neural");
        assert_eq!(truncate_start("neural_train", 6), "…train");
        assert_eq!(truncate_start("abc", 0), "");
    }
}

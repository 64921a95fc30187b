//! Pure render functions. Read `&AppState`, draw to the frame, nothing else.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use switchboard_core::ShortcutAction;
use switchboard_types::ToolCategory;

use crate::state::AppState;
use crate::style::ThemeColors;

const SIDEBAR_WIDTH: u16 = 30;
const LOG_HEIGHT: u16 = 10;

pub fn render(app: &AppState, frame: &mut Frame) {
    let colors = ThemeColors::for_theme(app.theme);
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[0]);

    render_sidebar(app, frame, columns[0], &colors);
    render_current_view(app, frame, columns[1], &colors);
    render_log(app, frame, rows[1], &colors);
    render_status_line(app, frame, rows[2], &colors);

    if let Some(palette) = &app.palette {
        palette.render(frame, area, &colors);
    }
}

fn block<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(colors.accent).add_modifier(Modifier::BOLD))
}

fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let items: Vec<ListItem> = app
        .views
        .iter()
        .map(|view| {
            let is_current = app.current_view.as_deref() == Some(view.id.as_str());
            let key = app
                .shortcut_for(&ShortcutAction::Navigate(view.id.clone()))
                .unwrap_or("");
            let style = if is_current {
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };
            let mut spans = vec![
                Span::styled(format!("{key:>3} "), Style::default().fg(colors.muted)),
                Span::styled(view.name.clone(), style),
            ];
            if let Some(count) = view.tool_count {
                spans.push(Span::styled(
                    format!(" ({count})"),
                    Style::default().fg(colors.muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block("Views", colors)), area);
}

fn render_current_view(app: &AppState, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let Some(view) = app.current_descriptor() else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No view open. Press 1-9 to pick one, Ctrl+K for the command palette.",
                Style::default().fg(colors.muted),
            )),
        ])
        .block(block("switchboard", colors));
        frame.render_widget(hint, area);
        return;
    };

    let title = format!("{} {}", view.icon, view.name);
    let mut lines = vec![
        Line::from(Span::styled(
            view.description.clone(),
            Style::default().fg(colors.text),
        )),
        Line::from(Span::styled(
            format!("component: {}  ·  {}", view.component, view.fragment()),
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
    ];

    if let Some(category) = ToolCategory::parse(&view.id) {
        lines.push(Line::from(Span::styled(
            format!("{} tools (run from the command palette):", category.tools().len()),
            Style::default().fg(colors.accent),
        )));
        for tool in category.tools() {
            lines.push(Line::from(Span::styled(
                format!("  • {tool}"),
                Style::default().fg(colors.text),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block(&title, colors))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_log(app: &AppState, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.log.len().saturating_sub(visible);
    let lines: Vec<Line> = app
        .log
        .iter()
        .skip(skip)
        .map(|line| {
            Line::from(vec![
                Span::styled(format!("{} ", line.time), Style::default().fg(colors.muted)),
                Span::styled(line.text.clone(), Style::default().fg(colors.tone(line.tone))),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block("Events", colors)), area);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let sep = || Span::styled("  ·  ", Style::default().fg(colors.muted));
    let mut spans = vec![
        Span::styled(
            format!(" theme: {}", app.theme),
            Style::default().fg(colors.muted),
        ),
        sep(),
        Span::styled(
            format!("heartbeats: {}", app.heartbeats),
            Style::default().fg(colors.muted),
        ),
    ];

    if let Some(tool) = &app.loading {
        spans.push(sep());
        spans.push(Span::styled(
            format!("running {tool}"),
            Style::default().fg(colors.warning),
        ));
    }
    if let Some(error) = &app.last_error {
        spans.push(sep());
        spans.push(Span::styled(error.clone(), Style::default().fg(colors.error)));
    }

    spans.push(sep());
    spans.push(Span::styled(
        "Ctrl+K palette · Ctrl+B back · q quit",
        Style::default().fg(colors.muted),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use switchboard_types::{Params, UiEvent};

    use super::*;
    use crate::state::sample_state;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_views_and_hint_without_current_view() {
        let screen = draw(&sample_state());
        assert!(screen.contains("Overview"));
        assert!(screen.contains("Neural Network (15)"));
        assert!(screen.contains("No view open"));
        assert!(screen.contains(" 10 CLI Bridge"));
    }

    #[test]
    fn test_renders_category_tools_for_current_view() {
        let mut app = sample_state();
        app.apply_bus_event(&UiEvent::Navigation {
            view_id: "github".to_string(),
            params: Params::new(),
        });
        let screen = draw(&app);
        assert!(screen.contains("github_repo_analyze"));
        assert!(screen.contains("Opened GitHub"));
    }

    #[test]
    fn test_status_line_shows_running_tool() {
        let mut app = sample_state();
        app.apply_bus_event(&UiEvent::Loading {
            tool: "neural_train".to_string(),
            params: Params::new(),
        });
        assert!(draw(&app).contains("running neural_train"));
    }

    #[test]
    fn test_renders_palette_overlay() {
        let mut app = sample_state();
        app.apply_bus_event(&UiEvent::CommandPaletteShow);
        let screen = draw(&app);
        assert!(screen.contains("Command Palette"));
        assert!(screen.contains("Toggle theme"));
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use switchboard_core::{ShellCommand, ShortcutAction};
use switchboard_types::{Params, ToolCategory};

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::state::AppState;
use crate::style::ThemeColors;

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteTarget {
    Action(ShortcutAction),
    Tool(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub group: &'static str,
    pub label: String,
    pub description: String,
    pub shortcut: Option<String>,
    pub target: PaletteTarget,
}

impl PaletteEntry {
    fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.label.to_lowercase().contains(&filter) || self.group.contains(&filter)
    }

    fn effect(&self) -> UiEffect {
        match &self.target {
            PaletteTarget::Action(action) => UiEffect::Run(action.clone()),
            PaletteTarget::Tool(tool) => UiEffect::Send(ShellCommand::ExecuteTool {
                tool: tool.clone(),
                params: Params::new(),
            }),
            PaletteTarget::Quit => UiEffect::Quit,
        }
    }
}

/// Entries for the current state: views, shell actions, the current
/// category's tools, and quit.
pub fn palette_entries(state: &AppState) -> Vec<PaletteEntry> {
    let shortcut = |action: &ShortcutAction| state.shortcut_for(action).map(str::to_string);
    let mut entries = Vec::new();

    for view in &state.views {
        let action = ShortcutAction::Navigate(view.id.clone());
        entries.push(PaletteEntry {
            group: "view",
            label: view.name.clone(),
            description: view.description.clone(),
            shortcut: shortcut(&action),
            target: PaletteTarget::Action(action),
        });
    }

    for (action, description) in [
        (ShortcutAction::Back, "Return to the previous view"),
        (ShortcutAction::Refresh, "Reload the current view"),
        (ShortcutAction::ToggleTheme, "Switch between dark and light"),
    ] {
        entries.push(PaletteEntry {
            group: "shell",
            label: action.label(),
            description: description.to_string(),
            shortcut: shortcut(&action),
            target: PaletteTarget::Action(action),
        });
    }

    if let Some(category) = state.current_view.as_deref().and_then(ToolCategory::parse) {
        for tool in category.tools() {
            entries.push(PaletteEntry {
                group: "tool",
                label: (*tool).to_string(),
                description: format!("Run {tool} ({category})"),
                shortcut: None,
                target: PaletteTarget::Tool((*tool).to_string()),
            });
        }
    }

    entries.push(PaletteEntry {
        group: "app",
        label: "Quit".to_string(),
        description: "Persist state and exit".to_string(),
        shortcut: Some("q".to_string()),
        target: PaletteTarget::Quit,
    });
    entries
}

#[derive(Debug, Clone)]
pub struct CommandPaletteState {
    pub filter: String,
    pub selected: usize,
    entries: Vec<PaletteEntry>,
}

impl CommandPaletteState {
    pub fn open(entries: Vec<PaletteEntry>) -> Self {
        Self {
            filter: String::new(),
            selected: 0,
            entries,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        render_command_palette(frame, self, area, colors);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                let count = self.filtered().len();
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter | KeyCode::Tab => match self.filtered().get(self.selected) {
                Some(entry) => OverlayUpdate::close().with_effects(vec![entry.effect()]),
                None => OverlayUpdate::close(),
            },
            KeyCode::Backspace => {
                self.filter.pop();
                self.clamp_selection();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.filter.push(c);
                self.clamp_selection();
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn filtered(&self) -> Vec<&PaletteEntry> {
        self.entries
            .iter()
            .filter(|entry| self.filter.is_empty() || entry.matches(&self.filter))
            .collect()
    }

    pub fn clamp_selection(&mut self) {
        let count = self.filtered().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

pub fn render_command_palette(
    frame: &mut Frame,
    palette: &CommandPaletteState,
    area: Rect,
    colors: &ThemeColors,
) {
    use super::render_utils::{
        InputHint, OverlayConfig, render_input_line, render_overlay, render_separator,
    };

    let entries = palette.filtered();

    let palette_width = area.width.saturating_sub(4).clamp(20, 80);
    // filter + 2 separators + description + hints + borders
    let palette_height = (entries.len() as u16 + 7).clamp(8, 24);

    let hints = [
        InputHint::new("↑↓", "navigate"),
        InputHint::new("Enter", "select"),
        InputHint::new("Esc", "cancel"),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "Command Palette",
            width: palette_width,
            height: palette_height,
            hints: &hints,
        },
        colors,
    );

    let filter_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
    render_input_line(frame, filter_area, &palette.filter, colors);
    render_separator(frame, layout.body, 1, colors);

    let list_height = layout.body.height.saturating_sub(4);
    let list_area = Rect::new(
        layout.body.x,
        layout.body.y + 2,
        layout.body.width,
        list_height,
    );

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "  No matching commands",
            Style::default().fg(colors.muted),
        )))]
    } else {
        let max_group_len = entries.iter().map(|e| e.group.len()).max().unwrap_or(0);
        let max_label_len = entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);

        entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let is_selected = idx == palette.selected;
                let label_style = if is_selected {
                    Style::default()
                        .fg(colors.text)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.muted)
                };

                let mut spans = vec![
                    Span::styled(
                        format!("{:>max_group_len$}  ", entry.group),
                        Style::default()
                            .fg(colors.muted)
                            .add_modifier(Modifier::DIM),
                    ),
                    Span::styled(format!("{:<max_label_len$}", entry.label), label_style),
                ];

                if let Some(shortcut) = &entry.shortcut {
                    let used = max_group_len + 2 + max_label_len;
                    let available = list_area.width.saturating_sub(4) as usize;
                    let shortcut_len = shortcut.chars().count();
                    let padding = available.saturating_sub(used + shortcut_len);
                    spans.push(Span::styled(
                        format!("{shortcut:>width$}", width = padding + shortcut_len),
                        Style::default().fg(colors.muted),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(items)
        .highlight_style(Style::default().bg(colors.selection))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    if !entries.is_empty() {
        list_state.select(Some(palette.selected));
    }
    frame.render_stateful_widget(list, list_area, &mut list_state);

    render_separator(frame, layout.body, 2 + list_height, colors);

    let description = entries
        .get(palette.selected)
        .map_or("", |entry| entry.description.as_str());
    let desc_area = Rect::new(
        layout.body.x,
        layout.body.y + 3 + list_height,
        layout.body.width,
        1,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            description,
            Style::default().fg(colors.muted),
        )))
        .alignment(Alignment::Center),
        desc_area,
    );
}

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::models::TocEntry;
use crate::ui::centered_popup_area;

/// Popup listing the subheadings of the current section.
pub struct TocWindow {
    pub visible: bool,
    pub entries: Vec<TocEntry>,
    pub selected_index: usize,
}

impl TocWindow {
    pub fn new() -> Self {
        Self {
            visible: false,
            entries: Vec::new(),
            selected_index: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_entries(&mut self, entries: Vec<TocEntry>) {
        self.entries = entries;
        self.selected_index = 0;
    }

    pub fn next_entry(&mut self) {
        if !self.entries.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.entries.len() - 1);
        }
    }

    pub fn previous_entry(&mut self) {
        if !self.entries.is_empty() {
            self.selected_index = self.selected_index.saturating_sub(1);
        }
    }

    pub fn get_selected_entry(&self) -> Option<&TocEntry> {
        self.entries.get(self.selected_index)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_area = centered_popup_area(area, 50, 60);
        frame.render_widget(Clear, popup_area);

        if self.entries.is_empty() {
            let empty_text = vec![
                Line::from("No headings in this section"),
                Line::from(""),
                Line::from(Span::styled(
                    "Press any key to close",
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
            ];
            let paragraph = Paragraph::new(empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("On This Slide").borders(Borders::ALL));
            frame.render_widget(paragraph, popup_area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.selected_index {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                let content = if entry.sub {
                    format!("    {}", entry.label)
                } else {
                    entry.label.clone()
                };
                ListItem::new(Line::from(content)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("On This Slide").borders(Borders::ALL));
        frame.render_widget(list, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<TocEntry> {
        vec![
            TocEntry {
                label: "Setup".to_string(),
                sub: false,
            },
            TocEntry {
                label: "Details".to_string(),
                sub: true,
            },
        ]
    }

    #[test]
    fn test_toggle_and_selection() {
        let mut window = TocWindow::new();
        assert!(!window.visible);
        window.toggle();
        assert!(window.visible);

        window.set_entries(entries());
        assert_eq!(window.get_selected_entry().unwrap().label, "Setup");
        window.next_entry();
        assert_eq!(window.get_selected_entry().unwrap().label, "Details");
        // Stops at the last entry.
        window.next_entry();
        assert_eq!(window.selected_index, 1);
        window.previous_entry();
        window.previous_entry();
        assert_eq!(window.selected_index, 0);
    }

    #[test]
    fn test_set_entries_resets_selection() {
        let mut window = TocWindow::new();
        window.set_entries(entries());
        window.next_entry();
        window.set_entries(entries());
        assert_eq!(window.selected_index, 0);
    }

    #[test]
    fn test_empty_entries_selection_noop() {
        let mut window = TocWindow::new();
        window.next_entry();
        window.previous_entry();
        assert!(window.get_selected_entry().is_none());
    }
}

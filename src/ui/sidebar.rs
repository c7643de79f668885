use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::sidebar::{GroupKind, Row, SidebarTree};

/// Render the sidebar panel. A missing tree means the course structure
/// failed to load and only a placeholder is shown.
pub fn render(frame: &mut Frame, area: Rect, tree: Option<&SidebarTree>) {
    let block = Block::default().title("Contents").borders(Borders::ALL);

    let Some(tree) = tree else {
        let placeholder = Paragraph::new("Failed to load navigation")
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let items: Vec<ListItem> = tree_lines(tree)
        .into_iter()
        .map(|line| ListItem::new(line))
        .collect();
    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn caret(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}

/// Flatten the tree into styled lines, one per visible row.
fn tree_lines(tree: &SidebarTree) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for group in &tree.groups {
        let group_style = match group.kind {
            GroupKind::Overview => Style::default().add_modifier(Modifier::BOLD),
            GroupKind::Chapter => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", caret(group.expanded), group.title),
            group_style,
        )));

        for row in &group.rows {
            match row {
                Row::Link(link) => {
                    lines.push(link_line(
                        &link.title,
                        link.read,
                        link.active,
                        link.number,
                        None,
                    ));
                }
                Row::Sectioned(part) => {
                    lines.push(link_line(
                        &part.title,
                        part.read,
                        true,
                        Some(part.number),
                        Some(part.expanded),
                    ));
                    for section in &part.sections {
                        let style = if section.active {
                            Style::default().fg(Color::Yellow)
                        } else {
                            Style::default().fg(Color::DarkGray)
                        };
                        lines.push(Line::from(Span::styled(
                            format!("      › {}", section.title),
                            style,
                        )));
                    }
                }
            }
        }
    }

    lines
}

fn link_line(
    title: &str,
    read: bool,
    active: bool,
    number: Option<usize>,
    expanded: Option<bool>,
) -> Line<'static> {
    let icon = if read {
        "✓".to_string()
    } else {
        match number {
            Some(n) => n.to_string(),
            None => "·".to_string(),
        }
    };
    let marker = match expanded {
        Some(e) => format!("{} ", caret(e)),
        None => String::new(),
    };
    let style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if read {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("  {} {}{}", icon, marker, title), style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::{Group, LinkRow, SectionRow, SectionedRow};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_collapsed_group_renders_header_only() {
        let tree = SidebarTree {
            groups: vec![Group {
                key: "chapter-01".to_string(),
                title: "Chapter 1".to_string(),
                kind: GroupKind::Chapter,
                expanded: false,
                rows: Vec::new(),
            }],
        };
        let lines = tree_lines(&tree);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "▸ Chapter 1");
    }

    #[test]
    fn test_read_rows_show_check_unread_show_number() {
        let tree = SidebarTree {
            groups: vec![Group {
                key: "chapter-01".to_string(),
                title: "Chapter 1".to_string(),
                kind: GroupKind::Chapter,
                expanded: true,
                rows: vec![
                    Row::Link(LinkRow {
                        id: "chapter-01/PART0.md".to_string(),
                        title: "Launching".to_string(),
                        read: true,
                        active: false,
                        number: Some(1),
                    }),
                    Row::Link(LinkRow {
                        id: "chapter-01/PART1.md".to_string(),
                        title: "Waiting".to_string(),
                        read: false,
                        active: false,
                        number: Some(2),
                    }),
                ],
            }],
        };
        let lines = tree_lines(&tree);
        assert_eq!(line_text(&lines[1]), "  ✓ Launching");
        assert_eq!(line_text(&lines[2]), "  2 Waiting");
    }

    #[test]
    fn test_sectioned_row_indents_sections() {
        let tree = SidebarTree {
            groups: vec![Group {
                key: "chapter-01".to_string(),
                title: "Chapter 1".to_string(),
                kind: GroupKind::Chapter,
                expanded: true,
                rows: vec![Row::Sectioned(SectionedRow {
                    id: "chapter-01/PART0.md".to_string(),
                    title: "Launching".to_string(),
                    read: true,
                    number: 1,
                    expanded: true,
                    sections: vec![
                        SectionRow {
                            index: 0,
                            title: "Intro".to_string(),
                            active: true,
                        },
                        SectionRow {
                            index: 1,
                            title: "Syntax".to_string(),
                            active: false,
                        },
                    ],
                })],
            }],
        };
        let lines = tree_lines(&tree);
        assert_eq!(lines.len(), 4);
        assert_eq!(line_text(&lines[1]), "  ✓ ▾ Launching");
        assert_eq!(line_text(&lines[2]), "      › Intro");
        assert_eq!(line_text(&lines[3]), "      › Syntax");
    }
}

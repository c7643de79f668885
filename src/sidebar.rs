use crate::models::{OVERVIEW_KEY, overview_id};
use crate::segment::{section_title, simplify_title};
use crate::state::NavState;
use crate::structure::Outline;

/// Renderable sidebar: ordered groups of rows. Rebuilt in full whenever
/// navigation state or the cursor changes; rendering it is someone else's
/// problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarTree {
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Overview,
    Chapter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Collapse-state key: the chapter id, or the overview group key.
    pub key: String,
    pub title: String,
    pub kind: GroupKind,
    pub expanded: bool,
    /// Empty when the group is collapsed.
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A page reachable by navigation.
    Link(LinkRow),
    /// The current page, expanded into its section titles.
    Sectioned(SectionedRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkRow {
    pub id: String,
    pub title: String,
    pub read: bool,
    pub active: bool,
    /// 1-based position within the chapter; None for overview rows.
    pub number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionedRow {
    pub id: String,
    pub title: String,
    pub read: bool,
    pub number: usize,
    pub expanded: bool,
    /// Empty when the row is collapsed.
    pub sections: Vec<SectionRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionRow {
    pub index: usize,
    pub title: String,
    pub active: bool,
}

/// Project the outline plus navigation state into the sidebar tree.
///
/// Group order is overview first (when non-empty), then chapters in
/// declared order. A part becomes a sectioned row exactly when it is the
/// current page and that page split into more than one section.
pub fn build_tree(
    outline: &Outline,
    nav: &NavState,
    page_id: &str,
    sections: &[String],
    cursor: usize,
) -> SidebarTree {
    let mut groups = Vec::new();

    if !outline.overview().is_empty() {
        let expanded = nav.is_expanded(OVERVIEW_KEY, true);
        let rows = if expanded {
            outline
                .overview()
                .iter()
                .map(|ov| {
                    let id = overview_id(&ov.filename);
                    Row::Link(LinkRow {
                        read: nav.is_read(&id),
                        active: page_id == id,
                        id,
                        title: ov.title.clone(),
                        number: None,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };
        groups.push(Group {
            key: OVERVIEW_KEY.to_string(),
            title: "Course Overview".to_string(),
            kind: GroupKind::Overview,
            expanded,
            rows,
        });
    }

    for chapter in outline.chapters() {
        let expanded = nav.is_expanded(&chapter.id, true);
        let rows = if expanded {
            chapter
                .parts
                .iter()
                .enumerate()
                .map(|(idx, part)| {
                    let full_id = format!("{}/{}", chapter.id, part.filename);
                    let read = nav.is_read(&full_id);
                    let active = page_id == full_id;
                    let title = simplify_title(&part.title);

                    if active && sections.len() > 1 {
                        // Expanded-by-default only while it is the page
                        // being read.
                        let part_expanded = nav.is_expanded(&full_id, true);
                        let section_rows = if part_expanded {
                            sections
                                .iter()
                                .enumerate()
                                .map(|(s_idx, sec)| SectionRow {
                                    index: s_idx,
                                    title: section_title(sec),
                                    active: s_idx == cursor,
                                })
                                .collect()
                        } else {
                            Vec::new()
                        };
                        Row::Sectioned(SectionedRow {
                            id: full_id,
                            title,
                            read,
                            number: idx + 1,
                            expanded: part_expanded,
                            sections: section_rows,
                        })
                    } else {
                        Row::Link(LinkRow {
                            id: full_id,
                            title,
                            read,
                            active,
                            number: Some(idx + 1),
                        })
                    }
                })
                .collect()
        } else {
            Vec::new()
        };
        groups.push(Group {
            key: chapter.id.clone(),
            title: chapter.title.clone(),
            kind: GroupKind::Chapter,
            expanded,
            rows,
        });
    }

    SidebarTree { groups }
}

use crate::models::{Crumb, PageKind, TocEntry, page_kind};
use crate::segment::{clean_heading_markers, heading_level, is_fence_delimiter, section_title};
use crate::structure::Outline;

/// Breadcrumb trail for the current position: course title, then chapter
/// and part (or overview title), then the active section.
pub fn breadcrumb(
    outline: &Outline,
    page_id: &str,
    sections: &[String],
    cursor: usize,
) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: outline.course_title().to_string(),
        current: false,
    }];

    match page_kind(page_id) {
        PageKind::Welcome => return crumbs,
        PageKind::Overview => {
            if let Some(title) = outline.page_title(page_id) {
                crumbs.push(Crumb {
                    label: title,
                    current: sections.is_empty(),
                });
            }
        }
        PageKind::Part => {
            if let Some((chapter_id, _)) = page_id.split_once('/')
                && let Some(chapter) = outline.chapter(chapter_id)
            {
                crumbs.push(Crumb {
                    label: chapter.title.clone(),
                    current: false,
                });
            }
            if let Some(title) = outline.page_title(page_id) {
                crumbs.push(Crumb {
                    label: title,
                    current: sections.is_empty(),
                });
            }
        }
    }

    if let Some(section) = sections.get(cursor) {
        crumbs.push(Crumb {
            label: section_title(section),
            current: true,
        });
    }

    crumbs
}

/// In-page table of contents for one section: level-3 and level-4 headings
/// outside fenced blocks. Levels 1-2 are section boundaries, not entries.
pub fn section_toc(section: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut in_fence = false;
    for line in section.lines() {
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(level @ (3 | 4)) = heading_level(line) {
            entries.push(TocEntry {
                label: clean_heading_markers(&line[level..]),
                sub: level == 4,
            });
        }
    }
    entries
}

/// The "position / total" indicator, 1-based.
pub fn indicator(cursor: usize, total: usize) -> String {
    format!("{} / {}", cursor + 1, total)
}

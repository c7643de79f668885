use serde::Deserialize;
use std::path::PathBuf;

/// Collapse-state key for the overview group, and the id prefix of
/// overview pages (`_overview/<filename>`).
pub const OVERVIEW_KEY: &str = "_overview";

/// Course outline as embedded in `structure.json`. Loaded once per run and
/// treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Structure {
    #[serde(default = "default_course_title")]
    pub title: String,
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub overview: Vec<OverviewEntry>,
}

fn default_course_title() -> String {
    "Course".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub dir: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Part {
    pub filename: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverviewEntry {
    pub filename: String,
    pub title: String,
}

/// One part in the flattened course order. Chapter boundaries are invisible
/// here; adjacency in this list defines global prev/next navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatPart {
    pub chapter_id: String,
    pub full_id: String,
    pub title: String,
    /// Path of the page file relative to the course root.
    pub path: PathBuf,
}

/// The three kinds of page identity a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Welcome,
    Overview,
    Part,
}

pub fn page_kind(page_id: &str) -> PageKind {
    if page_id.is_empty() {
        PageKind::Welcome
    } else if page_id.starts_with(&format!("{}/", OVERVIEW_KEY)) {
        PageKind::Overview
    } else {
        PageKind::Part
    }
}

pub fn overview_id(filename: &str) -> String {
    format!("{}/{}", OVERVIEW_KEY, filename)
}

/// One entry of the in-page table of contents (headings inside the active
/// section). `sub` marks a level-4 heading nested under a level-3 one.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub label: String,
    pub sub: bool,
}

/// One element of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub current: bool,
}

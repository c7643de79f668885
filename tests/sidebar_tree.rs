use std::path::Path;

use curso::models::{OVERVIEW_KEY, overview_id};
use curso::session::Session;
use curso::sidebar::{GroupKind, Row};
use curso::state::NavState;
use curso::store::MemoryStore;
use curso::structure::Outline;
use tempfile::TempDir;

fn write_course(root: &Path) {
    let structure = serde_json::json!({
        "title": "Go Concurrency",
        "chapters": [
            {
                "id": "chapter-01",
                "title": "Chapter 1: Goroutines",
                "dir": "chapter-01",
                "parts": [
                    {"filename": "PART0.md", "title": "Chapter 1, Part 0: Launching"},
                    {"filename": "PART1.md", "title": "Chapter 1, Part 1: Waiting"}
                ]
            }
        ],
        "overview": [
            {"filename": "SETUP.md", "title": "Environment Setup"}
        ]
    });
    std::fs::create_dir_all(root.join("chapter-01")).unwrap();
    std::fs::write(
        root.join("structure.json"),
        serde_json::to_string_pretty(&structure).unwrap(),
    )
    .unwrap();

    let mut part0 = String::from("# Launching\n\n## Syntax\n");
    for i in 0..12 {
        part0.push_str(&format!("syntax line {}\n", i));
    }
    part0.push_str("## Pitfalls\nnever leak them\n");
    std::fs::write(root.join("chapter-01/PART0.md"), part0).unwrap();
    std::fs::write(
        root.join("chapter-01/PART1.md"),
        "# Waiting\n\n## WaitGroups\nuse Add and Done\n",
    )
    .unwrap();
    std::fs::write(root.join("SETUP.md"), "## Setup\ninstall the toolchain\n").unwrap();
}

fn session(dir: &TempDir) -> Session {
    write_course(dir.path());
    let outline = Outline::load(&dir.path().join("structure.json")).unwrap();
    let nav = NavState::load(Box::new(MemoryStore::new()));
    Session::new(Some(outline), nav, dir.path().to_path_buf())
}

#[test]
fn test_tree_reflects_session_after_open() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    session.open("chapter-01/PART0.md").unwrap();

    let tree = session.sidebar_tree().unwrap();
    assert_eq!(tree.groups[0].kind, GroupKind::Overview);
    assert_eq!(tree.groups[0].key, OVERVIEW_KEY);
    assert_eq!(tree.groups[1].key, "chapter-01");

    // The open page became a sectioned row with the cursor on section 0.
    match &tree.groups[1].rows[0] {
        Row::Sectioned(row) => {
            assert!(row.read);
            assert!(row.expanded);
            assert_eq!(row.sections.len(), 2);
            assert!(row.sections[0].active);
        }
        other => panic!("expected sectioned row, got {:?}", other),
    }
    assert!(matches!(&tree.groups[1].rows[1], Row::Link(r) if !r.read));
}

#[test]
fn test_tree_cursor_moves_with_advance() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    session.open("chapter-01/PART0.md").unwrap();
    session.advance().unwrap();

    let tree = session.sidebar_tree().unwrap();
    match &tree.groups[1].rows[0] {
        Row::Sectioned(row) => {
            assert!(!row.sections[0].active);
            assert!(row.sections[1].active);
        }
        other => panic!("expected sectioned row, got {:?}", other),
    }
}

#[test]
fn test_collapsing_chapter_hides_rows_only() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    session.open("chapter-01/PART0.md").unwrap();
    session.nav_mut().set_expanded("chapter-01", false);

    let tree = session.sidebar_tree().unwrap();
    assert!(!tree.groups[1].expanded);
    assert!(tree.groups[1].rows.is_empty());
    // Collapsing the sidebar group does not touch the page being read.
    assert_eq!(session.page_id(), "chapter-01/PART0.md");
    assert_eq!(session.sections().len(), 2);
}

#[test]
fn test_overview_page_rows() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    let id = overview_id("SETUP.md");
    session.open(&id).unwrap();

    let tree = session.sidebar_tree().unwrap();
    match &tree.groups[0].rows[0] {
        Row::Link(row) => {
            assert!(row.active);
            assert!(row.read);
            assert_eq!(row.number, None);
            assert_eq!(row.title, "Environment Setup");
        }
        other => panic!("expected link row, got {:?}", other),
    }
}

#[test]
fn test_welcome_tree_has_no_active_rows() {
    let dir = TempDir::new().unwrap();
    let session = session(&dir);
    let tree = session.sidebar_tree().unwrap();

    for group in &tree.groups {
        for row in &group.rows {
            match row {
                Row::Link(link) => assert!(!link.active),
                Row::Sectioned(_) => panic!("no page is open"),
            }
        }
    }
}

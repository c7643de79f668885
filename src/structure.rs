use eyre::{Result, WrapErr};
use std::path::{Path, PathBuf};

use crate::models::{Chapter, FlatPart, OverviewEntry, PageKind, Structure, page_kind};
use crate::segment::simplify_title;

/// Read-only view of the course outline plus the derived flat part order
/// used for prev/next navigation across chapter boundaries.
pub struct Outline {
    structure: Structure,
    flat: Vec<FlatPart>,
}

impl Outline {
    pub fn new(structure: Structure) -> Self {
        let mut flat = Vec::new();
        for chapter in &structure.chapters {
            for part in &chapter.parts {
                flat.push(FlatPart {
                    chapter_id: chapter.id.clone(),
                    full_id: format!("{}/{}", chapter.id, part.filename),
                    title: part.title.clone(),
                    path: PathBuf::from(&chapter.dir).join(&part.filename),
                });
            }
        }
        Self { structure, flat }
    }

    /// Load the outline from a `structure.json` file.
    pub fn load(filepath: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(filepath)
            .wrap_err_with(|| format!("could not read {}", filepath.display()))?;
        let structure: Structure = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("could not parse {}", filepath.display()))?;
        Ok(Self::new(structure))
    }

    pub fn course_title(&self) -> &str {
        &self.structure.title
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.structure.chapters
    }

    pub fn overview(&self) -> &[OverviewEntry] {
        &self.structure.overview
    }

    pub fn flat_parts(&self) -> &[FlatPart] {
        &self.flat
    }

    pub fn first_part(&self) -> Option<&FlatPart> {
        self.flat.first()
    }

    pub fn find_part(&self, full_id: &str) -> Option<&FlatPart> {
        self.flat.iter().find(|p| p.full_id == full_id)
    }

    fn position(&self, full_id: &str) -> Option<usize> {
        self.flat.iter().position(|p| p.full_id == full_id)
    }

    /// Next part in flat order, or None at the last part overall.
    pub fn next_after(&self, full_id: &str) -> Option<&FlatPart> {
        let idx = self.position(full_id)?;
        self.flat.get(idx + 1)
    }

    /// Previous part in flat order, or None at the first part overall.
    pub fn prev_before(&self, full_id: &str) -> Option<&FlatPart> {
        let idx = self.position(full_id)?;
        idx.checked_sub(1).and_then(|i| self.flat.get(i))
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.structure.chapters.iter().find(|c| c.id == chapter_id)
    }

    fn overview_entry(&self, page_id: &str) -> Option<&OverviewEntry> {
        let filename = page_id.split_once('/')?.1;
        self.structure
            .overview
            .iter()
            .find(|o| o.filename == filename)
    }

    /// Display title for the header: simplified part title or overview
    /// title. Welcome mode and unknown ids resolve to None.
    pub fn page_title(&self, page_id: &str) -> Option<String> {
        match page_kind(page_id) {
            PageKind::Welcome => None,
            PageKind::Overview => self.overview_entry(page_id).map(|o| o.title.clone()),
            PageKind::Part => self.find_part(page_id).map(|p| simplify_title(&p.title)),
        }
    }

    /// Path of a page's markdown file relative to the course root. Overview
    /// files live at the root, part files under their chapter directory.
    pub fn page_path(&self, page_id: &str) -> Option<PathBuf> {
        match page_kind(page_id) {
            PageKind::Welcome => None,
            PageKind::Overview => self
                .overview_entry(page_id)
                .map(|o| PathBuf::from(&o.filename)),
            PageKind::Part => self.find_part(page_id).map(|p| p.path.clone()),
        }
    }
}

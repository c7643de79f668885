use eyre::{Result, WrapErr};
use std::path::PathBuf;

use crate::logging;
use crate::models::{Crumb, FlatPart, PageKind, TocEntry, page_kind};
use crate::nav::{SlideController, Step};
use crate::segment::split_sections;
use crate::sidebar::{SidebarTree, build_tree};
use crate::state::NavState;
use crate::structure::Outline;
use crate::views;

/// One page view's worth of navigation state: the outline, the persistent
/// read/collapse/last-page state, the current page's sections, and the
/// slide cursor. Owns everything the components need so no module-level
/// state exists anywhere.
pub struct Session {
    outline: Option<Outline>,
    nav: NavState,
    root: PathBuf,
    page_id: String,
    sections: Vec<String>,
    slides: SlideController,
}

impl Session {
    /// Start a session in welcome mode (no page open).
    pub fn new(outline: Option<Outline>, nav: NavState, root: PathBuf) -> Self {
        Self {
            outline,
            nav,
            root,
            page_id: String::new(),
            sections: Vec::new(),
            slides: SlideController::new(1),
        }
    }

    /// Whether the outline loaded; without it the sidebar renders a fixed
    /// failure placeholder and page navigation is unavailable.
    pub fn has_outline(&self) -> bool {
        self.outline.is_some()
    }

    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn is_welcome(&self) -> bool {
        self.page_id.is_empty()
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn cursor(&self) -> usize {
        self.slides.cursor()
    }

    pub fn current_section(&self) -> Option<&str> {
        self.sections.get(self.slides.cursor()).map(|s| s.as_str())
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavState {
        &mut self.nav
    }

    /// Open a page: read its file, segment it, reset the cursor to 0, and
    /// commit the visit to persistent state. State mutation happens before
    /// the persistence writes, which happen before the caller re-renders.
    pub fn open(&mut self, page_id: &str) -> Result<()> {
        let outline = self
            .outline
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no course structure loaded"))?;
        let rel_path = outline
            .page_path(page_id)
            .ok_or_else(|| eyre::eyre!("unknown page id: {}", page_id))?;
        let filepath = self.root.join(rel_path);
        let text = std::fs::read_to_string(&filepath)
            .wrap_err_with(|| format!("could not read {}", filepath.display()))?;

        self.page_id = page_id.to_string();
        self.sections = split_sections(&text);
        self.slides = SlideController::new(self.sections.len());

        // Auto-expand the part being read so its section list is visible.
        if page_kind(page_id) == PageKind::Part {
            self.nav.set_expanded(page_id, true);
        }
        self.nav.mark_read(page_id);
        self.nav.record_last_page(page_id);

        logging::debug(format!(
            "opened {} ({} sections)",
            page_id,
            self.sections.len()
        ));
        Ok(())
    }

    /// Move to the next section, or to the next part when already at the
    /// last section. A no-op at the last section of the last part.
    pub fn advance(&mut self) -> Result<()> {
        if self.is_welcome() {
            return Ok(());
        }
        match self.slides.advance() {
            Step::Moved(_) => Ok(()),
            Step::PageForward => {
                let next = self
                    .outline
                    .as_ref()
                    .and_then(|o| o.next_after(&self.page_id))
                    .map(|p| p.full_id.clone());
                match next {
                    Some(id) => self.open(&id),
                    None => Ok(()),
                }
            }
            Step::PageBack => unreachable!("advance never steps back"),
        }
    }

    /// Symmetric to `advance`; a no-op at the first section of the first
    /// part. The previous page, like any fresh load, opens at section 0.
    pub fn retreat(&mut self) -> Result<()> {
        if self.is_welcome() {
            return Ok(());
        }
        match self.slides.retreat() {
            Step::Moved(_) => Ok(()),
            Step::PageBack => {
                let prev = self
                    .outline
                    .as_ref()
                    .and_then(|o| o.prev_before(&self.page_id))
                    .map(|p| p.full_id.clone());
                match prev {
                    Some(id) => self.open(&id),
                    None => Ok(()),
                }
            }
            Step::PageForward => unreachable!("retreat never steps forward"),
        }
    }

    pub fn jump_to(&mut self, index: usize) {
        if !self.is_welcome() {
            self.slides.jump_to(index);
        }
    }

    /// The part to offer as "continue where you left off" on the welcome
    /// page, if the stored last page still resolves to a part.
    pub fn resume_target(&self) -> Option<&FlatPart> {
        let outline = self.outline.as_ref()?;
        let last = self.nav.last_page()?;
        outline.find_part(last)
    }

    pub fn first_part_id(&self) -> Option<String> {
        self.outline
            .as_ref()
            .and_then(|o| o.first_part())
            .map(|p| p.full_id.clone())
    }

    /// Header title for the current page.
    pub fn page_title(&self) -> Option<String> {
        self.outline.as_ref()?.page_title(&self.page_id)
    }

    /// Sidebar tree for the current state; None when the outline failed to
    /// load (render the failure placeholder instead).
    pub fn sidebar_tree(&self) -> Option<SidebarTree> {
        self.outline.as_ref().map(|outline| {
            build_tree(
                outline,
                &self.nav,
                &self.page_id,
                &self.sections,
                self.slides.cursor(),
            )
        })
    }

    pub fn breadcrumb(&self) -> Vec<Crumb> {
        match self.outline.as_ref() {
            Some(outline) => {
                views::breadcrumb(outline, &self.page_id, &self.sections, self.slides.cursor())
            }
            None => Vec::new(),
        }
    }

    pub fn toc(&self) -> Vec<TocEntry> {
        self.current_section().map(views::section_toc).unwrap_or_default()
    }

    pub fn indicator(&self) -> String {
        views::indicator(self.slides.cursor(), self.sections.len().max(1))
    }

    pub fn at_first_section(&self) -> bool {
        self.slides.at_first()
    }

    pub fn at_last_section(&self) -> bool {
        self.slides.at_last()
    }
}

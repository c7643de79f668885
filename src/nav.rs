/// Outcome of an advance/retreat request on the slide cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved within the current page.
    Moved(usize),
    /// Already at the last section; the caller should navigate to the
    /// next part, if one exists.
    PageForward,
    /// Already at the first section; the caller should navigate to the
    /// previous part, if one exists.
    PageBack,
}

/// Cursor over the current page's section list. The section count is fixed
/// for the lifetime of the page; a fresh controller always starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideController {
    cursor: usize,
    len: usize,
}

impl SlideController {
    pub fn new(section_count: usize) -> Self {
        Self {
            cursor: 0,
            len: section_count.max(1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn section_count(&self) -> usize {
        self.len
    }

    pub fn at_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn at_last(&self) -> bool {
        self.cursor + 1 == self.len
    }

    pub fn advance(&mut self) -> Step {
        if self.at_last() {
            Step::PageForward
        } else {
            self.cursor += 1;
            Step::Moved(self.cursor)
        }
    }

    pub fn retreat(&mut self) -> Step {
        if self.at_first() {
            Step::PageBack
        } else {
            self.cursor -= 1;
            Step::Moved(self.cursor)
        }
    }

    /// Jump directly to an index. Callers only pass indices of rendered
    /// controls, which are valid by construction; anything else clamps.
    pub fn jump_to(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.cursor = index.min(self.len - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let slides = SlideController::new(4);
        assert_eq!(slides.cursor(), 0);
        assert!(slides.at_first());
        assert!(!slides.at_last());
    }

    #[test]
    fn test_advance_through_sections() {
        let mut slides = SlideController::new(3);
        assert_eq!(slides.advance(), Step::Moved(1));
        assert_eq!(slides.advance(), Step::Moved(2));
        assert!(slides.at_last());
        assert_eq!(slides.advance(), Step::PageForward);
        // The cursor stays put on a boundary request.
        assert_eq!(slides.cursor(), 2);
    }

    #[test]
    fn test_retreat_through_sections() {
        let mut slides = SlideController::new(3);
        slides.jump_to(2);
        assert_eq!(slides.retreat(), Step::Moved(1));
        assert_eq!(slides.retreat(), Step::Moved(0));
        assert_eq!(slides.retreat(), Step::PageBack);
        assert_eq!(slides.cursor(), 0);
    }

    #[test]
    fn test_single_section_page() {
        let mut slides = SlideController::new(1);
        assert!(slides.at_first() && slides.at_last());
        assert_eq!(slides.advance(), Step::PageForward);
        assert_eq!(slides.retreat(), Step::PageBack);
    }

    #[test]
    fn test_zero_sections_clamps_to_one() {
        let slides = SlideController::new(0);
        assert_eq!(slides.section_count(), 1);
        assert_eq!(slides.cursor(), 0);
    }

    #[test]
    fn test_jump_to() {
        let mut slides = SlideController::new(5);
        slides.jump_to(3);
        assert_eq!(slides.cursor(), 3);
        assert_eq!(slides.advance(), Step::Moved(4));
    }
}

pub mod reader;
pub mod sidebar;
pub mod toc;

use ratatui::layout::Rect;

/// Compute a centered popup area within the given area. Widened to u32 so
/// very wide terminals cannot overflow the percentage multiply.
pub fn centered_popup_area(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (area.width as u32 * width_percent as u32 / 100) as u16;
    let height = (area.height as u32 * height_percent as u32 / 100) as u16;
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;

    Rect::new(x, y, width, height)
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Whether a panel has room for its borders plus some content.
pub fn fits(area: Rect, min_width: u16, min_height: u16) -> bool {
    area.width >= min_width && area.height >= min_height
}

/// Window of `height` rows keeping `selected` in view.
pub fn visible_window(len: usize, selected: usize, height: usize) -> std::ops::Range<usize> {
    if len <= height {
        return 0..len;
    }
    let start = selected.saturating_sub(height / 2).min(len - height);
    start..start + height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_areas_do_not_fit() {
        assert!(!fits(Rect::new(0, 0, 3, 2), 10, 4));
        assert!(fits(Rect::new(0, 0, 10, 4), 10, 4));
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(5, 4, 10), 0..5);
        assert_eq!(visible_window(100, 0, 10), 0..10);
        assert_eq!(visible_window(100, 50, 10), 45..55);
        assert_eq!(visible_window(100, 99, 10), 90..100);
    }
}

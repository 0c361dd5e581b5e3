use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout: the student table above a fixed-height status bar.
pub struct AppLayout;

impl AppLayout {
    /// Returns `[table_area, status_bar_area]`.
    pub fn calculate(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area)
            .to_vec()
    }
}

/// Centered popup rect taking `percent_x` x `percent_y` of `area`.
/// Dialogs render into this over a cleared background.
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

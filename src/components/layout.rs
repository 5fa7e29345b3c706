//! Layout calculations for the UI

use crate::model::ui::Surface;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the file sidebar in the dialog surface
const FILE_SIDEBAR_WIDTH: u16 = 26;

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Rect,
    pub list: Rect,
    pub detail: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Preview modal layout areas
pub struct ModalLayout {
    /// Whole surface, including its border
    pub frame: Rect,
    pub header: Rect,
    pub toolbar: Rect,
    /// File list: a sidebar in the dialog, a tab strip in the drawer
    pub files: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    // Main vertical layout: tabs + content + (optional status) + help bar
    let main_chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area)
    };

    // List on the left, item detail on the right
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    let (status_area, help_area) = if has_status {
        (Some(main_chunks[2]), main_chunks[3])
    } else {
        (None, main_chunks[2])
    };

    MainLayout {
        tabs: main_chunks[0],
        list: horizontal_chunks[0],
        detail: horizontal_chunks[1],
        status: status_area,
        help: help_area,
    }
}

/// Area covered by the modal surface
///
/// The dialog is a centered overlay; the drawer is a bottom sheet spanning
/// the full width that leaves the top few rows of the screen visible.
pub fn surface_area(area: Rect, surface: Surface) -> Rect {
    match surface {
        Surface::Dialog => {
            let width = area.width.saturating_mul(9) / 10;
            let height = area.height.saturating_mul(9) / 10;
            centered_popup(area, width, height)
        }
        Surface::Drawer => {
            let top_gap = (area.height / 10).max(1).min(area.height);
            Rect::new(area.x, area.y + top_gap, area.width, area.height - top_gap)
        }
    }
}

/// Split the inside of a modal surface into its regions
pub fn calculate_modal_layout(area: Rect, surface: Surface) -> ModalLayout {
    let frame = surface_area(area, surface);
    let inner = Rect::new(
        frame.x.saturating_add(1),
        frame.y.saturating_add(1),
        frame.width.saturating_sub(2),
        frame.height.saturating_sub(2),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let (files, body) = match surface {
        Surface::Dialog => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(FILE_SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(rows[2]);
            (columns[0], columns[1])
        }
        Surface::Drawer => {
            let strip = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(rows[2]);
            (strip[0], strip[1])
        }
    };

    ModalLayout {
        frame,
        header: rows[0],
        toolbar: rows[1],
        files,
        body,
        footer: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_clamps() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_popup(area, 40, 7), Rect::new(0, 1, 30, 7));
    }

    #[test]
    fn test_drawer_spans_full_width_at_bottom() {
        let area = Rect::new(0, 0, 80, 40);
        let drawer = surface_area(area, Surface::Drawer);
        assert_eq!(drawer.width, 80);
        assert_eq!(drawer.y + drawer.height, 40);
        assert!(drawer.y > 0);
    }

    #[test]
    fn test_dialog_is_centered() {
        let area = Rect::new(0, 0, 120, 40);
        let dialog = surface_area(area, Surface::Dialog);
        assert_eq!(dialog, Rect::new(6, 2, 108, 36));
    }

    #[test]
    fn test_file_list_placement_depends_on_surface() {
        let area = Rect::new(0, 0, 120, 40);

        let dialog = calculate_modal_layout(area, Surface::Dialog);
        assert_eq!(dialog.files.width, FILE_SIDEBAR_WIDTH);
        assert_eq!(dialog.files.y, dialog.body.y);

        let drawer = calculate_modal_layout(area, Surface::Drawer);
        assert_eq!(drawer.files.height, 2);
        assert_eq!(drawer.files.width, drawer.body.width);
        assert!(drawer.body.y > drawer.files.y);
    }
}

//! Simulated device frames for dashboard previews

use ratatui::layout::Rect;

/// Simulated device width for a dashboard preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceMode {
    pub fn all() -> [DeviceMode; 3] {
        [DeviceMode::Desktop, DeviceMode::Tablet, DeviceMode::Mobile]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceMode::Desktop => "Desktop",
            DeviceMode::Tablet => "Tablet",
            DeviceMode::Mobile => "Mobile",
        }
    }

    /// Fixed (width, height) in cells, or `None` to fill the available area
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        match self {
            DeviceMode::Desktop => None,
            DeviceMode::Tablet => Some((64, 30)),
            DeviceMode::Mobile => Some((36, 26)),
        }
    }

    pub fn next(&self) -> DeviceMode {
        match self {
            DeviceMode::Desktop => DeviceMode::Tablet,
            DeviceMode::Tablet => DeviceMode::Mobile,
            DeviceMode::Mobile => DeviceMode::Desktop,
        }
    }

    /// Size and center the device frame inside `area`
    pub fn frame(&self, area: Rect) -> Rect {
        match self.dimensions() {
            None => area,
            Some((width, height)) => {
                let width = width.min(area.width);
                let height = height.min(area.height);
                Rect::new(
                    area.x + (area.width - width) / 2,
                    area.y + (area.height - height) / 2,
                    width,
                    height,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_fills_area() {
        let area = Rect::new(2, 3, 120, 40);
        assert_eq!(DeviceMode::Desktop.frame(area), area);
    }

    #[test]
    fn test_mobile_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let frame = DeviceMode::Mobile.frame(area);
        assert_eq!(frame, Rect::new(32, 7, 36, 26));
    }

    #[test]
    fn test_frame_clamped_to_area() {
        let area = Rect::new(5, 5, 40, 20);
        let frame = DeviceMode::Tablet.frame(area);
        assert_eq!(frame, Rect::new(5, 5, 40, 20));
    }
}

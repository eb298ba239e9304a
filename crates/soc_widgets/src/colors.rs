use egui::Color32;
use serde::{Deserialize, Serialize};

/// Named palette shared by cards, badges, buttons and log rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Critical,
    High,
    Normal,
    Safe,
    Blue,
    LightBlue,
    Purple,
    Slate,
}

impl StatusColor {
    pub const fn color32(self) -> Color32 {
        match self {
            StatusColor::Critical => Color32::from_rgb(0xEF, 0x44, 0x44),
            StatusColor::High => Color32::from_rgb(0xF9, 0x73, 0x16),
            StatusColor::Normal => Color32::from_rgb(0xF5, 0x9E, 0x0B),
            StatusColor::Safe => Color32::from_rgb(0x22, 0xC5, 0x5E),
            StatusColor::Blue => Color32::from_rgb(0x60, 0xA5, 0xFA),
            StatusColor::LightBlue => Color32::from_rgb(0x93, 0xC5, 0xFD),
            StatusColor::Purple => Color32::from_rgb(0x93, 0x33, 0xEA),
            StatusColor::Slate => Color32::from_rgb(0x47, 0x55, 0x69),
        }
    }

    /// Translucent variant for backgrounds behind text of this color.
    pub fn tint(self, alpha: u8) -> Color32 {
        let c = self.color32();
        Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha)
    }
}

impl From<StatusColor> for Color32 {
    fn from(c: StatusColor) -> Self {
        c.color32()
    }
}

use eframe::egui::{Color32, Painter, Rect};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(9, 11, 18);
pub(super) const LINK_STROKE_HEX: &str = "#37ff1430";

/// Converts a palette entry to a color; malformed entries render gray.
pub(super) fn hex_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
}

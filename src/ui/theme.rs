use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use stretch_planner::schedule::ColorToken;

/// Accent used for selection, today's column and the reminder panel
pub const ACCENT: Color32 = Color32::from_rgb(19, 152, 244);

/// Fill colors for `category-1` through `category-8`
const CATEGORY_PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x13, 0x98, 0xf4), // blue
    Color32::from_rgb(0xe8, 0x28, 0x71), // pink
    Color32::from_rgb(0xe5, 0xaa, 0x00), // gold
    Color32::from_rgb(0x65, 0xba, 0x43), // green
    Color32::from_rgb(0x90, 0x4e, 0xe2), // purple
    Color32::from_rgb(0xec, 0x71, 0x1b), // orange
    Color32::from_rgb(0x1c, 0xb5, 0xa3), // teal
    Color32::from_rgb(0xe5, 0x4d, 0x42), // red
];

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor Regular icons as fallback in the Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();

    // Background colors - pure black
    let bg = Color32::BLACK;
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(20, 20, 18);
    visuals.extreme_bg_color = bg;

    // Widget colors - warm grays (R=G > B for warmth)
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(40, 40, 38);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 168));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(56, 56, 52);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 200, 192));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(80, 80, 74);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.hyperlink_color = ACCENT;

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    let size = 14.0;
    style.text_styles = [
        (TextStyle::Small, FontId::new(size - 2.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(size, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(size, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(size + 4.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(size, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(24.0);

    ctx.set_style(style);
}

pub fn category_color(token: ColorToken) -> Color32 {
    let index = (token.index().max(1) - 1) as usize % CATEGORY_PALETTE.len();
    CATEGORY_PALETTE[index]
}

/// Returns (grid_line, header_text, muted_text)
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x40, 0x40, 0x3c),
        Color32::from_rgb(0xb0, 0xb0, 0xa8),
        Color32::from_rgb(0x70, 0x70, 0x68),
    )
}

/// Returns (bg_color, text_color, secondary_text_color) for block cards
pub fn block_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x1c, 0x1c, 0x1a),
        Color32::WHITE,
        Color32::from_rgb(208, 208, 200),
    )
}

/// Dim background for the current day column
pub fn today_fill() -> Color32 {
    Color32::from_rgb(0x11, 0x11, 0x10)
}

// crates/livewall-ui/src/theme.rs
use egui::{Color32, Context, CornerRadius, Stroke, Style, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb(255,  51,  85);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb(150,  28,  52);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb(255, 110, 135);

pub const BG_0:          Color32 = Color32::from_rgb( 13,  12,  18);
pub const BG_1:          Color32 = Color32::from_rgb( 19,  18,  26);
pub const BG_2:          Color32 = Color32::from_rgb( 27,  26,  36);
pub const BG_3:          Color32 = Color32::from_rgb( 38,  36,  50);

pub const TEXT:          Color32 = Color32::from_rgb(226, 224, 236);
pub const TEXT_DIM:      Color32 = Color32::from_rgb(124, 120, 142);
pub const BORDER:        Color32 = Color32::from_rgb( 58,  55,  74);

/// Badges and status text.
pub const OK:            Color32 = Color32::from_rgb( 90, 196, 128);
pub const WARN:          Color32 = Color32::from_rgb(240, 176,  64);
pub const ERROR:         Color32 = Color32::from_rgb(222,  86,  86);

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();
    style.spacing.item_spacing   = egui::vec2(6.0, 6.0);
    style.spacing.window_margin  = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    let cr = CornerRadius::same(5);

    let mut v = Visuals::dark();
    v.panel_fill       = BG_1;
    v.window_fill      = BG_2;
    v.faint_bg_color   = BG_0;
    v.extreme_bg_color = BG_0;
    v.window_stroke    = Stroke::new(1.0, BORDER);
    v.selection.bg_fill = ACCENT_DIM;
    v.selection.stroke  = Stroke::new(1.0, ACCENT_HOVER);

    let w = &mut v.widgets;
    for (state, fill, stroke, fg) in [
        (&mut w.noninteractive, BG_2,       BORDER,     TEXT_DIM),
        (&mut w.inactive,       BG_3,       BORDER,     TEXT),
        (&mut w.hovered,        BG_3,       ACCENT_DIM, ACCENT_HOVER),
        (&mut w.active,         ACCENT_DIM, ACCENT,     Color32::WHITE),
    ] {
        state.bg_fill       = fill;
        state.weak_bg_fill  = fill;
        state.bg_stroke     = Stroke::new(1.0, stroke);
        state.fg_stroke     = Stroke::new(1.0, fg);
        state.corner_radius = cr;
    }

    v.override_text_color = Some(TEXT);
    style.visuals = v;

    // Dark only, so an OS light/dark switch never swaps this palette out.
    ctx.set_style_of(egui::Theme::Dark, style);
    ctx.options_mut(|o| o.theme_preference = egui::ThemePreference::Dark);
}
